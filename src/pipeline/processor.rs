//! Query processor
//!
//! Runs one customer query through language detection, translation and
//! optional reply generation, choosing between the remote backend, the hosted
//! model and the local placeholders according to [`ProcessOptions`].

use crate::engine::language::detect_language;
use crate::engine::{ResponseGenerator, TranslationEngine};
use crate::pipeline::backend_client::{BackendClient, BackendError};
use crate::pipeline::options::{BackendMode, ProcessOptions, ResponseMode, TranslationBackend};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Please paste a message to translate.")]
    EmptyQuery,
}

/// Result of processing one query
///
/// Failures are carried as messages so the UI can show partial results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutcome {
    pub detected_language: String,
    pub translated: String,
    pub translate_error: Option<String>,
    pub suggested: String,
    pub generation_error: Option<String>,
}

pub struct QueryProcessor {
    translator: Arc<TranslationEngine>,
    generator: Arc<ResponseGenerator>,
    backend: Option<BackendClient>,
}

impl QueryProcessor {
    pub fn new(
        translator: Arc<TranslationEngine>,
        generator: Arc<ResponseGenerator>,
        backend: Option<BackendClient>,
    ) -> Self {
        Self {
            translator,
            generator,
            backend,
        }
    }

    /// Backend URL used in remote mode, if any
    pub fn backend_url(&self) -> Option<&str> {
        self.backend.as_ref().map(BackendClient::base_url)
    }

    pub fn has_openai(&self) -> bool {
        self.translator.has_provider()
    }

    /// Detect, translate and optionally draft a reply for `text`
    ///
    /// # Errors
    ///
    /// `QueryError::EmptyQuery` when `text` is blank
    pub async fn process(
        &self,
        text: &str,
        name: &str,
        options: &ProcessOptions,
    ) -> Result<QueryOutcome, QueryError> {
        if text.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let mut outcome = QueryOutcome {
            detected_language: detect_language(text),
            ..Default::default()
        };
        debug!("Detected language: {}", outcome.detected_language);

        let (translated, translate_error) = self.translate_step(text, options).await;
        outcome.translated = translated;
        outcome.translate_error = translate_error;

        if !outcome.translated.is_empty() && options.generate_reply {
            let (suggested, generation_error) =
                self.reply_step(&outcome.translated, name, options).await;
            outcome.suggested = suggested;
            outcome.generation_error = generation_error;
        }

        info!(
            "Processed query: language={}, translated={}, suggested={}",
            outcome.detected_language,
            !outcome.translated.is_empty(),
            !outcome.suggested.is_empty()
        );
        Ok(outcome)
    }

    async fn translate_step(&self, text: &str, options: &ProcessOptions) -> (String, Option<String>) {
        let has_key = self.translator.has_provider();

        match options.backend {
            BackendMode::Remote => match self.remote_translate(text, options).await {
                Ok(translated) => (translated, None),
                Err(e) => {
                    let remote_error = format!("Remote translation failed: {}", e);
                    warn!("{}", remote_error);

                    let fallback = match options.translation_backend {
                        TranslationBackend::Local => Ok(self.translator.translate_local(text)),
                        _ if has_key => self.openai_translate(text, options).await,
                        _ => Ok(self.translator.translate_local(text)),
                    };
                    match fallback {
                        Ok(translated) => (translated, Some(remote_error)),
                        Err(message) => (String::new(), Some(message)),
                    }
                }
            },
            BackendMode::Local => {
                let result = if options.translation_backend == TranslationBackend::OpenAI && has_key
                {
                    self.openai_translate(text, options).await
                } else {
                    Ok(self.translator.translate_local(text))
                };
                match result {
                    Ok(translated) => (translated, None),
                    Err(message) => (String::new(), Some(message)),
                }
            }
        }
    }

    async fn reply_step(
        &self,
        translated: &str,
        name: &str,
        options: &ProcessOptions,
    ) -> (String, Option<String>) {
        let has_key = self.generator.has_provider();

        let result = match (options.response_mode, options.backend) {
            (ResponseMode::Canned, _) => Ok(self.generator.generate_local_reply(translated, name)),
            (ResponseMode::Ai, BackendMode::Remote) => {
                match self.remote_reply(translated, name, options).await {
                    Ok(reply) => Ok(reply),
                    Err(e) => {
                        warn!("Remote response generation failed: {}", e);
                        if has_key {
                            self.openai_reply(translated, name, options).await
                        } else {
                            Ok(self.generator.generate_local_reply(translated, name))
                        }
                    }
                }
            }
            (ResponseMode::Ai, BackendMode::Local) => {
                if options.translation_backend == TranslationBackend::OpenAI && has_key {
                    self.openai_reply(translated, name, options).await
                } else {
                    Ok(self.generator.generate_local_reply(translated, name))
                }
            }
        };

        match result {
            Ok(reply) => (reply, None),
            Err(message) => (String::new(), Some(message)),
        }
    }

    async fn remote_translate(
        &self,
        text: &str,
        options: &ProcessOptions,
    ) -> Result<String, BackendError> {
        let backend = self.backend.as_ref().ok_or(BackendError::NotConfigured)?;
        backend
            .translate(text, Some(options.target_language.as_str()))
            .await
    }

    async fn remote_reply(
        &self,
        translated: &str,
        name: &str,
        options: &ProcessOptions,
    ) -> Result<String, BackendError> {
        let backend = self.backend.as_ref().ok_or(BackendError::NotConfigured)?;
        backend
            .respond(translated, name, Some(options.temperature))
            .await
    }

    async fn openai_translate(&self, text: &str, options: &ProcessOptions) -> Result<String, String> {
        self.translator
            .translate_openai(text, Some(options.target_language.as_str()))
            .await
            .map_err(|e| format!("OpenAI translation failed: {}", e))
    }

    async fn openai_reply(
        &self,
        translated: &str,
        name: &str,
        options: &ProcessOptions,
    ) -> Result<String, String> {
        self.generator
            .generate_openai_reply(translated, name, Some(options.temperature))
            .await
            .map_err(|e| format!("OpenAI response generation failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::{AppState, create_router};
    use crate::core::config::Config;
    use crate::core::provider::Provider;
    use crate::engine::testing::StubProvider;

    fn options(backend: BackendMode, translation_backend: TranslationBackend) -> ProcessOptions {
        ProcessOptions {
            backend,
            translation_backend,
            response_mode: ResponseMode::Ai,
            temperature: 0.2,
            generate_reply: true,
            target_language: "English".to_string(),
        }
    }

    fn processor(
        provider: Option<Arc<StubProvider>>,
        backend: Option<BackendClient>,
    ) -> QueryProcessor {
        let config = Config::default();
        let provider = provider.map(|p| p as Arc<dyn Provider>);
        QueryProcessor::new(
            Arc::new(TranslationEngine::new(&config, provider.clone())),
            Arc::new(ResponseGenerator::new(&config, provider)),
            backend,
        )
    }

    /// Serve a backend on an ephemeral port and return its client
    async fn spawn_backend(provider: Arc<StubProvider>) -> BackendClient {
        let config = Config::default();
        let provider = Some(provider as Arc<dyn Provider>);
        let state = AppState {
            config: Arc::new(config.clone()),
            translator: Arc::new(TranslationEngine::new(&config, provider.clone())),
            generator: Arc::new(ResponseGenerator::new(&config, provider)),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });
        BackendClient::new(&format!("http://{}", addr), 5).unwrap()
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let result = processor(None, None)
            .process("  \n", "", &options(BackendMode::Local, TranslationBackend::Auto))
            .await;
        assert!(matches!(result, Err(QueryError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_local_without_key_uses_placeholders() {
        let outcome = processor(None, None)
            .process(
                "Necesito ayuda con mi factura",
                "Lucia",
                &options(BackendMode::Local, TranslationBackend::Auto),
            )
            .await
            .unwrap();

        assert_eq!(outcome.translated, "Necesito ayuda con mi factura");
        assert!(outcome.translate_error.is_none());
        assert!(outcome.suggested.starts_with("Hi Lucia, thanks for reaching out."));
        assert!(outcome.generation_error.is_none());
    }

    #[tokio::test]
    async fn test_local_auto_ignores_key() {
        let stub = Arc::new(StubProvider::replying("Hello"));
        let outcome = processor(Some(stub.clone()), None)
            .process("Hallo", "", &options(BackendMode::Local, TranslationBackend::Auto))
            .await
            .unwrap();
        assert_eq!(outcome.translated, "Hallo");
        assert!(stub.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_local_openai_uses_model_for_both_steps() {
        let stub = Arc::new(StubProvider::replying("Hello"));
        let outcome = processor(Some(stub.clone()), None)
            .process("Hallo", "", &options(BackendMode::Local, TranslationBackend::OpenAI))
            .await
            .unwrap();
        assert_eq!(outcome.translated, "Hello");
        assert_eq!(outcome.suggested, "Hello");
        assert_eq!(stub.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_local_openai_failure_is_reported() {
        let stub = Arc::new(StubProvider::failing(401));
        let outcome = processor(Some(stub), None)
            .process("Hallo", "", &options(BackendMode::Local, TranslationBackend::OpenAI))
            .await
            .unwrap();
        assert!(outcome.translated.is_empty());
        assert!(
            outcome
                .translate_error
                .as_deref()
                .unwrap()
                .starts_with("OpenAI translation failed: Authentication failed")
        );
        assert!(outcome.suggested.is_empty());
        assert!(outcome.generation_error.is_none());
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let outcome = processor(None, None)
            .process("Bonjour", "", &options(BackendMode::Remote, TranslationBackend::Auto))
            .await
            .unwrap();
        assert_eq!(outcome.translated, "Bonjour");
        assert!(
            outcome
                .translate_error
                .as_deref()
                .unwrap()
                .starts_with("Remote translation failed")
        );
        assert!(outcome.suggested.starts_with("Hi Customer,"));
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_openai_when_keyed() {
        let stub = Arc::new(StubProvider::replying("Good morning"));
        let outcome = processor(Some(stub), None)
            .process("Bonjour", "", &options(BackendMode::Remote, TranslationBackend::Auto))
            .await
            .unwrap();
        assert_eq!(outcome.translated, "Good morning");
        assert_eq!(outcome.suggested, "Good morning");
        assert!(outcome.translate_error.is_some());
    }

    #[tokio::test]
    async fn test_remote_and_openai_failure_reports_openai_error() {
        let stub = Arc::new(StubProvider::failing(500));
        let outcome = processor(Some(stub), None)
            .process("Bonjour", "", &options(BackendMode::Remote, TranslationBackend::Auto))
            .await
            .unwrap();
        assert!(outcome.translated.is_empty());
        let message = outcome.translate_error.as_deref().unwrap();
        assert!(message.starts_with("OpenAI translation failed: "));
        assert!(!message.contains("Remote translation failed"));
    }

    #[tokio::test]
    async fn test_remote_failure_with_local_backend_ignores_key() {
        let stub = Arc::new(StubProvider::replying("Good morning"));
        let mut options = options(BackendMode::Remote, TranslationBackend::Local);
        options.generate_reply = false;

        let outcome = processor(Some(stub.clone()), None)
            .process("Bonjour", "", &options)
            .await
            .unwrap();
        assert_eq!(outcome.translated, "Bonjour");
        assert!(
            outcome
                .translate_error
                .as_deref()
                .unwrap()
                .starts_with("Remote translation failed")
        );
        assert!(stub.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_backend_round_trip() {
        let server_stub = Arc::new(StubProvider::replying("Where is my order?"));
        let backend = spawn_backend(server_stub.clone()).await;

        let outcome = processor(None, Some(backend))
            .process(
                "¿Dónde está mi pedido?",
                "Ana",
                &options(BackendMode::Remote, TranslationBackend::Auto),
            )
            .await
            .unwrap();

        assert_eq!(outcome.translated, "Where is my order?");
        assert_eq!(outcome.suggested, "Where is my order?");
        assert!(outcome.translate_error.is_none());
        assert!(outcome.generation_error.is_none());
        assert_eq!(server_stub.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_canned_mode_skips_model() {
        let stub = Arc::new(StubProvider::replying("Hello"));
        let mut opts = options(BackendMode::Local, TranslationBackend::OpenAI);
        opts.response_mode = ResponseMode::Canned;

        let outcome = processor(Some(stub.clone()), None)
            .process("Hallo", "", &opts)
            .await
            .unwrap();
        assert_eq!(outcome.translated, "Hello");
        assert!(outcome.suggested.starts_with("Hi Customer,"));
        assert_eq!(stub.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_not_requested() {
        let mut opts = options(BackendMode::Local, TranslationBackend::Local);
        opts.generate_reply = false;
        let outcome = processor(None, None).process("Hej", "", &opts).await.unwrap();
        assert_eq!(outcome.translated, "Hej");
        assert!(outcome.suggested.is_empty());
    }
}
