//! Translation engine
//!
//! Translates customer queries through the hosted model, with an identity
//! placeholder used when the model is unavailable.

use crate::core::config::Config;
use crate::core::provider::Provider;
use crate::engine::EngineError;
use crate::engine::prompts::translation_prompt;
use crate::models::openai::{OpenAIChatCompletionRequest, OpenAIMessage};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct TranslationEngine {
    provider: Option<Arc<dyn Provider>>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    target_language: String,
}

impl TranslationEngine {
    /// Create an engine using the model settings from `config`
    pub fn new(config: &Config, provider: Option<Arc<dyn Provider>>) -> Self {
        Self {
            provider,
            model: config.translation_model.clone(),
            max_tokens: config.translation_max_tokens,
            temperature: config.translation_temperature,
            target_language: config.target_language.clone(),
        }
    }

    /// Whether a hosted model is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Placeholder translation: returns the input unchanged
    ///
    /// A local model can be slotted in here without touching callers.
    pub fn translate_local(&self, text: &str) -> String {
        text.to_string()
    }

    /// Translate through the hosted model
    ///
    /// # Errors
    ///
    /// `EngineError::NotConfigured` without an API key, otherwise provider
    /// failures and empty completions.
    pub async fn translate_openai(
        &self,
        text: &str,
        target_language: Option<&str>,
    ) -> Result<String, EngineError> {
        let provider = self.provider.as_ref().ok_or(EngineError::NotConfigured)?;
        let target = target_language
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.target_language);

        let request = OpenAIChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage::user(translation_prompt(text, target))],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        };

        debug!("Translating {} chars into {}", text.chars().count(), target);

        let response = provider.create_chat_completion(&request).await?;
        response.first_text().ok_or(EngineError::EmptyCompletion)
    }

    /// Translate through the hosted model, falling back to the placeholder
    pub async fn translate(&self, text: &str, target_language: Option<&str>) -> String {
        if text.trim().is_empty() {
            return self.translate_local(text);
        }

        match self.translate_openai(text, target_language).await {
            Ok(translated) => translated,
            Err(EngineError::NotConfigured) => self.translate_local(text),
            Err(e) => {
                warn!("Model translation failed, using local fallback: {}", e);
                self.translate_local(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::StubProvider;

    fn engine(provider: Option<Arc<StubProvider>>) -> TranslationEngine {
        TranslationEngine::new(
            &Config::default(),
            provider.map(|p| p as Arc<dyn Provider>),
        )
    }

    #[test]
    fn test_local_is_identity() {
        assert_eq!(engine(None).translate_local("Bonjour"), "Bonjour");
    }

    #[tokio::test]
    async fn test_missing_key_fails_with_not_configured() {
        let result = engine(None).translate_openai("Bonjour", None).await;
        assert!(matches!(result, Err(EngineError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_openai_translation_uses_prompt_and_settings() {
        let stub = Arc::new(StubProvider::replying("  Hello  "));
        let engine = engine(Some(stub.clone()));

        let translated = engine.translate_openai("Bonjour", Some("English")).await;
        assert_eq!(translated.unwrap(), "Hello");

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].max_tokens, Some(1024));
        assert_eq!(requests[0].temperature, Some(0.0));
        let prompt = requests[0].messages[0].content.clone().unwrap();
        assert!(prompt.contains("Text:\nBonjour"));
    }

    #[tokio::test]
    async fn test_default_target_language() {
        let stub = Arc::new(StubProvider::replying("Hola"));
        let engine = engine(Some(stub.clone()));
        engine.translate_openai("Hello", None).await.unwrap();
        assert!(stub.last_prompt().unwrap().contains("Translate into English:"));
    }

    #[tokio::test]
    async fn test_blank_target_language_uses_default() {
        let stub = Arc::new(StubProvider::replying("Hello"));
        let engine = engine(Some(stub.clone()));
        engine.translate_openai("Hola", Some("  ")).await.unwrap();
        assert!(stub.last_prompt().unwrap().ends_with("Translate into English:"));
    }

    #[tokio::test]
    async fn test_translate_falls_back_on_provider_error() {
        let engine = engine(Some(Arc::new(StubProvider::failing(500))));
        assert_eq!(engine.translate("Guten Tag", None).await, "Guten Tag");
    }

    #[tokio::test]
    async fn test_translate_falls_back_on_empty_completion() {
        let engine = engine(Some(Arc::new(StubProvider::replying("   "))));
        assert_eq!(engine.translate("Ciao", None).await, "Ciao");
    }

    #[tokio::test]
    async fn test_blank_text_skips_provider() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let engine = engine(Some(stub.clone()));
        assert_eq!(engine.translate("  ", None).await, "  ");
        assert!(stub.requests.lock().unwrap().is_empty());
    }
}
