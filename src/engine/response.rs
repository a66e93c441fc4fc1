//! Response generator
//!
//! Drafts suggested replies to translated customer messages.

use crate::core::config::Config;
use crate::core::provider::Provider;
use crate::engine::EngineError;
use crate::engine::prompts::{canned_reply, reply_prompt};
use crate::models::openai::{OpenAIChatCompletionRequest, OpenAIMessage};
use std::sync::Arc;
use tracing::warn;

pub struct ResponseGenerator {
    provider: Option<Arc<dyn Provider>>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ResponseGenerator {
    pub fn new(config: &Config, provider: Option<Arc<dyn Provider>>) -> Self {
        Self {
            provider,
            model: config.response_model.clone(),
            max_tokens: config.response_max_tokens,
            temperature: config.response_temperature,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Canned template reply quoting the start of the message
    pub fn generate_local_reply(&self, translated_text: &str, name: &str) -> String {
        canned_reply(translated_text, name)
    }

    /// Generate a reply through the hosted model
    ///
    /// `temperature` overrides the configured default when given.
    pub async fn generate_openai_reply(
        &self,
        translated_text: &str,
        name: &str,
        temperature: Option<f32>,
    ) -> Result<String, EngineError> {
        let provider = self.provider.as_ref().ok_or(EngineError::NotConfigured)?;

        let request = OpenAIChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage::user(reply_prompt(translated_text, name))],
            max_tokens: Some(self.max_tokens),
            temperature: Some(temperature.unwrap_or(self.temperature).clamp(0.0, 1.0)),
        };

        let response = provider.create_chat_completion(&request).await?;
        response.first_text().ok_or(EngineError::EmptyCompletion)
    }

    /// Generate a reply through the hosted model, canned on any failure
    pub async fn generate(
        &self,
        translated_text: &str,
        name: &str,
        temperature: Option<f32>,
    ) -> String {
        match self
            .generate_openai_reply(translated_text, name, temperature)
            .await
        {
            Ok(reply) => reply,
            Err(EngineError::NotConfigured) => self.generate_local_reply(translated_text, name),
            Err(e) => {
                warn!("Model reply failed, using canned reply: {}", e);
                self.generate_local_reply(translated_text, name)
            }
        }
    }
}
