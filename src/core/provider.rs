//! Provider abstraction for hosted chat-completion APIs
//!
//! The translation engine and response generator talk to a model through this
//! trait, so the OpenAI implementation can be swapped for a local model or a
//! test double.

use crate::models::openai::{OpenAIChatCompletionRequest, OpenAIChatCompletionResponse};
use async_trait::async_trait;
use thiserror::Error;

/// Error types for provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ProviderError {
    /// Map an upstream HTTP status and classified message to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::Authentication(message),
            429 => ProviderError::RateLimit(message),
            400 => ProviderError::BadRequest(message),
            _ => ProviderError::ApiError { status, message },
        }
    }
}

/// Trait for chat-completion providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send a non-streaming chat completion request
    async fn create_chat_completion(
        &self,
        request: &OpenAIChatCompletionRequest,
    ) -> Result<OpenAIChatCompletionResponse, ProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
