//! Translation and reply wrappers around a chat-completion provider
//!
//! Both wrappers forward text to the configured [`Provider`] and fall back to
//! a local placeholder (identity translation, canned reply) when no provider
//! is configured or the call fails.
//!
//! [`Provider`]: crate::core::provider::Provider

pub mod language;
pub mod prompts;
pub mod response;
pub mod translation;

pub use response::ResponseGenerator;
pub use translation::TranslationEngine;

use crate::core::provider::ProviderError;
use thiserror::Error;

/// Errors raised by the model-backed wrapper calls
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("OpenAI key not configured")]
    NotConfigured,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Model returned an empty completion")]
    EmptyCompletion,
}
