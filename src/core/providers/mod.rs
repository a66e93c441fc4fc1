//! Provider implementations

pub mod openai;

pub use openai::OpenAIProvider;

use crate::core::config::Config;
use crate::core::provider::Provider;
use anyhow::Result;
use std::sync::Arc;

/// Build the configured provider, or `None` when no OpenAI key is set
pub fn build_provider(config: &Config) -> Result<Option<Arc<dyn Provider>>> {
    let Some(api_key) = config.openai_api_key.clone() else {
        return Ok(None);
    };

    let provider = OpenAIProvider::new(
        api_key,
        config.openai_base_url.clone(),
        config.request_timeout,
        config.azure_api_version.clone(),
    )?;
    Ok(Some(Arc::new(provider)))
}
