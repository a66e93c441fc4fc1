//! OpenAI provider implementation

use crate::core::provider::{Provider, ProviderError};
use crate::models::openai::{OpenAIChatCompletionRequest, OpenAIChatCompletionResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// OpenAI provider (supports OpenAI and Azure OpenAI)
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    api_version: Option<String>,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `base_url` - OpenAI API base URL or Azure endpoint
    /// * `timeout` - Request timeout in seconds
    /// * `api_version` - Optional Azure API version (enables Azure mode)
    pub fn new(
        api_key: String,
        base_url: String,
        timeout: u64,
        api_version: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version,
        })
    }

    /// Chat completions URL for the given model
    fn completions_url(&self, model: &str) -> String {
        match &self.api_version {
            Some(version) => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.base_url, model, version
            ),
            None => format!("{}/chat/completions", self.base_url),
        }
    }

    /// Turn an upstream error body into an actionable message
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("unsupported_country_region_territory")
            || error_lower.contains("country, region, or territory not supported")
        {
            return "OpenAI API is not available in your region. Consider using Azure OpenAI instead.".to_string();
        }

        if error_lower.contains("invalid_api_key") || error_lower.contains("unauthorized") {
            return "Invalid API key. Please check your OPENAI_API_KEY configuration.".to_string();
        }

        if error_lower.contains("rate_limit") || error_lower.contains("quota") {
            return "Rate limit exceeded. Please wait and try again, or upgrade your API plan."
                .to_string();
        }

        if error_lower.contains("model")
            && (error_lower.contains("not found") || error_lower.contains("does not exist"))
        {
            return "Model not found. Please check translation_model and response_model in your configuration."
                .to_string();
        }

        if error_lower.contains("billing") || error_lower.contains("payment") {
            return "Billing issue. Please check your OpenAI account billing status.".to_string();
        }

        error_detail.to_string()
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    async fn create_chat_completion(
        &self,
        request: &OpenAIChatCompletionRequest,
    ) -> Result<OpenAIChatCompletionResponse, ProviderError> {
        let url = self.completions_url(&request.model);

        debug!(
            "Sending chat completion: model={}, messages={}, max_tokens={:?}",
            request.model,
            request.messages.len(),
            request.max_tokens
        );

        let mut req_builder = self.client.post(&url);
        req_builder = match self.api_version {
            Some(_) => req_builder.header("api-key", &self.api_key),
            None => req_builder.bearer_auth(&self.api_key),
        };

        let response = req_builder
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Unexpected(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::from_status(
                status.as_u16(),
                Self::classify_error(&error_text),
            ));
        }

        response
            .json::<OpenAIChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Failed to parse response: {}", e)))
    }

    fn provider_name(&self) -> &str {
        if self.api_version.is_some() {
            "Azure OpenAI"
        } else {
            "OpenAI"
        }
    }
}
