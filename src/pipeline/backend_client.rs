//! HTTP client for the translation backend
//!
//! Used by the terminal UI in remote mode to reach `POST /translate` and
//! `POST /response` on a running backend.

use crate::core::constants::route;
use crate::models::query::{ReplyResponse, ResponseRequest, TranslateRequest, TranslateResponse};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Error types for backend calls
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no backend configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for a remote backend instance
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for `base_url` with a per-request timeout in seconds
    pub fn new(base_url: &str, timeout: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate `text` on the backend
    pub async fn translate(
        &self,
        text: &str,
        target_language: Option<&str>,
    ) -> Result<String, BackendError> {
        let body = TranslateRequest {
            text: text.to_string(),
            target_language: target_language.map(str::to_string),
        };
        let response: TranslateResponse = self.post(route::TRANSLATE, &body).await?;
        Ok(response.translated_text)
    }

    /// Ask the backend for a suggested reply
    pub async fn respond(
        &self,
        translated_text: &str,
        name: &str,
        temperature: Option<f32>,
    ) -> Result<String, BackendError> {
        let body = ResponseRequest {
            translated_text: translated_text.to_string(),
            name: name.to_string(),
            temperature,
        };
        let response: ReplyResponse = self.post(route::RESPONSE, &body).await?;
        Ok(response.reply)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = BackendClient::new("http://localhost:8000/", 10).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_error_status_is_reported_with_body() {
        let app = Router::new().route(
            route::TRANSLATE,
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = BackendClient::new(&format!("http://{}", addr), 5).unwrap();
        let result = client.translate("Hola", None).await;
        match result {
            Err(BackendError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
