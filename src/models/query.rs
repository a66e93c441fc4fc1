//! Backend request and response bodies

use serde::{Deserialize, Serialize};

/// POST /translate body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

/// POST /translate reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translated_text: String,
}

/// POST /response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRequest {
    pub translated_text: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// POST /response reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    #[serde(default)]
    pub reply: String,
}
