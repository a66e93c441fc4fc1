//! API endpoint handlers
//!
//! This module implements the HTTP backend: translation, reply generation,
//! a service banner and a health check.

use crate::core::config::Config;
use crate::core::constants::route;
use crate::engine::{ResponseGenerator, TranslationEngine};
use crate::models::query::{ReplyResponse, ResponseRequest, TranslateRequest, TranslateResponse};
use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<TranslationEngine>,
    pub generator: Arc<ResponseGenerator>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(route::TRANSLATE, post(translate))
        .route(route::RESPONSE, post(response))
        .route(route::HEALTH, get(health_check))
        .with_state(state)
}

/// POST /translate - Translate a customer query
///
/// Uses the hosted model when configured and the local placeholder otherwise.
async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Json<TranslateResponse> {
    let request_id = uuid::Uuid::new_v4();
    info!(
        "📥 Translate request {}: chars={}, target={:?}",
        request_id,
        request.text.chars().count(),
        request.target_language
    );

    let translated_text = state
        .translator
        .translate(&request.text, request.target_language.as_deref())
        .await;

    debug!("Translate request {} done", request_id);
    Json(TranslateResponse { translated_text })
}

/// POST /response - Draft a reply to a translated query
///
/// Falls back to the canned template when the model is unavailable.
async fn response(
    State(state): State<AppState>,
    Json(request): Json<ResponseRequest>,
) -> Json<ReplyResponse> {
    let request_id = uuid::Uuid::new_v4();
    info!(
        "📥 Response request {}: chars={}, named={}",
        request_id,
        request.translated_text.chars().count(),
        !request.name.trim().is_empty()
    );

    let reply = state
        .generator
        .generate(&request.translated_text, &request.name, request.temperature)
        .await;

    debug!("Response request {} done", request_id);
    Json(ReplyResponse { reply })
}

/// GET / - Root endpoint
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": format!("Multilingual Query Handler v{}", env!("CARGO_PKG_VERSION")),
        "status": "running",
        "config": {
            "openai_base_url": state.config.openai_base_url,
            "api_key_configured": state.config.has_openai_key(),
            "translation_model": state.config.translation_model,
            "response_model": state.config.response_model,
            "target_language": state.config.target_language,
        },
        "endpoints": {
            "translate": route::TRANSLATE,
            "response": route::RESPONSE,
            "health": route::HEALTH,
        },
    }))
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "openai_api_configured": state.config.has_openai_key(),
        "translation_model_available": state.translator.has_provider(),
        "response_model_available": state.generator.has_provider(),
    }))
}
