//! Route handler functions for all API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dost_chat::{ChatReply, ChatRequest, Message};
use dost_core::Language;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Query parameter types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct WelcomeParams {
    pub language: Option<Language>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Number of knowledge-base categories loaded.
    pub categories: usize,
    pub started_at: DateTime<Utc>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /chat - answer one utterance from the local knowledge base.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let trimmed = request.message.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    let max_chars = state.config.max_message_chars;
    let length = trimmed.chars().count();
    if length > max_chars {
        return Err(ApiError::BadRequest(format!(
            "Message is {} characters, limit is {}",
            length, max_chars
        )));
    }

    let resolution = state
        .resolver
        .resolve_detailed(&request.message, request.language);
    tracing::debug!(
        language = %request.language,
        kind = ?resolution.kind,
        chars = length,
        "Chat request answered"
    );

    Ok(Json(ChatReply {
        answer: resolution.text,
    }))
}

/// GET /chat/welcome - opening line in the requested language.
pub async fn welcome(Query(params): Query<WelcomeParams>) -> Json<ChatReply> {
    let language = params.language.unwrap_or_default();
    Json(ChatReply {
        answer: Message::Welcome.text(language).to_string(),
    })
}

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        categories: state.resolver.knowledge().len(),
        started_at: state.started_at,
    })
}
