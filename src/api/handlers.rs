//! HTTP request handlers

use super::types::{ErrorResponse, RequestEnvelope, ResponseEnvelope};
use super::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Skill endpoint
        .route("/skill", post(handle_skill))
        // Liveness
        .route("/health", get(health))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Skill Events
// ============================================================

async fn handle_skill(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let event = envelope.to_event().map_err(AppError::BadRequest)?;
    let session_attributes = envelope
        .session_attributes()
        .map_err(AppError::BadRequest)?;

    tracing::debug!(
        request_id = envelope.request.request_id.as_deref().unwrap_or_default(),
        session_id = envelope
            .session
            .as_ref()
            .and_then(|s| s.session_id.as_deref())
            .unwrap_or_default(),
        request = %event.label(),
        "Skill event received"
    );

    let reply = state
        .runtime
        .handle_event(&event, session_attributes)
        .await;

    Ok(Json(ResponseEnvelope::new(reply.session, reply.response)))
}

// ============================================================
// Health and Version
// ============================================================

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_version() -> &'static str {
    concat!("spelling-bee ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        tracing::warn!(status = %status, error = %message, "Rejected skill envelope");
        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
