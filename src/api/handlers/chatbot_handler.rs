//! Chatbot handler.

use axum::{
    extract::{Extension, State},
    http::Method,
    response::Json,
    routing::post,
    Router,
};
use serde_json::Value;

use crate::api::middleware::SessionToken;
use crate::api::state::AppState;
use crate::errors::{AppError, AppResult};

use super::relay;

/// Create chatbot routes
pub fn chatbot_routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

/// Proxy a chat turn to the backend assistant. Never cached.
#[utoipa::path(
    post,
    path = "/api/v1/chatbot/chat",
    tag = "Chatbot",
    responses(
        (status = 200, description = "Assistant reply"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let response = state
        .backend
        .send_json(Method::POST, "/api/v1/chatbot/chat", &token.0, &payload)
        .await
        .map_err(|e| AppError::operation("Chatbot request failed", e))?;
    Ok(Json(relay(response)?))
}
