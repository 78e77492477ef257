//! Centralized error handling.
//!
//! Every failure is terminal for its request: the gateway performs no
//! retries, so an error maps directly to one HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Gateway error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty session cookie; rejected before any upstream call.
    #[error("Authentication required")]
    Unauthorized,

    /// Caller sent a request the gateway itself rejects.
    #[error("{0}")]
    BadRequest(String),

    /// Backend replied with a non-2xx status; its status and JSON body
    /// are relayed to the browser unchanged.
    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, body: Value },

    /// Transport failure or malformed upstream payload; the detail is a
    /// generic operation message, the source is logged only.
    #[error("{0}")]
    Operation(String),
}

impl AppError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        AppError::BadRequest(detail.into())
    }

    /// Wrap an unexpected failure with the operation's user-facing message.
    pub fn operation(detail: impl Into<String>, source: impl std::fmt::Display) -> Self {
        let detail = detail.into();
        tracing::error!("{}: {}", detail, source);
        AppError::Operation(detail)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Unauthorized" })),
            )
                .into_response(),
            AppError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            AppError::Upstream { status, body } => (status, Json(body)).into_response(),
            AppError::Operation(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
