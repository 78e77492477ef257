//! Health check handler.

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::api::state::AppState;

/// Create health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
