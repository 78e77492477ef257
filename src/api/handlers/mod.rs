//! Request handlers.
//!
//! Every handler is a thin proxy: it forwards the call to the backend with
//! the session's bearer token, relays non-2xx responses unchanged, and
//! drives the cache (reads through [`proxy_cached_get`], writes through
//! tag invalidation).

pub mod auth_handler;
pub mod chatbot_handler;
pub mod complaint_handler;
pub mod eda_handler;
pub mod health_handler;
pub mod revalidate_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use chatbot_handler::chatbot_routes;
pub use complaint_handler::complaint_routes;
pub use eda_handler::eda_routes;
pub use health_handler::health_routes;
pub use revalidate_handler::revalidate_routes;
pub use user_handler::user_routes;

use axum::Json;
use serde_json::Value;

use crate::api::middleware::SessionToken;
use crate::api::state::AppState;
use crate::cache::ReadCategory;
use crate::errors::{AppError, AppResult};
use crate::upstream::UpstreamResponse;

/// Turn an upstream reply into a handler result, relaying the backend's
/// status code and JSON error body unchanged on failure.
pub(crate) fn relay(response: UpstreamResponse) -> AppResult<Value> {
    if response.status.is_success() {
        Ok(response.body)
    } else {
        Err(AppError::Upstream {
            status: response.status,
            body: response.body,
        })
    }
}

/// Cached read-through proxy for GET endpoints. The full upstream URL is
/// the cache key; the category's directive decides TTL and tags.
pub(crate) async fn proxy_cached_get(
    state: &AppState,
    token: &SessionToken,
    category: ReadCategory,
    path: &str,
    query: &[(&str, String)],
    failure: &str,
) -> AppResult<Json<Value>> {
    let url = state
        .backend
        .url_with_query(path, query)
        .map_err(|e| AppError::operation(failure, e))?;
    let key = url.as_str().to_string();

    if let Some(body) = state.cache.get(&key) {
        tracing::debug!(category = category.as_str(), %key, "cache hit");
        return Ok(Json(body));
    }

    let response = state
        .backend
        .get(url, &token.0)
        .await
        .map_err(|e| AppError::operation(failure, e))?;
    let body = relay(response)?;

    let directive = state.registry.cache_options(category);
    state.cache.insert(key, body.clone(), &directive);
    Ok(Json(body))
}
