//! Administrative cache revalidation handler.
//!
//! The "force refresh" action in the dashboard posts here to flush caches
//! ahead of their TTLs, either by mutation kind or as an explicit tag list.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::api::middleware::SessionToken;
use crate::api::state::AppState;
use crate::cache::{CacheTag, MutationKind};
use crate::errors::{AppError, AppResult};

/// Revalidation request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct RevalidateRequest {
    /// One of `all`, `user`, `complaint`, or `specific`
    #[serde(rename = "type", default = "default_kind")]
    #[schema(example = "all")]
    pub kind: String,
    /// Tag names, required when `type` is `specific`
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_kind() -> String {
    "all".to_string()
}

/// Create revalidation routes
pub fn revalidate_routes() -> Router<AppState> {
    Router::new().route("/", post(revalidate))
}

/// Force cache invalidation
#[utoipa::path(
    post,
    path = "/api/v1/revalidate",
    tag = "Cache",
    request_body = RevalidateRequest,
    responses(
        (status = 200, description = "Caches invalidated"),
        (status = 400, description = "Invalid revalidation type or tags"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn revalidate(
    State(state): State<AppState>,
    Extension(_token): Extension<SessionToken>,
    Json(request): Json<RevalidateRequest>,
) -> AppResult<Json<Value>> {
    if request.kind == "specific" {
        let tags: Vec<CacheTag> = request
            .tags
            .iter()
            .filter_map(|name| CacheTag::parse(name))
            .collect();
        // Unknown tag names are filtered out; a request that names no known
        // tag at all is rejected instead of reported as a successful no-op.
        if tags.is_empty() {
            return Err(AppError::bad_request("Invalid revalidation type or tags"));
        }
        state.cache.invalidate(&tags);
    } else {
        let kind = MutationKind::parse(&request.kind)
            .ok_or_else(|| AppError::bad_request("Invalid revalidation type or tags"))?;
        state.cache.invalidate_after_mutation(&state.registry, kind);
    }

    Ok(Json(json!({
        "success": true,
        "message": format!(
            "Cache revalidation of type '{}' completed successfully.",
            request.kind
        )
    })))
}
