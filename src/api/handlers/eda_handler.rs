//! Analytics (EDA) handlers.
//!
//! All analytics are precomputed by the backend; these endpoints only
//! relay them, cached per category. The expensive aggregates (clustering,
//! topic modeling) carry the longest TTLs.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::api::middleware::SessionToken;
use crate::api::state::AppState;
use crate::cache::ReadCategory;
use crate::errors::AppResult;

use super::proxy_cached_get;

/// Parameters for the clustering endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct ClusterParams {
    /// Number of clusters to compute
    pub n_clusters: Option<u32>,
}

/// Create analytics routes
pub fn eda_routes() -> Router<AppState> {
    Router::new()
        .route("/basic-stats", get(basic_stats))
        .route("/time-trends", get(time_trends))
        .route("/category-relationships", get(category_relationships))
        .route("/word-frequency", get(word_frequency))
        .route("/cluster", get(cluster))
        .route("/topics", get(topics))
}

/// First-order complaint statistics
#[utoipa::path(
    get,
    path = "/api/v1/eda/basic-stats",
    tag = "Analytics",
    responses(
        (status = 200, description = "Basic statistics"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn basic_stats(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::BasicStats,
        "/api/v1/eda/basic-stats",
        &[],
        "Failed to fetch basic stats",
    )
    .await
}

/// Complaint volume over time
#[utoipa::path(
    get,
    path = "/api/v1/eda/time-trends",
    tag = "Analytics",
    responses(
        (status = 200, description = "Time trend data"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn time_trends(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::TimeTrends,
        "/api/v1/eda/time-trends",
        &[],
        "Failed to fetch time trends",
    )
    .await
}

/// Cross-category relationship matrix
#[utoipa::path(
    get,
    path = "/api/v1/eda/category-relationships",
    tag = "Analytics",
    responses(
        (status = 200, description = "Category relationship data"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn category_relationships(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::CategoryRelationships,
        "/api/v1/eda/category-relationships",
        &[],
        "Failed to fetch category relationships",
    )
    .await
}

/// Word frequency counts for the word cloud
#[utoipa::path(
    get,
    path = "/api/v1/eda/word-frequency",
    tag = "Analytics",
    responses(
        (status = 200, description = "Word frequency data"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn word_frequency(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::WordFrequency,
        "/api/v1/eda/word-frequency",
        &[],
        "Failed to fetch word frequency data",
    )
    .await
}

/// Complaint clustering scatter data
#[utoipa::path(
    get,
    path = "/api/v1/eda/cluster",
    tag = "Analytics",
    params(ClusterParams),
    responses(
        (status = 200, description = "Cluster data"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn cluster(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Query(params): Query<ClusterParams>,
) -> AppResult<Json<Value>> {
    let mut query = Vec::new();
    if let Some(n_clusters) = params.n_clusters {
        query.push(("n_clusters", n_clusters.to_string()));
    }
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::Cluster,
        "/api/v1/eda/cluster",
        &query,
        "Failed to fetch cluster data",
    )
    .await
}

/// Topic modeling results
#[utoipa::path(
    get,
    path = "/api/v1/eda/topics",
    tag = "Analytics",
    responses(
        (status = 200, description = "Topic data"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn topics(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::Topics,
        "/api/v1/eda/topics",
        &[],
        "Failed to fetch topics",
    )
    .await
}
