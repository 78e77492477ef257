//! Complaint handlers.
//!
//! Complaint writes pessimistically invalidate every analytics tag: the
//! backend exposes no dependency tracking between a single complaint and
//! its aggregate statistics, so correctness wins over efficiency.

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::api::middleware::SessionToken;
use crate::api::state::AppState;
use crate::cache::{MutationKind, ReadCategory};
use crate::errors::{AppError, AppResult};

use super::{proxy_cached_get, relay};

/// Filter and pagination parameters for complaint listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListComplaintsParams {
    /// Number of records to skip
    pub skip: Option<u32>,
    /// Maximum number of records to return
    pub limit: Option<u32>,
    /// Filter by category
    pub category: Option<String>,
    /// Filter by urgency level
    pub urgency: Option<String>,
    /// Filter by status
    pub status: Option<String>,
    /// Free-text search
    pub search: Option<String>,
    /// Filter by assignee
    pub assigned_to: Option<String>,
}

impl ListComplaintsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(skip) = self.skip {
            query.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(ref category) = self.category {
            query.push(("category", category.clone()));
        }
        if let Some(ref urgency) = self.urgency {
            query.push(("urgency", urgency.clone()));
        }
        if let Some(ref status) = self.status {
            query.push(("status", status.clone()));
        }
        if let Some(ref search) = self.search {
            query.push(("search", search.clone()));
        }
        if let Some(ref assigned_to) = self.assigned_to {
            query.push(("assigned_to", assigned_to.clone()));
        }
        query
    }
}

/// Create complaint routes
pub fn complaint_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_complaints).post(create_complaint))
        .route(
            "/:id",
            get(get_complaint)
                .put(update_complaint)
                .delete(delete_complaint),
        )
        .route("/classify", post(classify_complaint))
        .route("/classify-with-files", post(classify_complaint_with_files))
        .route("/predict", post(predict_complaint))
}

/// List complaints with optional filters
#[utoipa::path(
    get,
    path = "/api/v1/complaints/",
    tag = "Complaints",
    params(ListComplaintsParams),
    responses(
        (status = 200, description = "List of complaints"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_complaints(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Query(params): Query<ListComplaintsParams>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::Complaints,
        "/api/v1/complaints/",
        &params.to_query(),
        "Failed to fetch complaints",
    )
    .await
}

/// Create a complaint
#[utoipa::path(
    post,
    path = "/api/v1/complaints/",
    tag = "Complaints",
    responses(
        (status = 200, description = "Complaint created"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_complaint(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let response = state
        .backend
        .send_json(Method::POST, "/api/v1/complaints/", &token.0, &payload)
        .await
        .map_err(|e| AppError::operation("Failed to create complaint", e))?;
    let body = relay(response)?;

    state
        .cache
        .invalidate_after_mutation(&state.registry, MutationKind::Complaint);
    Ok(Json(body))
}

/// Get a complaint by id
#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}",
    tag = "Complaints",
    params(("id" = i64, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint details"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Complaint not found")
    )
)]
pub async fn get_complaint(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::Complaints,
        &format!("/api/v1/complaints/{id}"),
        &[],
        "Failed to fetch complaint details",
    )
    .await
}

/// Update a complaint
#[utoipa::path(
    put,
    path = "/api/v1/complaints/{id}",
    tag = "Complaints",
    params(("id" = i64, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint updated"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Complaint not found")
    )
)]
pub async fn update_complaint(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let response = state
        .backend
        .send_json(
            Method::PUT,
            &format!("/api/v1/complaints/{id}"),
            &token.0,
            &payload,
        )
        .await
        .map_err(|e| AppError::operation("Failed to update complaint", e))?;
    let body = relay(response)?;

    state
        .cache
        .invalidate_after_mutation(&state.registry, MutationKind::Complaint);
    Ok(Json(body))
}

/// Delete a complaint
#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{id}",
    tag = "Complaints",
    params(("id" = i64, Path, description = "Complaint id")),
    responses(
        (status = 204, description = "Complaint deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Complaint not found")
    )
)]
pub async fn delete_complaint(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let response = state
        .backend
        .send(Method::DELETE, &format!("/api/v1/complaints/{id}"), &token.0)
        .await
        .map_err(|e| AppError::operation("Failed to delete complaint", e))?;
    relay(response)?;

    state
        .cache
        .invalidate_after_mutation(&state.registry, MutationKind::Complaint);
    Ok(StatusCode::NO_CONTENT)
}

/// Classify a complaint from text only. Read-only against the model, so
/// nothing is cached and nothing is invalidated.
#[utoipa::path(
    post,
    path = "/api/v1/complaints/classify",
    tag = "Complaints",
    responses(
        (status = 200, description = "Classification result"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn classify_complaint(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let response = state
        .backend
        .send_json(
            Method::POST,
            "/api/v1/complaints/classify",
            &token.0,
            &payload,
        )
        .await
        .map_err(|e| AppError::operation("Failed to classify complaint", e))?;
    Ok(Json(relay(response)?))
}

/// Classify a complaint with file attachments. The multipart body is
/// forwarded byte-for-byte with its original content type.
#[utoipa::path(
    post,
    path = "/api/v1/complaints/classify-with-files",
    tag = "Complaints",
    responses(
        (status = 200, description = "Classification result"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn classify_complaint_with_files(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let content_type = headers.get(CONTENT_TYPE).cloned();
    let response = state
        .backend
        .post_raw(
            "/api/v1/complaints/classify-with-files",
            content_type,
            body,
            &token.0,
        )
        .await
        .map_err(|e| AppError::operation("Failed to classify complaint", e))?;
    Ok(Json(relay(response)?))
}

/// Predict category and urgency for a draft complaint
#[utoipa::path(
    post,
    path = "/api/v1/complaints/predict",
    tag = "Complaints",
    responses(
        (status = 200, description = "Prediction result"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn predict_complaint(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let response = state
        .backend
        .send_json(
            Method::POST,
            "/api/v1/complaints/predict",
            &token.0,
            &payload,
        )
        .await
        .map_err(|e| AppError::operation("Failed to predict complaint", e))?;
    Ok(Json(relay(response)?))
}
