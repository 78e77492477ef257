//! User handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::{Method, StatusCode},
    response::Json,
    routing::get,
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

/// Pagination parameters for user listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Number of records to skip
    pub skip: Option<u32>,
    /// Maximum number of records to return
    pub limit: Option<u32>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List users
#[utoipa::path(
    get,
    path = "/api/v1/users/",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "List of users"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Query(params): Query<ListUsersParams>,
) -> AppResult<Json<Value>> {
    let mut query = Vec::new();
    if let Some(skip) = params.skip {
        query.push(("skip", skip.to_string()));
    }
    if let Some(limit) = params.limit {
        query.push(("limit", limit.to_string()));
    }
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::Users,
        "/api/v1/users/",
        &query,
        "Failed to fetch users",
    )
    .await
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users/",
    tag = "Users",
    responses(
        (status = 200, description = "User created"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let response = state
        .backend
        .send_json(Method::POST, "/api/v1/users/", &token.0, &payload)
        .await
        .map_err(|e| AppError::operation("Failed to create user", e))?;
    let body = relay(response)?;

    state
        .cache
        .invalidate_after_mutation(&state.registry, MutationKind::User);
    Ok(Json(body))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User details"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    proxy_cached_get(
        &state,
        &token,
        ReadCategory::Users,
        &format!("/api/v1/users/{id}"),
        &[],
        "Failed to fetch user details",
    )
    .await
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let response = state
        .backend
        .send_json(
            Method::PUT,
            &format!("/api/v1/users/{id}"),
            &token.0,
            &payload,
        )
        .await
        .map_err(|e| AppError::operation("Failed to update user", e))?;
    let body = relay(response)?;

    state
        .cache
        .invalidate_after_mutation(&state.registry, MutationKind::User);
    Ok(Json(body))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let response = state
        .backend
        .send(Method::DELETE, &format!("/api/v1/users/{id}"), &token.0)
        .await
        .map_err(|e| AppError::operation("Failed to delete user", e))?;
    relay(response)?;

    state
        .cache
        .invalidate_after_mutation(&state.registry, MutationKind::User);
    Ok(StatusCode::NO_CONTENT)
}
