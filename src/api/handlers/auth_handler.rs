//! Authentication handlers.
//!
//! Login forwards credentials to the backend and stores the returned
//! access token in an HTTP-only cookie; logout clears the cookie and
//! flushes every cache tag so the next session never observes another
//! user's cached reads.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Json,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::api::state::AppState;
use crate::cache::MutationKind;
use crate::config::SESSION_COOKIE;
use crate::errors::{AppError, AppResult};

use super::relay;

/// Login credentials, posted as an urlencoded form. The form is forwarded
/// to the backend verbatim, so extra OAuth2 fields (`scope`, `grant_type`)
/// survive the hop; this type documents the required fields.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    /// Account email or username
    #[schema(example = "student@example.edu")]
    pub username: String,
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Login and establish a session cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful, session cookie set"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Authentication failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(CookieJar, Json<Value>)> {
    let content_type = headers.get(CONTENT_TYPE).cloned();
    let response = state
        .backend
        .post_body("/api/v1/auth/login", content_type, body)
        .await
        .map_err(|e| AppError::operation("Authentication failed", e))?;
    let body = relay(response)?;

    let token = body
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::operation("Authentication failed", "login response missing access_token")
        })?;

    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .build();

    Ok((jar.add(cookie), Json(body)))
}

/// Logout: clear the session cookie and flush all cached reads
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cleared")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<Value>)> {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    state
        .cache
        .invalidate_after_mutation(&state.registry, MutationKind::All);
    Ok((jar, Json(json!({ "success": true }))))
}
