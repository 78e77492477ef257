//! Session middleware.
//!
//! The presence of the HTTP-only `token` cookie is the sole authorization
//! signal checked before forwarding a protected request; verification of
//! the token itself is the backend's job.

use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::CookieJar;

use crate::config::SESSION_COOKIE;
use crate::errors::{AppError, AppResult};

/// Bearer token drawn from the session cookie.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Reject requests without a session cookie before any upstream contact,
/// and expose the token to handlers via request extensions.
pub async fn session_middleware(mut request: Request, next: Next) -> AppResult<Response> {
    let token = extract_token(&request)?;
    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}

fn extract_token(request: &Request) -> AppResult<String> {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(token)
}
