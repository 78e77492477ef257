//! Gateway configuration.

use std::env;

/// Name of the HTTP-only session cookie set on login.
pub const SESSION_COOKIE: &str = "token";

/// Default backend service URL.
pub const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8000";

/// Default upstream request timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 30;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API service
    pub backend_api_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Timeout for upstream requests in seconds
    pub upstream_timeout_seconds: u64,
    /// Whether the session cookie is marked Secure (enable behind HTTPS)
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            backend_api_url: env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_API_URL.to_string()),
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            upstream_timeout_seconds: env::var("UPSTREAM_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECONDS),
            cookie_secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_api_url: DEFAULT_BACKEND_API_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            upstream_timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
            cookie_secure: false,
        }
    }
}
