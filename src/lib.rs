//! SCOPE Dashboard Gateway
//!
//! The server-side layer between the SCOPE complaint-management dashboard
//! and its backend service. It authenticates sessions via an HTTP-only
//! cookie, proxies API calls upstream with the session's bearer token,
//! caches read responses by tag, and invalidates tag groups on writes.
//!
//! # Modules
//!
//! - **api**: HTTP handlers, middleware, and routes
//! - **cache**: cache tag registry and the tag-indexed response store
//! - **config**: environment-driven configuration
//! - **errors**: centralized error handling
//! - **upstream**: HTTP client for the backend service

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;
use tracing::info;

pub use api::{create_router, AppState};
pub use cache::{CacheRegistry, ResponseCache};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use upstream::BackendClient;

/// Build application state from configuration.
pub fn build_state(config: Config) -> Result<AppState, upstream::UpstreamError> {
    let backend = Arc::new(BackendClient::new(
        &config.backend_api_url,
        Duration::from_secs(config.upstream_timeout_seconds),
    )?);
    let cache = Arc::new(ResponseCache::new());
    let registry = Arc::new(CacheRegistry::new());
    Ok(AppState::new(backend, cache, registry, config))
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(
    host: &str,
    port: u16,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config)?;
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
