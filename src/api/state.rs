//! Application state for dependency injection.

use std::sync::Arc;

use crate::cache::{CacheRegistry, ResponseCache};
use crate::config::Config;
use crate::upstream::BackendClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub cache: Arc<ResponseCache>,
    pub registry: Arc<CacheRegistry>,
    pub config: Config,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        backend: Arc<BackendClient>,
        cache: Arc<ResponseCache>,
        registry: Arc<CacheRegistry>,
        config: Config,
    ) -> Self {
        Self {
            backend,
            cache,
            registry,
            config,
        }
    }
}
