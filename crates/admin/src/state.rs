//! Application state shared across handlers.
//!
//! Built once at startup and injected into handlers via axum's `State`
//! extractor; never mutated after construction.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::provider::IdentityClient;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: AdminConfig,
    provider: IdentityClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, provider: IdentityClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, provider }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn provider(&self) -> &IdentityClient {
        &self.inner.provider
    }
}
