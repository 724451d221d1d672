//! Application state shared across handlers.

use std::sync::Arc;

use aion_core::Catalog;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is read-only
/// seeded data; per-visitor state lives in the session layer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create application state over the seeded catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::seeded(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
