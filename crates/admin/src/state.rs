//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: RwLock<Catalog>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: RwLock::new(catalog),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The catalog; take a read lock to render tables, a write lock to delete.
    #[must_use]
    pub fn catalog(&self) -> &RwLock<Catalog> {
        &self.inner.catalog
    }
}
