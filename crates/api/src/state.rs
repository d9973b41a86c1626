//! Application state shared across handlers.

use std::sync::Arc;

use crate::carts::CartRegistry;
use crate::config::ApiConfig;
use crate::db::CatalogStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog backend, live carts, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    catalog: Arc<dyn CatalogStore>,
    carts: CartRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `catalog` - Cafe and menu storage backend
    #[must_use]
    pub fn new(config: ApiConfig, catalog: Arc<dyn CatalogStore>) -> Self {
        let carts = CartRegistry::new(config.cart_idle);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog backend.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartRegistry {
        &self.inner.carts
    }
}
