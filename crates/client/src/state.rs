//! Application state shared across views.

use std::sync::Arc;

use crate::cart::storage::FileStorage;
use crate::cart::{CartStore, persistence};
use crate::catalog::CatalogClient;
use crate::config::ClientConfig;

/// Application state shared across all views.
///
/// This struct is cheaply cloneable via `Arc` and is the single instance a
/// host application constructs at startup and threads to every consumer -
/// the cart store and catalog client it carries are shared, not copied.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    cart: CartStore,
    catalog: CatalogClient,
}

impl AppState {
    /// Build the application state: construct the catalog client and restore
    /// the cart from the configured data directory.
    ///
    /// The returned state's cart is fully loaded; no mutation can be observed
    /// before the persisted state was applied.
    pub async fn load(config: ClientConfig) -> Self {
        let catalog = CatalogClient::new(&config);
        let storage = FileStorage::new(config.data_dir.clone());
        let cart = persistence::restore(storage).await;

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                catalog,
            }),
        }
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the shared cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
