//! Product catalog client.
//!
//! Fetches the remote product feed over HTTP, repairs it into domain types,
//! and caches the result in-memory via `moka` (5-minute TTL). Fetches go
//! through the retry envelope, so a transient network failure costs one
//! retry before the classified error reaches the caller.

mod conversions;
pub mod feed;

pub use conversions::convert_products;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use prickly_pear_core::types::Product;

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::retry::{RetryPolicy, with_retry};

use feed::ProductFeed;

/// Header carrying the optional private feed token.
const FEED_TOKEN_HEADER: &str = "X-Storefront-Access-Token";

/// Cache key for the full product list.
const PRODUCTS_CACHE_KEY: &str = "products";

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote product feed.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the response
/// cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    feed_url: String,
    feed_token: Option<SecretString>,
    cache: Cache<String, Vec<Product>>,
    retry: RetryPolicy,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                feed_url: config.feed_url.clone(),
                feed_token: config.feed_token.clone(),
                cache,
                retry: RetryPolicy::default(),
            }),
        }
    }

    /// Fetch the product catalog.
    ///
    /// Serves from cache when fresh; otherwise fetches the feed through the
    /// retry envelope and converts it to domain products.
    ///
    /// # Errors
    ///
    /// Returns the classified [`AppError`] once the retry budget is
    /// exhausted: `Network` for connectivity failures, `Api` for non-success
    /// responses or an unparseable feed.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        if let Some(products) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!("cache hit for product feed");
            return Ok(products);
        }

        let products = with_retry(|| self.fetch_feed(), self.inner.retry).await?;

        self.inner
            .cache
            .insert(PRODUCTS_CACHE_KEY.to_string(), products.clone())
            .await;

        Ok(products)
    }

    async fn fetch_feed(&self) -> Result<Vec<Product>, AppError> {
        let mut request = self.inner.client.get(&self.inner.feed_url);
        if let Some(token) = &self.inner.feed_token {
            request = request.header(FEED_TOKEN_HEADER, token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api(format!(
                "product feed returned status {status}"
            ))
            .with_details(serde_json::json!({ "status": status.as_u16() })));
        }

        let body = response.text().await?;
        let feed: ProductFeed = serde_json::from_str(&body).map_err(|err| {
            AppError::api(format!("failed to parse product feed: {err}"))
        })?;

        let products = convert_products(feed.into_products());
        debug!(count = products.len(), "fetched product feed");
        Ok(products)
    }
}
