//! Remote product catalog client.
//!
//! # Architecture
//!
//! - The catalog is an external read-only source of truth; nothing is synced
//!   locally beyond an in-memory response cache (`moka`, 5 minute TTL by
//!   default)
//! - `GET {base}/products?limit=N` lists products
//! - `GET {base}/products/{id}` fetches one product; a 404, an empty body or
//!   a JSON `null` all mean "not found"
//!
//! Callers turn failures into display state (a loading or not-found view);
//! nothing here panics on bad responses.

mod cache;

use std::sync::Arc;

use keeg_store_core::{Product, ProductId};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Request URL could not be built.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the remote product catalog.
///
/// Cheap to clone; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: with_trailing_slash(config.base_url.clone()),
                cache,
            }),
        }
    }

    /// List products, optionally capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: Option<u32>) -> Result<Vec<Product>, CatalogError> {
        let cache_key = CacheKey::Products { limit };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let mut url = self.inner.base_url.join("products")?;
        if let Some(limit) = limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }

        let products: Option<Vec<Product>> = self.fetch(url).await?;
        let products = products.unwrap_or_default();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the product does not exist, or
    /// another error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.inner.base_url.join(&format!("products/{id}"))?;
        let product: Product = match self.fetch(url).await {
            Ok(Some(product)) => product,
            Ok(None) | Err(CatalogError::Status { status: 404, .. }) => {
                return Err(CatalogError::NotFound(id));
            }
            Err(e) => return Err(e),
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// GET `url` and decode the body. An empty body or `null` decodes as `None`.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<T>>(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
