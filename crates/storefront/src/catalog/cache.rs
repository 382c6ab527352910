//! Cache types for catalog API responses.

use keeg_store_core::{Product, ProductId};

/// Cache key for catalog requests.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products { limit: Option<u32> },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
}
