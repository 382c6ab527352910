//! Catalog listing filters.
//!
//! The product listing narrows the catalog to one category and orders it by
//! price. Sorting is stable, so products with equal prices keep catalog order.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Price ordering for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSort {
    /// Cheapest first.
    Asc,
    /// Most expensive first.
    Desc,
}

/// Category filter and price sort applied to a product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Exact category to keep. Empty or `None` keeps every product.
    #[serde(default)]
    pub category: Option<String>,
    /// Price ordering. `None` keeps catalog order.
    #[serde(default)]
    pub sort: Option<PriceSort>,
}

impl ListingQuery {
    /// Filter and sort `products`.
    #[must_use]
    pub fn apply(&self, mut products: Vec<Product>) -> Vec<Product> {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            products.retain(|p| p.category == category);
        }

        match self.sort {
            Some(PriceSort::Asc) => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(PriceSort::Desc) => products.sort_by(|a, b| b.price.cmp(&a.price)),
            None => {}
        }

        products
    }
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}
