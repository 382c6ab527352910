//! Catalog products and cart line items.
//!
//! # Persisted Schema
//!
//! These types define the JSON stored under the `cart`, `wishlist` and
//! `favorites` keys. Field names are part of the contract:
//!
//! ```json
//! {
//!   "id": 1,
//!   "title": "Fjallraven Backpack",
//!   "price": 109.95,
//!   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
//!   "category": "men's clothing",
//!   "description": "Your perfect pack for everyday use",
//!   "rating": { "rate": 3.9, "count": 120 },
//!   "quantity": 2
//! }
//! ```
//!
//! `quantity` appears on cart line items only. `rating` is optional and
//! omitted when absent. Text fields default to empty when missing so that a
//! sparse catalog record still decodes.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// A product as served by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Catalog category (e.g. "electronics").
    #[serde(default)]
    pub category: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Customer rating, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// One product in the cart with its quantity.
///
/// Serializes flat: the product's fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Snapshot of the product when it was first added.
    #[serde(flatten)]
    pub product: Product,
    /// Units in the cart, never below 1.
    pub quantity: Quantity,
}

impl CartLineItem {
    /// A new line item holding a single unit.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::ONE,
        }
    }

    /// The product identifier of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
