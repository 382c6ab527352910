//! Shopping cart store.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::persisted::{load_list, save_list};
use crate::storage::{KeyValueStore, keys};
use crate::types::{CartLineItem, Price, Product, ProductId, Quantity};

/// The shopping cart and its persisted mirror.
///
/// Line items keep insertion order and there is at most one line per product.
/// Every mutation is written through to storage before returning.
#[derive(Debug)]
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    items: Vec<CartLineItem>,
}

impl CartStore {
    /// Load the cart saved under the `cart` key.
    ///
    /// Starts empty if nothing is saved or the blob cannot be decoded. Lines
    /// repeating a product ID are folded into the first one.
    #[must_use]
    pub fn initialize(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = merge_duplicates(load_list(storage.as_ref(), keys::CART));
        debug!(lines = items.len(), "Cart loaded");
        Self { storage, items }
    }

    /// Current line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Add one unit of `product`.
    ///
    /// An existing line keeps its position and gains one unit; otherwise a
    /// new line with quantity 1 is appended.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == product.id) {
            item.quantity = item.quantity.increment();
        } else {
            self.items.push(CartLineItem::new(product.clone()));
        }
        self.persist();
    }

    /// Remove the line for `id`. Does nothing if it is not in the cart.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.items.retain(|item| item.id() != id);
        self.persist();
    }

    /// Set the quantity of the line for `id` in place.
    ///
    /// Does nothing if `id` is not in the cart. The floor of 1 is carried by
    /// [`Quantity`]; callers reject anything lower before getting here.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: ProductId, quantity: Quantity) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.quantity = quantity;
        }
        self.persist();
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of price times quantity over all lines, rounded to cents.
    ///
    /// Derived on every call; never stored.
    #[must_use]
    pub fn compute_total(&self) -> Price {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .sum::<Price>()
            .rounded()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity.get()))
    }

    fn persist(&self) {
        save_list(self.storage.as_ref(), keys::CART, &self.items);
    }
}

/// Fold repeated product IDs into their first line, summing quantities.
fn merge_duplicates(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(existing) = merged.iter_mut().find(|m| m.id() == item.id()) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            merged.push(item);
        }
    }
    merged
}
