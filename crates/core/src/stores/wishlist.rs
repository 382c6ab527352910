//! Wishlist store.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::persisted::{load_list, save_list};
use crate::storage::{KeyValueStore, keys};
use crate::types::{Notification, Product, ProductId};

/// Outcome of [`WishlistStore::toggle_wishlist`].
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistChange {
    /// The product was appended.
    Added(Product),
    /// The product was removed.
    Removed(Product),
}

impl WishlistChange {
    /// The banner announcing this change.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::Added(product) => {
                Notification::success(format!("{} added to wishlist", product.title))
            }
            Self::Removed(product) => {
                Notification::error(format!("{} removed from wishlist", product.title))
            }
        }
    }

    /// Whether the product is in the wishlist after the change.
    #[must_use]
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Saved product snapshots and their persisted mirror.
///
/// A product is added when absent and removed when present. Each change is
/// reported as a [`WishlistChange`] whose notification the caller shows to
/// the user.
#[derive(Debug)]
pub struct WishlistStore {
    storage: Arc<dyn KeyValueStore>,
    entries: Vec<Product>,
}

impl WishlistStore {
    /// Load the wishlist saved under the `wishlist` key.
    ///
    /// Starts empty if nothing is saved or the blob cannot be decoded.
    /// Repeated IDs keep only their first snapshot.
    #[must_use]
    pub fn initialize(storage: Arc<dyn KeyValueStore>) -> Self {
        let entries = dedup_by_id(load_list(storage.as_ref(), keys::WISHLIST));
        debug!(entries = entries.len(), "Wishlist loaded");
        Self { storage, entries }
    }

    /// Saved products in the order they were added.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Whether the wishlist has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is saved.
    #[must_use]
    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Saved snapshot for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Remove `product` if saved, otherwise append a snapshot of it.
    ///
    /// Remaining entries keep their order either way.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn toggle_wishlist(&mut self, product: &Product) -> WishlistChange {
        match self.remove(product.id) {
            Some(change) => change,
            None => {
                self.entries.push(product.clone());
                self.persist();
                WishlistChange::Added(product.clone())
            }
        }
    }

    /// Append a snapshot of `product` unless it is already saved.
    ///
    /// Returns `None` when nothing changed.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) -> Option<WishlistChange> {
        if self.is_in_wishlist(product.id) {
            return None;
        }
        self.entries.push(product.clone());
        self.persist();
        Some(WishlistChange::Added(product.clone()))
    }

    /// Remove the entry for `id`. Returns `None` if it was not saved.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: ProductId) -> Option<WishlistChange> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(index);
        self.persist();
        Some(WishlistChange::Removed(removed))
    }

    fn persist(&self) {
        save_list(self.storage.as_ref(), keys::WISHLIST, &self.entries);
    }
}

/// Keep the first entry for each product ID.
pub(super) fn dedup_by_id(entries: Vec<Product>) -> Vec<Product> {
    let mut unique: Vec<Product> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !unique.iter().any(|u| u.id == entry.id) {
            unique.push(entry);
        }
    }
    unique
}
