//! Legacy favorites list.
//!
//! The home and product detail views star products into a `favorites` list
//! that predates the wishlist and lives under its own key. The two lists are
//! not synchronized: starring on the detail page does not touch the wishlist,
//! and vice versa. Unlike the wishlist this store keeps no copy in memory and
//! reads the blob on every call, so two views holding their own
//! `FavoritesStore` always agree with storage.

use std::sync::Arc;

use tracing::instrument;

use super::persisted::{load_list, save_list};
use super::wishlist::dedup_by_id;
use crate::storage::{KeyValueStore, keys};
use crate::types::{Product, ProductId};

/// Read-through view of the `favorites` key.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Wrap `storage`. Nothing is read until the list is asked for.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Saved favorites in the order they were starred.
    #[must_use]
    pub fn entries(&self) -> Vec<Product> {
        dedup_by_id(load_list(self.storage.as_ref(), keys::FAVORITES))
    }

    /// Whether `id` is currently starred.
    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.entries().iter().any(|entry| entry.id == id)
    }

    /// Star or unstar `product`. Returns whether it is a favorite afterwards.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn toggle_favorite(&self, product: &Product) -> bool {
        if self.remove_favorite(product.id) {
            false
        } else {
            self.add_favorite(product);
            true
        }
    }

    /// Star `product` unless it already is. Returns whether the list changed.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_favorite(&self, product: &Product) -> bool {
        let mut entries = self.entries();
        if entries.iter().any(|entry| entry.id == product.id) {
            return false;
        }
        entries.push(product.clone());
        save_list(self.storage.as_ref(), keys::FAVORITES, &entries);
        true
    }

    /// Unstar `id`. Returns whether it was starred.
    #[instrument(skip(self))]
    pub fn remove_favorite(&self, id: ProductId) -> bool {
        let mut entries = self.entries();
        let Some(index) = entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        entries.remove(index);
        save_list(self.storage.as_ref(), keys::FAVORITES, &entries);
        true
    }
}
