//! Persistent key-value storage contract.
//!
//! The storefront keeps its client-side state in an origin-scoped store of
//! string keys and text values, the way a browser keeps `localStorage`. The
//! stores in [`crate::stores`] only ever see this trait; durable backends live
//! with the binary that owns the filesystem.
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | [`keys::CART`] | JSON array of cart line items |
//! | [`keys::WISHLIST`] | JSON array of product snapshots |
//! | [`keys::FAVORITES`] | JSON array of product snapshots (legacy list) |

mod memory;

use std::fmt::Debug;

use thiserror::Error;

pub use memory::MemoryStore;

/// Errors that can occur when reading or writing a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be stored by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend failed to read or write.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding the backend was poisoned.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A durable string-keyed text blob store.
///
/// All methods take `&self`; implementations use interior mutability so one
/// store can be shared by the cart, wishlist and favorites.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage keys used across the storefront.
pub mod keys {
    /// Cart line items.
    pub const CART: &str = "cart";

    /// Wishlist product snapshots.
    pub const WISHLIST: &str = "wishlist";

    /// Per-page favorites, kept apart from the wishlist.
    pub const FAVORITES: &str = "favorites";
}
