//! Client-side state stores.
//!
//! Each store owns one collection and mirrors it to a [`KeyValueStore`]
//! under a fixed key:
//!
//! - [`CartStore`] - line items with quantities (`cart`)
//! - [`WishlistStore`] - saved product snapshots (`wishlist`)
//! - [`FavoritesStore`] - legacy per-page favorites (`favorites`)
//!
//! # Persistence contract
//!
//! - Initialization reads the blob once. A missing, unreadable or malformed
//!   blob yields an empty collection and is logged, never returned as an error.
//! - Every mutation rewrites the whole blob (last write wins).
//! - A failed write is logged; the in-memory state stays authoritative.
//!
//! The favorites list and the wishlist hold the same entry shape under
//! different keys and are not merged.
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

mod cart;
mod favorites;
mod persisted;
mod wishlist;

pub use cart::CartStore;
pub use favorites::FavoritesStore;
pub use wishlist::{WishlistChange, WishlistStore};
