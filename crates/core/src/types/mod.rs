//! Core types for Keeg Store.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod id;
pub mod notification;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::ProductId;
pub use notification::{Notification, NotificationKind};
pub use price::Price;
pub use product::{CartLineItem, Product, Rating};
pub use quantity::{Quantity, QuantityError};
