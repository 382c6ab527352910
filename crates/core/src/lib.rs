//! Keeg Store Core - domain types and client-side state.
//!
//! This crate provides the pieces shared by every Keeg Store component:
//! - `storefront` - JSON storefront server over the remote product catalog
//! - `integration-tests` - end-to-end checks against the storefront router
//!
//! # Architecture
//!
//! The core crate contains types, the storage contract and the stores built
//! on top of it - no network, no filesystem, no async runtime. Durable
//! backends implement [`storage::KeyValueStore`] elsewhere.
//!
//! # Modules
//!
//! - [`types`] - Product, line item, price, quantity and notification types
//! - [`storage`] - Key-value storage contract and an in-memory backend
//! - [`stores`] - Cart, wishlist and favorites stores
//! - [`listing`] - Category filter and price sort for catalog listings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod listing;
pub mod storage;
pub mod stores;
pub mod types;

pub use types::*;
