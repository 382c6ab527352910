//! Integration tests for Keeg Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p keeg-store-integration-tests
//! ```
//!
//! No external services are needed: each test binds a fake catalog API and
//! a storefront on ephemeral localhost ports and talks to them over HTTP.
//!
//! # Test Categories
//!
//! - `storefront` - Storefront API tests (catalog views, cart, wishlist,
//!   favorites, notifications, checkout, persistence)
