//! HTTP route handlers for storefront.
//!
//! Every handler answers with a JSON view model; presentation is left to the
//! client.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//! GET  /api/home                   - Featured products
//!
//! # Products
//! GET  /api/products               - Product listing (?category=&sort=asc|desc)
//! GET  /api/products/{id}          - Product detail
//!
//! # Cart
//! GET  /api/cart                   - Cart with line totals
//! POST /api/cart/add               - Add one unit (returns count)
//! POST /api/cart/update            - Set quantity (returns cart)
//! POST /api/cart/remove            - Remove line (returns cart)
//! GET  /api/cart/count             - Cart count badge
//!
//! # Wishlist
//! GET  /api/wishlist               - Wishlist entries
//! POST /api/wishlist/toggle        - Add or remove
//! POST /api/wishlist/remove        - Confirmed removal
//!
//! # Favorites
//! POST /api/favorites/toggle       - Add or remove
//!
//! # Notifications
//! GET  /api/notification           - Visible notification, or null
//! POST /api/notification/dismiss   - Hide it
//!
//! # Checkout
//! GET  /api/checkout               - Status and order summary
//! POST /api/checkout               - Start simulated checkout
//! ```

pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod home;
pub mod notifications;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};
use keeg_store_core::{Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

/// Form body naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Whether a catalog-backed view has data to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// The catalog could not be reached; the view shows a loading indicator.
    Loading,
    NotFound,
    Ready,
}

/// Product display data with the shopper's list memberships.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub in_wishlist: bool,
    pub is_favorite: bool,
}

/// Decorate `products` with wishlist and favorites flags.
fn cards(state: &AppState, products: Vec<Product>) -> Result<Vec<ProductCard>> {
    let favorite_ids: Vec<ProductId> = state
        .favorites()
        .entries()
        .iter()
        .map(|p| p.id)
        .collect();
    let wishlist = state.wishlist()?;

    Ok(products
        .into_iter()
        .map(|product| ProductCard {
            in_wishlist: wishlist.is_in_wishlist(product.id),
            is_favorite: favorite_ids.contains(&product.id),
            product,
        })
        .collect())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home::home))
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
        .route("/api/favorites/toggle", post(favorites::toggle))
        .route("/api/notification", get(notifications::current))
        .route("/api/notification/dismiss", post(notifications::dismiss))
        .route("/api/checkout", get(checkout::show).post(checkout::start))
}
