//! Cart route handlers.
//!
//! The cart lives in the persisted [`CartStore`]; the catalog is only
//! consulted when a product is added.
//!
//! [`CartStore`]: keeg_store_core::stores::CartStore

use axum::{Form, Json, extract::State};
use keeg_store_core::stores::CartStore;
use keeg_store_core::{CartLineItem, Price, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ProductForm;
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    #[serde(flatten)]
    pub item: CartLineItem,
    pub line_total: Price,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Price,
    pub item_count: u32,
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    item: item.clone(),
                    line_total: item.line_total(),
                })
                .collect(),
            total: cart.compute_total(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart count badge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

/// Update cart form data.
///
/// `quantity` is the raw text typed by the shopper.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: String,
}

/// Display cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    let cart = state.cart()?;
    Ok(Json(CartView::from(&*cart)))
}

/// Add one unit of a catalog product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Json<CartCountView>> {
    let product = state.catalog().get_product(form.product_id).await?;

    state.add_to_cart(&product)?;
    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    let count = state.cart()?.item_count();
    Ok(Json(CartCountView { count }))
}

/// Set a line's quantity.
///
/// Text that is not a whole number of at least 1 is ignored and the cart is
/// returned unchanged.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = state.cart()?;

    match Quantity::parse(&form.quantity) {
        Ok(quantity) => cart.update_quantity(form.product_id, quantity),
        Err(e) => tracing::debug!(input = %form.quantity, "Ignoring quantity: {e}"),
    }

    Ok(Json(CartView::from(&*cart)))
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Json<CartView>> {
    let mut cart = state.cart()?;
    cart.remove_from_cart(form.product_id);
    Ok(Json(CartView::from(&*cart)))
}

/// Get cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<CartCountView>> {
    let count = state.cart()?.item_count();
    Ok(Json(CartCountView { count }))
}
