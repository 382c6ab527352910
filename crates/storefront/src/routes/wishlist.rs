//! Wishlist route handlers.

use axum::{Form, Json, extract::State};
use keeg_store_core::stores::WishlistStore;
use keeg_store_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ProductForm;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Wishlist display data.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistView {
    pub items: Vec<Product>,
}

impl From<&WishlistStore> for WishlistView {
    fn from(wishlist: &WishlistStore) -> Self {
        Self {
            items: wishlist.entries().to_vec(),
        }
    }
}

/// Result of a wishlist toggle.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleView {
    pub product_id: ProductId,
    pub in_wishlist: bool,
}

/// Confirmed removal form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub confirm: bool,
}

/// Display wishlist.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<WishlistView>> {
    let wishlist = state.wishlist()?;
    Ok(Json(WishlistView::from(&*wishlist)))
}

/// Add or remove a product.
///
/// The direction is decided by membership at request time. Adding fetches
/// the product from the catalog and is a no-op if another request saved it
/// meanwhile.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Json<ToggleView>> {
    let saved = state.wishlist()?.is_in_wishlist(form.product_id);
    let in_wishlist = if saved {
        state.remove_from_wishlist(form.product_id)?;
        false
    } else {
        let product = state.catalog().get_product(form.product_id).await?;
        state.add_to_wishlist(&product)?;
        true
    };

    Ok(Json(ToggleView {
        product_id: form.product_id,
        in_wishlist,
    }))
}

/// Remove a product after the shopper confirmed.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveForm>,
) -> Result<Json<WishlistView>> {
    if !form.confirm {
        return Err(AppError::BadRequest("Removal not confirmed".to_string()));
    }

    if state.remove_from_wishlist(form.product_id)?.is_none() {
        return Err(AppError::NotFound(format!(
            "Product {} is not in the wishlist",
            form.product_id
        )));
    }

    let wishlist = state.wishlist()?;
    Ok(Json(WishlistView::from(&*wishlist)))
}
