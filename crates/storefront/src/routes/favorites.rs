//! Legacy favorites toggle.
//!
//! Favorites are stored apart from the wishlist and produce no notification.

use axum::{Form, Json, extract::State};
use keeg_store_core::ProductId;
use serde::Serialize;
use tracing::instrument;

use super::ProductForm;
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteView {
    pub product_id: ProductId,
    pub is_favorite: bool,
}

/// Add or remove a product from favorites.
///
/// Adding fetches the product from the catalog and leaves the list alone if
/// another request starred it meanwhile.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Json<FavoriteView>> {
    let is_favorite = if state.favorites().remove_favorite(form.product_id) {
        false
    } else {
        let product = state.catalog().get_product(form.product_id).await?;
        state.favorites().add_favorite(&product);
        true
    };

    Ok(Json(FavoriteView {
        product_id: form.product_id,
        is_favorite,
    }))
}
