//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use keeg_store_core::listing::{ListingQuery, PriceSort, categories};
use keeg_store_core::{ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{LoadState, ProductCard, cards};
use crate::catalog::CatalogError;
use crate::error::Result;
use crate::state::AppState;

/// Listing query parameters. Unknown sort values mean catalog order.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl ListingParams {
    fn to_query(&self) -> ListingQuery {
        let sort = match self.sort.as_deref().map(str::trim) {
            Some("asc") => Some(PriceSort::Asc),
            Some("desc") => Some(PriceSort::Desc),
            _ => None,
        };
        ListingQuery {
            category: self.category.clone().filter(|c| !c.is_empty()),
            sort,
        }
    }
}

/// Product listing view model.
#[derive(Debug, Serialize)]
pub struct ProductsView {
    pub state: LoadState,
    pub query: ListingQuery,
    /// Every category in the unfiltered catalog.
    pub categories: Vec<String>,
    pub products: Vec<ProductCard>,
}

/// Product detail view model.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub state: LoadState,
    pub product: Option<ProductCard>,
    /// Units of this product already in the cart.
    pub in_cart: Option<Quantity>,
}

/// Display product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ProductsView>> {
    let query = params.to_query();

    let (load_state, all) = match state.catalog().list_products(None).await {
        Ok(products) => (LoadState::Ready, products),
        Err(e) => {
            tracing::warn!("Failed to fetch products: {e}");
            (LoadState::Loading, Vec::new())
        }
    };

    let categories = categories(&all);
    let products = cards(&state, query.apply(all))?;

    Ok(Json(ProductsView {
        state: load_state,
        query,
        categories,
        products,
    }))
}

/// Display product detail.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailView>> {
    let product = match state.catalog().get_product(id).await {
        Ok(product) => product,
        Err(CatalogError::NotFound(_)) => {
            return Ok(Json(ProductDetailView {
                state: LoadState::NotFound,
                product: None,
                in_cart: None,
            }));
        }
        Err(e) => {
            tracing::warn!("Failed to fetch product {id}: {e}");
            return Ok(Json(ProductDetailView {
                state: LoadState::Loading,
                product: None,
                in_cart: None,
            }));
        }
    };

    let in_cart = state.cart()?.get(id).map(|item| item.quantity);
    let product = cards(&state, vec![product])?.pop();

    Ok(Json(ProductDetailView {
        state: LoadState::Ready,
        product,
        in_cart,
    }))
}
