//! Home page handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use super::{LoadState, ProductCard, cards};
use crate::error::Result;
use crate::state::AppState;

/// Home page view model.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub state: LoadState,
    pub featured: Vec<ProductCard>,
    pub cart_count: u32,
}

/// Featured products, capped at the configured limit.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeView>> {
    let limit = state.config().featured_limit;

    let (load_state, products) = match state.catalog().list_products(Some(limit)).await {
        Ok(products) => (LoadState::Ready, products),
        Err(e) => {
            tracing::warn!("Failed to fetch featured products: {e}");
            (LoadState::Loading, Vec::new())
        }
    };

    let featured = cards(&state, products)?;
    let cart_count = state.cart()?.item_count();

    Ok(Json(HomeView {
        state: load_state,
        featured,
        cart_count,
    }))
}
