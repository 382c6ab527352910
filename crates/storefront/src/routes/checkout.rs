//! Checkout route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use super::cart::CartView;
use crate::checkout::CheckoutStatus;
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Checkout page view model: progress plus the order summary.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    #[serde(flatten)]
    pub status: CheckoutStatus,
    pub summary: CartView,
}

fn view(state: &AppState) -> Result<CheckoutView> {
    let summary = CartView::from(&*state.cart()?);
    Ok(CheckoutView {
        status: state.checkout().status(),
        summary,
    })
}

/// Display checkout status.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CheckoutView>> {
    Ok(Json(view(&state)?))
}

/// Start the simulated checkout.
#[instrument(skip(state))]
pub async fn start(State(state): State<AppState>) -> Result<(StatusCode, Json<CheckoutView>)> {
    state.start_checkout()?;
    add_breadcrumb("checkout", "Checkout started", None);
    Ok((StatusCode::ACCEPTED, Json(view(&state)?)))
}
