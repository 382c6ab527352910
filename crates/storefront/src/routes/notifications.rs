//! Notification banner handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::notify::ShownNotification;
use crate::state::AppState;

/// The visible notification, or `null`.
pub async fn current(State(state): State<AppState>) -> Json<Option<ShownNotification>> {
    Json(state.notifier().current())
}

/// Hide the visible notification.
pub async fn dismiss(State(state): State<AppState>) -> StatusCode {
    state.notifier().dismiss();
    StatusCode::NO_CONTENT
}
