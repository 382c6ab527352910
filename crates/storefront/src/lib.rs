//! Keeg Store storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON view models
//! - Remote product catalog over HTTP, cached in memory
//! - Cart, wishlist and favorites persisted as JSON blobs in a
//!   [`KeyValueStore`](keeg_store_core::storage::KeyValueStore)
//!   (files under `STOREFRONT_DATA_DIR` in production)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod routes;
pub mod state;
pub mod storage;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the storefront router with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use keeg_store_core::storage::MemoryStore;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{CatalogConfig, StorefrontConfig, TimingConfig};

    fn state() -> AppState {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            data_dir: PathBuf::from("unused"),
            catalog: CatalogConfig::new("http://127.0.0.1:1".parse().unwrap()),
            timing: TimingConfig::default(),
            featured_limit: 6,
            sentry_dsn: None,
            sentry_environment: None,
        };
        AppState::new(config, Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = app(state())
            .oneshot(
                Request::builder()
                    .uri("/api/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cart_count_starts_at_zero() {
        let response = app(state())
            .oneshot(
                Request::builder()
                    .uri("/api/cart/count")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
