//! End-to-end tests for the storefront API.
//!
//! Each test starts a fake catalog API and a storefront bound to ephemeral
//! localhost ports, then drives the storefront over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use keeg_store_core::storage::{KeyValueStore, MemoryStore, keys};
use keeg_store_storefront::config::{CatalogConfig, StorefrontConfig, TimingConfig};
use keeg_store_storefront::state::AppState;
use serde_json::{Value, json};

// =============================================================================
// Fake catalog
// =============================================================================

fn catalog_products() -> Vec<Value> {
    vec![
        product_json(1, "Fjallraven Backpack", 109.95, "men's clothing"),
        product_json(2, "Casual T-Shirt", 22.3, "men's clothing"),
        product_json(3, "Cotton Jacket", 55.99, "men's clothing"),
        product_json(5, "Dragon Bracelet", 695, "jewelery"),
        product_json(9, "WD 2TB Drive", 64, "electronics"),
        product_json(10, "SanDisk SSD", 109, "electronics"),
        product_json(11, "Silicon Power SSD", 109, "electronics"),
    ]
}

fn product_json(id: i64, title: &str, price: impl Into<Value>, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price.into(),
        "description": format!("{title} description"),
        "category": category,
        "image": format!("https://img.example/{id}.png"),
        "rating": {"rate": 3.9, "count": 120},
    })
}

async fn list_products(Query(params): Query<HashMap<String, String>>) -> Json<Vec<Value>> {
    let mut products = catalog_products();
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        products.truncate(limit);
    }
    Json(products)
}

/// Unknown ids answer 200 with an empty body; id 404 answers a real 404.
async fn get_product(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return StatusCode::NOT_FOUND.into_response();
    }
    catalog_products()
        .into_iter()
        .find(|p| p["id"] == id)
        .map_or_else(|| "".into_response(), |p| Json(p).into_response())
}

async fn spawn_catalog() -> String {
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

// =============================================================================
// Storefront harness
// =============================================================================

struct TestApp {
    base: String,
    client: reqwest::Client,
}

impl TestApp {
    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{path}", self.base))
            .send()
            .await
            .unwrap();
        decode(response).await
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}{path}", self.base))
            .form(form)
            .send()
            .await
            .unwrap();
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> (StatusCode, Value) {
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let body = response.text().await.unwrap();
    let value = serde_json::from_str(&body).unwrap_or(Value::String(body));
    (status, value)
}

fn test_config(catalog_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        data_dir: PathBuf::from("unused"),
        catalog: CatalogConfig::new(catalog_url.parse().unwrap()),
        timing: TimingConfig {
            notification_dismiss: Duration::from_secs(60),
            checkout_processing: Duration::from_millis(50),
            checkout_redirect: Duration::from_secs(60),
        },
        featured_limit: 6,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

async fn spawn_storefront(catalog_url: &str, storage: MemoryStore) -> TestApp {
    let state = AppState::new(test_config(catalog_url), Arc::new(storage));
    let app = keeg_store_storefront::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
    }
}

async fn spawn() -> TestApp {
    let catalog = spawn_catalog().await;
    spawn_storefront(&catalog, MemoryStore::new()).await
}

fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

fn assert_money(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

// =============================================================================
// Catalog views
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = spawn().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn test_home_shows_featured_products() {
    let app = spawn().await;
    let (status, home) = app.get("/api/home").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["state"], "ready");
    assert_eq!(ids(&home["featured"]), vec![1, 2, 3, 5, 9, 10]);
    assert_eq!(home["featured"][0]["in_wishlist"], false);
    assert_eq!(home["featured"][0]["is_favorite"], false);
    assert_eq!(home["cart_count"], 0);
}

#[tokio::test]
async fn test_listing_filters_and_sorts() {
    let app = spawn().await;

    let (_, all) = app.get("/api/products").await;
    assert_eq!(all["state"], "ready");
    assert_eq!(all["products"].as_array().unwrap().len(), 7);
    assert_eq!(
        all["categories"],
        json!(["men's clothing", "jewelery", "electronics"])
    );

    let (_, asc) = app
        .get("/api/products?category=electronics&sort=asc")
        .await;
    assert_eq!(ids(&asc["products"]), vec![9, 10, 11]);

    let (_, desc) = app
        .get("/api/products?category=electronics&sort=desc")
        .await;
    assert_eq!(ids(&desc["products"]), vec![10, 11, 9]);

    let (_, unfiltered) = app.get("/api/products?category=&sort=").await;
    assert_eq!(ids(&unfiltered["products"]), vec![1, 2, 3, 5, 9, 10, 11]);
}

#[tokio::test]
async fn test_product_detail_states() {
    let app = spawn().await;

    let (status, detail) = app.get("/api/products/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["state"], "ready");
    assert_eq!(detail["product"]["title"], "Cotton Jacket");
    assert_money(&detail["product"]["price"], 55.99);
    assert_eq!(detail["in_cart"], Value::Null);

    let (_, missing) = app.get("/api/products/77").await;
    assert_eq!(missing["state"], "not_found");
    assert_eq!(missing["product"], Value::Null);

    let (_, gone) = app.get("/api/products/404").await;
    assert_eq!(gone["state"], "not_found");
}

#[tokio::test]
async fn test_unreachable_catalog_shows_loading() {
    let app = spawn_storefront("http://127.0.0.1:1", MemoryStore::new()).await;

    let (status, home) = app.get("/api/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["state"], "loading");
    assert_eq!(home["featured"], json!([]));

    let (_, listing) = app.get("/api/products").await;
    assert_eq!(listing["state"], "loading");

    let (_, detail) = app.get("/api/products/1").await;
    assert_eq!(detail["state"], "loading");

    let (status, _) = app.post("/api/cart/add", &[("product_id", "1")]).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_add_update_remove() {
    let app = spawn().await;

    let (_, count) = app.post("/api/cart/add", &[("product_id", "1")]).await;
    assert_eq!(count["count"], 1);
    let (_, count) = app.post("/api/cart/add", &[("product_id", "1")]).await;
    assert_eq!(count["count"], 2);
    let (_, count) = app.post("/api/cart/add", &[("product_id", "2")]).await;
    assert_eq!(count["count"], 3);

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(ids(&cart["items"]), vec![1, 2]);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_money(&cart["items"][0]["line_total"], 219.9);
    assert_money(&cart["total"], 242.2);

    let (_, cart) = app
        .post("/api/cart/update", &[("product_id", "2"), ("quantity", " 3 ")])
        .await;
    assert_eq!(cart["items"][1]["quantity"], 3);
    assert_money(&cart["total"], 286.8);

    let (_, cart) = app
        .post("/api/cart/remove", &[("product_id", "1")])
        .await;
    assert_eq!(ids(&cart["items"]), vec![2]);
    assert_money(&cart["total"], 66.9);

    let (_, count) = app.get("/api/cart/count").await;
    assert_eq!(count["count"], 3);
}

#[tokio::test]
async fn test_cart_ignores_invalid_quantity_text() {
    let app = spawn().await;
    app.post("/api/cart/add", &[("product_id", "3")]).await;

    for input in ["", "abc", "0", "-2", "1.5"] {
        let (status, cart) = app
            .post("/api/cart/update", &[("product_id", "3"), ("quantity", input)])
            .await;
        assert_eq!(status, StatusCode::OK, "input: {input:?}");
        assert_eq!(cart["items"][0]["quantity"], 1, "input: {input:?}");
    }
}

#[tokio::test]
async fn test_cart_add_unknown_product() {
    let app = spawn().await;

    let (status, _) = app.post("/api/cart/add", &[("product_id", "77")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_add_to_cart_shows_notification() {
    let app = spawn().await;

    let (_, none) = app.get("/api/notification").await;
    assert_eq!(none, Value::Null);

    app.post("/api/cart/add", &[("product_id", "1")]).await;
    let (_, shown) = app.get("/api/notification").await;
    assert_eq!(shown["kind"], "success");
    assert_eq!(shown["message"], "Fjallraven Backpack added to cart");

    let (status, _) = app.post("/api/notification/dismiss", &[]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, none) = app.get("/api/notification").await;
    assert_eq!(none, Value::Null);
}

#[tokio::test]
async fn test_product_detail_reports_cart_quantity() {
    let app = spawn().await;
    app.post("/api/cart/add", &[("product_id", "3")]).await;
    app.post("/api/cart/add", &[("product_id", "3")]).await;

    let (_, detail) = app.get("/api/products/3").await;
    assert_eq!(detail["in_cart"], 2);
}

// =============================================================================
// Wishlist and favorites
// =============================================================================

#[tokio::test]
async fn test_wishlist_toggle_and_confirmed_remove() {
    let app = spawn().await;

    let (_, toggled) = app
        .post("/api/wishlist/toggle", &[("product_id", "3")])
        .await;
    assert_eq!(toggled["in_wishlist"], true);

    let (_, shown) = app.get("/api/notification").await;
    assert_eq!(shown["kind"], "success");
    assert_eq!(shown["message"], "Cotton Jacket added to wishlist");

    let (_, wishlist) = app.get("/api/wishlist").await;
    assert_eq!(ids(&wishlist["items"]), vec![3]);

    let (_, detail) = app.get("/api/products/3").await;
    assert_eq!(detail["product"]["in_wishlist"], true);

    let (status, _) = app
        .post("/api/wishlist/remove", &[("product_id", "3")])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, wishlist) = app.get("/api/wishlist").await;
    assert_eq!(ids(&wishlist["items"]), vec![3]);

    let (status, wishlist) = app
        .post(
            "/api/wishlist/remove",
            &[("product_id", "3"), ("confirm", "true")],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wishlist["items"], json!([]));

    let (_, shown) = app.get("/api/notification").await;
    assert_eq!(shown["kind"], "error");
    assert_eq!(shown["message"], "Cotton Jacket removed from wishlist");

    let (status, _) = app
        .post(
            "/api/wishlist/remove",
            &[("product_id", "3"), ("confirm", "true")],
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorites_are_separate_from_wishlist() {
    let storage = MemoryStore::new();
    let catalog = spawn_catalog().await;
    let app = spawn_storefront(&catalog, storage.clone()).await;

    let (_, favorite) = app
        .post("/api/favorites/toggle", &[("product_id", "5")])
        .await;
    assert_eq!(favorite["is_favorite"], true);

    let (_, wishlist) = app.get("/api/wishlist").await;
    assert_eq!(wishlist["items"], json!([]));

    let (_, detail) = app.get("/api/products/5").await;
    assert_eq!(detail["product"]["is_favorite"], true);
    assert_eq!(detail["product"]["in_wishlist"], false);

    assert!(storage.get(keys::FAVORITES).unwrap().is_some());
    assert_eq!(storage.get(keys::WISHLIST).unwrap(), None);

    let (_, favorite) = app
        .post("/api/favorites/toggle", &[("product_id", "5")])
        .await;
    assert_eq!(favorite["is_favorite"], false);
}

// =============================================================================
// Checkout and persistence
// =============================================================================

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let app = spawn().await;

    let (status, _) = app.post("/api/checkout", &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, checkout) = app.get("/api/checkout").await;
    assert_eq!(checkout["status"], "idle");
}

#[tokio::test]
async fn test_checkout_clears_cart_after_processing() {
    let storage = MemoryStore::new();
    let catalog = spawn_catalog().await;
    let app = spawn_storefront(&catalog, storage.clone()).await;

    app.post("/api/cart/add", &[("product_id", "9")]).await;

    let (status, checkout) = app.post("/api/checkout", &[]).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(checkout["status"], "processing");
    assert_money(&checkout["summary"]["total"], 64.0);

    let (status, _) = app.post("/api/checkout", &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_millis(300)).await;

    let (_, checkout) = app.get("/api/checkout").await;
    assert_eq!(checkout["status"], "succeeded");
    assert_eq!(checkout["redirect_to"], "/");
    assert_eq!(checkout["summary"]["items"], json!([]));

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(storage.get(keys::CART).unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_state_survives_restart() {
    let storage = MemoryStore::new();
    let catalog = spawn_catalog().await;

    let first = spawn_storefront(&catalog, storage.clone()).await;
    first.post("/api/cart/add", &[("product_id", "1")]).await;
    first.post("/api/cart/add", &[("product_id", "1")]).await;
    first
        .post("/api/wishlist/toggle", &[("product_id", "2")])
        .await;

    let second = spawn_storefront(&catalog, storage).await;

    let (_, cart) = second.get("/api/cart").await;
    assert_eq!(ids(&cart["items"]), vec![1]);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_money(&cart["total"], 219.9);

    let (_, wishlist) = second.get("/api/wishlist").await;
    assert_eq!(ids(&wishlist["items"]), vec![2]);
}

#[tokio::test]
async fn test_corrupt_blob_starts_empty() {
    let storage = MemoryStore::with_entries([(keys::CART, "{not json")]);
    let catalog = spawn_catalog().await;
    let app = spawn_storefront(&catalog, storage).await;

    let (status, cart) = app.get("/api/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
    assert_money(&cart["total"], 0.0);
}
