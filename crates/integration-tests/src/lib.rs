//! Integration tests for Kassa.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kassa-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_api` - Storefront HTTP API against an in-process router
//! - `cart_store` - Cart persistence, listeners and stock reconciliation
//! - `variant_selection` - Selection cascade over realistic inventory
//!
//! Everything runs in-process; no server or database is needed.

use std::path::PathBuf;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use kassa_core::{Catalog, Product, ProductId};
use kassa_storefront::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// Inventory shaped like a real export: loosely typed ids and prices,
/// lower-case option columns, a record without an id.
pub const INVENTORY: &str = r#"{
    "items": [
        {
            "id": 1, "name": "Spotlight GU10", "brand": "Philips Hue", "price": 349, "weight": 0.1,
            "options": [
                {"color": ["white"], "power": [6.5, 9.5], "quantity": 5},
                {"color": ["red"], "power": [6.5], "quantity": 0}
            ]
        },
        {
            "id": "2", "name": "Switch OLED", "brand": "Nintendo", "price": "3999",
            "options": [
                {"color": "white", "storage": [64], "quantity": 2},
                {"color": "neon", "storage": [64, 256], "quantity": 7}
            ]
        },
        {"id": 3, "name": "HDMI Cable", "brand": "Nintendo", "price": 149},
        {"id": 4, "name": "Hue Bridge", "brand": "Philips Hue", "price": 599, "available": false},
        {"name": "Orphan record", "price": 10}
    ]
}"#;

/// The catalog built from [`INVENTORY`].
///
/// # Panics
///
/// Panics if [`INVENTORY`] is not valid JSON.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog() -> Catalog {
    Catalog::from_inventory_json(INVENTORY).expect("fixture inventory is valid JSON")
}

/// A product from [`catalog`].
///
/// # Panics
///
/// Panics if the product does not exist.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product(id: i64) -> Product {
    catalog()
        .product(ProductId::new(id))
        .cloned()
        .expect("fixture product exists")
}

/// The storefront router over [`catalog`].
#[must_use]
pub fn app() -> Router {
    kassa_storefront::app(AppState::new(catalog()))
}

/// Issue a GET against [`app`] and decode the JSON body (`Null` if not JSON).
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
#[allow(clippy::expect_used)]
pub async fn get_json(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    let response = app().oneshot(request).await.expect("infallible service");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Path of the sample inventory shipped with the repository.
#[must_use]
pub fn sample_inventory_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/inventory.json")
}
