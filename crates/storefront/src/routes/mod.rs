//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Products
//! GET  /api/products                - Product listing (?available=true|false)
//! GET  /api/products/{id}           - Product detail
//!
//! # Brands
//! GET  /api/brands                  - Brand listing with product counts
//! GET  /api/brands/{slug}/products  - Products of one brand
//! ```

pub mod brands;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the brand routes router.
pub fn brand_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::index))
        .route("/{slug}/products", get(brands::products))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/brands", brand_routes())
}
