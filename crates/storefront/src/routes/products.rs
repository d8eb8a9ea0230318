//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use kassa_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// `true` keeps available products; any other value keeps unavailable ones.
    pub available: Option<String>,
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub total: usize,
}

/// List products, optionally filtered by availability.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<ProductList> {
    let available = query.available.as_deref().map(|value| value == "true");
    let products: Vec<Product> = state
        .catalog()
        .products(available)
        .into_iter()
        .cloned()
        .collect();

    Json(ProductList {
        total: products.len(),
        products,
    })
}

/// Show a single product.
///
/// # Errors
///
/// Returns 400 when the id is not an integer and 404 when no product has it.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = parse_product_id(&id)
        .ok_or_else(|| AppError::BadRequest("Invalid product ID".to_string()))?;

    state
        .catalog()
        .product(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

/// Parse the leading integer of a path segment, e.g. `42` from `42-hue-go`.
///
/// Leading whitespace and a sign are accepted; anything after the digits is
/// ignored. `None` when there are no digits.
fn parse_product_id(raw: &str) -> Option<ProductId> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let end = sign_len + digits;
    if digits == 0 {
        return None;
    }

    trimmed.get(..end)?.parse::<i64>().ok().map(ProductId::new)
}
