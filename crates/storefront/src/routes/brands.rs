//! Brand route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use kassa_core::Product;
use kassa_core::catalog::slugify;
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// A brand in the listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSummary {
    pub name: String,
    pub slug: String,
    pub product_count: usize,
}

/// Brand listing response.
#[derive(Debug, Serialize)]
pub struct BrandList {
    pub brands: Vec<BrandSummary>,
}

/// Products of one brand.
#[derive(Debug, Serialize)]
pub struct BrandProducts {
    pub brand: String,
    pub products: Vec<Product>,
    pub total: usize,
}

/// List brands in catalog order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<BrandList> {
    let catalog = state.catalog();
    let brands = catalog
        .brands()
        .into_iter()
        .map(|name| BrandSummary {
            name: name.to_string(),
            slug: slugify(name),
            product_count: catalog.all().iter().filter(|p| p.brand == name).count(),
        })
        .collect();

    Json(BrandList { brands })
}

/// List the products of the brand whose name slugifies to `slug`.
///
/// # Errors
///
/// Returns 404 when no product belongs to such a brand.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BrandProducts>> {
    let products: Vec<Product> = state
        .catalog()
        .products_by_brand_slug(&slug)
        .into_iter()
        .cloned()
        .collect();

    let brand = products
        .first()
        .map(|p| p.brand.clone())
        .ok_or_else(|| AppError::NotFound("Brand not found".to_string()))?;

    Ok(Json(BrandProducts {
        brand,
        total: products.len(),
        products,
    }))
}
