//! Product catalog.
//!
//! The catalog is normalized once from an inventory document and is read-only
//! afterwards. All queries are simple pass-throughs over the product list.
//!
//! # Inventory format
//!
//! ```json
//! { "items": [ { "id": 1, "name": "...", "brand": "...", "price": 300,
//!                "options": [ { "color": ["white"], "power": [6.5, 9.5], "quantity": 5 } ] } ] }
//! ```

mod normalize;

pub use normalize::{UNKNOWN_BRAND, normalize_product, normalize_products};

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::types::{Product, ProductId};

/// Errors that can occur while reading an inventory document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid JSON.
    #[error("Invalid inventory JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// The normalized product catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from already-normalized products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Build a catalog from an inventory document.
    ///
    /// A document without an `items` array yields an empty catalog.
    #[must_use]
    pub fn from_inventory(document: &Value) -> Self {
        let Some(items) = document.get("items").and_then(Value::as_array) else {
            warn!("Inventory document has no items array");
            return Self::default();
        };
        Self::new(normalize_products(items))
    }

    /// Parse and normalize an inventory document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidJson`] if the text is not JSON. Problems
    /// with individual records never fail the load.
    pub fn from_inventory_json(json: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(json)?;
        Ok(Self::from_inventory(&document))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products, optionally filtered by availability.
    #[must_use]
    pub fn products(&self, available: Option<bool>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| available.is_none_or(|wanted| p.available == wanted))
            .collect()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products of a brand, matched case-insensitively.
    #[must_use]
    pub fn products_by_brand(&self, brand: &str) -> Vec<&Product> {
        let wanted = brand.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.brand.to_lowercase() == wanted)
            .collect()
    }

    /// Products whose brand slugifies to `slug`.
    #[must_use]
    pub fn products_by_brand_slug(&self, slug: &str) -> Vec<&Product> {
        let wanted = slug.to_lowercase();
        self.products
            .iter()
            .filter(|p| slugify(&p.brand) == wanted)
            .collect()
    }

    /// Unique brand names in order of first appearance.
    #[must_use]
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();
        for product in &self.products {
            if !brands.contains(&product.brand.as_str()) {
                brands.push(&product.brand);
            }
        }
        brands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Characters a slug drops: anything but word characters, whitespace and `-`.
static SLUG_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("Invalid regex"));

/// Runs of whitespace, underscores and hyphens, which become one `-`.
static SLUG_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("Invalid regex"));

/// Derive a URL slug: lowercase, trimmed, stripped of characters other than
/// ASCII word characters, whitespace and hyphens, with each run of
/// whitespace, underscores and hyphens collapsed to one hyphen.
///
/// ```
/// use kassa_core::catalog::slugify;
///
/// assert_eq!(slugify("  Philips Hue "), "philips-hue");
/// assert_eq!(slugify("AT&T -- Labs_Inc"), "att-labs-inc");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(lowered.trim(), "");
    let joined = SLUG_SEPARATOR_RE.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_inventory(&json!({
            "items": [
                {"id": 1, "name": "Hue Go", "brand": "Philips Hue", "price": 799},
                {"id": 2, "name": "Switch", "brand": "Nintendo", "price": "3500", "available": false},
                {"id": 3, "name": "Hue Play", "brand": "philips hue", "price": 999},
                {"id": 4, "name": "Generic"}
            ]
        }))
    }

    #[test]
    fn test_missing_items_yields_empty_catalog() {
        assert!(Catalog::from_inventory(&json!({"products": []})).is_empty());
        assert!(Catalog::from_inventory(&json!({"items": "nope"})).is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Catalog::from_inventory_json("{ items: ").is_err());
        assert_eq!(Catalog::from_inventory_json(r#"{"items": []}"#).unwrap().len(), 0);
    }

    #[test]
    fn test_products_availability_filter() {
        let catalog = catalog();
        assert_eq!(catalog.products(None).len(), 4);
        assert_eq!(catalog.products(Some(true)).len(), 3);
        let unavailable = catalog.products(Some(false));
        assert_eq!(unavailable.len(), 1);
        assert_eq!(unavailable[0].name, "Switch");
    }

    #[test]
    fn test_product_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.product(ProductId::new(2)).unwrap().name, "Switch");
        assert!(catalog.product(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_brand_queries() {
        let catalog = catalog();
        assert_eq!(catalog.products_by_brand("PHILIPS HUE").len(), 2);
        assert_eq!(catalog.products_by_brand_slug("philips-hue").len(), 2);
        assert_eq!(catalog.products_by_brand_slug("Nintendo").len(), 1);
        assert!(catalog.products_by_brand_slug("sony").is_empty());
    }

    #[test]
    fn test_brands_are_unique_in_first_seen_order() {
        assert_eq!(
            catalog().brands(),
            vec!["Philips Hue", "Nintendo", "philips hue", "Unknown"]
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Nintendo"), "nintendo");
        assert_eq!(slugify("  Philips   Hue  "), "philips-hue");
        assert_eq!(slugify("--B&O--Play--"), "bo-play");
        assert_eq!(slugify("snake_case name"), "snake-case-name");
        assert_eq!(slugify("Café Ünique"), "caf-nique");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_unicode_whitespace_separates() {
        assert_eq!(slugify("Philips\u{00a0}Hue"), "philips-hue");
        assert_eq!(slugify("Bang\u{2003}&\u{3000}Olufsen"), "bang-olufsen");
    }
}
