//! Catalog products and their inventory options.

use serde::{Deserialize, Serialize};

use super::{AttributeValue, OrderedMap, Price, ProductId};

/// Attribute name → allowed values, in catalog order.
pub type Attributes = OrderedMap<Vec<AttributeValue>>;

/// Attribute name → chosen value.
///
/// A selected variant is complete once every attribute key of its product has
/// an entry. Products without options use an empty map.
pub type SelectedVariant = OrderedMap<AttributeValue>;

/// One inventory line of a product: a combination of attribute values and the
/// stock available for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOption {
    pub attributes: Attributes,
    pub quantity: u32,
}

impl VariantOption {
    /// Whether this option lists `value` for `key`.
    #[must_use]
    pub fn allows(&self, key: &str, value: &AttributeValue) -> bool {
        self.attributes
            .get(key)
            .is_some_and(|values| values.contains(value))
    }
}

/// A catalog product.
///
/// Products are immutable once loaded; every option of a product shares the
/// same attribute keys, with the first option's key order authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub available: bool,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

impl Product {
    /// Whether the product is sold in variants.
    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}
