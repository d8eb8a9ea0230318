//! Cart lines and their identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Product, ProductId, SelectedVariant};

/// Identifier of a cart line: one per (product, selected variant) pair.
///
/// Built as `"{product_id}-{variant_json}"` where the variant is rendered as a
/// compact JSON object with its keys sorted, so the same pair always maps to
/// the same line no matter in which order attributes were chosen.
///
/// ```
/// use kassa_core::{AttributeValue, CartId, ProductId, SelectedVariant};
///
/// let variant: SelectedVariant = [
///     ("Power", AttributeValue::from(6.5)),
///     ("Color", AttributeValue::from("white")),
/// ]
/// .into_iter()
/// .collect();
///
/// let id = CartId::new(ProductId::new(1), &variant);
/// assert_eq!(id.as_str(), r#"1-{"Color":"white","Power":6.5}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
    /// Build the line identifier for a product and variant.
    #[must_use]
    pub fn new(product_id: ProductId, variant: &SelectedVariant) -> Self {
        let mut entries: Vec<_> = variant.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut object = serde_json::Map::new();
        for (key, value) in entries {
            object.insert(key.to_owned(), value.to_json());
        }

        Self(format!(
            "{product_id}-{}",
            serde_json::Value::Object(object)
        ))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CartId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for CartId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CartId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A product in the cart with its chosen variant and quantity.
///
/// Serializes as the product's own fields plus `cartId`, `selectedVariant`
/// and `quantity`. The quantity of a stored line is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub cart_id: CartId,
    pub selected_variant: SelectedVariant,
    pub quantity: u32,
}
