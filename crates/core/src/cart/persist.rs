//! Stored cart encoding.
//!
//! The cart is stored as a JSON array of [`CartItem`]s. Stored text may come
//! from an older client or be edited by hand, so decoding is all-or-nothing:
//! one bad line discards the whole cart.

use std::collections::HashSet;

use serde_json::Value;

use crate::types::CartItem;

pub(crate) fn encode(items: &[CartItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode a stored cart, or `None` if anything about it is off.
pub(crate) fn decode(text: &str) -> Option<Vec<CartItem>> {
    let value: Value = serde_json::from_str(text).ok()?;
    if !value.as_array()?.iter().all(has_cart_item_shape) {
        return None;
    }

    let items: Vec<CartItem> = serde_json::from_value(value).ok()?;
    if items.iter().any(|item| item.quantity == 0) {
        return None;
    }

    let mut seen = HashSet::new();
    if !items.iter().all(|item| seen.insert(item.cart_id.as_str())) {
        return None;
    }
    Some(items)
}

/// The fields every reader of a stored cart relies on.
fn has_cart_item_shape(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let is = |key: &str, check: fn(&Value) -> bool| object.get(key).is_some_and(check);

    is("id", Value::is_number)
        && is("name", Value::is_string)
        && is("cartId", Value::is_string)
        && is("quantity", Value::is_number)
        && is("price", Value::is_number)
}
