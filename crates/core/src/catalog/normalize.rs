//! Normalization from raw inventory records to [`Product`]s.
//!
//! Inventory files are loosely typed: ids and prices arrive as strings or
//! numbers, fields go missing, and option records mix attribute columns with a
//! `quantity` column. Normalization is best-effort. A record that cannot
//! become a product is dropped on its own and never fails the whole load.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::types::{AttributeValue, Attributes, Price, Product, ProductId, VariantOption};
use crate::variant::title_case;

/// Brand given to products whose record names none.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Key of the stock column in raw option records.
const QUANTITY_KEY: &str = "quantity";

/// Normalize every usable record, dropping the rest.
#[must_use]
pub fn normalize_products(records: &[Value]) -> Vec<Product> {
    let products: Vec<Product> = records.iter().filter_map(normalize_product).collect();
    if products.len() < records.len() {
        debug!(
            dropped = records.len() - products.len(),
            "Dropped unusable inventory records"
        );
    }
    products
}

/// Normalize a single raw record.
///
/// Returns `None` when the record is not an object, has no string `name`, or
/// has no usable integer `id`. Every other field falls back to a default.
#[must_use]
pub fn normalize_product(raw: &Value) -> Option<Product> {
    let record = raw.as_object()?;
    let name = record.get("name")?.as_str()?;
    let id = coerce_id(record.get("id")?)?;

    let price = record
        .get("price")
        .and_then(coerce_price)
        .unwrap_or(Price::ZERO);
    let brand = record
        .get("brand")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_BRAND);
    let available = record.get("available").and_then(Value::as_bool) != Some(false);
    let weight = record
        .get("weight")
        .and_then(coerce_number)
        .filter(|w| w.is_finite())
        .unwrap_or(0.0);
    let options: Vec<VariantOption> = record
        .get("options")
        .and_then(Value::as_array)
        .map(|raw_options| {
            raw_options
                .iter()
                .filter_map(Value::as_object)
                .map(normalize_option)
                .collect()
        })
        .unwrap_or_default();

    if has_diverging_keys(&options) {
        warn!(product_id = %id, "Variant options do not share one attribute key set");
    }

    Some(Product {
        id,
        name: name.to_owned(),
        brand: brand.to_owned(),
        price,
        available,
        weight,
        options,
    })
}

/// Normalize one raw option record.
fn normalize_option(raw: &Map<String, Value>) -> VariantOption {
    let mut attributes = Attributes::new();

    for (key, value) in raw {
        if key == QUANTITY_KEY {
            continue;
        }
        let values = match value {
            Value::Array(items) => items.iter().map(coerce_attribute_value).collect(),
            Value::String(_) | Value::Number(_) => vec![coerce_attribute_value(value)],
            _ => continue,
        };
        attributes.insert(title_case(key), values);
    }

    let quantity = raw
        .get(QUANTITY_KEY)
        .and_then(coerce_number)
        .map_or(0, clamp_quantity);

    VariantOption {
        attributes,
        quantity,
    }
}

/// Strings and numbers are kept as they are; anything else is reduced to its
/// text form.
fn coerce_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::String(text) => AttributeValue::Text(text.clone()),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| AttributeValue::Text(n.to_string()), AttributeValue::Number),
        Value::Null => AttributeValue::from("null"),
        Value::Bool(b) => AttributeValue::Text(b.to_string()),
        other => AttributeValue::Text(other.to_string()),
    }
}

/// Ids must be integral, whether they arrive as numbers or as text.
#[allow(clippy::cast_possible_truncation)] // fraction and range checked first
fn coerce_id(value: &Value) -> Option<ProductId> {
    let id = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        })?,
        Value::String(text) => text.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Some(ProductId::new(id))
}

fn coerce_price(value: &Value) -> Option<Price> {
    match value {
        Value::Number(n) => n.as_f64().and_then(Price::from_f64),
        Value::String(text) => Price::parse(text),
        _ => None,
    }
}

/// Numbers, or text that parses as a number.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped first
fn clamp_quantity(raw: f64) -> u32 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(f64::from(u32::MAX)).trunc() as u32
    } else {
        0
    }
}

fn has_diverging_keys(options: &[VariantOption]) -> bool {
    let Some((first, rest)) = options.split_first() else {
        return false;
    };
    rest.iter().any(|option| {
        option.attributes.len() != first.attributes.len()
            || option
                .attributes
                .keys()
                .any(|key| !first.attributes.contains_key(key))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_drops_records_without_id_or_name() {
        let records = vec![
            json!({"id": 1, "name": "Kept"}),
            json!({"name": "No id"}),
            json!({"id": 2}),
            json!({"id": 3, "name": 42}),
            json!({"id": true, "name": "Bool id"}),
            json!("not an object"),
            json!(null),
        ];
        let products = normalize_products(&records);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Kept");
    }

    #[test]
    fn test_coerces_string_ids() {
        let product = normalize_product(&json!({"id": " 12 ", "name": "Lamp"})).unwrap();
        assert_eq!(product.id, ProductId::new(12));
    }

    #[test]
    fn test_drops_non_integral_ids() {
        assert!(normalize_product(&json!({"id": "abc", "name": "x"})).is_none());
        assert!(normalize_product(&json!({"id": "", "name": "x"})).is_none());
        assert!(normalize_product(&json!({"id": 1.5, "name": "x"})).is_none());
    }

    #[test]
    fn test_accepts_integral_float_ids() {
        let product = normalize_product(&json!({"id": 7.0, "name": "x"})).unwrap();
        assert_eq!(product.id, ProductId::new(7));
    }

    #[test]
    fn test_defaults() {
        let product = normalize_product(&json!({"id": 1, "name": "Bare"})).unwrap();
        assert_eq!(product.brand, "Unknown");
        assert_eq!(product.price, Price::ZERO);
        assert!(product.available);
        assert!(product.weight.abs() < f64::EPSILON);
        assert!(product.options.is_empty());
    }

    #[test]
    fn test_available_only_false_when_explicit() {
        let off = normalize_product(&json!({"id": 1, "name": "a", "available": false})).unwrap();
        let odd = normalize_product(&json!({"id": 1, "name": "a", "available": "no"})).unwrap();
        assert!(!off.available);
        assert!(odd.available);
    }

    #[test]
    fn test_price_coercion_fails_soft() {
        let text = normalize_product(&json!({"id": 1, "name": "a", "price": "1299"})).unwrap();
        assert_eq!(text.price.amount(), Decimal::new(1299, 0));

        let invalid = normalize_product(&json!({"id": 2, "name": "b", "price": "free"})).unwrap();
        assert_eq!(invalid.price, Price::ZERO);

        let negative = normalize_product(&json!({"id": 3, "name": "c", "price": -5})).unwrap();
        assert_eq!(negative.price, Price::ZERO);
    }

    #[test]
    fn test_option_keys_are_title_cased() {
        let product = normalize_product(&json!({
            "id": 1,
            "name": "Light",
            "options": [{"color": ["white"], "POWER": [6.5, 9.5], "quantity": 5}]
        }))
        .unwrap();

        let option = &product.options[0];
        assert_eq!(option.attributes.keys().collect::<Vec<_>>(), vec!["Color", "Power"]);
        assert_eq!(option.quantity, 5);
        assert_eq!(
            option.attributes.get("Power").unwrap(),
            &vec![AttributeValue::from(6.5), AttributeValue::from(9.5)]
        );
    }

    #[test]
    fn test_option_scalars_are_wrapped() {
        let product = normalize_product(&json!({
            "id": 1,
            "name": "Switch",
            "options": [{"color": "red", "storage": 32, "quantity": "3"}]
        }))
        .unwrap();

        let option = &product.options[0];
        assert_eq!(option.attributes.get("Color").unwrap(), &vec![AttributeValue::from("red")]);
        assert_eq!(option.attributes.get("Storage").unwrap(), &vec![AttributeValue::from(32)]);
        assert_eq!(option.quantity, 3);
    }

    #[test]
    fn test_option_non_scalar_elements_become_text() {
        let product = normalize_product(&json!({
            "id": 1,
            "name": "Odd",
            "options": [{"finish": [true, null, "matte"], "flag": false}]
        }))
        .unwrap();

        let option = &product.options[0];
        assert_eq!(
            option.attributes.get("Finish").unwrap(),
            &vec![
                AttributeValue::from("true"),
                AttributeValue::from("null"),
                AttributeValue::from("matte")
            ]
        );
        assert!(!option.attributes.contains_key("Flag"));
        assert_eq!(option.quantity, 0);
    }

    #[test]
    fn test_option_quantity_is_never_negative() {
        let product = normalize_product(&json!({
            "id": 1,
            "name": "Neg",
            "options": [{"color": "red", "quantity": -4}, {"color": "blue", "quantity": "many"}]
        }))
        .unwrap();
        assert_eq!(product.options[0].quantity, 0);
        assert_eq!(product.options[1].quantity, 0);
    }

    #[test]
    fn test_non_object_options_are_skipped() {
        let product = normalize_product(&json!({
            "id": 1,
            "name": "Mixed",
            "options": ["junk", 3, {"color": "red", "quantity": 1}]
        }))
        .unwrap();
        assert_eq!(product.options.len(), 1);
    }

    #[test]
    fn test_diverging_keys_detected() {
        let product = normalize_product(&json!({
            "id": 1,
            "name": "Mixed",
            "options": [{"color": "red"}, {"size": "S"}]
        }))
        .unwrap();
        assert!(has_diverging_keys(&product.options));

        let same = normalize_product(&json!({
            "id": 2,
            "name": "Same",
            "options": [{"color": "red", "size": "S"}, {"size": "M", "color": "blue"}]
        }))
        .unwrap();
        assert!(!has_diverging_keys(&same.options));
    }
}
