//! Human-readable rendering of attributes and selections.

use super::attribute_keys;
use crate::types::{AttributeValue, SelectedVariant, VariantOption};

/// Unit suffixes shown after attribute values.
const ATTRIBUTE_SUFFIXES: &[(&str, &str)] = &[("Power", "W")];

/// Uppercase the first character and lowercase the rest.
///
/// ```
/// use kassa_core::variant::title_case;
///
/// assert_eq!(title_case("color"), "Color");
/// assert_eq!(title_case("POWER"), "Power");
/// ```
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect()
    })
}

/// Unit suffix for an attribute, empty when it has none.
#[must_use]
pub fn attribute_suffix(key: &str) -> &'static str {
    ATTRIBUTE_SUFFIXES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or("", |(_, suffix)| suffix)
}

/// A value with its attribute's suffix, e.g. `6.5W`.
#[must_use]
pub fn format_value(key: &str, value: &AttributeValue) -> String {
    format!("{value}{}", attribute_suffix(key))
}

/// All values of a variant joined for display, e.g. `white • 6.5W`.
#[must_use]
pub fn format_variant(variant: &SelectedVariant) -> String {
    variant
        .iter()
        .map(|(key, value)| format_value(key, value))
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Advice for a selection that cannot be added to the cart yet.
///
/// `None` when there is nothing to choose or the selection is valid.
#[must_use]
pub fn missing_selection_message(
    options: &[VariantOption],
    variant: Option<&SelectedVariant>,
    is_valid: bool,
    max_stock: Option<u32>,
) -> Option<String> {
    if options.is_empty() || is_valid {
        return None;
    }
    if max_stock == Some(0) {
        return Some("Sold out for this combination".to_owned());
    }

    let missing: Vec<String> = attribute_keys(options)
        .into_iter()
        .filter(|key| variant.is_none_or(|v| !v.contains_key(key)))
        .map(|key| key.to_lowercase())
        .collect();

    let message = match missing.as_slice() {
        [] => "This combination doesn't exist, try a different selection".to_owned(),
        [only] => format!("Select a {only}"),
        [init @ .., last] => format!("Select {} and {last}", init.join(", ")),
    };
    Some(message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Attributes;

    fn three_keys() -> Vec<VariantOption> {
        let attributes: Attributes = [
            ("Color", vec![AttributeValue::from("black")]),
            ("Power", vec![AttributeValue::from(6.5)]),
            ("Storage", vec![AttributeValue::from(32)]),
        ]
        .into_iter()
        .collect();
        vec![VariantOption {
            attributes,
            quantity: 1,
        }]
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("color"), "Color");
        assert_eq!(title_case("sTORAGE"), "Storage");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("é"), "É");
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(attribute_suffix("Power"), "W");
        assert_eq!(attribute_suffix("Storage"), "");
        assert_eq!(attribute_suffix("Unknown"), "");
    }

    #[test]
    fn test_format_variant() {
        let variant: SelectedVariant = [
            ("Color", AttributeValue::from("white")),
            ("Power", AttributeValue::from(6.5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(format_variant(&variant), "white • 6.5W");
        assert_eq!(format_variant(&SelectedVariant::new()), "");
    }

    #[test]
    fn test_message_none_when_valid_or_no_options() {
        assert_eq!(missing_selection_message(&[], None, false, None), None);
        assert_eq!(missing_selection_message(&three_keys(), None, true, Some(1)), None);
    }

    #[test]
    fn test_message_sold_out() {
        let options = three_keys();
        assert_eq!(
            missing_selection_message(&options, None, false, Some(0)).unwrap(),
            "Sold out for this combination"
        );
    }

    #[test]
    fn test_message_lists_missing_keys() {
        let options = three_keys();
        assert_eq!(
            missing_selection_message(&options, None, false, None).unwrap(),
            "Select color, power and storage"
        );

        let partial: SelectedVariant = [
            ("Color", AttributeValue::from("black")),
            ("Power", AttributeValue::from(6.5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            missing_selection_message(&options, Some(&partial), false, None).unwrap(),
            "Select a storage"
        );
    }

    #[test]
    fn test_message_for_nonexistent_combination() {
        let options = three_keys();
        let complete: SelectedVariant = [
            ("Color", AttributeValue::from("red")),
            ("Power", AttributeValue::from(6.5)),
            ("Storage", AttributeValue::from(32)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            missing_selection_message(&options, Some(&complete), false, None).unwrap(),
            "This combination doesn't exist, try a different selection"
        );
    }
}
