//! Variant selection and stock resolution.
//!
//! A product's options enumerate every sellable combination of attribute
//! values together with its stock. Selection runs left to right over the
//! attribute keys of the first option: the values offered for a key depend
//! only on the values chosen for the keys before it, so changing an earlier
//! attribute narrows (or clears) the later ones and never the other way round.
//!
//! ```
//! use kassa_core::{AttributeValue, VariantOption, VariantSelector};
//!
//! let options: Vec<VariantOption> = serde_json::from_str(r#"[
//!     {"attributes": {"Color": ["white"], "Power": [6.5, 9.5]}, "quantity": 5},
//!     {"attributes": {"Color": ["red"], "Power": [6.5]}, "quantity": 0}
//! ]"#).unwrap();
//!
//! let mut selector = VariantSelector::new(&options);
//! assert!(selector.validation().is_valid);
//!
//! selector.select("Color", AttributeValue::from("red")).unwrap();
//! assert_eq!(selector.available_values("Power"), vec![AttributeValue::from(6.5)]);
//! assert_eq!(selector.selected("Power"), Some(&AttributeValue::from(6.5)));
//! assert!(!selector.validation().is_valid); // sold out
//! ```

mod display;

pub use display::{attribute_suffix, format_value, format_variant, missing_selection_message, title_case};

use thiserror::Error;

use crate::types::{AttributeValue, OrderedMap, Product, SelectedVariant, VariantOption};

/// Attribute key → chosen value, `None` while unselected.
///
/// Selections produced by this module list every attribute key of the product
/// in key order.
pub type Selection = OrderedMap<Option<AttributeValue>>;

/// Errors from changing a selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// The product has no attribute with this name.
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// The value is not offered for the attribute under the current selection.
    #[error("{value} is not available for {key}")]
    UnavailableValue { key: String, value: String },
}

/// Outcome of validating a selection.
///
/// `variant` is `Some` as soon as every attribute has a value, even when the
/// combination is sold out or does not exist; `is_valid` additionally requires
/// a matching option with stock. This keeps "incomplete" and "sold out" apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub variant: Option<SelectedVariant>,
    pub is_valid: bool,
}

impl Validation {
    /// The state of a product without options: nothing to choose, always valid.
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self {
            variant: None,
            is_valid: true,
        }
    }
}

/// Attribute names of the first option, in order. Empty without options.
#[must_use]
pub fn attribute_keys(options: &[VariantOption]) -> Vec<String> {
    options.first().map_or_else(Vec::new, |first| {
        first.attributes.keys().map(str::to_owned).collect()
    })
}

/// Every distinct value of `key` across all options, in first-seen order.
#[must_use]
pub fn all_values(options: &[VariantOption], key: &str) -> Vec<AttributeValue> {
    let mut values = Vec::new();
    for option in options {
        for value in option.attributes.get(key).into_iter().flatten() {
            push_unique(&mut values, value);
        }
    }
    values
}

/// Values `target_key` can take given the values chosen for the keys that
/// precede it in `key_order`.
///
/// An option contributes when it allows every chosen preceding value;
/// unselected preceding keys do not constrain. Values keep first-seen order.
#[must_use]
pub fn available_values(
    options: &[VariantOption],
    target_key: &str,
    selection: &Selection,
    key_order: &[String],
) -> Vec<AttributeValue> {
    let position = key_order
        .iter()
        .position(|key| key == target_key)
        .unwrap_or(0);
    let preceding = key_order.get(..position).unwrap_or_default();

    let mut values = Vec::new();
    for option in options {
        let matches_prefix = preceding.iter().all(|key| {
            selection
                .get(key)
                .and_then(Option::as_ref)
                .is_none_or(|chosen| option.allows(key, chosen))
        });
        if matches_prefix {
            for value in option.attributes.get(target_key).into_iter().flatten() {
                push_unique(&mut values, value);
            }
        }
    }
    values
}

/// Starting selection: keys with exactly one distinct value across all
/// options are chosen, the rest stay unselected.
#[must_use]
pub fn initial_selection(options: &[VariantOption]) -> Selection {
    attribute_keys(options)
        .into_iter()
        .map(|key| {
            let mut values = all_values(options, &key);
            let chosen = if values.len() == 1 { values.pop() } else { None };
            (key, chosen)
        })
        .collect()
}

/// The first option whose values include the selected value for every one of
/// the option's attribute keys.
#[must_use]
pub fn find_matching_option<'a>(
    options: &'a [VariantOption],
    selection: &Selection,
) -> Option<&'a VariantOption> {
    options.iter().find(|option| {
        option.attributes.iter().all(|(key, values)| {
            selection
                .get(key)
                .and_then(Option::as_ref)
                .is_some_and(|chosen| values.contains(chosen))
        })
    })
}

/// Validate a selection against the options.
///
/// Any unselected key gives `{ variant: None, is_valid: false }`. A complete
/// selection always yields its variant; it is valid only when a matching
/// option has stock.
#[must_use]
pub fn compute_validation(selection: &Selection, options: &[VariantOption]) -> Validation {
    let keys = attribute_keys(options);
    let mut variant = SelectedVariant::new();

    for key in keys {
        match selection.get(&key).and_then(Option::as_ref) {
            Some(value) => {
                variant.insert(key, value.clone());
            }
            None => {
                return Validation {
                    variant: None,
                    is_valid: false,
                };
            }
        }
    }

    let is_valid = find_matching_option(options, selection).is_some_and(|m| m.quantity > 0);
    Validation {
        variant: Some(variant),
        is_valid,
    }
}

/// Stock of the option matched by a variant.
///
/// Returns `None` when there is no variant, when the variant leaves one of an
/// option's keys out, or when no option matches. A partial variant therefore
/// means "stock not known yet" rather than zero.
#[must_use]
pub fn variant_stock(options: &[VariantOption], variant: Option<&SelectedVariant>) -> Option<u32> {
    let variant = variant?;
    options
        .iter()
        .find(|option| {
            option
                .attributes
                .iter()
                .all(|(key, values)| variant.get(key).is_some_and(|v| values.contains(v)))
        })
        .map(|option| option.quantity)
}

/// The selection state a product page opens with.
#[must_use]
pub fn initial_variant_state(product: &Product) -> Validation {
    VariantSelector::for_product(product).validation()
}

/// Interactive selection over one product's options.
///
/// Opens with [`initial_selection`] and fills each still-unselected key, left
/// to right, with its first available value, so a product page starts on a
/// concrete variant whenever one exists.
#[derive(Debug, Clone)]
pub struct VariantSelector<'a> {
    options: &'a [VariantOption],
    keys: Vec<String>,
    selection: Selection,
}

impl<'a> VariantSelector<'a> {
    /// Create a selector over a list of options.
    #[must_use]
    pub fn new(options: &'a [VariantOption]) -> Self {
        let keys = attribute_keys(options);
        let mut selection = initial_selection(options);

        for key in &keys {
            if selection.get(key).is_some_and(Option::is_some) {
                continue;
            }
            let first = available_values(options, key, &selection, &keys)
                .into_iter()
                .next();
            selection.insert(key.clone(), first);
        }

        Self {
            options,
            keys,
            selection,
        }
    }

    /// Create a selector over a product's options.
    #[must_use]
    pub fn for_product(product: &'a Product) -> Self {
        Self::new(&product.options)
    }

    /// Attribute keys in selection order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The value chosen for a key, if any.
    #[must_use]
    pub fn selected(&self, key: &str) -> Option<&AttributeValue> {
        self.selection.get(key).and_then(Option::as_ref)
    }

    /// Values currently offered for a key.
    #[must_use]
    pub fn available_values(&self, key: &str) -> Vec<AttributeValue> {
        available_values(self.options, key, &self.selection, &self.keys)
    }

    /// Choose a value and cascade the change to later attributes.
    ///
    /// Earlier attributes are untouched. Each later attribute is re-derived
    /// under the new prefix: a single remaining value is chosen, a previous
    /// choice that is still offered is kept, anything else is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::UnknownAttribute`] for a key the product does
    /// not have and [`VariantError::UnavailableValue`] for a value not offered
    /// under the current selection. The selection is unchanged on error.
    pub fn select(&mut self, key: &str, value: AttributeValue) -> Result<Validation, VariantError> {
        let index = self
            .keys
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| VariantError::UnknownAttribute(key.to_owned()))?;

        if !self.available_values(key).contains(&value) {
            return Err(VariantError::UnavailableValue {
                key: key.to_owned(),
                value: value.to_string(),
            });
        }

        let mut next = Selection::new();
        for (i, k) in self.keys.iter().enumerate() {
            let chosen = match i.cmp(&index) {
                std::cmp::Ordering::Less => self.selection.get(k).cloned().flatten(),
                std::cmp::Ordering::Equal => Some(value.clone()),
                std::cmp::Ordering::Greater => {
                    let mut available = available_values(self.options, k, &next, &self.keys);
                    let previous = self.selection.get(k).and_then(Option::as_ref);
                    if available.len() == 1 {
                        available.pop()
                    } else {
                        previous.filter(|p| available.contains(p)).cloned()
                    }
                }
            };
            next.insert(k.clone(), chosen);
        }

        self.selection = next;
        Ok(self.validation())
    }

    /// Validate the current selection.
    #[must_use]
    pub fn validation(&self) -> Validation {
        if self.options.is_empty() {
            return Validation::unconstrained();
        }
        compute_validation(&self.selection, self.options)
    }

    /// Stock of the currently selected variant, if it can be determined.
    #[must_use]
    pub fn stock(&self) -> Option<u32> {
        variant_stock(self.options, self.validation().variant.as_ref())
    }

    /// Keys that still need a value.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|key| self.selected(key).is_none())
            .map(String::as_str)
            .collect()
    }
}

fn push_unique(values: &mut Vec<AttributeValue>, value: &AttributeValue) {
    if !values.contains(value) {
        values.push(value.clone());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::Attributes;

    fn option(attrs: &[(&str, &[AttributeValue])], quantity: u32) -> VariantOption {
        let attributes: Attributes = attrs
            .iter()
            .map(|(key, values)| (*key, values.to_vec()))
            .collect();
        VariantOption {
            attributes,
            quantity,
        }
    }

    fn v(value: impl Into<AttributeValue>) -> AttributeValue {
        value.into()
    }

    fn variant(pairs: &[(&str, AttributeValue)]) -> SelectedVariant {
        pairs.iter().cloned().collect()
    }

    /// White comes in two powers and is in stock; red only in 6.5 and sold out.
    fn lights() -> Vec<VariantOption> {
        vec![
            option(&[("Color", &[v("white")]), ("Power", &[v(6.5), v(9.5)])], 5),
            option(&[("Color", &[v("red")]), ("Power", &[v(6.5)])], 0),
        ]
    }

    fn sizes() -> Vec<VariantOption> {
        vec![
            option(&[("Color", &[v("red")]), ("Size", &[v("S")])], 5),
            option(&[("Color", &[v("red")]), ("Size", &[v("M")])], 0),
            option(&[("Color", &[v("blue")]), ("Size", &[v("S")])], 3),
        ]
    }

    #[test]
    fn test_attribute_keys() {
        assert_eq!(attribute_keys(&lights()), vec!["Color", "Power"]);
        assert!(attribute_keys(&[]).is_empty());
    }

    #[test]
    fn test_available_values_first_key_sees_everything() {
        let options = lights();
        let keys = attribute_keys(&options);
        let values = available_values(&options, "Color", &Selection::new(), &keys);
        assert_eq!(values, vec![v("white"), v("red")]);
    }

    #[test]
    fn test_available_values_narrow_by_prefix() {
        let options = lights();
        let keys = attribute_keys(&options);
        let mut selection = Selection::new();
        selection.insert("Color", Some(v("red")));
        selection.insert("Power", None);
        assert_eq!(
            available_values(&options, "Power", &selection, &keys),
            vec![v(6.5)]
        );

        selection.insert("Color", Some(v("white")));
        assert_eq!(
            available_values(&options, "Power", &selection, &keys),
            vec![v(6.5), v(9.5)]
        );
    }

    #[test]
    fn test_available_values_ignore_later_keys() {
        let options = sizes();
        let keys = attribute_keys(&options);
        let mut selection = Selection::new();
        selection.insert("Color", None);
        selection.insert("Size", Some(v("M")));
        // Size comes after Color, so it does not constrain Color.
        assert_eq!(
            available_values(&options, "Color", &selection, &keys),
            vec![v("red"), v("blue")]
        );
    }

    #[test]
    fn test_initial_selection_only_picks_single_values() {
        let selection = initial_selection(&lights());
        assert_eq!(selection.get("Color"), Some(&None));
        assert_eq!(selection.get("Power"), Some(&None));

        let single = vec![option(&[("Color", &[v("black")])], 10)];
        assert_eq!(initial_selection(&single).get("Color"), Some(&Some(v("black"))));
    }

    #[test]
    fn test_find_matching_option_requires_all_keys() {
        let options = sizes();
        let mut selection = Selection::new();
        selection.insert("Color", Some(v("blue")));
        assert!(find_matching_option(&options, &selection).is_none());

        selection.insert("Size", Some(v("S")));
        assert_eq!(find_matching_option(&options, &selection).unwrap().quantity, 3);

        selection.insert("Size", Some(v("M")));
        assert!(find_matching_option(&options, &selection).is_none());
    }

    #[test]
    fn test_compute_validation_incomplete() {
        let mut selection = Selection::new();
        selection.insert("Color", Some(v("white")));
        selection.insert("Power", None);
        let validation = compute_validation(&selection, &lights());
        assert_eq!(validation.variant, None);
        assert!(!validation.is_valid);
    }

    #[test]
    fn test_compute_validation_sold_out_keeps_variant() {
        let mut selection = Selection::new();
        selection.insert("Color", Some(v("red")));
        selection.insert("Power", Some(v(6.5)));
        let validation = compute_validation(&selection, &lights());
        assert_eq!(
            validation.variant,
            Some(variant(&[("Color", v("red")), ("Power", v(6.5))]))
        );
        assert!(!validation.is_valid);
    }

    #[test]
    fn test_compute_validation_nonexistent_combination() {
        let mut selection = Selection::new();
        selection.insert("Color", Some(v("red")));
        selection.insert("Power", Some(v(9.5)));
        let validation = compute_validation(&selection, &lights());
        assert!(validation.variant.is_some());
        assert!(!validation.is_valid);
    }

    #[test]
    fn test_selector_opens_on_first_values() {
        let options = lights();
        let selector = VariantSelector::new(&options);
        let validation = selector.validation();
        assert_eq!(
            validation.variant,
            Some(variant(&[("Color", v("white")), ("Power", v(6.5))]))
        );
        assert!(validation.is_valid);
    }

    #[test]
    fn test_select_cascades_auto_select() {
        let options = lights();
        let mut selector = VariantSelector::new(&options);
        let validation = selector.select("Color", v("red")).unwrap();
        assert_eq!(selector.available_values("Power"), vec![v(6.5)]);
        assert_eq!(selector.selected("Power"), Some(&v(6.5)));
        assert!(validation.variant.is_some());
        assert!(!validation.is_valid);
    }

    #[test]
    fn test_select_retains_still_available_choice() {
        let options = vec![
            option(&[("Color", &[v("white")]), ("Power", &[v(6.5), v(9.5)])], 5),
            option(&[("Color", &[v("black")]), ("Power", &[v(6.5), v(9.5)])], 2),
        ];
        let mut selector = VariantSelector::new(&options);
        selector.select("Power", v(9.5)).unwrap();
        selector.select("Color", v("black")).unwrap();
        assert_eq!(selector.selected("Power"), Some(&v(9.5)));
    }

    #[test]
    fn test_select_clears_unavailable_choice() {
        let options = vec![
            option(&[("Color", &[v("white")]), ("Size", &[v("S"), v("M")])], 5),
            option(&[("Color", &[v("black")]), ("Size", &[v("L"), v("XL")])], 2),
        ];
        let mut selector = VariantSelector::new(&options);
        assert_eq!(selector.selected("Size"), Some(&v("S")));

        let validation = selector.select("Color", v("black")).unwrap();
        assert_eq!(selector.selected("Size"), None);
        assert_eq!(selector.missing_keys(), vec!["Size"]);
        assert_eq!(validation.variant, None);
    }

    #[test]
    fn test_select_does_not_touch_earlier_keys() {
        let options = sizes();
        let mut selector = VariantSelector::new(&options);
        selector.select("Color", v("blue")).unwrap();
        selector.select("Size", v("S")).unwrap();
        assert_eq!(selector.selected("Color"), Some(&v("blue")));
    }

    #[test]
    fn test_select_rejects_unknown_key_and_unavailable_value() {
        let options = lights();
        let mut selector = VariantSelector::new(&options);
        assert_eq!(
            selector.select("Size", v("M")),
            Err(VariantError::UnknownAttribute("Size".to_string()))
        );

        selector.select("Color", v("red")).unwrap();
        let before = selector.selection().clone();
        assert!(matches!(
            selector.select("Power", v(9.5)),
            Err(VariantError::UnavailableValue { .. })
        ));
        assert_eq!(selector.selection(), &before);
    }

    #[test]
    fn test_selector_without_options() {
        let selector = VariantSelector::new(&[]);
        assert_eq!(selector.validation(), Validation::unconstrained());
        assert!(selector.keys().is_empty());
        assert_eq!(selector.stock(), None);
    }

    #[test]
    fn test_variant_stock() {
        let options = sizes();
        assert_eq!(
            variant_stock(&options, Some(&variant(&[("Color", v("red")), ("Size", v("S"))]))),
            Some(5)
        );
        assert_eq!(
            variant_stock(&options, Some(&variant(&[("Color", v("red")), ("Size", v("M"))]))),
            Some(0)
        );
        assert_eq!(
            variant_stock(&options, Some(&variant(&[("Color", v("red"))]))),
            None
        );
        assert_eq!(
            variant_stock(&options, Some(&variant(&[("Color", v("green")), ("Size", v("S"))]))),
            None
        );
        assert_eq!(variant_stock(&options, None), None);
    }

    #[test]
    fn test_variant_stock_matches_multi_valued_options() {
        let options = vec![option(
            &[("Color", &[v("black")]), ("Storage", &[v(32), v(250)])],
            4,
        )];
        let chosen = variant(&[("Storage", v(250)), ("Color", v("black"))]);
        assert_eq!(variant_stock(&options, Some(&chosen)), Some(4));
    }

    #[test]
    fn test_selector_stock_follows_selection() {
        let options = sizes();
        let mut selector = VariantSelector::new(&options);
        assert_eq!(selector.stock(), Some(5));
        selector.select("Size", v("M")).unwrap();
        assert_eq!(selector.stock(), Some(0));
    }
}
