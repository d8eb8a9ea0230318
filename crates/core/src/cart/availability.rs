//! Add-to-cart state for a product page.

use serde::Serialize;

use super::CartStore;
use crate::types::{CartId, Product};
use crate::variant::{Validation, missing_selection_message, variant_stock};

/// Remaining stock at or below which a line counts as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 3;

/// Whether and how much of the current selection can still be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseAvailability {
    /// Stock of the selected variant, when known.
    pub max_stock: Option<u32>,
    /// Stock left after what is already in the cart.
    pub remaining: Option<u32>,
    pub can_add: bool,
    pub at_max_stock: bool,
    pub low_stock: bool,
    /// Why the selection cannot be added, if it cannot.
    pub message: Option<String>,
}

impl PurchaseAvailability {
    /// Evaluate a selection given how many units of it are already in the cart.
    #[must_use]
    pub fn evaluate(product: &Product, validation: &Validation, in_cart: u32) -> Self {
        let max_stock = variant_stock(&product.options, validation.variant.as_ref());
        let remaining = max_stock.map(|max| max.saturating_sub(in_cart));

        Self {
            max_stock,
            remaining,
            can_add: product.available && (!product.has_options() || validation.is_valid),
            at_max_stock: remaining == Some(0),
            low_stock: remaining.is_some_and(|r| (1..=LOW_STOCK_THRESHOLD).contains(&r)),
            message: missing_selection_message(
                &product.options,
                validation.variant.as_ref(),
                validation.is_valid,
                max_stock,
            ),
        }
    }

    /// Whether an add would put anything in the cart.
    #[must_use]
    pub const fn can_add_more(&self) -> bool {
        self.can_add && !self.at_max_stock
    }
}

impl CartStore {
    /// Add-to-cart state of a selection against this cart's contents.
    #[must_use]
    pub fn availability(&self, product: &Product, validation: &Validation) -> PurchaseAvailability {
        let in_cart = validation
            .variant
            .as_ref()
            .map_or(0, |variant| self.quantity_of(&CartId::new(product.id, variant)));
        PurchaseAvailability::evaluate(product, validation, in_cart)
    }
}
