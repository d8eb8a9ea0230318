//! Clamping cart lines to current stock.

use serde::Serialize;
use tracing::info;

use super::CartStore;
use crate::catalog::Catalog;
use crate::types::CartId;
use crate::variant::variant_stock;

/// A cart line whose quantity was lowered to fit the stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub cart_id: CartId,
    pub name: String,
    pub from: u32,
    /// New quantity; zero means the line was removed.
    pub to: u32,
}

impl CartStore {
    /// Lower every line that holds more units than its variant has in stock.
    ///
    /// Stock is looked up in the current catalog, falling back to the options
    /// stored on the line for products that have left the catalog. Lines
    /// without a variant, and lines whose stock cannot be determined, are left
    /// alone. A line whose variant is sold out is removed.
    pub fn reconcile_stock(&mut self, catalog: &Catalog) -> Vec<StockAdjustment> {
        let adjustments: Vec<StockAdjustment> = self
            .items()
            .iter()
            .filter(|item| !item.selected_variant.is_empty())
            .filter_map(|item| {
                let options = catalog
                    .product(item.product.id)
                    .map_or(item.product.options.as_slice(), |p| p.options.as_slice());
                let stock = variant_stock(options, Some(&item.selected_variant))?;
                (item.quantity > stock).then(|| StockAdjustment {
                    cart_id: item.cart_id.clone(),
                    name: item.product.name.clone(),
                    from: item.quantity,
                    to: stock,
                })
            })
            .collect();

        for adjustment in &adjustments {
            info!(
                cart_id = %adjustment.cart_id,
                from = adjustment.from,
                to = adjustment.to,
                "Clamped cart line to available stock"
            );
            self.set_item_quantity(&adjustment.cart_id, i64::from(adjustment.to));
        }
        adjustments
    }
}
