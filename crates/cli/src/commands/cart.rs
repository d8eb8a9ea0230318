//! Cart commands.

#![allow(clippy::print_stdout)]

use std::fmt::Write as _;

use kassa_core::variant::{format_variant, title_case};
use kassa_core::{
    AttributeValue, CartId, CartItem, CartStore, Price, ProductId, SelectedVariant,
    StockAdjustment, VariantSelector,
};

use super::{CommandError, Context};

/// Show the cart after clamping it to current stock.
pub fn show(ctx: &Context) -> Result<(), CommandError> {
    let catalog = ctx.catalog()?;
    let mut cart = ctx.cart();

    for adjustment in cart.reconcile_stock(&catalog) {
        println!("{}", describe_adjustment(&adjustment));
    }
    print!("{}", render_cart(&cart));
    Ok(())
}

/// Add a product, choosing attributes through the selection cascade.
pub fn add(
    ctx: &Context,
    product_id: i64,
    selections: &[(String, String)],
    quantity: u32,
) -> Result<(), CommandError> {
    let catalog = ctx.catalog()?;
    let id = ProductId::new(product_id);
    let product = catalog
        .product(id)
        .ok_or(CommandError::ProductNotFound(id))?;

    let mut selector = VariantSelector::for_product(product);
    for (key, raw) in selections {
        let key = title_case(key);
        let value = resolve_value(&selector, &key, raw);
        selector.select(&key, value)?;
    }

    let mut cart = ctx.cart();
    let validation = selector.validation();
    let availability = cart.availability(product, &validation);

    if !availability.can_add {
        let reason = availability
            .message
            .unwrap_or_else(|| format!("{} is not available", product.name));
        return Err(CommandError::NotPurchasable(reason));
    }
    if availability.at_max_stock {
        return Err(CommandError::NotPurchasable(format!(
            "All {} in stock are already in your cart",
            availability.max_stock.unwrap_or(0)
        )));
    }

    let variant = validation.variant.unwrap_or_default();
    let added = cart.add_to_cart(product, variant.clone(), quantity, availability.max_stock);

    println!("{}", describe_add(&product.name, &variant, added));
    if added < quantity {
        println!("Only {added} of {quantity} added: stock limit reached");
    }
    Ok(())
}

pub fn decrease(ctx: &Context, cart_id: &CartId) {
    let mut cart = ctx.cart();
    cart.decrease_quantity(cart_id);
    print!("{}", render_cart(&cart));
}

pub fn set(ctx: &Context, cart_id: &CartId, quantity: i64) {
    let mut cart = ctx.cart();
    cart.set_item_quantity(cart_id, quantity);
    print!("{}", render_cart(&cart));
}

pub fn remove(ctx: &Context, cart_id: &CartId) {
    let mut cart = ctx.cart();
    cart.remove_from_cart(cart_id);
    print!("{}", render_cart(&cart));
}

pub fn clear(ctx: &Context) {
    let mut cart = ctx.cart();
    cart.clear_cart();
    println!("Cart cleared");
}

/// Match a typed value against the values currently offered for `key`, so
/// `6.5` selects the number and `white` the text. Unknown input is passed
/// through as text and rejected by the selector.
fn resolve_value(selector: &VariantSelector<'_>, key: &str, raw: &str) -> AttributeValue {
    selector
        .available_values(key)
        .into_iter()
        .find(|value| value.to_string() == raw)
        .unwrap_or_else(|| AttributeValue::from(raw))
}

fn describe_add(name: &str, variant: &SelectedVariant, added: u32) -> String {
    if variant.is_empty() {
        format!("{added} × {name} added to cart")
    } else {
        format!("{added} × {name} ({}) added to cart", format_variant(variant))
    }
}

fn describe_adjustment(adjustment: &StockAdjustment) -> String {
    if adjustment.to == 0 {
        format!("Removed {}: sold out", adjustment.name)
    } else {
        format!(
            "Reduced {} from {} to {}: only {} left in stock",
            adjustment.name, adjustment.from, adjustment.to, adjustment.to
        )
    }
}

fn render_line(item: &CartItem) -> String {
    let subtotal = item.product.price.times(item.quantity);
    let mut label = item.product.name.clone();
    if !item.selected_variant.is_empty() {
        let _ = write!(label, " ({})", format_variant(&item.selected_variant));
    }
    format!(
        "{label:<48} {:>3} × {:<12} = {}\n    id: {}",
        item.quantity,
        item.product.price,
        Price::new(subtotal).unwrap_or(Price::ZERO),
        item.cart_id
    )
}

pub(crate) fn render_cart(cart: &CartStore) -> String {
    if cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        let _ = writeln!(out, "{}", render_line(item));
    }
    let total = Price::new(cart.total()).unwrap_or(Price::ZERO);
    let _ = writeln!(out, "{} item(s), total {total}", cart.item_count());
    out
}
