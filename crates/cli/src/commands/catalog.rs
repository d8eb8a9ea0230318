//! Catalog browsing commands.

#![allow(clippy::print_stdout)]

use std::fmt::Write as _;

use kassa_core::catalog::slugify;
use kassa_core::variant::{format_value, format_variant};
use kassa_core::{Product, ProductId, VariantOption, VariantSelector};

use super::{CommandError, Context};

/// List products, optionally filtered.
pub fn list(ctx: &Context, available: Option<bool>, brand: Option<&str>) -> Result<(), CommandError> {
    let catalog = ctx.catalog()?;
    let products: Vec<&Product> = match brand {
        Some(brand) => catalog.products_by_brand(brand),
        None => catalog.products(None),
    }
    .into_iter()
    .filter(|p| available.is_none_or(|wanted| p.available == wanted))
    .collect();

    print!("{}", render_list(&products));
    Ok(())
}

/// Show one product with its variants and default selection.
pub fn show(ctx: &Context, id: i64) -> Result<(), CommandError> {
    let catalog = ctx.catalog()?;
    let id = ProductId::new(id);
    let product = catalog
        .product(id)
        .ok_or(CommandError::ProductNotFound(id))?;

    print!("{}", render_product(product));
    Ok(())
}

/// List brands with their product counts.
pub fn brands(ctx: &Context) -> Result<(), CommandError> {
    let catalog = ctx.catalog()?;
    for brand in catalog.brands() {
        let count = catalog.all().iter().filter(|p| p.brand == brand).count();
        println!("{brand:<24} {:<24} {count}", slugify(brand));
    }
    Ok(())
}

pub(crate) fn render_list(products: &[&Product]) -> String {
    let mut out = String::new();
    for product in products {
        let status = if product.available { "" } else { "  [sold out]" };
        let _ = writeln!(
            out,
            "{:>4}  {:<32} {:<16} {}{status}",
            product.id, product.name, product.brand, product.price
        );
    }
    let _ = writeln!(out, "{} product(s)", products.len());
    out
}

pub(crate) fn render_product(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", product.name, product.id);
    let _ = writeln!(out, "Brand:  {}", product.brand);
    let _ = writeln!(out, "Price:  {}", product.price);
    if !product.available {
        let _ = writeln!(out, "Sold out");
    }

    if product.has_options() {
        let _ = writeln!(out, "Variants:");
        for option in &product.options {
            let _ = writeln!(out, "  {:<40} {} in stock", render_option(option), option.quantity);
        }

        let selector = VariantSelector::for_product(product);
        if let Some(variant) = selector.validation().variant {
            let stock = selector.stock().unwrap_or(0);
            let _ = writeln!(out, "Default: {} ({stock} in stock)", format_variant(&variant));
        }
    }
    out
}

fn render_option(option: &VariantOption) -> String {
    option
        .attributes
        .iter()
        .map(|(key, values)| {
            let values: Vec<String> = values.iter().map(|v| format_value(key, v)).collect();
            format!("{key}: {}", values.join(", "))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
