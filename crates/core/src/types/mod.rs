//! Core types for Kassa.
//!
//! This module provides the catalog and cart data model.

pub mod attribute;
pub mod cart_item;
pub mod id;
pub mod ordered_map;
pub mod price;
pub mod product;

pub use attribute::AttributeValue;
pub use cart_item::{CartId, CartItem};
pub use id::*;
pub use ordered_map::OrderedMap;
pub use price::Price;
pub use product::{Attributes, Product, SelectedVariant, VariantOption};
