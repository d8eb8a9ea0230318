//! Kassa Core - Catalog, variant resolution and cart domain library.
//!
//! This crate holds everything the storefront and the cart client share:
//! - `storefront` - JSON catalog API
//! - `cli` - Interactive cart client
//!
//! # Architecture
//!
//! The core crate performs no network or filesystem I/O. Durable cart storage
//! is reached through the [`cart::CartStorage`] trait, so the same store runs
//! against a file in the CLI and against memory in tests.
//!
//! # Modules
//!
//! - [`types`] - Products, variant options, attribute values, cart items and IDs
//! - [`catalog`] - Normalization of raw inventory records and catalog queries
//! - [`variant`] - Dependent attribute selection and stock resolution
//! - [`cart`] - Stock-aware cart store with persistence and listeners

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;
pub mod variant;

pub use cart::{
    CartStorage, CartStore, ListenerId, LoadOutcome, MemoryStorage, PurchaseAvailability,
    StockAdjustment, StorageError,
};
pub use catalog::{Catalog, CatalogError};
pub use types::*;
pub use variant::{Validation, VariantError, VariantSelector};
