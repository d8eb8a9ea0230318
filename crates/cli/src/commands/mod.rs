//! Command implementations.

pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use kassa_core::{Catalog, CartStore, LoadOutcome, ProductId, VariantError};
use kassa_storefront::catalog::{CatalogLoadError, load_catalog};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::FileStorage;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    /// No product has the requested id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// An attribute choice was rejected.
    #[error(transparent)]
    Variant(#[from] VariantError),

    /// The selection cannot be added to the cart.
    #[error("{0}")]
    NotPurchasable(String),
}

/// Paths shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    catalog_path: PathBuf,
    data_dir: PathBuf,
}

impl Context {
    pub const fn new(catalog_path: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            catalog_path,
            data_dir,
        }
    }

    /// Load the catalog.
    pub fn catalog(&self) -> Result<Catalog, CommandError> {
        Ok(load_catalog(&self.catalog_path)?)
    }

    /// Open the stored cart.
    pub fn cart(&self) -> CartStore {
        let storage = FileStorage::new(&self.data_dir);
        let mut cart = CartStore::new(Some(Box::new(storage)));

        match cart.load() {
            LoadOutcome::Discarded => {
                warn!(dir = %self.data_dir.display(), "Stored cart was unreadable and has been reset");
            }
            outcome => debug!(?outcome, "Cart loaded"),
        }

        cart.subscribe(|items| debug!(lines = items.len(), "Cart saved"));
        cart
    }
}

/// Parse a `key=value` attribute choice.
pub fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(format!("expected KEY=VALUE, got `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
