//! Application state shared across handlers.

use std::sync::Arc;

use kassa_core::Catalog;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is loaded once at
/// startup and never changes afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state around a normalized catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { catalog }),
        }
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
