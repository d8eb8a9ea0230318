//! Stock-aware shopping cart.
//!
//! [`CartStore`] owns the cart lines, writes the whole cart to a
//! [`CartStorage`] after every change and then notifies its listeners. There
//! is a single writer: callers hold the store and mutate it through `&mut`.
//!
//! ```
//! use kassa_core::{Catalog, CartStore, MemoryStorage, ProductId, SelectedVariant};
//! use rust_decimal::Decimal;
//!
//! let catalog = Catalog::from_inventory_json(
//!     r#"{"items": [{"id": 1, "name": "Lamp", "brand": "Lumen", "price": 300}]}"#,
//! ).unwrap();
//! let lamp = catalog.product(ProductId::new(1)).unwrap();
//!
//! let mut cart = CartStore::open(Some(Box::new(MemoryStorage::new())));
//! assert_eq!(cart.add_to_cart(lamp, SelectedVariant::new(), 3, Some(2)), 2);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total(), Decimal::from(600));
//! ```

mod availability;
mod persist;
mod reconcile;
mod storage;

pub use availability::{LOW_STOCK_THRESHOLD, PurchaseAvailability};
pub use reconcile::StockAdjustment;
pub use storage::{CART_STORAGE_KEY, CartStorage, MemoryStorage, StorageError};

use core::fmt;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::types::{CartId, CartItem, Product, SelectedVariant};

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback run after every cart change with the new cart lines.
pub type Listener = Box<dyn Fn(&[CartItem]) + Send>;

/// What [`CartStore::load`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store has no storage attached.
    NoStorage,
    /// Nothing usable was stored.
    Empty,
    /// A stored cart with this many lines was restored.
    Restored(usize),
    /// Stored data was malformed and has been ignored.
    Discarded,
}

/// The shopping cart.
pub struct CartStore {
    items: Vec<CartItem>,
    storage: Option<Box<dyn CartStorage>>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl CartStore {
    /// Create an empty cart. `None` storage keeps the cart in memory only.
    #[must_use]
    pub fn new(storage: Option<Box<dyn CartStorage>>) -> Self {
        Self {
            items: Vec::new(),
            storage,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Create a cart and restore it from storage.
    #[must_use]
    pub fn open(storage: Option<Box<dyn CartStorage>>) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Replace the in-memory cart with the stored one.
    ///
    /// Malformed stored data leaves the cart empty. Listeners are notified
    /// when a stored cart is restored, and when discarding one empties a cart
    /// that held lines.
    pub fn load(&mut self) -> LoadOutcome {
        let Some(storage) = &self.storage else {
            return LoadOutcome::NoStorage;
        };

        let stored = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => return LoadOutcome::Empty,
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart");
                return LoadOutcome::Empty;
            }
        };

        if let Some(items) = persist::decode(&stored) {
            debug!(lines = items.len(), "Restored cart");
            self.items = items;
            self.notify();
            LoadOutcome::Restored(self.items.len())
        } else {
            warn!("Discarding malformed stored cart");
            if !self.items.is_empty() {
                self.items.clear();
                self.notify();
            }
            LoadOutcome::Discarded
        }
    }

    /// Drop all listeners and hand back the storage.
    #[must_use]
    pub fn close(self) -> Option<Box<dyn CartStorage>> {
        self.storage
    }

    /// Register a listener for cart changes.
    pub fn subscribe(&mut self, listener: impl Fn(&[CartItem]) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() < before
    }

    /// Add units of a product variant, never going past `max_stock` units on
    /// the line.
    ///
    /// Returns how many units were actually added. When nothing fits the cart
    /// is left untouched.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        selected_variant: SelectedVariant,
        quantity: u32,
        max_stock: Option<u32>,
    ) -> u32 {
        let cart_id = CartId::new(product.id, &selected_variant);
        let current = self.quantity_of(&cart_id);
        let to_add = max_stock.map_or(quantity, |max| quantity.min(max.saturating_sub(current)));

        if to_add == 0 {
            debug!(%cart_id, current, ?max_stock, "Nothing added to cart");
            return 0;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.cart_id == cart_id) {
            item.quantity = item.quantity.saturating_add(to_add);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                cart_id: cart_id.clone(),
                selected_variant,
                quantity: to_add,
            });
        }

        debug!(%cart_id, added = to_add, "Added to cart");
        self.commit();
        to_add
    }

    /// Take one unit off a line, removing the line at zero.
    pub fn decrease_quantity(&mut self, cart_id: &CartId) {
        let Some(item) = self.items.iter_mut().find(|i| &i.cart_id == cart_id) else {
            return;
        };

        if item.quantity > 1 {
            item.quantity -= 1;
        } else {
            self.items.retain(|i| &i.cart_id != cart_id);
        }
        self.commit();
    }

    /// Set a line's quantity exactly. Zero or less removes the line.
    ///
    /// There is no stock check here; callers clamp first when they need to.
    pub fn set_item_quantity(&mut self, cart_id: &CartId, quantity: i64) {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        if quantity == 0 {
            self.remove_from_cart(cart_id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|i| &i.cart_id == cart_id) else {
            return;
        };
        item.quantity = quantity;
        self.commit();
    }

    /// Remove a line.
    pub fn remove_from_cart(&mut self, cart_id: &CartId) {
        let before = self.items.len();
        self.items.retain(|i| &i.cart_id != cart_id);
        if self.items.len() < before {
            self.commit();
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Cart lines in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, cart_id: &CartId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.cart_id == cart_id)
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.product.price.times(i.quantity))
            .sum()
    }

    /// Units of a line, zero when it is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, cart_id: &CartId) -> u32 {
        self.item(cart_id).map_or(0, |i| i.quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Persist, then notify.
    fn commit(&self) {
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let result: Result<(), StorageError> = persist::encode(&self.items)
            .map_err(Into::into)
            .and_then(|json| storage.set(CART_STORAGE_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "Failed to save cart");
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.items);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("has_storage", &self.storage.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
