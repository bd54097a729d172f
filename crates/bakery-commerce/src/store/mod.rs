//! The observable cart store.
//!
//! `CartStore` is the single owner of the session's cart. Every surface reads
//! through it and every mutation goes through it, in this order:
//!
//! 1. validate and apply the change in memory
//! 2. notify every observer synchronously
//! 3. write the full item list to the cart slot
//!
//! The write is synchronous, so when a mutation returns without a save error
//! the slot already holds the new state. A failed write is logged and
//! reported in the [`MutationReport`]; memory stays authoritative.

mod observer;
mod report;

pub use observer::{Observer, SubscriptionId};
pub use report::MutationReport;

use bakery_cache::{Cache, CacheError};
use bakery_observability::StructuredLogger;

use crate::cart::{Cart, CartEvent, CartTotals, LineItem};
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::Currency;
use observer::Observers;

/// Default slot name for an anonymous cart.
pub const DEFAULT_SLOT: &str = "cart";

/// Single source of truth for the shopping cart.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    cache: Cache,
    slot: String,
    observers: Observers,
    logger: StructuredLogger,
}

impl CartStore {
    /// Open the store, hydrating from `slot`.
    ///
    /// A missing slot gives an empty cart. An unreadable or corrupt slot also
    /// gives an empty cart and is logged; it is never fatal. Rows in the slot
    /// that fail validation are skipped individually.
    pub fn open(
        cache: Cache,
        slot: impl Into<String>,
        currency: Currency,
        logger: StructuredLogger,
    ) -> Self {
        let slot = slot.into();
        let cart = hydrate(&cache, &slot, currency, &logger);
        Self {
            cart,
            cache,
            slot,
            observers: Observers::default(),
            logger,
        }
    }

    /// A store over a fresh in-memory slot with errors-only logging.
    pub fn in_memory(currency: Currency) -> Self {
        Self::open(
            Cache::in_memory(),
            DEFAULT_SLOT,
            currency,
            StructuredLogger::quiet("cart-store"),
        )
    }

    /// Add an item, merging with an existing row of the same id.
    ///
    /// Validation failures are returned as errors and leave the cart, the
    /// observers and the slot untouched.
    pub fn add_item(&mut self, item: LineItem) -> Result<MutationReport, CommerceError> {
        let event = self.cart.add_item(item)?;
        Ok(self.commit(event))
    }

    /// Set a row's quantity exactly; `<= 0` removes it.
    ///
    /// An unknown id is a no-op: the report is unchanged and nothing is
    /// notified or written.
    pub fn update_quantity(
        &mut self,
        id: &LineItemId,
        quantity: i64,
    ) -> Result<MutationReport, CommerceError> {
        match self.cart.update_quantity(id, quantity)? {
            Some(event) => Ok(self.commit(event)),
            None => Ok(self.noop("update_quantity", id)),
        }
    }

    /// Remove a row if present.
    pub fn remove_item(&mut self, id: &LineItemId) -> MutationReport {
        match self.cart.remove_item(id) {
            Some(event) => self.commit(event),
            None => self.noop("remove_item", id),
        }
    }

    /// Empty the cart and persist immediately.
    ///
    /// Called on explicit user action, and by the surrounding application on
    /// logout and after a successful checkout.
    pub fn clear_cart(&mut self) -> MutationReport {
        let event = self.cart.clear();
        self.commit(event)
    }

    /// Register an observer. It is called after every state-changing mutation,
    /// before the mutating call returns.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &Cart) + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Write the current state to the slot, e.g. after a reported save failure.
    pub fn flush(&self) -> Result<(), CacheError> {
        self.persist()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    /// Sum of `price * quantity` in minor units.
    pub fn total_price(&self) -> i64 {
        self.cart.total_price()
    }

    /// Checked per-line breakdown.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        self.cart.totals()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Get an item by ID.
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.cart.get(id)
    }

    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Slot this store reads and writes.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    fn commit(&mut self, event: CartEvent) -> MutationReport {
        self.observers.notify(&event, &self.cart);

        let save_error = self.persist().err();
        match save_error {
            Some(ref e) => self
                .logger
                .error_builder("failed to persist cart")
                .field("event", event.kind())
                .field("error", e.to_string())
                .field_i64("items", self.cart.total_items())
                .emit(),
            None => {
                let mut entry = self
                    .logger
                    .debug_builder("cart updated")
                    .field("event", event.kind())
                    .field_i64("total_items", self.cart.total_items())
                    .field_i64("total_price", self.cart.total_price());
                if let Some(id) = event.item_id() {
                    entry = entry.field("item_id", id.as_str());
                }
                entry.emit();
            }
        }

        MutationReport::applied(event, save_error)
    }

    fn noop(&self, operation: &str, id: &LineItemId) -> MutationReport {
        self.logger
            .debug_builder("no such item; nothing changed")
            .field("operation", operation)
            .field("item_id", id.as_str())
            .emit();
        MutationReport::unchanged()
    }

    fn persist(&self) -> Result<(), CacheError> {
        self.cache.set(&self.slot, self.cart.items())
    }
}

fn hydrate(cache: &Cache, slot: &str, currency: Currency, logger: &StructuredLogger) -> Cart {
    let mut cart = Cart::new(currency);

    let rows = match cache.get::<Vec<serde_json::Value>>(slot) {
        Ok(Some(rows)) => rows,
        Ok(None) => {
            logger
                .debug_builder("no saved cart; starting empty")
                .field("slot", slot)
                .emit();
            return cart;
        }
        Err(e) if e.is_corrupt() => {
            logger
                .warn_builder("saved cart is corrupt; starting empty")
                .field("slot", slot)
                .field("error", e.to_string())
                .emit();
            return cart;
        }
        Err(e) => {
            logger
                .error_builder("could not read saved cart; starting empty")
                .field("slot", slot)
                .field("error", e.to_string())
                .emit();
            return cart;
        }
    };

    let mut skipped = 0_i64;
    for (index, row) in rows.into_iter().enumerate() {
        let added = serde_json::from_value::<LineItem>(row)
            .map_err(CommerceError::from)
            .and_then(|item| cart.add_item(item));
        if let Err(e) = added {
            skipped += 1;
            logger
                .warn_builder("skipping invalid saved cart row")
                .field("slot", slot)
                .field_i64("row", i64::try_from(index).unwrap_or(i64::MAX))
                .field("error", e.to_string())
                .emit();
        }
    }

    logger
        .info_builder("cart hydrated")
        .field("slot", slot)
        .field_i64("rows", i64::try_from(cart.len()).unwrap_or(i64::MAX))
        .field_i64("total_items", cart.total_items())
        .field_i64("skipped", skipped)
        .emit();

    cart
}
