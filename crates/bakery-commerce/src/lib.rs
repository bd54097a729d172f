//! Cart domain types and the observable cart store for the bakery storefront.
//!
//! - **Cart**: line items keyed by product/variant, merge-on-add, derived totals
//! - **Store**: `CartStore`, the single owned cart with subscribe/notify and a
//!   persisted slot (feature `storage`, on by default)
//! - **Checkout**: the `OrderDraft` hand-off to the order-submission flow
//!
//! # Example
//!
//! ```rust,ignore
//! use bakery_commerce::prelude::*;
//!
//! let mut store = CartStore::in_memory(Currency::JPY);
//! store.subscribe(|event, cart| {
//!     eprintln!("{}: {} items", event.kind(), cart.total_items());
//! });
//!
//! store.add_item(LineItem::for_variant("cake-1", "vanilla", "Cake", 1000))?;
//! store.add_item(LineItem::for_variant("cake-1", "vanilla", "Cake", 1000).with_quantity(2))?;
//! assert_eq!(store.total_price(), 3000);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
#[cfg(feature = "storage")]
pub mod store;

pub use error::CommerceError;
pub use ids::{LineItemId, ProductId};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{LineItemId, ProductId};
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        Cart, CartEvent, CartTotals, LineItem, LineTotal, MAX_QUANTITY_PER_ITEM,
    };

    // Checkout
    pub use crate::checkout::{OrderDraft, OrderLine};

    // Store
    #[cfg(feature = "storage")]
    pub use crate::store::{CartStore, MutationReport, SubscriptionId, DEFAULT_SLOT};
}
