//! Shopping cart module.
//!
//! Contains the cart aggregate, line items, change events and totals.

mod cart;
mod event;
mod pricing;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use event::CartEvent;
pub use pricing::{CartTotals, LineTotal};
