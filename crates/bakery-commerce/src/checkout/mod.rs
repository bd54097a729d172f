//! Checkout hand-off.
//!
//! The cart does not submit orders. It produces an [`OrderDraft`] that the
//! order-submission flow takes over; clearing the cart afterwards is that
//! flow's call.

mod order;

pub use order::{OrderDraft, OrderLine};
