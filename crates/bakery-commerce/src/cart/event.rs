//! Cart change events.

use crate::ids::LineItemId;
use serde::Serialize;

/// What a mutation did to the cart.
///
/// Observers receive one event per state-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new row was appended.
    ItemAdded { id: LineItemId, quantity: i64 },
    /// An existing row absorbed `added` more units.
    ItemMerged {
        id: LineItemId,
        added: i64,
        quantity: i64,
    },
    /// A row's quantity was set.
    QuantityChanged { id: LineItemId, quantity: i64 },
    /// A row was removed.
    ItemRemoved { id: LineItemId },
    /// Every row was removed.
    Cleared { removed: usize },
}

impl CartEvent {
    /// The affected row, if the event concerns a single one.
    pub fn item_id(&self) -> Option<&LineItemId> {
        match self {
            CartEvent::ItemAdded { id, .. }
            | CartEvent::ItemMerged { id, .. }
            | CartEvent::QuantityChanged { id, .. }
            | CartEvent::ItemRemoved { id } => Some(id),
            CartEvent::Cleared { .. } => None,
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => "item_added",
            CartEvent::ItemMerged { .. } => "item_merged",
            CartEvent::QuantityChanged { .. } => "quantity_changed",
            CartEvent::ItemRemoved { .. } => "item_removed",
            CartEvent::Cleared { .. } => "cleared",
        }
    }
}
