//! Cart totals breakdown.

use crate::ids::LineItemId;
use crate::money::Money;
use serde::Serialize;

/// Totals for display surfaces (drawer, checkout summary).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartTotals {
    /// Sum of quantities.
    pub total_items: i64,
    /// Sum of line subtotals.
    pub total: Money,
    /// Per-row breakdown in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    /// Number of distinct rows.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check whether the totals describe an empty cart.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pricing for a single row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineTotal {
    /// Row id.
    pub id: LineItemId,
    /// Row title.
    pub title: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub subtotal: Money,
}
