//! Order draft types.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A line of an order draft, frozen from a cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: LineItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_product_id: Option<ProductId>,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Snapshot of a cart at the moment the customer proceeds to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
    pub total_items: i64,
    pub total: Money,
    pub currency: Currency,
}

impl OrderDraft {
    /// Freeze the cart's current contents.
    ///
    /// Returns `CommerceError::EmptyCart` for a cart with no rows and
    /// `CommerceError::Overflow` if a total does not fit.
    pub fn from_cart(cart: &Cart) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let totals = cart.totals()?;
        let lines = cart
            .items()
            .iter()
            .zip(totals.lines)
            .map(|(item, line)| OrderLine {
                id: line.id,
                title: line.title,
                variant: item.variant.clone(),
                base_product_id: item.base_product_id.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                subtotal: line.subtotal,
            })
            .collect();

        Ok(Self {
            lines,
            total_items: totals.total_items,
            total: totals.total,
            currency: cart.currency(),
        })
    }
}

impl Cart {
    /// Produce the checkout hand-off for this cart.
    pub fn order_draft(&self) -> Result<OrderDraft, CommerceError> {
        OrderDraft::from_cart(self)
    }
}
