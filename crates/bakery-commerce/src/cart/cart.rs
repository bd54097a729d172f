//! Cart and line item types.

use crate::cart::{CartEvent, CartTotals, LineTotal};
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

fn default_quantity() -> i64 {
    1
}

/// One row of the cart: a quantity of a product/variant configuration.
///
/// This is also the persisted record, so field names follow the storefront's
/// camelCase JSON (`baseProductId`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identity of the configuration (base product + variant).
    pub id: LineItemId,
    /// Display name, including the variant label when there is one.
    pub title: String,
    /// Display asset reference.
    #[serde(default)]
    pub image: String,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Quantity, at least 1.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// Selected option, e.g. a flavor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Product identity before the variant was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_product_id: Option<ProductId>,
}

impl LineItem {
    /// A line item with quantity 1 and no variant.
    pub fn new(id: impl Into<LineItemId>, title: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: String::new(),
            price,
            quantity: 1,
            variant: None,
            base_product_id: None,
        }
    }

    /// A line item for a product with a selected variant.
    ///
    /// The id becomes `"{product}-{variant}"` and the title `"{title} - {variant}"`,
    /// so the same flavor of the same cake always lands on the same row.
    pub fn for_variant(
        product_id: impl Into<ProductId>,
        variant: impl Into<String>,
        title: impl AsRef<str>,
        price: i64,
    ) -> Self {
        let product_id = product_id.into();
        let variant = variant.into();
        Self {
            id: LineItemId::for_variant(&product_id, &variant),
            title: format!("{} - {}", title.as_ref(), variant),
            image: String::new(),
            price,
            quantity: 1,
            variant: Some(variant),
            base_product_id: Some(product_id),
        }
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// `price * quantity`, or None on overflow.
    pub fn line_total(&self) -> Option<i64> {
        self.price.checked_mul(self.quantity)
    }

    /// Check the record against the cart's contract.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.is_blank() {
            return Err(CommerceError::ValidationError(
                "line item id is required".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(CommerceError::ValidationError(format!(
                "line item {} has no title",
                self.id
            )));
        }
        if self.price < 0 {
            return Err(CommerceError::InvalidPrice(self.price));
        }
        if self.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(self.quantity));
        }
        if self.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                self.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        self.line_total().ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

/// A shopping cart: ordered line items with unique ids.
///
/// Totals are never stored; every getter walks the current items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Build a cart from existing rows, merging rows that share an id.
    pub fn with_items(
        items: impl IntoIterator<Item = LineItem>,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let mut cart = Self::new(currency);
        for item in items {
            cart.add_item(item)?;
        }
        Ok(cart)
    }

    /// Add an item to the cart.
    ///
    /// An existing row with the same id has its quantity increased by the
    /// incoming quantity; its title, price and image are kept. Otherwise the
    /// item is appended.
    ///
    /// Returns an error, without touching the cart, if:
    /// - the item fails [`LineItem::validate`]
    /// - the merged quantity would exceed `MAX_QUANTITY_PER_ITEM`
    /// - the line total or the cart total would overflow
    pub fn add_item(&mut self, item: LineItem) -> Result<CartEvent, CommerceError> {
        item.validate()?;

        let Some(index) = self.position(&item.id) else {
            let line_total = item.line_total().ok_or(CommerceError::Overflow)?;
            self.total_with(&item.id, line_total)?;

            let event = CartEvent::ItemAdded {
                id: item.id.clone(),
                quantity: item.quantity,
            };
            self.items.push(item);
            return Ok(event);
        };

        let existing = &self.items[index];
        let new_quantity = existing
            .quantity
            .checked_add(item.quantity)
            .ok_or(CommerceError::Overflow)?;
        if new_quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                new_quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        let line_total = existing
            .price
            .checked_mul(new_quantity)
            .ok_or(CommerceError::Overflow)?;
        self.total_with(&item.id, line_total)?;

        self.items[index].quantity = new_quantity;
        Ok(CartEvent::ItemMerged {
            id: item.id,
            added: item.quantity,
            quantity: new_quantity,
        })
    }

    /// Set an item's quantity to exactly `quantity`.
    ///
    /// A quantity `<= 0` removes the item. An unknown id is a no-op and
    /// returns `Ok(None)`.
    pub fn update_quantity(
        &mut self,
        id: &LineItemId,
        quantity: i64,
    ) -> Result<Option<CartEvent>, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let line_total = self.items[index]
            .price
            .checked_mul(quantity)
            .ok_or(CommerceError::Overflow)?;
        self.total_with(id, line_total)?;
        self.items[index].quantity = quantity;

        Ok(Some(CartEvent::QuantityChanged {
            id: id.clone(),
            quantity,
        }))
    }

    /// Remove an item from the cart. Returns `None` if it was not there.
    pub fn remove_item(&mut self, id: &LineItemId) -> Option<CartEvent> {
        let index = self.position(id)?;
        self.items.remove(index);
        Some(CartEvent::ItemRemoved { id: id.clone() })
    }

    /// Remove every item.
    pub fn clear(&mut self) -> CartEvent {
        let removed = self.items.len();
        self.items.clear();
        CartEvent::Cleared { removed }
    }

    /// Total item count (sum of quantities).
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of `price * quantity` in minor units.
    ///
    /// Mutations reject any change whose cart total would not fit in `i64`,
    /// so this sum is always exact.
    pub fn total_price(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.price.saturating_mul(i.quantity)))
    }

    /// Total price as [`Money`] in the cart currency.
    pub fn total_money(&self) -> Money {
        Money::new(self.total_price(), self.currency)
    }

    /// Per-line and overall totals.
    ///
    /// Returns an error if arithmetic overflow occurs.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(|item| {
                let unit_price = Money::new(item.price, self.currency);
                let subtotal = unit_price
                    .try_multiply(item.quantity)
                    .ok_or(CommerceError::Overflow)?;
                Ok(LineTotal {
                    id: item.id.clone(),
                    title: item.title.clone(),
                    unit_price,
                    quantity: item.quantity,
                    subtotal,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let total = Money::try_sum(lines.iter().map(|l| &l.subtotal), self.currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartTotals {
            total_items: self.total_items(),
            total,
            lines,
        })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by ID.
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Display currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn position(&self, id: &LineItemId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Cart total with the row `id` priced at `line_total`, appended if absent.
    fn total_with(&self, id: &LineItemId, line_total: i64) -> Result<i64, CommerceError> {
        self.items
            .iter()
            .filter(|i| &i.id != id)
            .try_fold(line_total, |acc, i| {
                i.line_total().and_then(|t| acc.checked_add(t))
            })
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanilla(quantity: i64) -> LineItem {
        LineItem::new("cake-1-vanilla", "Cake - vanilla", 1000).with_quantity(quantity)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::JPY);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0);
    }

    #[test]
    fn test_checkout_walkthrough() {
        let mut cart = Cart::new(Currency::JPY);
        let id = LineItemId::new("cake-1-vanilla");

        cart.add_item(vanilla(1)).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), 1000);

        cart.add_item(vanilla(2)).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&id).unwrap().quantity, 3);
        assert_eq!(cart.total_price(), 3000);

        cart.update_quantity(&id, 5).unwrap();
        assert_eq!(cart.get(&id).unwrap().quantity, 5);
        assert_eq!(cart.total_price(), 5000);

        cart.update_quantity(&id, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0);
    }

    #[test]
    fn test_repeated_adds_sum_quantities() {
        let mut cart = Cart::new(Currency::USD);
        for quantity in [1, 4, 2, 7] {
            cart.add_item(vanilla(quantity)).unwrap();
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 14);
    }

    #[test]
    fn test_merge_reports_event_and_keeps_first_price() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(vanilla(1)).unwrap();
        let event = cart
            .add_item(LineItem::new("cake-1-vanilla", "Renamed", 9999).with_quantity(2))
            .unwrap();

        assert_eq!(
            event,
            CartEvent::ItemMerged {
                id: LineItemId::new("cake-1-vanilla"),
                added: 2,
                quantity: 3,
            }
        );
        let row = &cart.items()[0];
        assert_eq!(row.price, 1000);
        assert_eq!(row.title, "Cake - vanilla");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(LineItem::new("b", "Bun", 200)).unwrap();
        cart.add_item(LineItem::new("a", "Croissant", 300)).unwrap();
        cart.add_item(LineItem::new("b", "Bun", 200)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_totals_across_rows() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(LineItem::new("a", "Tart", 450).with_quantity(2)).unwrap();
        cart.add_item(LineItem::new("b", "Loaf", 700).with_quantity(3)).unwrap();

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), 450 * 2 + 700 * 3);

        let totals = cart.totals().unwrap();
        assert_eq!(totals.total.amount_minor, 3000);
        assert_eq!(totals.lines[1].subtotal.amount_minor, 2100);
    }

    #[test]
    fn test_negative_update_removes() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(vanilla(8)).unwrap();
        let event = cart
            .update_quantity(&LineItemId::new("cake-1-vanilla"), -3)
            .unwrap();
        assert!(matches!(event, Some(CartEvent::ItemRemoved { .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(vanilla(2)).unwrap();
        let before = cart.clone();

        assert_eq!(cart.update_quantity(&LineItemId::new("nope"), 4).unwrap(), None);
        assert_eq!(cart.update_quantity(&LineItemId::new("nope"), 0).unwrap(), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(vanilla(2)).unwrap();
        let before = cart.clone();

        assert_eq!(cart.remove_item(&LineItemId::new("nope")), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(vanilla(2)).unwrap();
        cart.add_item(LineItem::new("bun", "Bun", 150)).unwrap();

        assert_eq!(cart.clear(), CartEvent::Cleared { removed: 2 });
        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0);
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let mut cart = Cart::new(Currency::USD);
        let err = cart.add_item(vanilla(0)).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut cart = Cart::new(Currency::USD);
        let err = cart.add_item(LineItem::new("x", "X", -1)).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice(-1)));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut cart = Cart::new(Currency::USD);
        assert!(cart.add_item(LineItem::new("", "Bun", 100)).unwrap_err().is_validation());
        assert!(cart.add_item(LineItem::new("bun", " ", 100)).unwrap_err().is_validation());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(vanilla(MAX_QUANTITY_PER_ITEM)).unwrap();

        let err = cart.add_item(vanilla(1)).unwrap_err();
        assert!(matches!(err, CommerceError::QuantityExceedsLimit(..)));
        assert_eq!(cart.total_items(), MAX_QUANTITY_PER_ITEM);

        let id = LineItemId::new("cake-1-vanilla");
        assert!(cart.update_quantity(&id, MAX_QUANTITY_PER_ITEM + 1).is_err());
    }

    #[test]
    fn test_line_total_overflow_rejected() {
        let mut cart = Cart::new(Currency::USD);
        let err = cart
            .add_item(LineItem::new("gold", "Gold cake", i64::MAX).with_quantity(2))
            .unwrap_err();
        assert!(matches!(err, CommerceError::Overflow));
    }

    #[test]
    fn test_cart_total_overflow_rejected() {
        let half = i64::MAX / 2 + 1;
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(LineItem::new("a", "A", half)).unwrap();

        let err = cart.add_item(LineItem::new("b", "B", half)).unwrap_err();
        assert!(matches!(err, CommerceError::Overflow));
        assert!(err.is_validation());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), half);
        assert!(cart.totals().is_ok());
    }

    #[test]
    fn test_merge_and_update_respect_cart_total() {
        let half = i64::MAX / 2 + 1;
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(LineItem::new("a", "A", half)).unwrap();
        cart.add_item(LineItem::new("b", "B", 1)).unwrap();

        let b = LineItemId::new("b");
        assert!(matches!(
            cart.add_item(LineItem::new("a", "A", half)),
            Err(CommerceError::Overflow)
        ));
        assert!(matches!(
            cart.update_quantity(&LineItemId::new("a"), 2),
            Err(CommerceError::Overflow)
        ));
        cart.update_quantity(&b, 5).unwrap();

        assert_eq!(cart.total_items(), 6);
        assert_eq!(cart.total_price(), half + 5);
        assert_eq!(cart.totals().unwrap().total.amount_minor, half + 5);
    }

    #[test]
    fn test_for_variant() {
        let item = LineItem::for_variant("cake-1", "vanilla", "Cake", 1000);
        assert_eq!(item.id.as_str(), "cake-1-vanilla");
        assert_eq!(item.title, "Cake - vanilla");
        assert_eq!(item.variant.as_deref(), Some("vanilla"));
        assert_eq!(item.base_product_id, Some(ProductId::new("cake-1")));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_persisted_shape() {
        let item = LineItem::for_variant("cake-1", "vanilla", "Cake", 1000)
            .with_image("/img/cake.png");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["baseProductId"], "cake-1");
        assert_eq!(json["price"], 1000);

        let plain = serde_json::to_value(LineItem::new("bun", "Bun", 100)).unwrap();
        assert!(plain.get("variant").is_none());
        assert!(plain.get("baseProductId").is_none());
    }

    #[test]
    fn test_quantity_defaults_to_one_when_absent() {
        let item: LineItem =
            serde_json::from_str(r#"{"id":"bun","title":"Bun","price":100}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_with_items_merges_duplicates() {
        let cart = Cart::with_items(vec![vanilla(1), vanilla(2)], Currency::USD).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 3);
    }
}
