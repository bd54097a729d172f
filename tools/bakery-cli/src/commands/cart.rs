//! Cart commands: add, update, remove, clear, show.

use anyhow::{bail, Context as _, Result};
use bakery_commerce::cart::LineItem;
use bakery_commerce::ids::LineItemId;
use bakery_commerce::store::{CartStore, MutationReport};
use bakery_commerce::Money;
use dialoguer::Confirm;

use super::{AddArgs, ClearArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;

/// Build the line item described by `bakery add`.
pub fn line_item(args: &AddArgs) -> LineItem {
    let item = match args.variant {
        Some(ref variant) => {
            LineItem::for_variant(args.product.as_str(), variant.as_str(), &args.title, args.price)
        }
        None => LineItem::new(args.product.as_str(), args.title.as_str(), args.price),
    };
    let item = item.with_quantity(args.quantity);
    match args.image {
        Some(ref image) => item.with_image(image.as_str()),
        None => item,
    }
}

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let item = line_item(&args);
    let id = item.id.clone();

    let report = store.add_item(item)?;
    describe(&report, &store, ctx);
    if let Some(row) = store.get(&id) {
        ctx.output.success(&format!("{} x{} in cart", row.title, row.quantity));
    }
    print_summary(&store, ctx)
}

/// Run the update command.
pub fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = LineItemId::new(args.id);

    let report = store.update_quantity(&id, args.quantity)?;
    if !report.changed() {
        ctx.output.warn(&format!("No item '{}' in cart", id));
    }
    describe(&report, &store, ctx);
    print_summary(&store, ctx)
}

/// Run the remove command.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = LineItemId::new(args.id);

    let report = store.remove_item(&id);
    if report.changed() {
        ctx.output.success(&format!("Removed '{}'", id));
    } else {
        ctx.output.warn(&format!("No item '{}' in cart", id));
    }
    describe(&report, &store, ctx);
    print_summary(&store, ctx)
}

/// Run the clear command.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if !args.yes && !store.is_empty() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", store.total_items()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cart left unchanged.");
            return Ok(());
        }
    }

    let report = store.clear_cart();
    describe(&report, &store, ctx);
    ctx.output.success("Cart cleared");
    print_summary(&store, ctx)
}

/// Run the show command.
pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    print_summary(&store, ctx)
}

/// Report the outcome of a mutation that already happened in memory.
fn describe(report: &MutationReport, store: &CartStore, ctx: &Context) {
    if let Some(event) = report.event() {
        ctx.output.debug(&format!("event: {}", event.kind()));
    }
    if let Some(err) = report.save_error() {
        ctx.output.warn(&format!(
            "Cart updated but could not be saved to '{}': {}",
            store.slot(),
            err
        ));
    }
}

/// Print the cart contents and totals.
pub fn print_summary(store: &CartStore, ctx: &Context) -> Result<()> {
    let totals = store
        .totals()
        .with_context(|| format!("Could not total cart '{}'", store.slot()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "slot": store.slot(),
            "items": store.items(),
            "totals": totals,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", store.slot()));
    if totals.is_empty() {
        ctx.output.info("Cart is empty.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "ITEM", "QTY", "PRICE", "SUBTOTAL"], WIDTHS);
    for line in &totals.lines {
        ctx.output.table_row(
            &[
                line.id.as_str(),
                line.title.as_str(),
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &line.subtotal.display(),
            ],
            WIDTHS,
        );
    }
    ctx.output.kv("items", &totals.total_items.to_string());
    ctx.output.kv("total", &format_total(totals.total));
    Ok(())
}

const WIDTHS: &[usize] = &[22, 28, 5, 10, 10];

fn format_total(total: Money) -> String {
    format!("{} ({})", total.display(), total.currency)
}

/// Fail with a readable message when a required cart is empty.
pub fn ensure_not_empty(store: &CartStore) -> Result<()> {
    if store.is_empty() {
        bail!("Cart '{}' is empty", store.slot());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(variant: Option<&str>) -> AddArgs {
        AddArgs {
            product: "cake-1".to_string(),
            title: "Cake".to_string(),
            price: 1000,
            variant: variant.map(str::to_string),
            quantity: 2,
            image: Some("/img/cake.png".to_string()),
        }
    }

    #[test]
    fn test_line_item_with_variant() {
        let item = line_item(&args(Some("vanilla")));
        assert_eq!(item.id.as_str(), "cake-1-vanilla");
        assert_eq!(item.title, "Cake - vanilla");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.image, "/img/cake.png");
    }

    #[test]
    fn test_line_item_without_variant() {
        let item = line_item(&args(None));
        assert_eq!(item.id.as_str(), "cake-1");
        assert_eq!(item.title, "Cake");
        assert!(item.base_product_id.is_none());
    }

    #[test]
    fn test_format_total() {
        let total = Money::new(2500, bakery_commerce::Currency::JPY);
        assert_eq!(format_total(total), "\u{00a5}2500 (JPY)");
    }
}
