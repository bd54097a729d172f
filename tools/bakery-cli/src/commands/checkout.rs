//! Checkout command: freeze the cart into an order draft.

use anyhow::Result;
use bakery_commerce::checkout::OrderDraft;
use dialoguer::Confirm;

use super::cart::ensure_not_empty;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
///
/// Prints the draft and clears the cart once the user confirms.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    ensure_not_empty(&store)?;

    let draft = store.cart().order_draft()?;
    print_draft(&draft, ctx);

    if args.dry_run {
        ctx.output.info("Dry run: cart left unchanged.");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", draft.total.display()))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Checkout cancelled.");
            return Ok(());
        }
    }

    let report = store.clear_cart();
    if let Some(err) = report.save_error() {
        ctx.output
            .warn(&format!("Order placed but the cart could not be emptied on disk: {}", err));
    }
    ctx.output.success(&format!(
        "Order placed: {} item(s), {}",
        draft.total_items,
        draft.total.display()
    ));
    Ok(())
}

fn print_draft(draft: &OrderDraft, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(draft);
        return;
    }

    ctx.output.header("Order");
    for line in &draft.lines {
        ctx.output.kv(
            &line.title,
            &format!(
                "{} x {} = {}",
                line.quantity,
                line.unit_price.display(),
                line.subtotal.display()
            ),
        );
    }
    ctx.output.kv("items", &draft.total_items.to_string());
    ctx.output.kv("total", &draft.total.display());
}
