//! Order lookup.

use anyhow::{Context as _, Result};
use storefront_commerce::checkout::Order;
use storefront_commerce::OrderId;

use super::{OrderArgs, OrderCommand};
use crate::context::Context;
use crate::output::{amount, order_status};

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrderCommand::Show { id } => show_order(&OrderId::new(id), ctx).await,
    }
}

async fn show_order(id: &OrderId, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading order...");
    let order = api.get_order(id).await;
    spinner.finish_and_clear();
    let order = order.with_context(|| format!("Failed to load order {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    print_order(&order, ctx);
    Ok(())
}

/// Print order details: id, status, total and priced lines.
pub fn print_order(order: &Order, ctx: &Context) {
    ctx.output.header(&format!("Order {}", order.id));
    ctx.output.kv("Status", &order_status(order));
    if let Some(created_at) = order.created_at {
        ctx.output
            .kv("Placed", &created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    ctx.output.kv("Items", &order.item_count().to_string());
    if !order.discounts.is_empty() {
        ctx.output.kv("Discounts", &order.discounts.join(", "));
    }

    if !order.products.is_empty() {
        ctx.output.info("");
        let widths = [26, 6, 12, 12];
        ctx.output
            .table_row(&["PRODUCT", "QTY", "PRICE", "LINE TOTAL"], &widths);
        for line in &order.products {
            let price = amount(line.price);
            let total = amount(line.line_total());
            ctx.output.table_row(
                &[
                    line.product_id.as_str(),
                    &line.quantity.to_string(),
                    &price,
                    &total,
                ],
                &widths,
            );
        }
    }

    ctx.output.info("");
    ctx.output.kv("Total", &order.total.display());
}
