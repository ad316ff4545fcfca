//! Shopping session: cart, discount codes and checkout.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use storefront_commerce::cart::{find_by_code, Discount};
use storefront_commerce::{Rejection, Session};
use storefront_data::workflow::{self, Catalog, WorkflowError};
use storefront_data::ApiClient;

use super::order::print_order;
use super::ShopArgs;
use crate::context::Context;

const ACTIONS: [&str; 6] = [
    "Add product",
    "Use discount code",
    "View cart",
    "Reset cart",
    "Checkout",
    "Quit",
];

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading catalog...");
    let catalog = workflow::load_catalog(&api).await;
    spinner.finish_and_clear();
    let catalog = catalog.context("Failed to load catalog")?;

    let interactive = args.add.is_empty() && !ctx.output.is_json();
    let mut session = Session::new();

    let user_id = args
        .user
        .clone()
        .or_else(|| ctx.config.session.default_user.clone());
    match user_id {
        Some(id) => {
            let user = catalog
                .find_user(&id)
                .with_context(|| format!("Unknown user: {}", id))?;
            session.select_user(user.clone());
        }
        None if interactive && !catalog.users.is_empty() => {
            let items: Vec<String> = catalog
                .users
                .iter()
                .map(|u| format!("{} <{}>", u.display_name(), u.email))
                .collect();
            let selection = Select::new()
                .with_prompt("Shop as")
                .items(&items)
                .default(0)
                .interact()?;
            session.select_user(catalog.users[selection].clone());
        }
        None => {}
    }

    for (code, result) in apply_codes(&mut session, &args.codes, &catalog.discounts) {
        match result {
            Ok(()) => ctx.output.success(&format!("Applied {}", code)),
            Err(rejection) => ctx.output.warn(&rejection.to_string()),
        }
    }

    if interactive {
        run_interactive(&api, &catalog, &mut session, ctx).await
    } else {
        run_scripted(&args, &api, &catalog, &mut session, ctx).await
    }
}

async fn run_scripted(
    args: &ShopArgs,
    api: &ApiClient,
    catalog: &Catalog,
    session: &mut Session,
    ctx: &Context,
) -> Result<()> {
    for id in &args.add {
        let product = catalog
            .find_product(id)
            .with_context(|| format!("Unknown product: {}", id))?;
        session.add_to_cart(product.clone());
    }

    print_cart(session, catalog, ctx);

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    place_order(api, session, ctx).await
}

async fn run_interactive(
    api: &ApiClient,
    catalog: &Catalog,
    session: &mut Session,
    ctx: &Context,
) -> Result<()> {
    if let Some(user) = session.selected_user() {
        ctx.output
            .info(&format!("Shopping as {}", user.display_name()));
    }

    loop {
        let action = Select::new()
            .with_prompt(format!("Cart: {} item(s)", session.cart().item_count()))
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match ACTIONS[action] {
            "Add product" => {
                if catalog.products.is_empty() {
                    ctx.output.warn("No products available");
                    continue;
                }
                let items: Vec<String> = catalog
                    .products
                    .iter()
                    .map(|p| format!("{} ({}) {}", p.name, p.category, p.price.display()))
                    .collect();
                let selection = Select::new()
                    .with_prompt("Product")
                    .items(&items)
                    .default(0)
                    .interact()?;
                let product = catalog.products[selection].clone();
                ctx.output.success(&format!("Added {}", product.name));
                session.add_to_cart(product);
            }
            "Use discount code" => {
                let code: String = Input::new().with_prompt("Code").interact_text()?;
                let code = code.trim();
                match session.use_code(code, &catalog.discounts) {
                    Ok(()) => ctx.output.success(&format!("Applied {}", code)),
                    Err(rejection) => ctx.output.warn(&rejection.to_string()),
                }
            }
            "View cart" => print_cart(session, catalog, ctx),
            "Reset cart" => {
                session.reset();
                ctx.output.info("Cart cleared");
            }
            "Checkout" => {
                // A failed checkout leaves the cart in place for another try.
                if let Err(e) = place_order(api, session, ctx).await {
                    ctx.output.error(&format!("{:#}", e));
                }
            }
            _ => return Ok(()),
        }
    }
}

async fn place_order(api: &ApiClient, session: &mut Session, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Placing order...");
    let result = workflow::checkout(api, session).await;
    spinner.finish_and_clear();

    let order = match result {
        Ok(order) => order,
        // The server took the order and the session is already reset.
        Err(WorkflowError::OrderUnreadable(e)) => {
            ctx.output.warn(&format!(
                "Order placed, but the response could not be read: {}",
                e
            ));
            return Ok(());
        }
        Err(e) => bail!("Checkout failed: {}", e),
    };

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.success("Order placed");
    print_order(&order, ctx);
    Ok(())
}

/// Apply `--code` values in order, returning each code with its outcome.
fn apply_codes<'a>(
    session: &mut Session,
    codes: &'a [String],
    discounts: &[Discount],
) -> Vec<(&'a str, Result<(), Rejection>)> {
    codes
        .iter()
        .map(|code| (code.as_str(), session.use_code(code.trim(), discounts)))
        .collect()
}

fn print_cart(session: &Session, catalog: &Catalog, ctx: &Context) {
    ctx.output.header("Cart");
    let summary = session.summary();
    if summary.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [30, 6, 12, 12];
    ctx.output
        .table_row(&["PRODUCT", "QTY", "PRICE", "LINE TOTAL"], &widths);
    for line in &summary {
        let total = line
            .line_total()
            .map(|t| t.display())
            .unwrap_or_else(|e| e.to_string());
        ctx.output.table_row(
            &[
                &line.product.name,
                &line.quantity.to_string(),
                &line.product.price.display(),
                &total,
            ],
            &widths,
        );
    }

    if !session.applied_codes().is_empty() {
        ctx.output.info("");
        ctx.output.info("Discounts:");
        for code in session.applied_codes() {
            let description = find_by_code(&catalog.discounts, code)
                .map(|d| d.describe())
                .unwrap_or_default();
            ctx.output.list_item(&format!("{} {}", code, description));
        }
    }

    ctx.output.info("");
    if let Ok(subtotal) = session.cart().estimated_subtotal() {
        ctx.output.kv(
            "Subtotal before discounts",
            &subtotal.display(),
        );
    }
    ctx.output
        .info("The final total is calculated when the order is placed.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::cart::{DiscountTerms, DiscountType};

    fn discounts() -> Vec<Discount> {
        vec![Discount::new(
            "SAVE10",
            DiscountType::Coupon,
            DiscountTerms::PercentageAmount {
                discount_percent: 10.0,
            },
        )
        .unwrap()]
    }

    #[test]
    fn test_apply_codes_without_products() {
        let mut session = Session::new();
        let codes = vec!["SAVE10".to_string(), "WINTER".to_string()];

        let results = apply_codes(&mut session, &codes, &discounts());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], ("SAVE10", Ok(())));
        assert!(matches!(results[1].1, Err(Rejection::UnknownCode(_))));
        assert_eq!(session.applied_codes(), ["SAVE10".to_string()]);
    }
}
