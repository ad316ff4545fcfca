//! Catalog listing commands.

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::Category;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::points;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::Products { category } => list_products(category.as_deref(), ctx).await,
        CatalogCommand::Discounts => list_discounts(ctx).await,
        CatalogCommand::Users => list_users(ctx).await,
    }
}

async fn list_products(category: Option<&str>, ctx: &Context) -> Result<()> {
    let category: Option<Category> = category
        .map(|c| c.parse::<Category>().map_err(anyhow::Error::msg))
        .transpose()?;

    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading products...");
    let products = api.list_products().await;
    spinner.finish_and_clear();
    let mut products = products.context("Failed to load products")?;

    if let Some(category) = category {
        products.retain(|p| p.category == category);
    }

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");
    if products.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    let widths = [26, 30, 12, 12];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE"], &widths);
    for product in &products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                product.category.as_str(),
                &product.price.display(),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.info(&format!("Total: {} product(s)", products.len()));

    Ok(())
}

async fn list_discounts(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading discounts...");
    let discounts = api.list_discounts().await;
    spinner.finish_and_clear();
    let discounts = discounts.context("Failed to load discounts")?;

    if ctx.output.is_json() {
        ctx.output.json(&discounts);
        return Ok(());
    }

    ctx.output.header("Discounts");
    if discounts.is_empty() {
        ctx.output.info("No discounts found.");
        return Ok(());
    }

    let widths = [16, 10, 18];
    ctx.output.table_row(&["CODE", "TYPE", "RULE"], &widths);
    for discount in &discounts {
        ctx.output.table_row(
            &[
                &discount.code,
                discount.discount_type.as_str(),
                discount.rule().as_str(),
            ],
            &widths,
        );
        ctx.output.list_item(&discount.describe());
    }

    Ok(())
}

async fn list_users(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading users...");
    let users = api.list_users().await;
    spinner.finish_and_clear();
    let users = users.context("Failed to load users")?;

    if ctx.output.is_json() {
        ctx.output.json(&users);
        return Ok(());
    }

    ctx.output.header("Users");
    if users.is_empty() {
        ctx.output.info("No users found.");
        return Ok(());
    }

    let widths = [26, 24, 30, 8];
    ctx.output.table_row(&["ID", "NAME", "EMAIL", "POINTS"], &widths);
    for user in &users {
        ctx.output.table_row(
            &[
                user.id.as_str(),
                &user.display_name(),
                &user.email,
                &points(user.points),
            ],
            &widths,
        );
    }

    Ok(())
}
