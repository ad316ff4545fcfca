//! Resource creation commands.

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::{Input, Select};
use storefront_commerce::cart::{DiscountDraft, DiscountRule, DiscountType, FieldValue, PayloadField};
use storefront_commerce::catalog::{Category, NewProduct, NewUser};
use storefront_commerce::Money;
use storefront_data::workflow;

use super::{CreateArgs, CreateCommand};
use crate::context::Context;

/// Run the create command.
pub async fn run(args: CreateArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CreateCommand::User {
            first_name,
            last_name,
            email,
            password,
            phone,
            points,
        } => {
            let user = NewUser {
                first_name,
                last_name,
                email,
                password,
                phone,
                points,
            };
            create_user(&user, ctx).await
        }
        CreateCommand::Product {
            name,
            category,
            price,
        } => {
            let category: Category = category.parse().map_err(anyhow::Error::msg)?;
            let price = Money::try_from(price).map_err(anyhow::Error::msg)?;
            create_product(&NewProduct::new(name, category, price), ctx).await
        }
        CreateCommand::Discount {
            code,
            discount_type,
            rule,
            fields,
            no_input,
        } => {
            let interactive = !no_input && !ctx.output.is_json();
            let draft = fill_draft(code, discount_type, rule, &fields, interactive)?;
            create_discount(&draft, ctx).await
        }
    }
}

async fn create_user(user: &NewUser, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Creating user...");
    let result = workflow::submit_user(&api, user).await;
    spinner.finish_and_clear();
    let created = result.context("Failed to create user")?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Created user {} ({})",
        created.display_name(),
        created.id
    ));
    Ok(())
}

async fn create_product(product: &NewProduct, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Creating product...");
    let result = workflow::submit_product(&api, product).await;
    spinner.finish_and_clear();
    let created = result.context("Failed to create product")?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Created product {} ({}) at {}",
        created.name,
        created.id,
        created.price.display()
    ));
    Ok(())
}

async fn create_discount(draft: &DiscountDraft, ctx: &Context) -> Result<()> {
    // Fail before any spinner or network call.
    draft.validate()?;

    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Creating discount...");
    let result = workflow::submit_discount(&api, draft).await;
    spinner.finish_and_clear();
    let created = result.context("Failed to create discount")?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
        return Ok(());
    }
    ctx.output
        .success(&format!("Created discount {}", created.code));
    ctx.output.kv("Type", created.discount_type.as_str());
    ctx.output.kv("Rule", created.rule().as_str());
    ctx.output.kv("Terms", &created.describe());
    Ok(())
}

/// Fill a draft from flags, prompting for what is missing when interactive.
fn fill_draft(
    code: Option<String>,
    discount_type: Option<String>,
    rule: Option<String>,
    fields: &[String],
    interactive: bool,
) -> Result<DiscountDraft> {
    let mut draft = DiscountDraft::new();

    match code {
        Some(code) => draft.set_code(code),
        None if interactive => {
            let code: String = Input::new().with_prompt("Discount code").interact_text()?;
            draft.set_code(code);
        }
        None => {}
    }

    match discount_type {
        Some(t) => draft.set_type(t),
        None if interactive => {
            let items: Vec<&str> = DiscountType::ALL.iter().map(|t| t.as_str()).collect();
            let selection = Select::new()
                .with_prompt("Discount type")
                .items(&items)
                .default(0)
                .interact()?;
            draft.set_type(items[selection]);
        }
        None => {}
    }

    match rule {
        Some(r) => draft.set_rule(r),
        None if interactive && !draft.rule_options().is_empty() => {
            let options = draft.rule_options();
            let items: Vec<&str> = options.iter().map(|r| r.as_str()).collect();
            let selection = Select::new()
                .with_prompt("Rule")
                .items(&items)
                .default(0)
                .interact()?;
            draft.set_rule(items[selection]);
        }
        None => {}
    }

    for raw in fields {
        let (field, value) = parse_field(raw)?;
        draft.set_field(field, value);
    }

    if interactive {
        if let Ok(rule) = draft.rule().parse::<DiscountRule>() {
            for &field in rule.required_fields() {
                if draft.payload().contains_key(&field) {
                    continue;
                }
                let input: String = Input::new()
                    .with_prompt(field.as_str())
                    .interact_text()?;
                draft.set_field(field, FieldValue::parse_for(field, &input)?);
            }
        }
    }

    Ok(draft)
}

/// Parse `name=value` into a payload field.
fn parse_field(raw: &str) -> Result<(PayloadField, FieldValue)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected name=value, got '{}'", raw))?;
    let field: PayloadField = name.trim().parse().map_err(anyhow::Error::msg)?;
    if value.trim().is_empty() {
        bail!("No value given for {}", field);
    }
    Ok((field, FieldValue::parse_for(field, value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::ValidationError;

    #[test]
    fn test_parse_field() {
        let (field, value) = parse_field("discountAmount=0").unwrap();
        assert_eq!(field, PayloadField::DiscountAmount);
        assert_eq!(value, FieldValue::Number(0.0));

        let (field, value) = parse_field("category = Clothing").unwrap();
        assert_eq!(field, PayloadField::Category);
        assert_eq!(value, FieldValue::Text("Clothing".to_string()));

        assert!(parse_field("discountAmount").is_err());
        assert!(parse_field("discountAmount=").is_err());
        assert!(parse_field("discountAmount=lots").is_err());
        assert!(parse_field("bogus=1").is_err());
    }

    #[test]
    fn test_fill_draft_from_flags() {
        let draft = fill_draft(
            Some("FLAT0".into()),
            Some("coupon".into()),
            Some("fixed-amount".into()),
            &["discountAmount=0".to_string()],
            false,
        )
        .unwrap();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_fill_draft_reports_missing_payload() {
        let draft = fill_draft(
            Some("PTS".into()),
            Some("onTop".into()),
            Some("points".into()),
            &["maxPercent=10".to_string()],
            false,
        )
        .unwrap();
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::IncompletePayload { .. })
        ));
    }

    #[test]
    fn test_fill_draft_without_type() {
        let draft = fill_draft(Some("X".into()), None, None, &[], false).unwrap();
        assert_eq!(draft.validate(), Err(ValidationError::MissingType));
    }
}
