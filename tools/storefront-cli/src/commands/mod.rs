//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod create;
pub mod order;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    Products {
        /// Only show this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// List discounts.
    Discounts,
    /// List users.
    Users,
}

/// Arguments for the shop command.
///
/// With no `--add` the session is interactive. `--code` values are applied
/// first in either mode.
#[derive(Args)]
pub struct ShopArgs {
    /// User id to order for (default: session.default_user).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Product id to add to the cart; repeat to add more units.
    #[arg(short, long = "add")]
    pub add: Vec<String>,

    /// Discount code to apply; repeat for more codes.
    #[arg(long = "code")]
    pub codes: Vec<String>,

    /// Check out without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Show an order.
    Show {
        /// Order id.
        id: String,
    },
}

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    #[command(subcommand)]
    pub command: CreateCommand,
}

#[derive(Subcommand)]
pub enum CreateCommand {
    /// Create a user.
    User {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Starting loyalty points.
        #[arg(long, default_value = "0")]
        points: f64,
    },
    /// Create a product.
    Product {
        #[arg(long)]
        name: String,
        /// Accessories, Electronics or Clothing.
        #[arg(long)]
        category: String,
        /// Unit price in major units.
        #[arg(long)]
        price: f64,
    },
    /// Create a discount. Prompts for anything not given.
    Discount {
        /// Discount code.
        #[arg(long)]
        code: Option<String>,
        /// coupon, seasonal or onTop.
        #[arg(short, long = "type")]
        discount_type: Option<String>,
        /// Rule allowed for the type, e.g. fixed-amount.
        #[arg(short, long)]
        rule: Option<String>,
        /// Payload field as name=value, e.g. discountAmount=100.
        #[arg(short, long = "field")]
        fields: Vec<String>,
        /// Never prompt; fail on missing values.
        #[arg(long)]
        no_input: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
