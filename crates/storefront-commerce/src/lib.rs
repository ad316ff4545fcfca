//! Storefront domain types and logic.
//!
//! This crate holds everything about a shopping session that does not touch
//! the network:
//!
//! - **Catalog**: Products, categories, users
//! - **Cart**: Cart entries folded into summary lines, discount codes and the
//!   one-per-type application rule, discount drafts for the creation form
//! - **Checkout**: The order request built from a session, the stored order
//! - **Session**: The controller state owning cart and applied codes
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let mut session = Session::new();
//! session.select_user(user);
//! session.add_to_cart(headphones.clone());
//! session.add_to_cart(headphones);
//!
//! if let Err(rejection) = session.use_code("SAVE10", &discounts) {
//!     println!("{}", rejection);
//! }
//!
//! let request = session.order_request()?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

pub use error::{CommerceError, Rejection, ValidationError};
pub use ids::*;
pub use money::Money;
pub use session::Session;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, Rejection, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::Money;
    pub use crate::session::Session;

    // Catalog
    pub use crate::catalog::{Category, NewProduct, NewUser, Product, User};

    // Cart
    pub use crate::cart::{
        summarize, try_apply, Cart, CartEntry, CartSummaryLine, Discount, DiscountDraft,
        DiscountRule, DiscountTerms, DiscountType, FieldValue, PayloadField,
    };

    // Checkout
    pub use crate::checkout::{Order, OrderLine, OrderProduct, OrderRequest};
}
