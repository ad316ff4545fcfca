//! Shopping cart module.
//!
//! Contains cart entries and their summary, discounts with the rules for
//! applying codes, and discount drafts for the creation form.

mod cart;
mod discount;
mod draft;

pub use cart::{summarize, Cart, CartEntry, CartSummaryLine};
pub use discount::{
    find_by_code, try_apply, Discount, DiscountRecord, DiscountRule, DiscountTerms, DiscountType,
};
pub use draft::{DiscountDraft, FieldValue, PayloadField};
