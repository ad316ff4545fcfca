//! Commerce error types.

use crate::cart::{DiscountRule, DiscountType};
use thiserror::Error;

/// Why a discount code could not be added to the applied set.
///
/// The display string is the message shown to the shopper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No discount in the catalog carries this code.
    #[error("Invalid discount code: {0}")]
    UnknownCode(String),

    /// The code is already in the applied set.
    #[error("Already used this code: {0}")]
    AlreadyUsed(String),

    /// Another applied code resolves to a discount of the same type.
    #[error("One discount per type allowed: {code} conflicts with {conflicting_code} ({discount_type})")]
    TypeConflict {
        code: String,
        discount_type: DiscountType,
        conflicting_code: String,
    },
}

/// Why a discount draft (or another creation form) is not ready to submit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The discount code is empty.
    #[error("Discount code is required")]
    MissingCode,

    /// The type is empty or not one of coupon, seasonal, onTop.
    #[error("Discount type is required")]
    MissingType,

    /// The rule is empty or not allowed for the selected type.
    #[error("Discount rule is required")]
    MissingRule,

    /// Required payload fields for the rule are absent.
    #[error("Incomplete payload for rule {rule}: missing {}", .missing.join(", "))]
    IncompletePayload {
        rule: DiscountRule,
        missing: Vec<&'static str>,
    },

    /// A field is present but its value cannot be used.
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Errors that can occur in session and catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted without choosing a user.
    #[error("Please select a user before checkout")]
    NoUserSelected,

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A catalog record is not a well-formed discount.
    #[error("Invalid discount {code}: {reason}")]
    InvalidDiscount { code: String, reason: String },

    /// A discount code was rejected.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// A creation form failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::UnknownCode("WINTER".into()).to_string(),
            "Invalid discount code: WINTER"
        );
        let conflict = Rejection::TypeConflict {
            code: "B".into(),
            discount_type: DiscountType::Coupon,
            conflicting_code: "A".into(),
        };
        assert_eq!(
            conflict.to_string(),
            "One discount per type allowed: B conflicts with A (coupon)"
        );
    }

    #[test]
    fn test_incomplete_payload_lists_fields() {
        let err = ValidationError::IncompletePayload {
            rule: DiscountRule::Price,
            missing: vec!["countPerPrice", "discountAmount"],
        };
        assert_eq!(
            err.to_string(),
            "Incomplete payload for rule price: missing countPerPrice, discountAmount"
        );
    }
}
