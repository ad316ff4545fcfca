//! Shopping session state.
//!
//! A [`Session`] is the single owner of the cart and applied discount codes
//! for one shopper. It lives in memory only. Every mutation either succeeds
//! completely or leaves the state as it was.

use crate::cart::{summarize, try_apply, Cart, CartSummaryLine, Discount};
use crate::catalog::{Product, User};
use crate::checkout::OrderRequest;
use crate::error::{CommerceError, Rejection};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Cart, applied codes and the user the order will be placed for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    cart: Cart,
    applied: Vec<String>,
    selected_user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Applied discount codes in the order they were accepted.
    pub fn applied_codes(&self) -> &[String] {
        &self.applied
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selected_user.as_ref()
    }

    pub fn select_user(&mut self, user: User) {
        debug!(user_id = %user.id, "user selected");
        self.selected_user = Some(user);
    }

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&mut self, product: Product) {
        debug!(product_id = %product.id, "added to cart");
        self.cart.add(product);
    }

    /// Try to apply a discount code against `catalog`.
    ///
    /// On rejection the applied set is left untouched.
    pub fn use_code(&mut self, code: &str, catalog: &[Discount]) -> Result<(), Rejection> {
        match try_apply(code, catalog, &self.applied) {
            Ok(next) => {
                debug!(code, "discount code applied");
                self.applied = next;
                Ok(())
            }
            Err(rejection) => {
                warn!(code, reason = %rejection, "discount code rejected");
                Err(rejection)
            }
        }
    }

    /// Empty the cart and drop all applied codes. The selected user stays.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.applied.clear();
    }

    pub fn summary(&self) -> Vec<CartSummaryLine> {
        summarize(self.cart.entries())
    }

    /// Build the `POST /orders` body.
    ///
    /// Fails if no user is selected or the cart is empty.
    pub fn order_request(&self) -> Result<OrderRequest, CommerceError> {
        let user = self
            .selected_user
            .as_ref()
            .ok_or(CommerceError::NoUserSelected)?;
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(OrderRequest {
            user_id: user.id.clone(),
            products: self.summary().iter().map(CartSummaryLine::to_order_line).collect(),
            discounts: self.applied.clone(),
        })
    }

    /// Clear the cart after the API has accepted the order.
    pub fn complete_checkout(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{DiscountTerms, DiscountType};
    use crate::catalog::Category;
    use crate::ids::UserId;
    use crate::money::Money;

    fn product(id: &str) -> Product {
        Product::new(id, id.to_uppercase(), Category::Accessories, Money::from_decimal(99.0))
    }

    fn user() -> User {
        User {
            id: UserId::new("u1"),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@example.com".into(),
            points: Some(120.0),
        }
    }

    fn catalog() -> Vec<Discount> {
        vec![
            Discount::new(
                "SAVE10",
                DiscountType::Coupon,
                DiscountTerms::PercentageAmount {
                    discount_percent: 10.0,
                },
            )
            .unwrap(),
            Discount::new(
                "FLAT50",
                DiscountType::Coupon,
                DiscountTerms::FixedAmount {
                    discount_amount: 50.0,
                },
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_use_code_accepts_and_rejects() {
        let mut session = Session::new();
        let catalog = catalog();

        session.use_code("SAVE10", &catalog).unwrap();
        assert_eq!(session.applied_codes(), ["SAVE10".to_string()]);

        let err = session.use_code("FLAT50", &catalog).unwrap_err();
        assert!(matches!(err, Rejection::TypeConflict { .. }));
        assert_eq!(session.applied_codes(), ["SAVE10".to_string()]);
    }

    #[test]
    fn test_order_request_requires_user() {
        let mut session = Session::new();
        session.add_to_cart(product("a"));
        assert!(matches!(
            session.order_request(),
            Err(CommerceError::NoUserSelected)
        ));
    }

    #[test]
    fn test_order_request_requires_items() {
        let mut session = Session::new();
        session.select_user(user());
        assert!(matches!(session.order_request(), Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_order_request_from_summary() {
        let mut session = Session::new();
        session.select_user(user());
        session.add_to_cart(product("x"));
        session.add_to_cart(product("y"));
        session.add_to_cart(product("x"));
        session.use_code("SAVE10", &catalog()).unwrap();

        let request = session.order_request().unwrap();
        assert_eq!(request.user_id, UserId::new("u1"));
        assert_eq!(request.products.len(), 2);
        assert_eq!(request.products[0].product_id.as_str(), "x");
        assert_eq!(request.products[0].quantity, 2);
        assert_eq!(request.discounts, vec!["SAVE10".to_string()]);
    }

    #[test]
    fn test_reset_keeps_user() {
        let mut session = Session::new();
        session.select_user(user());
        session.add_to_cart(product("a"));
        session.use_code("SAVE10", &catalog()).unwrap();

        session.complete_checkout();
        assert!(session.cart().is_empty());
        assert!(session.applied_codes().is_empty());
        assert!(session.selected_user().is_some());
    }
}
