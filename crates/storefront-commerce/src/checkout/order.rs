//! Order types.
//!
//! Orders are owned by the API: the client submits an [`OrderRequest`] and the
//! API prices it, returning the stored [`Order`].

use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product and quantity in an order request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: UserId,
    pub products: Vec<OrderLine>,
    /// Applied discount codes, in the order they were applied.
    pub discounts: Vec<String>,
}

impl OrderRequest {
    /// Total units ordered.
    pub fn item_count(&self) -> u64 {
        self.products.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// A priced line of a stored order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price charged, when the API reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

impl OrderProduct {
    /// `price × quantity`, if the unit price is known.
    pub fn line_total(&self) -> Option<Money> {
        self.price?.try_multiply(self.quantity)
    }
}

/// An order as returned by `POST /orders` and `GET /orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub status: Option<String>,
    /// Total computed by the API after discounts.
    pub total: Money,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
    #[serde(default)]
    pub discounts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn item_count(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.quantity)).sum()
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            user_id: UserId::new("u1"),
            products: vec![
                OrderLine {
                    product_id: ProductId::new("x"),
                    quantity: 2,
                },
                OrderLine {
                    product_id: ProductId::new("y"),
                    quantity: 1,
                },
            ],
            discounts: vec!["SAVE10".into()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "userId": "u1",
                "products": [
                    {"productId": "x", "quantity": 2},
                    {"productId": "y", "quantity": 1}
                ],
                "discounts": ["SAVE10"]
            })
        );
        assert_eq!(request.item_count(), 3);
    }

    #[test]
    fn test_order_decodes_api_response() {
        let json = r#"{
            "_id": "o1",
            "userId": "u1",
            "status": "pending",
            "total": 1590.5,
            "products": [{"_id": "l1", "productId": "x", "quantity": 2, "price": 800}],
            "discounts": ["SAVE10"],
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_str(), "o1");
        assert_eq!(order.total, Money::from_decimal(1590.5));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.products[0].line_total(), Some(Money::from_decimal(1600.0)));
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_order_minimal_response() {
        let order: Order = serde_json::from_str(r#"{"_id":"o2","total":0}"#).unwrap();
        assert_eq!(order.status_label(), "unknown");
        assert!(order.products.is_empty());
    }
}
