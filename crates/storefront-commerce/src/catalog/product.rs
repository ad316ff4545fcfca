//! Product types.

use crate::catalog::Category;
use crate::error::ValidationError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as served by `GET /products`.
///
/// Products are read-only on the client; a session holds a cached copy per
/// catalog load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier assigned by the API.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category the product is listed under.
    pub category: Category,
    /// Unit price.
    pub price: Money,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: Category,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            price,
        }
    }
}

/// Body of `POST /products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price: Money,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, category: Category, price: Money) -> Self {
        Self {
            name: name.into(),
            category,
            price,
        }
    }

    /// Check the product before it is submitted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "name".to_string(),
                reason: "is required".to_string(),
            });
        }
        if self.price.is_negative() {
            return Err(ValidationError::InvalidField {
                field: "price".to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_api_shape() {
        let json = r#"{"_id":"p1","name":"Headphones","category":"Electronics","price":1290}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.category, Category::Electronics);
        assert_eq!(product.price, Money::from_decimal(1290.0));
    }

    #[test]
    fn test_product_ignores_extra_fields() {
        let json = r#"{"_id":"p2","name":"Cap","category":"Accessories","price":250,"__v":0}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Cap");
    }

    #[test]
    fn test_new_product_validation() {
        let ok = NewProduct::new("T-Shirt", Category::Clothing, Money::from_decimal(350.0));
        assert!(ok.validate().is_ok());

        let free = NewProduct::new("Sticker", Category::Accessories, Money::zero());
        assert!(free.validate().is_ok());

        let unnamed = NewProduct::new("  ", Category::Clothing, Money::zero());
        assert!(unnamed.validate().is_err());

        let negative = NewProduct::new("Refund", Category::Clothing, Money::new(-1));
        assert!(negative.validate().is_err());
    }
}
