//! Cart entries and the summary fold.

use crate::catalog::Product;
use crate::checkout::OrderLine;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One "add to cart" event.
///
/// Carries the product as it was when it was added; each entry is exactly one
/// unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    pub product: Product,
}

impl CartEntry {
    pub fn new(product: Product) -> Self {
        Self { product }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

impl From<Product> for CartEntry {
    fn from(product: Product) -> Self {
        Self::new(product)
    }
}

/// A distinct product in the cart with how many times it was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummaryLine {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartSummaryLine {
    /// `price × quantity`, for display.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// The `{productId, quantity}` pair sent with an order.
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product.id.clone(),
            quantity: self.quantity,
        }
    }
}

/// Fold cart entries into one line per product.
///
/// Lines come out in order of each product's first appearance; later entries
/// for the same product only bump its quantity. Quantities sum to
/// `entries.len()`.
pub fn summarize(entries: &[CartEntry]) -> Vec<CartSummaryLine> {
    let mut positions: HashMap<&ProductId, usize> = HashMap::with_capacity(entries.len());
    let mut lines: Vec<CartSummaryLine> = Vec::new();

    for entry in entries {
        match positions.get(entry.product_id()) {
            Some(&index) => lines[index].quantity += 1,
            None => {
                positions.insert(entry.product_id(), lines.len());
                lines.push(CartSummaryLine {
                    product: entry.product.clone(),
                    quantity: 1,
                });
            }
        }
    }

    lines
}

/// The session's ordered sequence of cart entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one unit of a product.
    pub fn add(&mut self, product: Product) {
        self.entries.push(CartEntry::new(product));
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of units added (sum of quantities).
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.summary().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Summary lines for display and order submission.
    pub fn summary(&self) -> Vec<CartSummaryLine> {
        summarize(&self.entries)
    }

    /// Sum of line totals before discounts.
    ///
    /// Display only: the order total returned by the API is authoritative.
    pub fn estimated_subtotal(&self) -> Result<Money, CommerceError> {
        let totals = self
            .summary()
            .iter()
            .map(CartSummaryLine::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals.iter()).ok_or(CommerceError::Overflow)
    }
}

impl FromIterator<Product> for Cart {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(CartEntry::new).collect(),
        }
    }
}
