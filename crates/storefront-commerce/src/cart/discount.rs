//! Discount types and the rules for applying discount codes.

use crate::cart::draft::{FieldValue, PayloadField};
use crate::catalog::Category;
use crate::error::{CommerceError, Rejection, ValidationError};
use crate::ids::DiscountId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Broad category of a discount. At most one discount of each type may be
/// applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiscountType {
    #[serde(rename = "coupon")]
    Coupon,
    #[serde(rename = "seasonal")]
    Seasonal,
    #[serde(rename = "onTop")]
    OnTop,
}

impl DiscountType {
    pub const ALL: [DiscountType; 3] = [
        DiscountType::Coupon,
        DiscountType::Seasonal,
        DiscountType::OnTop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Coupon => "coupon",
            DiscountType::Seasonal => "seasonal",
            DiscountType::OnTop => "onTop",
        }
    }

    /// Rules a discount of this type may use.
    pub fn allowed_rules(&self) -> &'static [DiscountRule] {
        match self {
            DiscountType::Coupon => &[DiscountRule::FixedAmount, DiscountRule::PercentageAmount],
            DiscountType::Seasonal => &[DiscountRule::Price],
            DiscountType::OnTop => &[DiscountRule::Points, DiscountRule::Category],
        }
    }

    pub fn allows(&self, rule: DiscountRule) -> bool {
        self.allowed_rules().contains(&rule)
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscountType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown discount type: {}", s))
    }
}

/// Calculation policy governing how a discount's payload is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiscountRule {
    #[serde(rename = "fixed-amount")]
    FixedAmount,
    #[serde(rename = "percentage-amount")]
    PercentageAmount,
    #[serde(rename = "points")]
    Points,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "category")]
    Category,
}

impl DiscountRule {
    pub const ALL: [DiscountRule; 5] = [
        DiscountRule::FixedAmount,
        DiscountRule::PercentageAmount,
        DiscountRule::Points,
        DiscountRule::Price,
        DiscountRule::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountRule::FixedAmount => "fixed-amount",
            DiscountRule::PercentageAmount => "percentage-amount",
            DiscountRule::Points => "points",
            DiscountRule::Price => "price",
            DiscountRule::Category => "category",
        }
    }

    /// Payload fields every discount with this rule must carry.
    pub fn required_fields(&self) -> &'static [PayloadField] {
        match self {
            DiscountRule::FixedAmount => &[PayloadField::DiscountAmount],
            DiscountRule::PercentageAmount => &[PayloadField::DiscountPercent],
            DiscountRule::Points => &[PayloadField::MaxPercent, PayloadField::DiscountAmount],
            DiscountRule::Price => &[PayloadField::CountPerPrice, PayloadField::DiscountAmount],
            DiscountRule::Category => &[PayloadField::Category, PayloadField::DiscountPercent],
        }
    }
}

impl fmt::Display for DiscountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscountRule::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown discount rule: {}", s))
    }
}

/// Rule-specific payload. Each variant carries exactly the fields its rule
/// requires, so a payload can never be paired with the wrong rule.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountTerms {
    FixedAmount { discount_amount: f64 },
    PercentageAmount { discount_percent: f64 },
    Points { max_percent: f64, discount_amount: f64 },
    Price { count_per_price: f64, discount_amount: f64 },
    Category { category: Category, discount_percent: f64 },
}

impl DiscountTerms {
    pub fn rule(&self) -> DiscountRule {
        match self {
            DiscountTerms::FixedAmount { .. } => DiscountRule::FixedAmount,
            DiscountTerms::PercentageAmount { .. } => DiscountRule::PercentageAmount,
            DiscountTerms::Points { .. } => DiscountRule::Points,
            DiscountTerms::Price { .. } => DiscountRule::Price,
            DiscountTerms::Category { .. } => DiscountRule::Category,
        }
    }

    /// Build terms for `rule` from loose payload fields.
    ///
    /// A field counts as present when it has a value, whatever that value is:
    /// `0` is a present amount. All absent fields are reported together.
    pub fn from_fields(
        rule: DiscountRule,
        fields: &BTreeMap<PayloadField, FieldValue>,
    ) -> Result<Self, ValidationError> {
        let missing: Vec<&'static str> = rule
            .required_fields()
            .iter()
            .filter(|field| !fields.contains_key(*field))
            .map(PayloadField::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::IncompletePayload { rule, missing });
        }

        let terms = match rule {
            DiscountRule::FixedAmount => DiscountTerms::FixedAmount {
                discount_amount: amount(fields, PayloadField::DiscountAmount)?,
            },
            DiscountRule::PercentageAmount => DiscountTerms::PercentageAmount {
                discount_percent: amount(fields, PayloadField::DiscountPercent)?,
            },
            DiscountRule::Points => DiscountTerms::Points {
                max_percent: amount(fields, PayloadField::MaxPercent)?,
                discount_amount: amount(fields, PayloadField::DiscountAmount)?,
            },
            DiscountRule::Price => {
                let count_per_price = amount(fields, PayloadField::CountPerPrice)?;
                if count_per_price <= 0.0 {
                    return Err(invalid(PayloadField::CountPerPrice, "must be greater than zero"));
                }
                DiscountTerms::Price {
                    count_per_price,
                    discount_amount: amount(fields, PayloadField::DiscountAmount)?,
                }
            }
            DiscountRule::Category => DiscountTerms::Category {
                category: category(fields)?,
                discount_percent: amount(fields, PayloadField::DiscountPercent)?,
            },
        };
        Ok(terms)
    }

    /// The payload as loose fields, the inverse of [`DiscountTerms::from_fields`].
    pub fn to_fields(&self) -> BTreeMap<PayloadField, FieldValue> {
        let pairs: Vec<(PayloadField, FieldValue)> = match self {
            DiscountTerms::FixedAmount { discount_amount } => {
                vec![(PayloadField::DiscountAmount, FieldValue::Number(*discount_amount))]
            }
            DiscountTerms::PercentageAmount { discount_percent } => {
                vec![(PayloadField::DiscountPercent, FieldValue::Number(*discount_percent))]
            }
            DiscountTerms::Points {
                max_percent,
                discount_amount,
            } => vec![
                (PayloadField::MaxPercent, FieldValue::Number(*max_percent)),
                (PayloadField::DiscountAmount, FieldValue::Number(*discount_amount)),
            ],
            DiscountTerms::Price {
                count_per_price,
                discount_amount,
            } => vec![
                (PayloadField::CountPerPrice, FieldValue::Number(*count_per_price)),
                (PayloadField::DiscountAmount, FieldValue::Number(*discount_amount)),
            ],
            DiscountTerms::Category {
                category,
                discount_percent,
            } => vec![
                (PayloadField::Category, FieldValue::Text(category.as_str().to_string())),
                (PayloadField::DiscountPercent, FieldValue::Number(*discount_percent)),
            ],
        };
        pairs.into_iter().collect()
    }
}

fn invalid(field: PayloadField, reason: &str) -> ValidationError {
    ValidationError::InvalidField {
        field: field.as_str().to_string(),
        reason: reason.to_string(),
    }
}

fn amount(
    fields: &BTreeMap<PayloadField, FieldValue>,
    field: PayloadField,
) -> Result<f64, ValidationError> {
    match fields.get(&field) {
        Some(FieldValue::Number(n)) if n.is_finite() && *n >= 0.0 => Ok(*n),
        Some(FieldValue::Number(_)) => Err(invalid(field, "must be a non-negative number")),
        Some(FieldValue::Text(_)) | None => Err(invalid(field, "must be a number")),
    }
}

fn category(fields: &BTreeMap<PayloadField, FieldValue>) -> Result<Category, ValidationError> {
    match fields.get(&PayloadField::Category) {
        Some(FieldValue::Text(name)) => name
            .parse()
            .map_err(|e: String| invalid(PayloadField::Category, &e)),
        _ => Err(invalid(PayloadField::Category, "must be a category name")),
    }
}

/// A discount from the catalog.
///
/// On the wire this is `{_id, discountCode, type, rule, discountPayload}`;
/// decoding rejects records whose rule does not belong to their type or whose
/// payload is incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DiscountRecord", into = "DiscountRecord")]
pub struct Discount {
    /// Identifier assigned by the API. `None` until the discount is created.
    pub id: Option<DiscountId>,
    /// Code the shopper enters. Case-sensitive.
    pub code: String,
    pub discount_type: DiscountType,
    pub terms: DiscountTerms,
}

impl Discount {
    /// Create a discount, checking that the rule is allowed for the type.
    pub fn new(
        code: impl Into<String>,
        discount_type: DiscountType,
        terms: DiscountTerms,
    ) -> Result<Self, CommerceError> {
        let code = code.into();
        if !discount_type.allows(terms.rule()) {
            return Err(CommerceError::InvalidDiscount {
                reason: format!(
                    "rule {} is not allowed for type {}",
                    terms.rule(),
                    discount_type
                ),
                code,
            });
        }
        Ok(Self {
            id: None,
            code,
            discount_type,
            terms,
        })
    }

    pub fn rule(&self) -> DiscountRule {
        self.terms.rule()
    }

    /// One-line description for discount listings.
    pub fn describe(&self) -> String {
        let symbol = crate::money::CURRENCY_SYMBOL;
        match &self.terms {
            DiscountTerms::FixedAmount { discount_amount } => {
                format!("Fixed discount amount: {}{}", symbol, discount_amount)
            }
            DiscountTerms::PercentageAmount { discount_percent } => {
                format!("{}% off your order", discount_percent)
            }
            DiscountTerms::Points {
                max_percent,
                discount_amount,
            } => format!(
                "Points discount: {}{} per point, up to {}% of the order",
                symbol, discount_amount, max_percent
            ),
            DiscountTerms::Price {
                count_per_price,
                discount_amount,
            } => format!(
                "Get {}{} off for every {}{} spent",
                symbol, discount_amount, symbol, count_per_price
            ),
            DiscountTerms::Category {
                category,
                discount_percent,
            } => format!(
                "Applicable on category: {} with {}% off",
                category, discount_percent
            ),
        }
    }
}

/// Wire representation of a discount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DiscountId>,
    pub discount_code: String,
    #[serde(rename = "type")]
    pub discount_type: String,
    pub rule: String,
    #[serde(default)]
    pub discount_payload: serde_json::Value,
}

impl TryFrom<DiscountRecord> for Discount {
    type Error = CommerceError;

    fn try_from(record: DiscountRecord) -> Result<Self, Self::Error> {
        let reject = |reason: String| CommerceError::InvalidDiscount {
            code: record.discount_code.clone(),
            reason,
        };

        let discount_type: DiscountType = record.discount_type.parse().map_err(reject)?;
        let rule: DiscountRule = record.rule.parse().map_err(reject)?;
        if !discount_type.allows(rule) {
            return Err(reject(format!(
                "rule {} is not allowed for type {}",
                rule, discount_type
            )));
        }

        let fields = FieldValue::fields_from_json(&record.discount_payload);
        let terms = DiscountTerms::from_fields(rule, &fields).map_err(|e| reject(e.to_string()))?;

        Ok(Discount {
            id: record.id,
            code: record.discount_code,
            discount_type,
            terms,
        })
    }
}

impl From<Discount> for DiscountRecord {
    fn from(discount: Discount) -> Self {
        let payload: serde_json::Map<String, serde_json::Value> = discount
            .terms
            .to_fields()
            .into_iter()
            .map(|(field, value)| (field.as_str().to_string(), value.to_json()))
            .collect();
        DiscountRecord {
            id: discount.id,
            discount_code: discount.code,
            discount_type: discount.discount_type.as_str().to_string(),
            rule: discount.terms.rule().as_str().to_string(),
            discount_payload: serde_json::Value::Object(payload),
        }
    }
}

/// Find the catalog discount for `code`. Codes match exactly.
pub fn find_by_code<'a>(catalog: &'a [Discount], code: &str) -> Option<&'a Discount> {
    catalog.iter().find(|d| d.code == code)
}

/// Decide whether `code` may join the applied set.
///
/// Checks run in a fixed order and the first failure wins: the code must exist
/// in the catalog, must not already be applied, and must not share its type
/// with a discount already applied. Applied codes that no longer resolve in
/// the catalog are ignored by the type check.
///
/// On acceptance returns the applied set with `code` appended; `applied`
/// itself is never modified.
pub fn try_apply(
    code: &str,
    catalog: &[Discount],
    applied: &[String],
) -> Result<Vec<String>, Rejection> {
    let discount =
        find_by_code(catalog, code).ok_or_else(|| Rejection::UnknownCode(code.to_string()))?;

    if applied.iter().any(|c| c == code) {
        return Err(Rejection::AlreadyUsed(code.to_string()));
    }

    let conflicting = applied.iter().find(|c| {
        find_by_code(catalog, c).map(|d| d.discount_type) == Some(discount.discount_type)
    });
    if let Some(conflicting_code) = conflicting {
        return Err(Rejection::TypeConflict {
            code: code.to_string(),
            discount_type: discount.discount_type,
            conflicting_code: conflicting_code.clone(),
        });
    }

    let mut next = Vec::with_capacity(applied.len() + 1);
    next.extend_from_slice(applied);
    next.push(code.to_string());
    Ok(next)
}
