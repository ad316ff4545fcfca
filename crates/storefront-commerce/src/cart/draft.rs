//! Discount drafts: the staging area behind the "create discount" form.
//!
//! A draft holds raw selections the way an operator enters them. Changing the
//! type drops the rule and payload, changing the rule drops the payload, so a
//! field typed for one rule never leaks into a submission for another.
//! [`DiscountDraft::build`] turns a complete draft into a typed [`Discount`].

use crate::cart::discount::{Discount, DiscountRule, DiscountTerms, DiscountType};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A named field of a discount payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadField {
    DiscountAmount,
    DiscountPercent,
    MaxPercent,
    CountPerPrice,
    Category,
}

impl PayloadField {
    pub const ALL: [PayloadField; 5] = [
        PayloadField::DiscountAmount,
        PayloadField::DiscountPercent,
        PayloadField::MaxPercent,
        PayloadField::CountPerPrice,
        PayloadField::Category,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadField::DiscountAmount => "discountAmount",
            PayloadField::DiscountPercent => "discountPercent",
            PayloadField::MaxPercent => "maxPercent",
            PayloadField::CountPerPrice => "countPerPrice",
            PayloadField::Category => "category",
        }
    }

    /// Whether the field holds a number (everything except `category`).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, PayloadField::Category)
    }
}

impl fmt::Display for PayloadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayloadField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown payload field: {}", s))
    }
}

/// A payload field value as entered.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Parse operator input for `field`: numeric fields must parse as numbers.
    pub fn parse_for(field: PayloadField, input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if field.is_numeric() {
            input
                .parse::<f64>()
                .map(FieldValue::Number)
                .map_err(|_| ValidationError::InvalidField {
                    field: field.as_str().to_string(),
                    reason: format!("'{}' is not a number", input),
                })
        } else {
            Ok(FieldValue::Text(input.to_string()))
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Collect the recognised fields of a JSON payload object.
    ///
    /// `null` counts as absent. Unknown keys are dropped. Anything other than
    /// an object yields no fields.
    pub fn fields_from_json(payload: &serde_json::Value) -> BTreeMap<PayloadField, FieldValue> {
        let Some(object) = payload.as_object() else {
            return BTreeMap::new();
        };
        object
            .iter()
            .filter_map(|(key, value)| {
                let field = key.parse::<PayloadField>().ok()?;
                let value = match value {
                    serde_json::Value::Null => return None,
                    serde_json::Value::Number(n) => FieldValue::Number(n.as_f64()?),
                    serde_json::Value::String(s) => FieldValue::Text(s.clone()),
                    other => FieldValue::Text(other.to_string()),
                };
                Some((field, value))
            })
            .collect()
    }
}

/// Raw discount-creation input.
///
/// Type and rule are kept as entered so that an unrecognised selection can be
/// reported instead of being unrepresentable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountDraft {
    code: String,
    discount_type: String,
    rule: String,
    payload: BTreeMap<PayloadField, FieldValue>,
}

impl DiscountDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn discount_type(&self) -> &str {
        &self.discount_type
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn payload(&self) -> &BTreeMap<PayloadField, FieldValue> {
        &self.payload
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Select a type. Clears the rule and payload.
    pub fn set_type(&mut self, discount_type: impl Into<String>) {
        self.discount_type = discount_type.into();
        self.rule.clear();
        self.payload.clear();
    }

    /// Select a rule. Clears the payload.
    pub fn set_rule(&mut self, rule: impl Into<String>) {
        self.rule = rule.into();
        self.payload.clear();
    }

    pub fn set_field(&mut self, field: PayloadField, value: FieldValue) {
        self.payload.insert(field, value);
    }

    /// Rules selectable for the current type; empty when no valid type is set.
    pub fn rule_options(&self) -> &'static [DiscountRule] {
        self.discount_type
            .parse::<DiscountType>()
            .map(|t| t.allowed_rules())
            .unwrap_or(&[])
    }

    /// Check that the draft is complete enough to submit.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.build().map(|_| ())
    }

    /// Validate and produce the discount to submit.
    ///
    /// Checks, in order: code present, type recognised, rule recognised and
    /// allowed for the type, payload complete for the rule.
    pub fn build(&self) -> Result<Discount, ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::MissingCode);
        }

        let discount_type: DiscountType = self
            .discount_type
            .parse()
            .map_err(|_| ValidationError::MissingType)?;

        let rule: DiscountRule = self
            .rule
            .parse()
            .map_err(|_| ValidationError::MissingRule)?;
        if !discount_type.allows(rule) {
            return Err(ValidationError::MissingRule);
        }

        let terms = DiscountTerms::from_fields(rule, &self.payload)?;

        Ok(Discount {
            id: None,
            code: self.code.clone(),
            discount_type,
            terms,
        })
    }
}
