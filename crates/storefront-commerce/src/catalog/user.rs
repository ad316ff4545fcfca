//! Customer accounts.

use crate::error::ValidationError;
use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// A user as served by `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Loyalty points balance, when the API reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
}

impl User {
    /// "First Last", as shown on the user picker.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub points: f64,
}

impl NewUser {
    /// Check required fields before the user is submitted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: field.to_string(),
                    reason: "is required".to_string(),
                });
            }
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidField {
                field: "email".to_string(),
                reason: "is not an email address".to_string(),
            });
        }
        if self.points < 0.0 || !self.points.is_finite() {
            return Err(ValidationError::InvalidField {
                field: "points".to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }
}
