use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::parse_leading_number;

/// Raw value of one form field as the form layer hands it over.
///
/// Deserializes untagged, so JSON strings, numbers and `null` map directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl FieldValue {
    /// `Empty`, or text that is blank once trimmed.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Coerces the value to a float the way a lenient float parser does:
    /// numbers pass through, text yields its leading numeric prefix.
    /// Returns `None` for empty values, NaN and text without a numeric prefix.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_nan() => None,
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => parse_leading_number(s),
            FieldValue::Empty => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}

/// Field name to raw value, as submitted by one form.
pub type FormFields = BTreeMap<String, FieldValue>;

/// Errors produced by dependency rules spanning two fields, keyed by the field
/// that is missing.
pub type CrossFieldErrors = BTreeMap<String, String>;

/// Numeric constraint attached to one field name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl ValidationRule {
    pub fn required() -> Self {
        Self { required: true, ..Self::default() }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// `min <= max` whenever both bounds are set.
    pub fn is_consistent(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// Outcome of validating a single field. `error_message` is present iff the
/// field is invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { valid: true, error_message: None }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self { valid: false, error_message: Some(message.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl FormValidationResult {
    /// Folds cross-field errors into this result. A field that already carries
    /// its own rule error keeps that message.
    pub fn merge_cross_field(&mut self, cross: CrossFieldErrors) {
        for (field, message) in cross {
            self.errors.entry(field).or_insert(message);
        }
        self.is_valid = self.errors.is_empty();
    }
}
