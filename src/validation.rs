//! Request body validation.
//!
//! Each create/patch DTO implements [`Validate`]; handlers evaluate the
//! declared field rules before touching the database and short-circuit with a
//! structured 400 listing `{property, constraint, message}` entries.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::json;

use crate::error::{ApiError, validation_error};

/// A single failed field rule.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Name of the offending property as it appears in the JSON body
    pub property: String,
    /// Identifier of the violated constraint (e.g. `isNotEmpty`, `isEmail`)
    pub constraint: String,
    /// Human-readable explanation
    pub message: String,
}

impl FieldError {
    pub fn new(property: &str, constraint: &str, message: impl Into<String>) -> Self {
        Self {
            property: property.to_string(),
            constraint: constraint.to_string(),
            message: message.into(),
        }
    }
}

/// Declarative per-field validation evaluated before a handler persists
/// anything.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;

    /// Run validation and map failures to the structured 400 response.
    fn check(&self) -> Result<(), ApiError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(validation_error("Validation failed", json!(errors)))
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is well-formed")
    })
}

/// `isNotEmpty`: the string must contain at least one non-whitespace character.
pub fn require_non_empty(errors: &mut Vec<FieldError>, property: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(
            property,
            "isNotEmpty",
            format!("{} should not be empty", property),
        ));
    }
}

/// `maxLength`: the string must not exceed `max` characters.
pub fn require_max_len(errors: &mut Vec<FieldError>, property: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            property,
            "maxLength",
            format!("{} must be shorter than or equal to {} characters", property, max),
        ));
    }
}

/// `isEmail`: the string must look like an email address.
pub fn require_email(errors: &mut Vec<FieldError>, property: &str, value: &str) {
    if !email_regex().is_match(value) {
        errors.push(FieldError::new(
            property,
            "isEmail",
            format!("{} must be an email", property),
        ));
    }
}

/// `isIn`: the string must be one of the allowed enumeration values.
pub fn require_one_of(
    errors: &mut Vec<FieldError>,
    property: &str,
    value: &str,
    allowed: &[&str],
) {
    if !allowed.contains(&value) {
        errors.push(FieldError::new(
            property,
            "isIn",
            format!("{} must be one of the following values: {}", property, allowed.join(", ")),
        ));
    }
}

/// `min`: the number must be non-negative.
pub fn require_non_negative(errors: &mut Vec<FieldError>, property: &str, value: f64) {
    if value < 0.0 {
        errors.push(FieldError::new(
            property,
            "min",
            format!("{} must not be less than 0", property),
        ));
    }
}

/// `isTime`: the string must be an HH:MM clock time.
pub fn require_clock_time(errors: &mut Vec<FieldError>, property: &str, value: &str) {
    let valid = matches!(value.split(':').collect::<Vec<_>>().as_slice(), [h, m]
        if h.len() == 2 && m.len() == 2
        && h.parse::<u8>().is_ok_and(|h| h < 24)
        && m.parse::<u8>().is_ok_and(|m| m < 60));
    if !valid {
        errors.push(FieldError::new(
            property,
            "isMilitaryTime",
            format!("{} must be a valid HH:MM time", property),
        ));
    }
}

/// `dateRange`: the end date must not precede the start date.
pub fn require_date_range(
    errors: &mut Vec<FieldError>,
    property: &str,
    start: NaiveDate,
    end: NaiveDate,
) {
    if end < start {
        errors.push(FieldError::new(
            property,
            "dateRange",
            format!("{} must not be before the start date", property),
        ));
    }
}
