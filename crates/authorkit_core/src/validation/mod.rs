//! Fluent validation engine.
//!
//! Rules are registered in order against named fields and every rule is
//! evaluated, so one pass reports all problems. A failing rule produces a
//! [`ValidationError`] entry; it never aborts the pass.
//!
//! Two front ends share the same rule set:
//! - [`RuleSet`] is a value-free rule list evaluated against a
//!   [`ValueMap`](crate::value::ValueMap) by the stateless [`evaluate`].
//! - [`FormValidator`] binds each rule to a value at registration time and
//!   drains its pending rules on [`FormValidator::validate`]. One pass per
//!   instance at a time; interleaving two passes on one instance mixes their
//!   errors.

mod builder;
mod rules;

pub use builder::{evaluate, FormValidator, RuleSet};
pub use rules::{Predicate, Rule, RuleKind};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One failed rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of a validation pass. Errors are in rule registration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::from_errors(Vec::new())
    }
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn has_error(&self, field: &str) -> bool {
        has_error(&self.errors, field)
    }

    pub fn error_message(&self, field: &str) -> Option<&str> {
        error_message(&self.errors, field)
    }

    /// The first error overall, if any.
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

/// Return `true` when any error targets `field`.
pub fn has_error(errors: &[ValidationError], field: &str) -> bool {
    errors.iter().any(|error| error.field == field)
}

/// Message of the first error targeting `field`.
pub fn error_message<'a>(errors: &'a [ValidationError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|error| error.field == field)
        .map(|error| error.message.as_str())
}
