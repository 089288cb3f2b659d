//! Individual rule definitions and their evaluation.

use super::ValidationError;
use crate::constants::DEFAULT_EMAIL_MESSAGE;
use crate::value::FieldValue;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Caller-supplied check for [`RuleKind::Custom`].
pub type Predicate = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

fn email_shape() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // Literal pattern; compilation cannot fail.
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

/// What a rule checks.
#[derive(Clone)]
pub enum RuleKind {
    /// Fails when the value is absent.
    Required,
    /// Fails unless every text item has a `local@domain.tld` shape.
    ///
    /// With `allow_absent` the rule is skipped for absent values; otherwise
    /// an absent value fails too.
    Email { allow_absent: bool },
    /// Fails when a present value is shorter than the bound.
    MinLength(usize),
    /// Fails when a present value is longer than the bound.
    MaxLength(usize),
    /// Fails when a present value has a text item the regex does not match.
    Pattern(Regex),
    /// Fails when a present value has a text item outside the options.
    OneOf(Vec<String>),
    /// Fails when a present value is rejected by the predicate.
    Custom(Predicate),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::Email { allow_absent } => f
                .debug_struct("Email")
                .field("allow_absent", allow_absent)
                .finish(),
            Self::MinLength(min) => f.debug_tuple("MinLength").field(min).finish(),
            Self::MaxLength(max) => f.debug_tuple("MaxLength").field(max).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::OneOf(options) => f.debug_tuple("OneOf").field(options).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A check bound to a field, with an optional message override.
#[derive(Clone, Debug)]
pub struct Rule {
    pub field: String,
    pub kind: RuleKind,
    pub message: Option<String>,
}

impl Rule {
    pub fn new(field: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            field: field.into(),
            kind,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message reported when this rule fails.
    pub fn message(&self) -> String {
        if let Some(message) = self.message.as_ref() {
            return message.clone();
        }
        match &self.kind {
            RuleKind::Required => format!("{} is required", self.field),
            RuleKind::Email { .. } => DEFAULT_EMAIL_MESSAGE.to_string(),
            RuleKind::MinLength(min) => {
                format!("{} must be at least {} characters", self.field, min)
            }
            RuleKind::MaxLength(max) => {
                format!("{} must be at most {} characters", self.field, max)
            }
            RuleKind::Pattern(_) | RuleKind::Custom(_) => format!("{} is invalid", self.field),
            RuleKind::OneOf(options) => {
                format!("{} must be one of: {}", self.field, options.join(", "))
            }
        }
    }

    /// Whether `value` passes this rule.
    pub fn passes(&self, value: &FieldValue) -> bool {
        let present = value.is_present();
        match &self.kind {
            RuleKind::Required => present,
            RuleKind::Email { allow_absent } => {
                if !present {
                    return *allow_absent;
                }
                value
                    .text_items()
                    .iter()
                    .filter(|item| !item.trim().is_empty())
                    .all(|item| email_shape().is_match(item.trim()))
            }
            _ if !present => true,
            RuleKind::MinLength(min) => value.measure() >= *min,
            RuleKind::MaxLength(max) => value.measure() <= *max,
            RuleKind::Pattern(regex) => value.text_items().iter().all(|item| regex.is_match(item)),
            RuleKind::OneOf(options) => value
                .text_items()
                .iter()
                .all(|item| options.iter().any(|option| option == item)),
            RuleKind::Custom(predicate) => predicate(value),
        }
    }

    /// Evaluate against `value`, producing an error entry on failure.
    pub fn check(&self, value: &FieldValue) -> Option<ValidationError> {
        if self.passes(value) {
            None
        } else {
            Some(ValidationError::new(self.field.clone(), self.message()))
        }
    }
}
