//! Declarative form fields and the value map built from them.
//!
//! Descriptors are declared once per form. A value map is seeded per form
//! instance, edited one field at a time, then normalized for submission.

use crate::error::CoreError;
use crate::text::{non_empty_lines, normalize_optional_nonempty, parse_flag};
use crate::validation::{RuleSet, ValidationResult};
use crate::value::{value_of, FieldValue, ValueMap};
use serde::{Deserialize, Serialize};

/// Input widget family of a field; drives defaults and normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// One item per line; submitted as a list.
    Multiline,
    /// One of a fixed set of options.
    Enum,
    /// Checkbox or switch.
    Boolean,
    /// Long-form markdown body, submitted verbatim.
    #[serde(alias = "richText")]
    Richtext,
    /// Reference to an uploaded asset (image URL, file key).
    #[serde(alias = "assetRef")]
    AssetRef,
}

impl FieldKind {
    /// Value used when neither the form nor the descriptor supplies one.
    pub fn empty_value(self) -> FieldValue {
        match self {
            Self::Boolean => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// One form field's schema entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, alias = "defaultValue")]
    pub default_value: FieldValue,
    #[serde(default)]
    pub email: bool,
    #[serde(default, alias = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, alias = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(
        default,
        alias = "patternMessage",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern_message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldDescriptor {
    /// Optional, unconstrained field of `kind`.
    ///
    /// # Arguments
    /// - `name`: Key of the field in value maps and submissions.
    /// - `kind`: Widget family; picks the empty value and normalization.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            required: false,
            default_value: FieldValue::Null,
            email: false,
            min_length: None,
            max_length: None,
            pattern: None,
            pattern_message: None,
            options: Vec::new(),
        }
    }

    /// Mark the field as required; its message uses the display label.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Value seeded when the form instance supplies none.
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Require an email shape. Optional fields only check present values.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Constrain present values to a regex.
    ///
    /// The pattern is compiled by [`FieldDescriptor::rules`], which reports
    /// [`CoreError::InvalidPattern`] for bad syntax.
    ///
    /// # Arguments
    /// - `pattern`: Regex source in `regex` crate syntax.
    /// - `message`: Error message reported on mismatch.
    pub fn pattern(mut self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.pattern_message = Some(message.into());
        self
    }

    /// Allowed values of a [`FieldKind::Enum`] field.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Human-facing name used in messages; falls back to `name`.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Starting value when the form instance supplies none.
    pub fn initial_value(&self) -> FieldValue {
        match self.default_value {
            FieldValue::Null => self.kind.empty_value(),
            ref value => value.clone(),
        }
    }

    /// Rules implied by this descriptor's constraints.
    ///
    /// Order: required, email, min length, max length, pattern, options.
    ///
    /// # Errors
    /// [`CoreError::InvalidPattern`] when `pattern` does not compile.
    pub fn rules(&self) -> Result<RuleSet, CoreError> {
        let name = self.name.as_str();
        let label = self.display_label();
        let mut rules = RuleSet::new();
        if self.required {
            rules = rules
                .required(name)
                .message(format!("{} is required", label));
        }
        if self.email {
            rules = if self.required {
                rules.email(name)
            } else {
                rules.email_if_present(name)
            };
        }
        if let Some(min) = self.min_length {
            rules = rules
                .min_length(name, min)
                .message(format!("{} must be at least {} characters", label, min));
        }
        if let Some(max) = self.max_length {
            rules = rules
                .max_length(name, max)
                .message(format!("{} must be at most {} characters", label, max));
        }
        if let Some(pattern) = self.pattern.as_deref() {
            let message = self
                .pattern_message
                .clone()
                .unwrap_or_else(|| format!("{} is invalid", label));
            rules = rules.pattern_str(name, pattern, message)?;
        }
        if self.kind == FieldKind::Enum && !self.options.is_empty() {
            let message = format!("{} must be one of: {}", label, self.options.join(", "));
            rules = rules.one_of(name, self.options.clone()).message(message);
        }
        Ok(rules)
    }

    /// Normalize this field's value for submission.
    ///
    /// # Returns
    /// Trimmed text for text and enum fields, a `Bool` for boolean fields, a
    /// list of non-blank lines for multiline fields, `Null` for a blank asset
    /// reference, and rich text unchanged.
    pub fn normalize(&self, value: &FieldValue) -> FieldValue {
        match (self.kind, value) {
            (FieldKind::Boolean, FieldValue::Null) => FieldValue::Bool(false),
            (FieldKind::Boolean, FieldValue::Bool(flag)) => FieldValue::Bool(*flag),
            (FieldKind::Boolean, FieldValue::Number(number)) => FieldValue::Bool(*number != 0.0),
            (FieldKind::Boolean, FieldValue::Text(text)) => {
                FieldValue::Bool(parse_flag(text).unwrap_or(false))
            }
            (FieldKind::Boolean, FieldValue::List(_)) => FieldValue::Bool(value.is_present()),
            (FieldKind::Multiline, FieldValue::Null) => FieldValue::List(Vec::new()),
            (FieldKind::Multiline, FieldValue::Text(text)) => {
                FieldValue::List(non_empty_lines(text))
            }
            (FieldKind::Multiline, FieldValue::List(items)) => FieldValue::List(
                items
                    .iter()
                    .filter_map(|item| normalize_optional_nonempty(Some(item.as_str())))
                    .collect(),
            ),
            (FieldKind::Multiline, scalar) => FieldValue::List(
                scalar
                    .text_items()
                    .into_iter()
                    .map(|item| item.into_owned())
                    .collect(),
            ),
            (FieldKind::AssetRef, FieldValue::Text(text)) => {
                normalize_optional_nonempty(Some(text.as_str())).into()
            }
            (FieldKind::Text | FieldKind::Enum, FieldValue::Text(text)) => {
                FieldValue::Text(text.trim().to_string())
            }
            (FieldKind::Text | FieldKind::Enum | FieldKind::Richtext, FieldValue::Null) => {
                FieldValue::Text(String::new())
            }
            (_, other) => other.clone(),
        }
    }
}

/// Build the starting value map for one form instance.
///
/// Each declared field takes its entry from `initial` when that entry is
/// non-null, otherwise the descriptor's default. Undeclared entries in
/// `initial` are dropped.
pub fn seed(descriptors: &[FieldDescriptor], initial: &ValueMap) -> ValueMap {
    descriptors
        .iter()
        .map(|descriptor| {
            let value = match initial.get(&descriptor.name) {
                Some(value) if *value != FieldValue::Null => value.clone(),
                _ => descriptor.initial_value(),
            };
            (descriptor.name.clone(), value)
        })
        .collect()
}

/// Return a copy of `values` with `name` set to `value`.
///
/// `values` is left untouched; an existing entry keeps its position.
pub fn apply_edit(values: &ValueMap, name: &str, value: impl Into<FieldValue>) -> ValueMap {
    let mut next = values.clone();
    next.insert(name.to_string(), value.into());
    next
}

/// Normalize `values` field by field, in descriptor order.
pub fn to_submission(values: &ValueMap, descriptors: &[FieldDescriptor]) -> ValueMap {
    descriptors
        .iter()
        .map(|descriptor| {
            let value = descriptor.normalize(value_of(values, &descriptor.name));
            (descriptor.name.clone(), value)
        })
        .collect()
}

/// Rules for every descriptor, in declaration order.
///
/// # Errors
/// [`CoreError::InvalidPattern`] for the first descriptor whose pattern does
/// not compile.
pub fn rules_for(descriptors: &[FieldDescriptor]) -> Result<RuleSet, CoreError> {
    descriptors
        .iter()
        .try_fold(RuleSet::new(), |rules, descriptor| {
            Ok(rules.extend(descriptor.rules()?))
        })
}

/// Validate `values` against the constraints declared by `descriptors`.
pub fn validate_values(
    descriptors: &[FieldDescriptor],
    values: &ValueMap,
) -> Result<ValidationResult, CoreError> {
    Ok(rules_for(descriptors)?.evaluate(values))
}
