//! Form field values and the per-form value map.

use crate::text::{char_len, is_blank};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single form field value as entered by a user or loaded from storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Whether the value counts as supplied.
    ///
    /// Only `Null`, whitespace-only text, and lists without a non-blank item
    /// are absent. `false` and `0` are present.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(_) | Self::Number(_) => true,
            Self::Text(text) => !is_blank(text),
            Self::List(items) => items.iter().any(|item| !is_blank(item)),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Textual items checked by shape rules (email, pattern, allowed options).
    ///
    /// Lists contribute one item per entry; scalars contribute their display
    /// form; `Null` contributes nothing.
    pub fn text_items(&self) -> Vec<Cow<'_, str>> {
        match self {
            Self::Null => Vec::new(),
            Self::Bool(value) => vec![Cow::Owned(value.to_string())],
            Self::Number(value) => vec![Cow::Owned(value.to_string())],
            Self::Text(text) => vec![Cow::Borrowed(text.as_str())],
            Self::List(items) => items
                .iter()
                .map(|item| Cow::Borrowed(item.as_str()))
                .collect(),
        }
    }

    /// Length measured by min/max rules: chars for scalars, entries for lists.
    pub fn measure(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Text(text) => char_len(text),
            Self::List(items) => items.len(),
            Self::Bool(_) | Self::Number(_) => self
                .text_items()
                .first()
                .map(|item| char_len(item))
                .unwrap_or(0),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Field name to value map for one form instance, in declaration order.
pub type ValueMap = IndexMap<String, FieldValue>;

/// Look up `field`, treating a missing key as `Null`.
pub fn value_of<'a>(values: &'a ValueMap, field: &str) -> &'a FieldValue {
    static NULL: FieldValue = FieldValue::Null;
    values.get(field).unwrap_or(&NULL)
}
