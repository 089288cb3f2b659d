//! Fluent front ends over [`Rule`].

use super::rules::{Predicate, Rule, RuleKind};
use super::{ValidationError, ValidationResult};
use crate::error::CoreError;
use crate::value::{value_of, FieldValue, ValueMap};
use regex::Regex;
use std::sync::Arc;

/// Ordered, value-free list of rules.
///
/// Each method consumes the set and returns it with one more rule, so a set
/// can be built once and evaluated against many value maps.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Empty set; evaluates every value map as valid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-built rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Fail when `field` is absent: missing, `Null`, blank text, or a list
    /// with no non-blank item. `false` and `0` count as present.
    pub fn required(self, field: impl Into<String>) -> Self {
        self.rule(Rule::new(field, RuleKind::Required))
    }

    /// Email shape check that also fails on absent values.
    pub fn email(self, field: impl Into<String>) -> Self {
        self.rule(Rule::new(field, RuleKind::Email { allow_absent: false }))
    }

    /// Email shape check skipped when the value is absent.
    pub fn email_if_present(self, field: impl Into<String>) -> Self {
        self.rule(Rule::new(field, RuleKind::Email { allow_absent: true }))
    }

    /// Require at least `min` chars (or list entries) when `field` is present.
    ///
    /// # Arguments
    /// - `field`: Field name looked up at evaluation time.
    /// - `min`: Inclusive lower bound, in chars for text and entries for lists.
    ///
    /// # Returns
    /// The set with the rule appended; chain `.message(..)` to reword it.
    pub fn min_length(self, field: impl Into<String>, min: usize) -> Self {
        self.rule(Rule::new(field, RuleKind::MinLength(min)))
    }

    /// Allow at most `max` chars (or list entries); see [`RuleSet::min_length`].
    pub fn max_length(self, field: impl Into<String>, max: usize) -> Self {
        self.rule(Rule::new(field, RuleKind::MaxLength(max)))
    }

    /// Fail when a present value of `field` does not match `regex`.
    ///
    /// # Arguments
    /// - `field`: Field name looked up at evaluation time.
    /// - `regex`: Compiled pattern; every text item of a list must match.
    /// - `message`: Error message reported on mismatch.
    pub fn pattern(
        self,
        field: impl Into<String>,
        regex: &Regex,
        message: impl Into<String>,
    ) -> Self {
        self.rule(Rule::new(field, RuleKind::Pattern(regex.clone())).with_message(message))
    }

    /// Like [`RuleSet::pattern`], compiling `pattern` first.
    ///
    /// # Errors
    /// [`CoreError::InvalidPattern`] when `pattern` is not a valid regex.
    pub fn pattern_str(
        self,
        field: impl Into<String>,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let field = field.into();
        let regex = compile_pattern(&field, pattern)?;
        Ok(self.pattern(field, &regex, message))
    }

    /// Fail when a present value of `field` is not one of `options`.
    pub fn one_of<I, S>(self, field: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        self.rule(Rule::new(field, RuleKind::OneOf(options)))
    }

    /// Fail when `predicate` returns `false` for a present value of `field`.
    ///
    /// # Arguments
    /// - `field`: Field name looked up at evaluation time.
    /// - `predicate`: Check run on the value; absent values skip it.
    /// - `message`: Error message reported when the check fails.
    ///
    /// # Returns
    /// The set with the rule appended.
    pub fn custom<F>(
        self,
        field: impl Into<String>,
        predicate: F,
        message: impl Into<String>,
    ) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        let predicate: Predicate = Arc::new(predicate);
        self.rule(Rule::new(field, RuleKind::Custom(predicate)).with_message(message))
    }

    /// Override the message of the most recently added rule.
    ///
    /// No-op on an empty set.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.rules.pop() {
            self.rules.push(last.with_message(message));
        }
        self
    }

    /// Append every rule of `other` after this set's rules.
    pub fn extend(mut self, other: RuleSet) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against `values`.
    ///
    /// # Returns
    /// A [`ValidationResult`] listing every failure in rule order; the set
    /// itself is unchanged and can be evaluated again.
    pub fn evaluate(&self, values: &ValueMap) -> ValidationResult {
        evaluate(self, values)
    }
}

/// Evaluate `rules` in order against `values`; missing fields read as `Null`.
pub fn evaluate(rules: &RuleSet, values: &ValueMap) -> ValidationResult {
    let errors = rules
        .rules
        .iter()
        .filter_map(|rule| rule.check(value_of(values, &rule.field)))
        .collect();
    ValidationResult::from_errors(errors)
}

pub(crate) fn compile_pattern(field: &str, pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
        field: field.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Chain of rules each bound to the value it checks.
///
/// ```
/// use authorkit_core::validation::FormValidator;
///
/// let result = FormValidator::new()
///     .required("", "name")
///     .email("ada@example.com", "email")
///     .validate();
/// assert!(!result.is_valid);
/// assert_eq!(result.error_message("name"), Some("name is required"));
/// ```
#[derive(Debug, Default)]
pub struct FormValidator {
    pending: Vec<(FieldValue, Rule)>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: FieldValue, rule: Rule) -> &mut Self {
        self.pending.push((value, rule));
        self
    }

    /// Register a presence check of `value` under `field`.
    ///
    /// # Arguments
    /// - `value`: Value to check, captured now.
    /// - `field`: Name reported in the error.
    ///
    /// # Returns
    /// `self`, for chaining further rules before [`FormValidator::validate`].
    pub fn required(&mut self, value: impl Into<FieldValue>, field: &str) -> &mut Self {
        self.push(value.into(), Rule::new(field, RuleKind::Required))
    }

    /// Email shape check that also fails on absent values.
    pub fn email(&mut self, value: impl Into<FieldValue>, field: &str) -> &mut Self {
        self.push(
            value.into(),
            Rule::new(field, RuleKind::Email { allow_absent: false }),
        )
    }

    /// Email shape check skipped when the value is absent.
    pub fn email_if_present(&mut self, value: impl Into<FieldValue>, field: &str) -> &mut Self {
        self.push(
            value.into(),
            Rule::new(field, RuleKind::Email { allow_absent: true }),
        )
    }

    pub fn min_length(
        &mut self,
        value: impl Into<FieldValue>,
        field: &str,
        min: usize,
    ) -> &mut Self {
        self.push(value.into(), Rule::new(field, RuleKind::MinLength(min)))
    }

    pub fn max_length(
        &mut self,
        value: impl Into<FieldValue>,
        field: &str,
        max: usize,
    ) -> &mut Self {
        self.push(value.into(), Rule::new(field, RuleKind::MaxLength(max)))
    }

    pub fn pattern(
        &mut self,
        value: impl Into<FieldValue>,
        field: &str,
        regex: &Regex,
        message: impl Into<String>,
    ) -> &mut Self {
        let rule = Rule::new(field, RuleKind::Pattern(regex.clone())).with_message(message);
        self.push(value.into(), rule)
    }

    pub fn custom<F>(
        &mut self,
        value: impl Into<FieldValue>,
        field: &str,
        predicate: F,
        message: impl Into<String>,
    ) -> &mut Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        let predicate: Predicate = Arc::new(predicate);
        let rule = Rule::new(field, RuleKind::Custom(predicate)).with_message(message);
        self.push(value.into(), rule)
    }

    /// Override the message of the most recently registered rule.
    pub fn message(&mut self, message: impl Into<String>) -> &mut Self {
        if let Some((_, rule)) = self.pending.last_mut() {
            rule.message = Some(message.into());
        }
        self
    }

    /// Number of rules registered since the last [`FormValidator::validate`].
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Evaluate and clear every pending rule.
    pub fn validate(&mut self) -> ValidationResult {
        let errors: Vec<ValidationError> = std::mem::take(&mut self.pending)
            .into_iter()
            .filter_map(|(value, rule)| rule.check(&value))
            .collect();
        ValidationResult::from_errors(errors)
    }
}
