//! Form-submission workflow: seed, edit, validate, hand off.
//!
//! Persistence and user notification are collaborators supplied by the
//! caller through [`SubmissionSink`] and [`Notifier`].

use crate::error::CoreError;
use crate::schema::{apply_edit, rules_for, seed, to_submission, FieldDescriptor};
use crate::validation::{RuleSet, ValidationResult};
use crate::value::{FieldValue, ValueMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Receives normalized submissions (create/update calls against a backend).
pub trait SubmissionSink {
    type Error: fmt::Display;

    fn submit(&mut self, submission: &ValueMap) -> Result<(), Self::Error>;
}

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Shows short feedback messages (toasts) to the user.
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, message: &str);
}

/// What happened on [`FormSession::submit`].
#[derive(Debug)]
pub enum SubmitOutcome<E> {
    /// Validation passed and the sink accepted this submission.
    Submitted(ValueMap),
    /// Validation failed; the sink was not called.
    Rejected(ValidationResult),
    /// Validation passed but the sink returned an error.
    Failed(E),
}

impl<E> SubmitOutcome<E> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// One live form instance.
#[derive(Clone, Debug)]
pub struct FormSession {
    descriptors: Vec<FieldDescriptor>,
    rules: RuleSet,
    values: ValueMap,
    success_message: String,
}

impl FormSession {
    /// Seed a session from `initial`, falling back to descriptor defaults.
    ///
    /// # Errors
    /// [`CoreError::InvalidPattern`] when a descriptor pattern does not compile.
    pub fn new(descriptors: Vec<FieldDescriptor>, initial: &ValueMap) -> Result<Self, CoreError> {
        let rules = rules_for(&descriptors)?;
        let values = seed(&descriptors, initial);
        Ok(Self {
            descriptors,
            rules,
            values,
            success_message: "Saved successfully".to_string(),
        })
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Replace one field's value.
    ///
    /// # Errors
    /// [`CoreError::UnknownField`] when no descriptor declares `name`.
    pub fn edit(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), CoreError> {
        if !self.descriptors.iter().any(|d| d.name == name) {
            return Err(CoreError::UnknownField(name.to_string()));
        }
        self.values = apply_edit(&self.values, name, value);
        Ok(())
    }

    pub fn validate(&self) -> ValidationResult {
        self.rules.evaluate(&self.values)
    }

    /// Normalized copy of the current values.
    pub fn submission(&self) -> ValueMap {
        to_submission(&self.values, &self.descriptors)
    }

    /// Validate, then pass the normalized values to `sink`.
    ///
    /// Rejections notify the first validation message; sink failures notify
    /// the sink's error. Nothing is retried.
    pub fn submit<S, N>(&self, sink: &mut S, notifier: &mut N) -> SubmitOutcome<S::Error>
    where
        S: SubmissionSink + ?Sized,
        N: Notifier + ?Sized,
    {
        let result = self.validate();
        if let Some(first) = result.first_error() {
            tracing::debug!(
                errors = result.errors.len(),
                field = %first.field,
                "Form submission rejected by validation"
            );
            notifier.notify(NoticeKind::Error, &first.message);
            return SubmitOutcome::Rejected(result);
        }

        let submission = self.submission();
        match sink.submit(&submission) {
            Ok(()) => {
                tracing::debug!(fields = submission.len(), "Form submitted");
                notifier.notify(NoticeKind::Success, &self.success_message);
                SubmitOutcome::Submitted(submission)
            }
            Err(err) => {
                tracing::warn!("Form submission failed: {}", err);
                notifier.notify(NoticeKind::Error, &format!("Submission failed: {}", err));
                SubmitOutcome::Failed(err)
            }
        }
    }
}
