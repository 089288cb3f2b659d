//! Authoring toolkit core: selection-aware text formatting, fluent form
//! validation, and the form schema value model that binds them.
//!
//! Nothing here performs I/O or renders markup; callers own the text
//! control, persistence, and notifications.

/// Shared defaults and limits.
pub mod constants;
/// Selection-aware insert and wrap operations.
pub mod editor;
/// Environment parsing helpers.
pub mod env;
/// Contract error types.
pub mod error;
/// Markdown toolbar actions.
pub mod markdown;
/// Field descriptors, seeding, edits, and submission normalization.
pub mod schema;
/// Text and offset helpers.
pub mod text;
/// Environment guards for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
/// Fluent validation engine.
pub mod validation;
/// Field values and value maps.
pub mod value;
/// Form submission workflow over caller-supplied collaborators.
pub mod workflow;

pub use constants::DEFAULT_MAX_INPUT_SIZE;
pub use editor::{FormatOperation, Formatted, Selection};
pub use error::CoreError;
pub use markdown::MarkdownAction;
pub use schema::{FieldDescriptor, FieldKind};
pub use validation::{FormValidator, RuleSet, ValidationError, ValidationResult};
pub use value::{FieldValue, ValueMap};
pub use workflow::FormSession;
