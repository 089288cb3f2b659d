//! Selection-aware formatting engine for plain-text editors.
//!
//! Every operation takes the current buffer and selection and returns a new
//! buffer plus the selection the caller should apply to its input control.
//! Inputs are never mutated.
//!
//! Offsets are `char` indices, not UTF-16 code units. Controls that report
//! UTF-16 positions convert with [`crate::text::char_offset_from_utf16`] on
//! the way in and [`crate::text::utf16_offset`] on the way out.

use crate::error::CoreError;
use crate::text::{byte_offset, char_len};
use serde::{Deserialize, Serialize};

/// A caret (`start == end`) or highlighted range over a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of chars covered by the selection.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }
}

/// Result of a formatting operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatted {
    pub buffer: String,
    pub selection: Selection,
}

/// A toolbar-level edit request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormatOperation {
    /// Replace the selection with `text`, leaving a caret after it.
    InsertText { text: String },
    /// Surround the selection with `prefix` and `suffix`.
    WrapSelection { prefix: String, suffix: String },
    /// Insert `"\n" + prefix` at the selection.
    LinePrefix { prefix: String },
}

/// Byte range of a selection checked against `buffer`.
fn byte_range(buffer: &str, selection: Selection) -> Result<(usize, usize), CoreError> {
    let invalid = || CoreError::InvalidSelection {
        start: selection.start,
        end: selection.end,
        len: char_len(buffer),
    };
    if selection.start > selection.end {
        return Err(invalid());
    }
    let start = byte_offset(buffer, selection.start).ok_or_else(invalid)?;
    let end = byte_offset(buffer, selection.end).ok_or_else(invalid)?;
    Ok((start, end))
}

/// Replace the selected range with `text`.
///
/// The returned selection is a caret directly after the inserted text.
///
/// # Errors
/// [`CoreError::InvalidSelection`] when the selection is reversed or extends
/// past the buffer.
pub fn insert(buffer: &str, selection: Selection, text: &str) -> Result<Formatted, CoreError> {
    let (start, end) = byte_range(buffer, selection)?;
    let mut next = String::with_capacity(buffer.len() - (end - start) + text.len());
    next.push_str(&buffer[..start]);
    next.push_str(text);
    next.push_str(&buffer[end..]);
    Ok(Formatted {
        buffer: next,
        selection: Selection::caret(selection.start + char_len(text)),
    })
}

/// Surround the selection with `prefix` and `suffix`.
///
/// With a caret, both delimiters are inserted and the caret lands between
/// them. With a range, the original text is re-selected at its shifted
/// position.
///
/// # Errors
/// [`CoreError::InvalidSelection`] when the selection is reversed or extends
/// past the buffer.
pub fn wrap(
    buffer: &str,
    selection: Selection,
    prefix: &str,
    suffix: &str,
) -> Result<Formatted, CoreError> {
    let (start, end) = byte_range(buffer, selection)?;
    let mut next = String::with_capacity(buffer.len() + prefix.len() + suffix.len());
    next.push_str(&buffer[..start]);
    next.push_str(prefix);
    next.push_str(&buffer[start..end]);
    next.push_str(suffix);
    next.push_str(&buffer[end..]);

    let inner_start = selection.start + char_len(prefix);
    Ok(Formatted {
        buffer: next,
        selection: Selection::new(inner_start, inner_start + selection.len()),
    })
}

/// Insert a newline followed by `prefix` at the selection.
///
/// The newline goes exactly at the caret, even mid-line.
pub fn insert_line_prefix(
    buffer: &str,
    selection: Selection,
    prefix: &str,
) -> Result<Formatted, CoreError> {
    insert(buffer, selection, &format!("\n{}", prefix))
}

/// Dispatch a [`FormatOperation`].
pub fn apply(
    buffer: &str,
    selection: Selection,
    operation: &FormatOperation,
) -> Result<Formatted, CoreError> {
    match operation {
        FormatOperation::InsertText { text } => insert(buffer, selection, text),
        FormatOperation::WrapSelection { prefix, suffix } => {
            wrap(buffer, selection, prefix, suffix)
        }
        FormatOperation::LinePrefix { prefix } => insert_line_prefix(buffer, selection, prefix),
    }
}

/// A focus-bearing text control owned by the UI layer.
pub trait SelectionTarget {
    /// Replace the control's content.
    fn set_text(&mut self, text: &str);
    /// Give the control input focus.
    fn focus(&mut self);
    /// Place the caret or highlight. Only valid after content and focus are set.
    fn set_selection(&mut self, selection: Selection);
}

/// Push a computed edit into a text control: content, then focus, then
/// selection.
pub fn apply_to<T: SelectionTarget + ?Sized>(target: &mut T, formatted: &Formatted) {
    target.set_text(&formatted.buffer);
    target.focus();
    target.set_selection(formatted.selection);
}
