//! Markdown toolbar actions expressed as formatting operations.

use crate::constants::{LINK_PLACEHOLDER_URL, MAX_HEADING_LEVEL};
use crate::editor::{self, FormatOperation, Formatted, Selection};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Formatting buttons offered by the content editor toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownAction {
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    CodeBlock,
    Link,
    Image,
    /// Heading of the given level; clamped to `1..=6`.
    Heading(u8),
    BulletList,
    NumberedList,
    Quote,
    HorizontalRule,
}

impl MarkdownAction {
    /// The edit this action performs.
    pub fn operation(self) -> FormatOperation {
        match self {
            Self::Bold => wrap_with("**", "**"),
            Self::Italic => wrap_with("*", "*"),
            Self::Strikethrough => wrap_with("~~", "~~"),
            Self::InlineCode => wrap_with("`", "`"),
            Self::CodeBlock => wrap_with("\n```\n", "\n```\n"),
            Self::Link => wrap_with("[", &format!("]({})", LINK_PLACEHOLDER_URL)),
            Self::Image => wrap_with("![", &format!("]({})", LINK_PLACEHOLDER_URL)),
            Self::Heading(level) => {
                let level = level.clamp(1, MAX_HEADING_LEVEL) as usize;
                line_prefix(&format!("{} ", "#".repeat(level)))
            }
            Self::BulletList => line_prefix("- "),
            Self::NumberedList => line_prefix("1. "),
            Self::Quote => line_prefix("> "),
            Self::HorizontalRule => FormatOperation::InsertText {
                text: "\n---\n".to_string(),
            },
        }
    }

    /// Run this action against a buffer and selection.
    pub fn apply(self, buffer: &str, selection: Selection) -> Result<Formatted, CoreError> {
        editor::apply(buffer, selection, &self.operation())
    }
}

fn wrap_with(prefix: &str, suffix: &str) -> FormatOperation {
    FormatOperation::WrapSelection {
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
    }
}

fn line_prefix(prefix: &str) -> FormatOperation {
    FormatOperation::LinePrefix {
        prefix: prefix.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::MarkdownAction;
    use crate::editor::{FormatOperation, Selection};

    #[test]
    fn inline_actions_wrap_selection() {
        let cases = [
            (MarkdownAction::Bold, "a **b** c"),
            (MarkdownAction::Italic, "a *b* c"),
            (MarkdownAction::Strikethrough, "a ~~b~~ c"),
            (MarkdownAction::InlineCode, "a `b` c"),
            (MarkdownAction::Link, "a [b](url) c"),
            (MarkdownAction::Image, "a ![b](url) c"),
        ];
        for (action, expected) in cases {
            let out = action.apply("a b c", Selection::new(2, 3)).expect("apply");
            assert_eq!(out.buffer, expected, "action: {:?}", action);
            assert_eq!(
                out.buffer.chars().skip(out.selection.start).take(1).collect::<String>(),
                "b",
                "action: {:?}",
                action
            );
        }
    }

    #[test]
    fn empty_link_leaves_caret_inside_brackets() {
        let out = MarkdownAction::Link
            .apply("go ", Selection::caret(3))
            .expect("apply");
        assert_eq!(out.buffer, "go [](url)");
        assert_eq!(out.selection, Selection::caret(4));
    }

    #[test]
    fn block_actions_insert_line_prefixes() {
        let cases = [
            (MarkdownAction::BulletList, "intro\n- "),
            (MarkdownAction::NumberedList, "intro\n1. "),
            (MarkdownAction::Quote, "intro\n> "),
            (MarkdownAction::Heading(2), "intro\n## "),
            (MarkdownAction::HorizontalRule, "intro\n---\n"),
        ];
        for (action, expected) in cases {
            let out = action.apply("intro", Selection::caret(5)).expect("apply");
            assert_eq!(out.buffer, expected, "action: {:?}", action);
            assert_eq!(out.selection, Selection::caret(expected.chars().count()));
        }
    }

    #[test]
    fn heading_level_is_clamped() {
        assert_eq!(
            MarkdownAction::Heading(0).operation(),
            FormatOperation::LinePrefix {
                prefix: "# ".to_string()
            }
        );
        assert_eq!(
            MarkdownAction::Heading(9).operation(),
            FormatOperation::LinePrefix {
                prefix: "###### ".to_string()
            }
        );
    }

    #[test]
    fn code_block_wraps_on_own_lines() {
        let out = MarkdownAction::CodeBlock
            .apply("fn x()", Selection::new(0, 6))
            .expect("apply");
        assert_eq!(out.buffer, "\n```\nfn x()\n```\n");
        assert_eq!(out.selection, Selection::new(5, 11));
    }
}
