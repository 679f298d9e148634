//! Markdown text transformations
//!
//! The transform engine is a family of pure functions: given a buffer, a
//! previously captured selection range, and a [`TransformRequest`], it computes
//! a new buffer with the selected range replaced by a transformed version of the
//! selected text. Transformations are textual, not structural; no markdown AST
//! is involved.
//!
//! Requests form a closed enum rather than string-keyed actions, so an
//! unhandled or misspelled operation cannot exist at runtime. The serde encoding
//! keeps the frontend's camelCase action vocabulary:
//!
//! ```rust
//! use compose_core::TransformRequest;
//!
//! let request: TransformRequest =
//!     serde_json::from_str(r#"{"type":"header","level":2}"#).unwrap();
//! assert_eq!(request, TransformRequest::Header { level: compose_core::HeaderLevel::H2 });
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::selection::SelectionRange;
use crate::text;

/// Placeholder token inserted as the link target of a [`TransformRequest::Link`].
pub const LINK_PLACEHOLDER: &str = "URL";

/// Placeholder token inserted as the source of a [`TransformRequest::Image`].
pub const IMAGE_PLACEHOLDER: &str = "IMAGE_URL";

/// The fixed 3-column table template inserted by [`TransformRequest::Table`].
pub const TABLE_TEMPLATE: &str =
    "| 헤더1 | 헤더2 | 헤더3 |\n|-------|-------|-------|\n| 셀1   | 셀2   | 셀3   |";

/// The color tokens offered by the composer's context menu.
pub mod palette {
    /// Red.
    pub const RED: &str = "#ef4444";
    /// Blue.
    pub const BLUE: &str = "#3b82f6";
    /// Green.
    pub const GREEN: &str = "#10b981";
    /// Yellow.
    pub const YELLOW: &str = "#f59e0b";
    /// Purple.
    pub const PURPLE: &str = "#8b5cf6";
    /// Gray.
    pub const GRAY: &str = "#6b7280";
}

/// Error raised by transform parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// Header level outside the markdown range 1..=6.
    #[error("invalid header level {0}, expected 1-6")]
    InvalidHeaderLevel(u8),
}

/// A validated markdown header level, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeaderLevel(u8);

impl HeaderLevel {
    /// Level 1 (`#`).
    pub const H1: HeaderLevel = HeaderLevel(1);
    /// Level 2 (`##`).
    pub const H2: HeaderLevel = HeaderLevel(2);
    /// Level 3 (`###`).
    pub const H3: HeaderLevel = HeaderLevel(3);
    /// Level 4 (`####`).
    pub const H4: HeaderLevel = HeaderLevel(4);
    /// Level 5 (`#####`).
    pub const H5: HeaderLevel = HeaderLevel(5);
    /// Level 6 (`######`).
    pub const H6: HeaderLevel = HeaderLevel(6);

    /// Create a header level, rejecting values outside 1..=6.
    pub fn new(level: u8) -> Result<Self, TransformError> {
        if (1..=6).contains(&level) {
            Ok(Self(level))
        } else {
            Err(TransformError::InvalidHeaderLevel(level))
        }
    }

    /// The numeric level.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeaderLevel {
    type Error = TransformError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<HeaderLevel> for u8 {
    fn from(level: HeaderLevel) -> u8 {
        level.0
    }
}

/// Emphasis styles for [`TransformRequest::TextStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `~~text~~`
    Strikethrough,
}

/// List flavors for [`TransformRequest::List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    /// `1. ` / `2. ` / ... prefixes.
    Ordered,
    /// `- ` prefixes.
    Unordered,
}

/// Code formatting flavors for [`TransformRequest::Code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CodeKind {
    /// Single-backtick inline code.
    Inline,
    /// Fenced code block.
    Block,
}

/// A markdown transformation and its parameters.
///
/// Every context-menu operation is one variant; the transform engine matches
/// exhaustively, so adding a variant forces handling it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransformRequest {
    /// Re-header every selected line at the given level.
    Header {
        /// Target header level.
        level: HeaderLevel,
    },
    /// Wrap the selection in an emphasis marker.
    TextStyle {
        /// Which emphasis marker.
        style: TextStyle,
    },
    /// Turn every selected line into a list item.
    List {
        /// Ordered or unordered.
        kind: ListKind,
    },
    /// Turn every selected line into an unchecked task item.
    TaskList,
    /// Wrap the selection as `[text](URL)`.
    Link,
    /// Wrap the selection as `![text](IMAGE_URL)`.
    Image,
    /// Wrap the selection in inline code or a fenced block.
    Code {
        /// Inline or fenced block.
        kind: CodeKind,
    },
    /// Prefix every selected line with `> `.
    Blockquote,
    /// Surround the selection with `---` rules, or insert `---` at the caret.
    HorizontalRule,
    /// Insert the fixed table template at the start of the selection's line.
    Table,
    /// Wrap the selection in an inline-styled color span.
    TextColor {
        /// CSS color value, e.g. one of [`palette`].
        color: String,
    },
}

static HEADER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#+\s*").expect("static pattern compiles"));

/// Apply a transformation to `buffer`, returning the new buffer contents.
///
/// `selection` and `selected_text` come from a [`crate::SelectionInfo`]
/// captured against this exact buffer. Every operation
/// except [`TransformRequest::Table`] and [`TransformRequest::HorizontalRule`]
/// returns the buffer unchanged when `selected_text` is empty.
///
/// ```rust
/// use compose_core::{SelectionRange, TextStyle, TransformRequest, apply};
///
/// let out = apply(
///     "say hi now",
///     SelectionRange::new(4, 6),
///     "hi",
///     &TransformRequest::TextStyle { style: TextStyle::Bold },
/// );
/// assert_eq!(out, "say **hi** now");
/// ```
pub fn apply(
    buffer: &str,
    selection: SelectionRange,
    selected_text: &str,
    request: &TransformRequest,
) -> String {
    let result = match request {
        TransformRequest::Table => insert_table(buffer, selection),
        TransformRequest::HorizontalRule if selected_text.is_empty() => {
            insert_at(buffer, selection.start, "---")
        }
        _ if selected_text.is_empty() => buffer.to_string(),
        TransformRequest::Header { level } => {
            let prefix = "#".repeat(level.get() as usize) + " ";
            let transformed = map_lines(selected_text, |_, line| {
                // Re-headering strips any existing header marker first.
                format!("{prefix}{}", HEADER_PREFIX.replace(line, ""))
            });
            replace_range(buffer, selection, &transformed)
        }
        TransformRequest::TextStyle { style } => {
            let marker = match style {
                TextStyle::Bold => "**",
                TextStyle::Italic => "*",
                TextStyle::Strikethrough => "~~",
            };
            replace_range(buffer, selection, &format!("{marker}{selected_text}{marker}"))
        }
        TransformRequest::List { kind } => {
            let transformed = map_lines(selected_text, |i, line| match kind {
                ListKind::Ordered => format!("{}. {line}", i + 1),
                ListKind::Unordered => format!("- {line}"),
            });
            replace_range(buffer, selection, &transformed)
        }
        TransformRequest::TaskList => {
            let transformed = map_lines(selected_text, |_, line| format!("- [ ] {line}"));
            replace_range(buffer, selection, &transformed)
        }
        TransformRequest::Link => replace_range(
            buffer,
            selection,
            &format!("[{selected_text}]({LINK_PLACEHOLDER})"),
        ),
        TransformRequest::Image => replace_range(
            buffer,
            selection,
            &format!("![{selected_text}]({IMAGE_PLACEHOLDER})"),
        ),
        TransformRequest::Code { kind } => {
            let wrapped = match kind {
                CodeKind::Inline => format!("`{selected_text}`"),
                CodeKind::Block => format!("```\n{selected_text}\n```"),
            };
            replace_range(buffer, selection, &wrapped)
        }
        TransformRequest::Blockquote => {
            let transformed = map_lines(selected_text, |_, line| format!("> {line}"));
            replace_range(buffer, selection, &transformed)
        }
        TransformRequest::HorizontalRule => {
            replace_range(buffer, selection, &format!("---\n{selected_text}\n---"))
        }
        TransformRequest::TextColor { color } => replace_range(
            buffer,
            selection,
            &format!("<span style=\"color: {color}\">{selected_text}</span>"),
        ),
    };

    tracing::debug!(
        target: "compose::transform",
        request = ?request,
        start = selection.start,
        end = selection.end,
        "transform applied"
    );

    result
}

/// Split on line breaks, map each line, rejoin. Preserves the line count: empty
/// lines stay as (prefixed) lines and no breaks are added or dropped.
fn map_lines(selected_text: &str, f: impl Fn(usize, &str) -> String) -> String {
    selected_text
        .split('\n')
        .enumerate()
        .map(|(i, line)| f(i, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn replace_range(buffer: &str, selection: SelectionRange, new_text: &str) -> String {
    let start = text::byte_of_char(buffer, selection.start);
    let end = text::byte_of_char(buffer, selection.end);
    let mut out = String::with_capacity(buffer.len() - (end - start) + new_text.len());
    out.push_str(&buffer[..start]);
    out.push_str(new_text);
    out.push_str(&buffer[end..]);
    out
}

fn insert_at(buffer: &str, char_offset: usize, new_text: &str) -> String {
    let at = text::byte_of_char(buffer, char_offset);
    let mut out = String::with_capacity(buffer.len() + new_text.len());
    out.push_str(&buffer[..at]);
    out.push_str(new_text);
    out.push_str(&buffer[at..]);
    out
}

/// Insert the table template at the start of the line containing the selection.
///
/// The selection itself is preserved and shifted right; live captures are not
/// offset-adjusted here (the menu controller discards them on close).
fn insert_table(buffer: &str, selection: SelectionRange) -> String {
    let anchor = text::line_start_char(buffer, selection.start);
    insert_at(buffer, anchor, &format!("{TABLE_TEMPLATE}\n\n"))
}
