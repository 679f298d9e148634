//! Toolbar snippet insertions
//!
//! The composer's toolbar path: each button wraps the current selection in a
//! fixed `before`/`after` pair (or prefixes it, when `after` is empty). Unlike
//! the context-menu transforms, snippets do not require a captured selection:
//! they apply at whatever the surface's live selection is, and report the
//! shifted range so the caller can re-select the original span afterwards.

use crate::selection::SelectionRange;
use crate::text;

/// A toolbar snippet: a fixed wrap-or-prefix insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Snippet {
    /// `**` … `**`
    Bold,
    /// `*` … `*`
    Italic,
    /// `### ` prefix.
    Heading,
    /// `- ` prefix.
    List,
    /// Fenced code block around the selection.
    CodeBlock,
    /// `[` … `](url)`
    Link,
    /// `![alt text](` … `)`
    Image,
    /// 2-column table template prefix.
    Table,
    /// `- [ ] ` prefix.
    TaskList,
    /// `~~` … `~~`
    Strikethrough,
}

/// Result of applying a [`Snippet`]: the new buffer and the selection to
/// restore (the originally selected span, shifted right past the inserted
/// prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetEdit {
    /// New full buffer contents.
    pub buffer: String,
    /// Range to re-select on the input surface.
    pub selection: SelectionRange,
}

impl Snippet {
    /// The `(before, after)` pair this snippet inserts.
    pub fn parts(self) -> (&'static str, &'static str) {
        match self {
            Snippet::Bold => ("**", "**"),
            Snippet::Italic => ("*", "*"),
            Snippet::Heading => ("### ", ""),
            Snippet::List => ("- ", ""),
            Snippet::CodeBlock => ("```\n", "\n```"),
            Snippet::Link => ("[", "](url)"),
            Snippet::Image => ("![alt text](", ")"),
            Snippet::Table => ("| 헤더1 | 헤더2 |\n|-------|-------|\n| 셀1   | 셀2   |\n", ""),
            Snippet::TaskList => ("- [ ] ", ""),
            Snippet::Strikethrough => ("~~", "~~"),
        }
    }

    /// Apply this snippet at `selection`, returning the new buffer and the
    /// shifted selection.
    pub fn apply(self, buffer: &str, selection: SelectionRange) -> SnippetEdit {
        let (before, after) = self.parts();
        let len = text::char_len(buffer);
        let selection = SelectionRange::new(selection.start.min(len), selection.end.min(len));
        let selected = text::slice_chars(buffer, selection.start, selection.end);

        let start_byte = text::byte_of_char(buffer, selection.start);
        let end_byte = text::byte_of_char(buffer, selection.end);
        let mut out = String::with_capacity(buffer.len() + before.len() + after.len());
        out.push_str(&buffer[..start_byte]);
        out.push_str(before);
        out.push_str(selected);
        out.push_str(after);
        out.push_str(&buffer[end_byte..]);

        let shift = before.chars().count();
        SnippetEdit {
            buffer: out,
            selection: SelectionRange::new(selection.start + shift, selection.end + shift),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_and_shifts_selection() {
        let edit = Snippet::Bold.apply("say hi now", SelectionRange::new(4, 6));
        assert_eq!(edit.buffer, "say **hi** now");
        assert_eq!(edit.selection, SelectionRange::new(6, 8));
    }

    #[test]
    fn test_prefix_snippet_at_caret() {
        let edit = Snippet::List.apply("item", SelectionRange::new(0, 0));
        assert_eq!(edit.buffer, "- item");
        assert_eq!(edit.selection, SelectionRange::new(2, 2));
    }

    #[test]
    fn test_code_block_wraps_selection() {
        let edit = Snippet::CodeBlock.apply("let x = 1;", SelectionRange::new(0, 10));
        assert_eq!(edit.buffer, "```\nlet x = 1;\n```");
        assert_eq!(edit.selection, SelectionRange::new(4, 14));
    }

    #[test]
    fn test_link_snippet() {
        let edit = Snippet::Link.apply("docs", SelectionRange::new(0, 4));
        assert_eq!(edit.buffer, "[docs](url)");
        assert_eq!(edit.selection, SelectionRange::new(1, 5));
    }

    #[test]
    fn test_table_shift_counts_characters_not_bytes() {
        let (before, _) = Snippet::Table.parts();
        let edit = Snippet::Table.apply("x", SelectionRange::new(0, 1));
        assert!(edit.buffer.starts_with(before));
        assert_eq!(edit.selection.start, before.chars().count());
        assert_eq!(edit.selection.len(), 1);
    }

    #[test]
    fn test_selection_clamped_to_buffer() {
        let edit = Snippet::Italic.apply("ab", SelectionRange::new(1, 99));
        assert_eq!(edit.buffer, "a*b*");
        assert_eq!(edit.selection, SelectionRange::new(2, 3));
    }
}
