//! Line/column indexing
//!
//! Converts absolute character offsets in a buffer into 1-based (line, column)
//! positions and back. The free functions are pure and total over all valid
//! offsets; [`LineIndex`] is a Rope-backed index for repeated lookups against the
//! same buffer (capture computes both selection endpoints from one index).

use ropey::Rope;

/// A 1-based line/column position in a buffer.
///
/// `column` counts characters since the last line break (or buffer start) plus
/// one, so the first character of every line is column 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LineColumn {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column in characters within the line.
    pub column: usize,
}

impl LineColumn {
    /// Create a new line/column position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for LineColumn {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for LineColumn {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Locate the 1-based line/column position of a character offset.
///
/// The line is the number of line breaks in `buffer[0..offset]` plus one; the
/// column is the number of characters since the last of those breaks plus one.
/// Offsets past the end of the buffer clamp to the end position.
///
/// ```rust
/// use compose_core::{LineColumn, locate};
///
/// assert_eq!(locate("ab\ncd", 0), LineColumn::new(1, 1));
/// assert_eq!(locate("ab\ncd", 4), LineColumn::new(2, 2));
/// ```
pub fn locate(buffer: &str, offset: usize) -> LineColumn {
    let mut line = 1;
    let mut column = 1;
    for c in buffer.chars().take(offset) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    LineColumn::new(line, column)
}

/// Character offsets of every `'\n'` in `text`, in ascending order.
pub fn find_line_breaks(text: &str) -> Vec<usize> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| *c == '\n')
        .map(|(i, _)| i)
        .collect()
}

/// Reconstruct the character offset of a 1-based line/column position.
///
/// Inverse of [`locate`] for any position it produces. Lines and columns past
/// the end of the buffer clamp to the nearest valid offset.
pub fn offset_at(buffer: &str, position: LineColumn) -> usize {
    let breaks = find_line_breaks(buffer);
    let line_idx = position.line.saturating_sub(1).min(breaks.len());
    let line_start = if line_idx == 0 { 0 } else { breaks[line_idx - 1] + 1 };
    let line_end = breaks
        .get(line_idx)
        .copied()
        .unwrap_or_else(|| crate::text::char_len(buffer));
    (line_start + position.column.saturating_sub(1)).min(line_end)
}

/// Rope-backed line index over a fixed buffer.
///
/// Wraps a [`ropey::Rope`] and exposes its line access in this crate's
/// 1-based, character-offset coordinates. Building the index is O(n); every
/// query after that is O(log n).
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from a buffer.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count (an empty buffer has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Locate the 1-based line/column position of a character offset.
    ///
    /// Agrees with the free [`locate`] function on every valid offset.
    pub fn locate(&self, char_offset: usize) -> LineColumn {
        let char_offset = char_offset.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(char_offset);
        let line_start = self.rope.line_to_char(line_idx);
        LineColumn::new(line_idx + 1, char_offset - line_start + 1)
    }

    /// Character offset of the start of a 1-based line. Lines past the end clamp
    /// to the last line.
    pub fn line_start(&self, line: usize) -> usize {
        let line_idx = line
            .saturating_sub(1)
            .min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line_idx)
    }

    /// Reconstruct the character offset of a 1-based line/column position,
    /// clamping the column to the line length.
    pub fn offset_at(&self, position: LineColumn) -> usize {
        let line_idx = position
            .line
            .saturating_sub(1)
            .min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line_idx);
        let line_end = if line_idx + 1 < self.rope.len_lines() {
            // Exclude the newline terminating this line.
            self.rope.line_to_char(line_idx + 1) - 1
        } else {
            self.rope.len_chars()
        };
        (line_start + position.column.saturating_sub(1)).min(line_end)
    }
}
