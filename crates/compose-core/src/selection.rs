//! Selection capture and restore
//!
//! The selection tracker observes a text-input surface, captures the current
//! selection as an immutable [`SelectionInfo`] snapshot, and can later restore
//! that exact range onto the surface even after focus moved elsewhere (for
//! example into a context menu). The snapshot is computed once at capture time
//! and never silently recomputed: if the buffer changes afterwards, the caller
//! must clear the capture before reusing the tracker.

use crate::line_index::{LineColumn, LineIndex, find_line_breaks};
use crate::text;

/// A pair of character offsets denoting a selected range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionRange {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SelectionRange {
    /// Create a range from two offsets in either order; the smaller becomes
    /// `start`.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Length of the range in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range is a caret (no selected text).
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

/// The active text-input surface, as seen by this subsystem.
///
/// Implemented by the enclosing editor: a real textarea binding in a frontend,
/// or the in-memory [`TextAreaModel`](crate::TextAreaModel) for headless use.
/// Offsets are character offsets into the surface's current value.
pub trait InputSurface {
    /// Current `(selection_start, selection_end)` offsets.
    fn selection(&self) -> (usize, usize);
    /// Set the active selection range.
    fn set_selection(&mut self, start: usize, end: usize);
    /// Give the surface input focus.
    fn focus(&mut self);
}

/// Immutable snapshot of a captured selection.
///
/// All derived fields are computed once at capture time against the buffer as
/// it was then. The snapshot goes stale the moment the buffer is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInfo {
    /// The captured range.
    pub range: SelectionRange,
    /// The selected text.
    pub text: String,
    /// Line/column position of the range start.
    pub start_pos: LineColumn,
    /// Line/column position of the range end.
    pub end_pos: LineColumn,
    /// Absolute character offsets of every line break inside the range.
    pub line_breaks: Vec<usize>,
    /// Total line count of the whole buffer at capture time.
    pub total_lines: usize,
}

impl SelectionInfo {
    /// Number of lines the selection spans.
    pub fn selected_lines(&self) -> usize {
        self.line_breaks.len() + 1
    }
}

/// Tracks the last captured selection of one editor instance.
///
/// There is at most one live capture per tracker; a new capture replaces the
/// previous one, and a caret-only capture clears it.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    last_capture: Option<SelectionInfo>,
}

impl SelectionTracker {
    /// Create a tracker with no capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the selection `raw_start..raw_end` of `buffer`.
    ///
    /// Returns `None` and clears any previous capture when the offsets denote a
    /// caret (`raw_start == raw_end`), including after clamping out-of-range
    /// offsets to the buffer length. Otherwise stores and returns the snapshot.
    pub fn capture(
        &mut self,
        buffer: &str,
        raw_start: usize,
        raw_end: usize,
    ) -> Option<&SelectionInfo> {
        let len = text::char_len(buffer);
        let range = SelectionRange::new(raw_start.min(len), raw_end.min(len));
        if range.is_caret() {
            self.last_capture = None;
            return None;
        }

        let index = LineIndex::from_text(buffer);
        let selected = text::slice_chars(buffer, range.start, range.end).to_string();
        let line_breaks: Vec<usize> = find_line_breaks(&selected)
            .into_iter()
            .map(|offset| range.start + offset)
            .collect();
        let info = SelectionInfo {
            range,
            start_pos: index.locate(range.start),
            end_pos: index.locate(range.end),
            total_lines: index.line_count(),
            line_breaks,
            text: selected,
        };

        tracing::debug!(
            target: "compose::selection",
            start = info.range.start,
            end = info.range.end,
            chars = info.text.chars().count(),
            start_pos = %format!("{}:{}", info.start_pos.line, info.start_pos.column),
            end_pos = %format!("{}:{}", info.end_pos.line, info.end_pos.column),
            selected_lines = info.selected_lines(),
            total_lines = info.total_lines,
            "selection captured"
        );

        self.last_capture = Some(info);
        self.last_capture.as_ref()
    }

    /// Restore the captured range onto the input surface and focus it.
    ///
    /// No-op when nothing is captured. Idempotent: restoring twice leaves the
    /// surface in the same state as restoring once. Only valid while the buffer
    /// is unchanged since capture.
    pub fn restore(&self, surface: &mut dyn InputSurface) {
        let Some(info) = &self.last_capture else {
            return;
        };
        surface.focus();
        surface.set_selection(info.range.start, info.range.end);
        tracing::trace!(
            target: "compose::selection",
            start = info.range.start,
            end = info.range.end,
            "selection restored"
        );
    }

    /// Drop the current capture unconditionally.
    pub fn clear(&mut self) {
        self.last_capture = None;
    }

    /// The last captured selection, if any.
    pub fn last_capture(&self) -> Option<&SelectionInfo> {
        self.last_capture.as_ref()
    }
}
