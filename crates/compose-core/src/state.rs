//! Composer state and change notifications
//!
//! [`Composer`] wraps one editing session in a unidirectional data flow, in the
//! manner of a headless editor state manager:
//!
//! 1. The frontend calls a mutating operation (`set_text`, `open_menu`,
//!    `choose`, `insert_snippet`, ...).
//! 2. The composer routes it through the menu controller / snippet engine and
//!    commits the result to its owned textarea model.
//! 3. The version counter increments and every subscriber is notified
//!    synchronously, once per committed change.
//!
//! The composer is also the subsystem's reference implementation of the
//! [`InputSurface`] boundary: [`TextAreaModel`] models a textarea's value,
//! selection, and focus flag in memory.
//!
//! # Example
//!
//! ```rust
//! use compose_core::{Composer, MenuPoint, TextStyle, TransformRequest};
//!
//! let mut composer = Composer::new("say hi now");
//! composer.set_selection(4, 6);
//! assert!(composer.open_menu(MenuPoint::new(120.0, 48.0)));
//! composer.choose(&TransformRequest::TextStyle { style: TextStyle::Bold });
//! assert_eq!(composer.text(), "say **hi** now");
//! ```

use crate::menu::{MenuController, MenuPoint, MenuState};
use crate::selection::{InputSurface, SelectionInfo, SelectionRange};
use crate::snippet::Snippet;
use crate::text;
use crate::transform::TransformRequest;

/// In-memory model of the editing surface: buffer value, live selection, and
/// focus flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaModel {
    value: String,
    selection: (usize, usize),
    focused: bool,
}

impl TextAreaModel {
    /// Create a model holding `value` with a collapsed selection at the start.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selection: (0, 0),
            focused: false,
        }
    }

    /// Current buffer value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the buffer value, clamping the selection to the new length.
    pub fn set_value(&mut self, value: String) {
        self.value = value;
        let len = text::char_len(&self.value);
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
    }

    /// Whether the surface currently has input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl InputSurface for TextAreaModel {
    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        let len = text::char_len(&self.value);
        self.selection = (start.min(len), end.min(len));
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

/// Kind of a committed composer change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerChangeType {
    /// Buffer content changed.
    BufferModified,
    /// The live selection changed.
    SelectionChanged,
    /// The transformation menu opened.
    MenuOpened,
    /// The transformation menu closed.
    MenuClosed,
}

/// Change record passed to subscribers.
#[derive(Debug, Clone)]
pub struct ComposerChange {
    /// What changed.
    pub change_type: ComposerChangeType,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

/// Change callback type. Everything here is single-threaded and synchronous, so
/// callbacks need no `Send` bound.
pub type ComposerChangeCallback = Box<dyn FnMut(&ComposerChange)>;

/// One markdown editing session: owned surface model, menu controller, version
/// tracking, and change notifications.
pub struct Composer {
    surface: TextAreaModel,
    controller: MenuController,
    version: u64,
    is_modified: bool,
    callbacks: Vec<ComposerChangeCallback>,
}

impl Composer {
    /// Create a composer over `text`. CRLF line breaks are normalized to LF on
    /// ingest; offsets everywhere assume LF-only buffers.
    pub fn new(text: &str) -> Self {
        Self {
            surface: TextAreaModel::new(text::normalize_newlines(text)),
            controller: MenuController::new(),
            version: 0,
            is_modified: false,
            callbacks: Vec::new(),
        }
    }

    /// Create an empty composer.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Current buffer contents.
    pub fn text(&self) -> &str {
        self.surface.value()
    }

    /// State version, incremented once per committed change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the buffer has been modified since creation.
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// The surface model (live selection, focus flag).
    pub fn surface(&self) -> &TextAreaModel {
        &self.surface
    }

    /// Current menu state.
    pub fn menu_state(&self) -> MenuState {
        self.controller.state()
    }

    /// The capture backing the open menu, if any.
    pub fn captured(&self) -> Option<&SelectionInfo> {
        self.controller.captured()
    }

    /// Subscribe to change notifications. Callbacks run synchronously, in
    /// subscription order, after each committed change.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ComposerChange) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Replace the whole buffer (an out-of-band edit).
    ///
    /// Clears any live capture first and closes the menu: a capture taken
    /// against the old buffer must never be restored against the new one.
    /// No-op when the normalized text equals the current buffer.
    pub fn set_text(&mut self, text: &str) {
        let normalized = text::normalize_newlines(text);
        if normalized == self.surface.value() {
            return;
        }
        let was_open = self.controller.is_open();
        self.controller.dismiss();
        self.surface.set_value(normalized);
        self.is_modified = true;
        if was_open {
            self.notify(ComposerChangeType::MenuClosed);
        }
        self.notify(ComposerChangeType::BufferModified);
    }

    /// Set the live selection on the surface. No-op when unchanged.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let before = self.surface.selection();
        self.surface.set_selection(start, end);
        if self.surface.selection() != before {
            self.notify(ComposerChangeType::SelectionChanged);
        }
    }

    /// Give the surface input focus.
    pub fn focus(&mut self) {
        self.surface.focus();
    }

    /// Context-menu trigger at a screen point.
    ///
    /// Captures the current selection and opens the menu; with a caret-only
    /// selection the menu stays closed and `false` is returned.
    pub fn open_menu(&mut self, at: MenuPoint) -> bool {
        let buffer = self.surface.value().to_string();
        if self.controller.context_trigger(&self.surface, &buffer, at) {
            self.notify(ComposerChangeType::MenuOpened);
            true
        } else {
            false
        }
    }

    /// Apply a menu action to the captured selection and commit the result.
    ///
    /// Returns `true` when a transform was committed. The menu closes and the
    /// capture is consumed either way it was open. Subscribers see
    /// `MenuClosed` before `BufferModified`, the same order every closing
    /// mutation notifies in.
    pub fn choose(&mut self, request: &TransformRequest) -> bool {
        let buffer = self.surface.value().to_string();
        let Some(new_buffer) = self
            .controller
            .action_chosen(&mut self.surface, &buffer, request)
        else {
            return false;
        };
        self.surface.set_value(new_buffer);
        self.is_modified = true;
        self.notify(ComposerChangeType::MenuClosed);
        self.notify(ComposerChangeType::BufferModified);
        true
    }

    /// Dismiss the menu without mutating the buffer.
    pub fn dismiss_menu(&mut self) {
        if !self.controller.is_open() {
            return;
        }
        self.controller.dismiss();
        self.notify(ComposerChangeType::MenuClosed);
    }

    /// Apply a toolbar snippet at the surface's live selection, then restore
    /// focus and re-select the wrapped span.
    ///
    /// An open menu is dismissed first (with a `MenuClosed` notification): the
    /// snippet edit bypasses the menu flow, so its capture goes stale.
    pub fn insert_snippet(&mut self, snippet: Snippet) {
        let was_open = self.controller.is_open();
        self.controller.dismiss();
        let (start, end) = self.surface.selection();
        let edit = snippet.apply(self.surface.value(), SelectionRange::new(start, end));
        self.surface.set_value(edit.buffer);
        self.surface.focus();
        self.surface
            .set_selection(edit.selection.start, edit.selection.end);
        self.is_modified = true;
        if was_open {
            self.notify(ComposerChangeType::MenuClosed);
        }
        self.notify(ComposerChangeType::BufferModified);
    }

    fn notify(&mut self, change_type: ComposerChangeType) {
        let change = ComposerChange {
            change_type,
            old_version: self.version,
            new_version: self.version + 1,
        };
        self.version += 1;
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{TextStyle, TransformRequest};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_menu_flow_commits_transform() {
        let mut composer = Composer::new("say hi now");
        composer.set_selection(4, 6);
        assert!(composer.open_menu(MenuPoint::new(10.0, 10.0)));
        assert!(composer.choose(&TransformRequest::TextStyle { style: TextStyle::Bold }));
        assert_eq!(composer.text(), "say **hi** now");
        assert!(composer.is_modified());
        assert_eq!(composer.menu_state(), MenuState::Closed);
    }

    #[test]
    fn test_choose_without_open_menu_is_noop() {
        let mut composer = Composer::new("say hi now");
        composer.set_selection(4, 6);
        assert!(!composer.choose(&TransformRequest::Link));
        assert_eq!(composer.text(), "say hi now");
        assert!(!composer.is_modified());
    }

    #[test]
    fn test_subscribers_observe_versions() {
        let seen: Rc<RefCell<Vec<(ComposerChangeType, u64, u64)>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut composer = Composer::new("say hi now");
        composer.subscribe(move |change| {
            sink.borrow_mut()
                .push((change.change_type, change.old_version, change.new_version));
        });

        composer.set_selection(4, 6);
        composer.open_menu(MenuPoint::new(0.0, 0.0));
        composer.choose(&TransformRequest::TextStyle { style: TextStyle::Italic });

        let seen = seen.borrow();
        assert_eq!(
            seen.iter().map(|(t, _, _)| *t).collect::<Vec<_>>(),
            vec![
                ComposerChangeType::SelectionChanged,
                ComposerChangeType::MenuOpened,
                ComposerChangeType::MenuClosed,
                ComposerChangeType::BufferModified,
            ]
        );
        // Versions are contiguous.
        for (i, (_, old, new)) in seen.iter().enumerate() {
            assert_eq!(*old, i as u64);
            assert_eq!(*new, i as u64 + 1);
        }
    }

    #[test]
    fn test_selection_noop_does_not_bump_version() {
        let mut composer = Composer::new("abc");
        composer.set_selection(1, 2);
        let version = composer.version();
        composer.set_selection(1, 2);
        assert_eq!(composer.version(), version);
    }

    #[test]
    fn test_set_text_clears_capture_and_closes_menu() {
        let mut composer = Composer::new("say hi now");
        composer.set_selection(4, 6);
        composer.open_menu(MenuPoint::new(0.0, 0.0));

        composer.set_text("totally different");
        assert_eq!(composer.menu_state(), MenuState::Closed);
        assert!(composer.captured().is_none());
        assert_eq!(composer.text(), "totally different");
    }

    #[test]
    fn test_set_text_normalizes_crlf() {
        let mut composer = Composer::new("a\r\nb");
        assert_eq!(composer.text(), "a\nb");
        composer.set_text("c\r\nd");
        assert_eq!(composer.text(), "c\nd");
    }

    #[test]
    fn test_insert_snippet_restores_selection() {
        let mut composer = Composer::new("say hi now");
        composer.set_selection(4, 6);
        composer.insert_snippet(Snippet::Bold);
        assert_eq!(composer.text(), "say **hi** now");
        assert_eq!(composer.surface().selection(), (6, 8));
        assert!(composer.surface().is_focused());
    }

    #[test]
    fn test_insert_snippet_dismisses_open_menu() {
        let seen: Rc<RefCell<Vec<ComposerChangeType>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut composer = Composer::new("say hi now");
        composer.set_selection(4, 6);
        composer.open_menu(MenuPoint::new(0.0, 0.0));

        composer.subscribe(move |change| sink.borrow_mut().push(change.change_type));
        composer.insert_snippet(Snippet::Italic);

        assert!(composer.captured().is_none());
        assert_eq!(composer.menu_state(), MenuState::Closed);
        assert_eq!(
            *seen.borrow(),
            vec![
                ComposerChangeType::MenuClosed,
                ComposerChangeType::BufferModified,
            ]
        );
    }

    #[test]
    fn test_insert_snippet_with_closed_menu_notifies_buffer_only() {
        let seen: Rc<RefCell<Vec<ComposerChangeType>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut composer = Composer::new("say hi now");
        composer.set_selection(4, 6);
        composer.subscribe(move |change| sink.borrow_mut().push(change.change_type));
        composer.insert_snippet(Snippet::Bold);

        assert_eq!(*seen.borrow(), vec![ComposerChangeType::BufferModified]);
    }

    #[test]
    fn test_closing_mutations_notify_in_one_order() {
        // set_text and choose both close an open menu; subscribers see
        // MenuClosed before BufferModified from either path.
        let order_of = |mutate: &dyn Fn(&mut Composer)| {
            let seen: Rc<RefCell<Vec<ComposerChangeType>>> = Rc::default();
            let sink = Rc::clone(&seen);

            let mut composer = Composer::new("say hi now");
            composer.set_selection(4, 6);
            composer.open_menu(MenuPoint::new(0.0, 0.0));
            composer.subscribe(move |change| sink.borrow_mut().push(change.change_type));
            mutate(&mut composer);
            seen.borrow().clone()
        };

        let via_choose = order_of(&|composer| {
            composer.choose(&TransformRequest::TextStyle { style: TextStyle::Bold });
        });
        let via_set_text = order_of(&|composer| composer.set_text("replaced"));
        assert_eq!(via_choose, via_set_text);
        assert_eq!(
            via_choose,
            vec![
                ComposerChangeType::MenuClosed,
                ComposerChangeType::BufferModified,
            ]
        );
    }
}
