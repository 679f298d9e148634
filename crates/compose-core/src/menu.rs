//! Transformation menu state machine
//!
//! One [`MenuController`] per composer instance owns the menu state and the
//! selection tracker; there is no module-global capture shared between
//! editors. The machine is small:
//!
//! ```text
//! Closed --context_trigger (capture succeeds)--> Open { anchor }
//! Open   --action_chosen--------------------> Closed  (restore, transform, commit)
//! Open   --dismiss----------------------------> Closed  (no buffer mutation)
//! ```
//!
//! A capture lives exactly as long as the menu can still consume it: closing
//! the menu, for any reason, discards it. Opening always starts from a fresh
//! capture of the surface's current selection.

use crate::selection::{InputSurface, SelectionInfo, SelectionTracker};
use crate::transform::{TransformRequest, apply};

/// A screen coordinate supplied by the context-menu trigger.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MenuPoint {
    /// Horizontal screen coordinate in pixels.
    pub x: f64,
    /// Vertical screen coordinate in pixels.
    pub y: f64,
}

impl MenuPoint {
    /// Create a new screen point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Current state of the transformation menu.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MenuState {
    /// No menu is showing.
    #[default]
    Closed,
    /// The menu is showing, anchored at a screen point.
    Open {
        /// Anchor point the menu was opened at. Placement policy (offsetting to
        /// dodge the native menu) belongs to the rendering layer.
        anchor: MenuPoint,
    },
}

/// Coordinates selection capture, the transform engine, and menu visibility for
/// one composer instance.
#[derive(Debug, Default)]
pub struct MenuController {
    tracker: SelectionTracker,
    state: MenuState,
}

impl MenuController {
    /// Create a controller in the `Closed` state with no capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current menu state.
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    /// The selection captured when the menu opened, while it is still live.
    pub fn captured(&self) -> Option<&SelectionInfo> {
        self.tracker.last_capture()
    }

    /// Context-menu trigger: capture the surface's current selection and open
    /// the menu at `at`.
    ///
    /// Returns `true` when the menu opened. With a caret-only selection the
    /// capture fails, any stale capture is cleared, and the menu stays closed
    /// (the platform's native menu is not intercepted either way).
    pub fn context_trigger(
        &mut self,
        surface: &dyn InputSurface,
        buffer: &str,
        at: MenuPoint,
    ) -> bool {
        let (raw_start, raw_end) = surface.selection();
        if self.tracker.capture(buffer, raw_start, raw_end).is_none() {
            self.state = MenuState::Closed;
            tracing::trace!(
                target: "compose::menu",
                "context trigger without selection, menu stays closed"
            );
            return false;
        }

        self.state = MenuState::Open { anchor: at };
        tracing::debug!(target: "compose::menu", x = at.x, y = at.y, "menu opened");
        true
    }

    /// A menu action was chosen: restore the captured range onto the surface,
    /// run the transform against `buffer`, and close.
    ///
    /// Returns the new buffer contents for the buffer owner to commit, or
    /// `None` when the menu was not open. The capture is consumed either way
    /// the menu closes.
    pub fn action_chosen(
        &mut self,
        surface: &mut dyn InputSurface,
        buffer: &str,
        request: &TransformRequest,
    ) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.state = MenuState::Closed;

        self.tracker.restore(surface);
        let info = self.tracker.last_capture()?.clone();
        self.tracker.clear();

        let new_buffer = apply(buffer, info.range, &info.text, request);
        tracing::debug!(
            target: "compose::menu",
            request = ?request,
            start = info.range.start,
            end = info.range.end,
            "menu action applied"
        );
        Some(new_buffer)
    }

    /// Dismiss the menu (outside interaction). No buffer mutation.
    ///
    /// Callers must also dismiss before any buffer edit that does not go
    /// through [`action_chosen`](Self::action_chosen); a capture taken against
    /// the old buffer is undefined to restore afterwards.
    pub fn dismiss(&mut self) {
        if self.is_open() {
            tracing::trace!(target: "compose::menu", "menu dismissed");
        }
        self.state = MenuState::Closed;
        self.tracker.clear();
    }
}
