#![warn(missing_docs)]
//! Compose Core - Headless Markdown Composing Kernel
//!
//! # Overview
//!
//! `compose-core` is the selection-aware editing engine behind a blog's
//! markdown authoring surface. It tracks text selections on an input surface,
//! applies markdown transformations (headers, emphasis, lists, links, tables,
//! color spans) to captured sub-ranges of a buffer, and drives the context
//! menu that invokes them. It is headless: rendering, HTTP, and persistence
//! are the enclosing application's concern.
//!
//! # Core Features
//!
//! - **Line/Column Indexing**: pure offset ↔ (line, column) conversion, plus a
//!   Rope-backed index for repeated lookups
//! - **Selection Tracking**: capture / restore / clear with immutable
//!   snapshots that survive focus changes
//! - **Text Transforms**: a closed [`TransformRequest`] enum over eleven
//!   markdown operations, applied as pure buffer-to-buffer functions
//! - **Menu State Machine**: one [`MenuController`] per composer, never shared
//!   ambient state
//! - **State Tracking**: version counter and synchronous change notifications
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Composer (state, versioning, callbacks)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Menu Controller (Closed ⇄ Open)            │  ← Flow Coordination
//! ├───────────────────────┬─────────────────────┤
//! │  Selection Tracker    │  Transform Engine   │  ← Capture & Rewrite
//! ├───────────────────────┴─────────────────────┤
//! │  Line/Column Index (Rope-based)             │  ← Offset Arithmetic
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## The context-menu flow
//!
//! ```rust
//! use compose_core::{Composer, HeaderLevel, MenuPoint, TransformRequest};
//!
//! let mut composer = Composer::new("first line\nsecond line");
//!
//! // The author selects both lines and right-clicks.
//! composer.set_selection(0, 22);
//! assert!(composer.open_menu(MenuPoint::new(240.0, 96.0)));
//!
//! // Choosing an action restores the selection, transforms it, and commits.
//! composer.choose(&TransformRequest::Header { level: HeaderLevel::H2 });
//! assert_eq!(composer.text(), "## first line\n## second line");
//! ```
//!
//! ## Pure engine use
//!
//! ```rust
//! use compose_core::{SelectionRange, TransformRequest, apply, locate};
//!
//! let buffer = "a\nb\nc";
//! assert_eq!(locate(buffer, 4).line, 3);
//!
//! let out = apply(
//!     buffer,
//!     SelectionRange::new(0, 5),
//!     buffer,
//!     &TransformRequest::TaskList,
//! );
//! assert_eq!(out, "- [ ] a\n- [ ] b\n- [ ] c");
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - offset ↔ line/column conversion
//! - [`selection`] - selection capture, restore, and the input-surface boundary
//! - [`transform`] - markdown transformation requests and the apply engine
//! - [`snippet`] - toolbar wrap/prefix insertions
//! - [`menu`] - the transformation menu state machine
//! - [`state`] - per-session composer state and change notifications
//!
//! # Coordinates
//!
//! All offsets are zero-based **character** (Unicode scalar value) indices into
//! an LF-normalized buffer; line/column positions are 1-based. Mapping to and
//! from a frontend's UTF-16 offsets is the embedder's concern.

pub mod line_index;
pub mod menu;
pub mod selection;
pub mod snippet;
pub mod state;
mod text;
pub mod transform;

pub use line_index::{LineColumn, LineIndex, find_line_breaks, locate, offset_at};
pub use menu::{MenuController, MenuPoint, MenuState};
pub use selection::{InputSurface, SelectionInfo, SelectionRange, SelectionTracker};
pub use snippet::{Snippet, SnippetEdit};
pub use state::{
    Composer, ComposerChange, ComposerChangeCallback, ComposerChangeType, TextAreaModel,
};
pub use transform::{
    CodeKind, HeaderLevel, IMAGE_PLACEHOLDER, LINK_PLACEHOLDER, ListKind, TABLE_TEMPLATE,
    TextStyle, TransformError, TransformRequest, apply, palette,
};
