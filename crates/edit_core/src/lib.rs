//! # edit_core
//!
//! UI-agnostic editable-text engine.
//!
//! - [`TextBuffer`]: the UTF-16 text and its read-only/multiline/rich flags
//! - [`LayoutAdapter`]: rebuilds the layout on every edit and migrates run
//!   formatting from the previous one
//! - [`CaretState`]: cluster-aware caret and selection transitions
//! - [`ClipboardPayload`] and the drag types: text transfer
//! - [`EditableText`]: the component tying them together
//!
//! Nothing here depends on a windowing or graphics crate. Hosts supply an
//! [`EditHost`] and a [`Clipboard`] per call and a [`LayoutFactory`] at
//! construction.
//!
//! [`LayoutFactory`]: layout::LayoutFactory

mod buffer;
mod caret;
mod clipboard;
mod config;
mod drag;
mod editable;
mod error;
mod host;
mod id;
mod keys;
pub mod migrate;
mod relayout;
mod render;
mod selection;

pub use buffer::{TextBuffer, TextFlags, encode_char};
pub use caret::{CaretPosition, CaretState, SelectionMode, line_from_position};
pub use clipboard::{Clipboard, ClipboardPayload, CopyFormat, MemoryClipboard};
pub use config::EditConfig;
pub use drag::{DragRequest, DragState, DropEffect, DropEffects, DropPayload};
pub use editable::EditableText;
pub use error::{ClipboardError, ConfigError, EditError, PayloadError};
pub use host::{EditCtx, EditHost, NullHost};
pub use id::EditorId;
pub use keys::{KeyCode, Modifiers};
pub use relayout::{LayoutAdapter, TextChange};
pub use render::{RenderFrame, RenderGlyph, RenderLine};
pub use selection::SelectionRange;
