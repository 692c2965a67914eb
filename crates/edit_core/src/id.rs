//! Identity of an editor instance.
//!
//! Drag payloads carry the id of the editor that started the drag so a drop
//! target can tell a self-drop (a move inside one buffer) from a foreign one.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique identifier for an [`EditableText`](crate::EditableText).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EditorId(u64);

impl EditorId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<EditorId> for u64 {
    #[inline]
    fn from(id: EditorId) -> Self {
        id.as_raw()
    }
}
