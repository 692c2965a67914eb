//! Drag-and-drop state.
//!
//! A drag is an explicit two-step operation: the source editor hands out a
//! [`DragRequest`] and the platform later reports the outcome through
//! `finish_drag`. Nothing blocks inside the editor while the gesture runs.

use crate::clipboard::ClipboardPayload;
use crate::id::EditorId;
use crate::selection::SelectionRange;

/// Effects a drag source allows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropEffects {
    pub copy: bool,
    pub allow_move: bool,
}

impl DropEffects {
    pub fn permits(self, effect: DropEffect) -> bool {
        match effect {
            DropEffect::None => true,
            DropEffect::Copy => self.copy,
            DropEffect::Move => self.allow_move,
        }
    }
}

/// Outcome of a drop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
}

/// A drag the platform should start on behalf of an editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragRequest {
    pub source: EditorId,
    pub payload: ClipboardPayload,
    pub allowed: DropEffects,
}

impl DragRequest {
    /// What a drop target receives for this drag.
    pub fn to_drop_payload(&self) -> DropPayload {
        DropPayload {
            source: Some(self.source),
            payload: Some(self.payload.clone()),
        }
    }
}

/// Data offered to a drop target. `payload` is `None` when the dragged
/// data has no text format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropPayload {
    pub source: Option<EditorId>,
    pub payload: Option<ClipboardPayload>,
}

/// An outgoing drag started by this editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragState {
    /// The range being dragged, fixed for the whole gesture.
    pub range: SelectionRange,
    /// Where the text landed when it was dropped back onto this editor.
    pub self_drop: Option<SelectionRange>,
}

/// An incoming drag hovering over this editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DropTarget {
    pub(crate) from_self: bool,
    pub(crate) units: Option<Vec<u16>>,
    pub(crate) was_focused: bool,
}

impl DropTarget {
    #[inline]
    pub(crate) fn format_ok(&self) -> bool {
        self.units.is_some()
    }
}

/// Where the moved text's removal starts once a self-drop inserted
/// `inserted` units at `drop_pos`.
pub fn stale_range_after_drop(range: SelectionRange, drop_pos: u32, inserted: u32) -> SelectionRange {
    if drop_pos <= range.start {
        SelectionRange::new(range.start + inserted, range.end + inserted)
    } else {
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_source_only_copies() {
        let effects = DropEffects {
            copy: true,
            allow_move: false,
        };
        assert!(effects.permits(DropEffect::Copy));
        assert!(!effects.permits(DropEffect::Move));
    }

    #[test]
    fn drop_before_range_shifts_removal() {
        let range = SelectionRange::new(5, 8);
        assert_eq!(stale_range_after_drop(range, 2, 3), SelectionRange::new(8, 11));
        assert_eq!(stale_range_after_drop(range, 5, 3), SelectionRange::new(8, 11));
        assert_eq!(stale_range_after_drop(range, 9, 3), range);
    }
}
