//! Copying formatting from a discarded layout onto its replacement.
//!
//! Every walk is driven by [`PropertyKind::ALL`], so a property added to the
//! layout surface is migrated without touching this module.

use layout::{PropertyKind, TextLayout, TextRange};

/// Direction and distance a copied range moves between the old and the new
/// layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    Forward(u32),
    Backward(u32),
}

impl Shift {
    pub const NONE: Self = Self::Forward(0);

    #[inline]
    fn apply(self, pos: u32) -> u32 {
        match self {
            Self::Forward(n) => pos.saturating_add(n),
            Self::Backward(n) => pos.saturating_sub(n),
        }
    }
}

/// Document-wide paragraph properties.
pub fn copy_global_properties(old: &dyn TextLayout, new: &mut dyn TextLayout) {
    new.set_global_properties(old.global_properties());
}

/// Apply the full property set found at `old_pos` in `old` to
/// `[new_start, new_start + length)` in `new`. `length` is clipped so the
/// range never overflows.
pub fn copy_single_property_range(
    old: &dyn TextLayout,
    old_pos: u32,
    new: &mut dyn TextLayout,
    new_start: u32,
    length: u32,
) {
    let range = TextRange::new(new_start, length.min(u32::MAX - new_start));
    for kind in PropertyKind::ALL {
        let (value, _) = old.run_property(kind, old_pos);
        new.set_run_property(value, range);
    }
}

/// Copy `[begin, end)` of `old` onto `new`, shifted by `shift`, one
/// constant-format run at a time. A run ends where any property changes.
/// Returns the number of runs copied.
pub fn copy_ranged_properties(
    old: &dyn TextLayout,
    new: &mut dyn TextLayout,
    begin: u32,
    end: u32,
    shift: Shift,
) -> usize {
    let mut current = begin;
    let mut copied = 0;
    while current < end {
        let run_end = PropertyKind::ALL
            .iter()
            .map(|&kind| old.run_property(kind, current).1.end())
            .min()
            .unwrap_or(end)
            .max(current + 1);
        let length = run_end.min(end) - current;
        copy_single_property_range(old, current, new, shift.apply(current), length);
        current += length;
        copied += 1;
    }
    copied
}

/// Carry formatting across the insertion of `inserted` units at `pos`. The
/// inserted text takes the format of the unit before it (or of the first
/// unit when inserting at the start) and keeps its own run; equal runs
/// elsewhere are merged. Returns the number of runs copied.
pub fn migrate_after_insert(
    old: &dyn TextLayout,
    new: &mut dyn TextLayout,
    pos: u32,
    inserted: u32,
) -> usize {
    let old_len = old.text_len();
    copy_global_properties(old, new);

    let mut copied = 0;
    if pos > 0 {
        copied += copy_ranged_properties(old, new, 0, pos, Shift::NONE);
        copy_single_property_range(old, pos - 1, new, pos, inserted);
        copied += 1;
        copied += copy_ranged_properties(old, new, pos, old_len, Shift::Forward(inserted));
    } else {
        copy_single_property_range(old, 0, new, 0, inserted);
        copied += 1;
        copied += copy_ranged_properties(old, new, 0, old_len, Shift::Forward(inserted));
    }
    copy_tail(old, new);
    new.coalesce_runs(TextRange::new(pos, inserted));
    copied
}

/// Carry formatting across the removal of `[pos, pos + removed)`. Returns the
/// number of runs copied.
pub fn migrate_after_remove(
    old: &dyn TextLayout,
    new: &mut dyn TextLayout,
    pos: u32,
    removed: u32,
) -> usize {
    let old_len = old.text_len();
    copy_global_properties(old, new);

    let mut copied = copy_ranged_properties(old, new, 0, pos, Shift::NONE);
    copied += copy_ranged_properties(
        old,
        new,
        pos.saturating_add(removed),
        old_len,
        Shift::Backward(removed),
    );
    copy_tail(old, new);
    new.coalesce_runs(TextRange::new(pos, 0));
    copied
}

/// The format past the end of the text, used by text appended later.
fn copy_tail(old: &dyn TextLayout, new: &mut dyn TextLayout) {
    let new_len = new.text_len();
    copy_single_property_range(old, old.text_len(), new, new_len, u32::MAX);
}
