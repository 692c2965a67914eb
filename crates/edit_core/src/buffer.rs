//! The mutable UTF-16 text of an editor and its mode flags.

use crate::error::EditError;
use crate::selection::SelectionRange;

pub(crate) const CR: u16 = b'\r' as u16;
pub(crate) const LF: u16 = b'\n' as u16;

/// Mode flags of a [`TextBuffer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextFlags {
    /// Mutations are rejected with [`EditError::ReadOnly`].
    pub read_only: bool,
    /// Return inserts a line break and Up/Down navigate lines.
    pub multiline: bool,
    /// Run formatting is migrated across edits.
    pub rich: bool,
}

/// Ordered UTF-16 code units. Mutated only through [`insert`](Self::insert)
/// and [`remove`](Self::remove).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    units: Vec<u16>,
    flags: TextFlags,
}

impl TextBuffer {
    pub fn new(flags: TextFlags) -> Self {
        Self {
            units: Vec::new(),
            flags,
        }
    }

    pub fn from_text(text: &str, flags: TextFlags) -> Self {
        Self {
            units: text.encode_utf16().collect(),
            flags,
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.units.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[inline]
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// The text as a `String`; unpaired surrogates become U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }

    #[inline]
    pub fn flags(&self) -> TextFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: TextFlags) {
        self.flags = flags;
    }

    /// Splice `units` in at `pos` (clamped to the length). Returns the number
    /// of units inserted.
    pub fn insert(&mut self, pos: u32, units: &[u16]) -> Result<u32, EditError> {
        if self.flags.read_only {
            log::warn!(target: "edit.buffer", "insert rejected: read-only");
            return Err(EditError::ReadOnly);
        }
        let at = (pos as usize).min(self.units.len());
        self.units.splice(at..at, units.iter().copied());
        log::trace!(target: "edit.buffer", "insert {} units at {at}", units.len());
        Ok(units.len() as u32)
    }

    /// Delete `[pos, pos + len)` (clipped to the text). Returns the removed
    /// units so the caller can undo the edit.
    pub fn remove(&mut self, pos: u32, len: u32) -> Result<Vec<u16>, EditError> {
        if self.flags.read_only {
            log::warn!(target: "edit.buffer", "remove rejected: read-only");
            return Err(EditError::ReadOnly);
        }
        let range = self.clip(pos, len);
        let removed: Vec<u16> = self.units.drain(range.start as usize..range.end as usize).collect();
        log::trace!(target: "edit.buffer", "remove {} units at {}", removed.len(), range.start);
        Ok(removed)
    }

    /// Replace the whole text regardless of the read-only flag. Returns the
    /// previous content.
    pub fn replace_all(&mut self, units: Vec<u16>) -> Vec<u16> {
        std::mem::replace(&mut self.units, units)
    }

    /// Undo a successful [`insert`](Self::insert) of `len` units at `pos`.
    pub(crate) fn revert_insert(&mut self, pos: u32, len: u32) {
        let range = self.clip(pos, len);
        self.units.drain(range.start as usize..range.end as usize);
    }

    /// Undo a successful [`remove`](Self::remove) at `pos`.
    pub(crate) fn revert_remove(&mut self, pos: u32, removed: &[u16]) {
        let at = (pos as usize).min(self.units.len());
        self.units.splice(at..at, removed.iter().copied());
    }

    /// Whether a surrogate pair ends right before `pos`.
    pub fn is_surrogate_pair_before(&self, pos: u32) -> bool {
        let i = pos as usize;
        i >= 2
            && i <= self.units.len()
            && (0xD800..0xDC00).contains(&self.units[i - 2])
            && (0xDC00..0xE000).contains(&self.units[i - 1])
    }

    /// `[pos, pos + len)` clipped to the text.
    pub fn clip(&self, pos: u32, len: u32) -> SelectionRange {
        let total = self.len();
        let start = pos.min(total);
        let end = pos.saturating_add(len).min(total);
        SelectionRange::new(start, end)
    }

    /// Whether a `\r\n` pair starts at `pos`.
    pub fn is_crlf_at(&self, pos: u32) -> bool {
        let i = pos as usize;
        self.units.get(i) == Some(&CR) && self.units.get(i + 1) == Some(&LF)
    }

    /// Whether a `\r\n` pair ends right before `pos`.
    pub fn is_crlf_before(&self, pos: u32) -> bool {
        pos >= 2 && self.is_crlf_at(pos - 2)
    }
}

/// UTF-16 encoding of one typed character; characters outside the Basic
/// Multilingual Plane become a surrogate pair.
pub fn encode_char(ch: char) -> Vec<u16> {
    let mut buf = [0u16; 2];
    ch.encode_utf16(&mut buf).to_vec()
}
