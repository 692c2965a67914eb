//! Text selection representation.

use core_types::TextRange;

/// A selection as a range of UTF-16 code units.
///
/// Always normalized so that `start <= end`. Produced from the caret and the
/// anchor, clamped to the buffer length on every read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// First selected unit (inclusive).
    pub start: u32,
    /// End of the selection (exclusive).
    pub end: u32,
}

impl SelectionRange {
    /// Create a range from two positions in either order.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether `pos` lies inside `[start, end)`.
    #[inline]
    pub fn contains(&self, pos: u32) -> bool {
        pos >= self.start && pos < self.end
    }

    #[inline]
    pub fn to_text_range(self) -> TextRange {
        TextRange::from_bounds(self.start, self.end)
    }

    /// The selected units of `text`, clipped to its length.
    pub fn slice<'a>(&self, text: &'a [u16]) -> &'a [u16] {
        let len = text.len();
        let end = (self.end as usize).min(len);
        let start = (self.start as usize).min(end);
        &text[start..end]
    }
}
