//! Plain value types shared by the layout, editing and painting crates.

/// Axis-aligned rectangle in layout coordinates (left, top, width, height).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A range of UTF-16 code units expressed as `start` + `length`.
///
/// This is the shape layout backends report run extents in; `length` may be
/// `u32::MAX - start` to mean "through the end of any text".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: u32,
    pub length: u32,
}

impl TextRange {
    #[inline]
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// Builds a range from `start` to `end` (exclusive). `end < start` yields an empty range.
    #[inline]
    pub fn from_bounds(start: u32, end: u32) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end, saturating at `u32::MAX`.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, pos: u32) -> bool {
        pos >= self.start && pos < self.end()
    }
}
