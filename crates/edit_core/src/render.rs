//! Per-frame geometry handed to a painter.

use core_types::{Point, Rectangle};

/// One visible cluster, positioned by the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderGlyph {
    pub x: f32,
    pub text: String,
}

/// One laid-out line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderLine {
    /// Top-left corner of the line's first cluster.
    pub origin: Point,
    /// Line content without its line break.
    pub text: String,
    /// Non-whitespace clusters of the line.
    pub glyphs: Vec<RenderGlyph>,
}

/// Everything needed to draw an editor: selection highlights first, then the
/// text, then the caret.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    pub highlights: Vec<Rectangle>,
    pub lines: Vec<RenderLine>,
    /// Present while the editor has focus.
    pub caret: Option<Rectangle>,
    pub selection_color: [u8; 4],
}

impl RenderFrame {
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty() && self.caret.is_none() && self.lines.iter().all(|l| l.text.is_empty())
    }
}
