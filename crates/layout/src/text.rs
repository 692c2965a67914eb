use crate::error::LayoutError;
use crate::format::{GlobalProperties, TextFormat};
use crate::property::{PropertyKind, RunProperty};
use core_types::TextRange;

/// Geometry of one cluster (or one highlighted span) reported by hit-testing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitTestMetrics {
    /// First code unit of the cluster or span.
    pub text_position: u32,
    /// Number of code units it covers. Zero for the end-of-text position.
    pub length: u32,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub is_text: bool,
}

/// Result of hit-testing a text position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionHit {
    pub x: f32,
    pub y: f32,
    pub metrics: HitTestMetrics,
}

/// Result of hit-testing a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointHit {
    /// The point lies on the trailing half of the cluster.
    pub is_trailing: bool,
    /// The point lies inside the text's bounds.
    pub is_inside: bool,
    pub metrics: HitTestMetrics,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Code units on the line, including trailing whitespace and newline.
    pub length: u32,
    pub trailing_whitespace_length: u32,
    /// Code units of the line's terminating newline (0, 1 or 2).
    pub newline_length: u32,
    pub height: f32,
    pub baseline: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClusterMetrics {
    pub length: u32,
    pub width: f32,
    pub can_wrap_after: bool,
    pub is_whitespace: bool,
    pub is_newline: bool,
}

/// A formatted, hit-testable representation of a text against a fixed box.
///
/// Layouts are rebuilt, not edited, when the text changes; only formatting
/// can be changed in place. All positions are UTF-16 code-unit offsets.
pub trait TextLayout {
    fn text_len(&self) -> u32;

    fn max_width(&self) -> f32;

    fn max_height(&self) -> f32;

    /// Caret coordinates for `pos` (leading or trailing edge) plus the
    /// metrics of the cluster containing it.
    fn hit_test_text_position(&self, pos: u32, trailing: bool) -> PositionHit;

    /// The text position nearest to a point in layout coordinates.
    fn hit_test_point(&self, x: f32, y: f32) -> PointHit;

    /// Highlight rectangles (one per line) covering `[start, start + length)`,
    /// offset by `origin`. A zero `length` yields a single zero-width span at
    /// `start`.
    fn hit_test_text_range(
        &self,
        start: u32,
        length: u32,
        origin_x: f32,
        origin_y: f32,
    ) -> Vec<HitTestMetrics>;

    fn line_metrics(&self) -> Vec<LineMetrics>;

    fn cluster_metrics(&self) -> Vec<ClusterMetrics>;

    /// Value of `kind` at `pos` and the extent of the run holding it.
    fn run_property(&self, kind: PropertyKind, pos: u32) -> (RunProperty, TextRange);

    fn set_run_property(&mut self, value: RunProperty, range: TextRange);

    /// Merge neighbouring runs holding equal values, except across the
    /// boundaries at `keep.start` and `keep.end()`.
    fn coalesce_runs(&mut self, keep: TextRange);

    fn global_properties(&self) -> GlobalProperties;

    fn set_global_properties(&mut self, props: GlobalProperties);
}

/// Creates layouts. Injected into editors at construction.
pub trait LayoutFactory {
    fn create_layout(
        &self,
        text: &[u16],
        format: &TextFormat,
        max_width: f32,
        max_height: f32,
    ) -> Result<Box<dyn TextLayout>, LayoutError>;
}
