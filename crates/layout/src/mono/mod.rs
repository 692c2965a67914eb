//! Fixed-pitch reference layout backend.
//!
//! Every glyph cluster advances half an em, tabs advance to the next tab stop
//! (four cells unless an incremental tab stop is set) and newline clusters
//! have no width. Good enough to drive caret and selection logic
//! deterministically; a platform shaping engine plugs in through the same
//! traits.

mod breaker;
mod cluster;

pub(crate) use breaker::Line;
pub(crate) use cluster::{Cluster, ClusterKind};

use crate::error::LayoutError;
use crate::format::{GlobalProperties, LineSpacingMethod, TextAlignment, TextFormat, WordWrapping};
use crate::property::{PropertyKind, RunProperty, RunStore};
use crate::text::{
    ClusterMetrics, HitTestMetrics, LayoutFactory, LineMetrics, PointHit, PositionHit, TextLayout,
};
use core_types::TextRange;

/// Longest text (in UTF-16 code units) a [`MonoLayout`] accepts.
pub const MAX_TEXT_LEN: usize = (u32::MAX / 2) as usize;

#[derive(Clone, Debug)]
pub struct MonoLayout {
    text_len: u32,
    format: TextFormat,
    globals: GlobalProperties,
    max_width: f32,
    max_height: f32,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) widths: Vec<f32>,
    pub(crate) lefts: Vec<f32>,
    pub(crate) cluster_line: Vec<usize>,
    pub(crate) lines: Vec<Line>,
    runs: RunStore,
}

impl MonoLayout {
    pub fn new(
        text: &[u16],
        format: &TextFormat,
        max_width: f32,
        max_height: f32,
    ) -> Result<Self, LayoutError> {
        if !(max_width.is_finite() && max_height.is_finite()) || max_width < 0.0 || max_height < 0.0
        {
            return Err(LayoutError::InvalidBox {
                width: max_width,
                height: max_height,
            });
        }
        if text.len() > MAX_TEXT_LEN {
            return Err(LayoutError::TooLong { len: text.len() });
        }

        let mut layout = Self {
            text_len: text.len() as u32,
            format: format.clone(),
            globals: format.globals,
            max_width,
            max_height,
            clusters: cluster::segment_clusters(text),
            widths: Vec::new(),
            lefts: Vec::new(),
            cluster_line: Vec::new(),
            lines: Vec::new(),
            runs: RunStore::new(format),
        };
        layout.reflow();
        Ok(layout)
    }

    /// Width of one glyph cell.
    pub fn cell_width(&self) -> f32 {
        self.format.font_size * 0.5
    }

    pub fn line_height(&self) -> f32 {
        let spacing = self.globals.line_spacing;
        match spacing.method {
            LineSpacingMethod::Uniform if spacing.spacing > 0.0 => spacing.spacing,
            _ => self.format.font_size * 1.2,
        }
    }

    fn tab_width(&self) -> f32 {
        if self.globals.incremental_tab_stop > 0.0 {
            self.globals.incremental_tab_stop
        } else {
            self.cell_width() * 4.0
        }
    }

    /// Runs of `kind` intersecting `[0, text_len)`.
    pub fn runs(&self, kind: PropertyKind) -> Vec<(TextRange, RunProperty)> {
        self.runs
            .list(kind)
            .runs_in(TextRange::new(0, self.text_len))
    }

    fn reflow(&mut self) {
        let cell = self.cell_width();
        let tab = self.tab_width();
        self.widths = self
            .clusters
            .iter()
            .map(|c| match c.kind {
                ClusterKind::Newline => 0.0,
                ClusterKind::Tab => tab,
                ClusterKind::Glyph | ClusterKind::Space => cell,
            })
            .collect();

        let wrap = self.globals.word_wrapping == WordWrapping::Wrap;
        let mut lines = breaker::break_lines(&self.clusters, &self.widths, self.max_width, wrap);

        let line_h = self.line_height();
        self.lefts = vec![0.0; self.clusters.len()];
        self.cluster_line = vec![0; self.clusters.len()];
        for (li, line) in lines.iter_mut().enumerate() {
            line.top = li as f32 * line_h;
            let slack = (self.max_width - line.width).max(0.0);
            line.offset_x = match self.globals.text_alignment {
                TextAlignment::Leading | TextAlignment::Justified => 0.0,
                TextAlignment::Trailing => slack,
                TextAlignment::Center => slack * 0.5,
            };

            let mut x = line.offset_x;
            for ci in line.first_cluster..line.end_cluster {
                self.lefts[ci] = x;
                self.cluster_line[ci] = li;
                x += self.widths[ci];
            }
        }
        self.lines = lines;

        log::trace!(
            target: "edit.layout",
            "reflow: {} clusters, {} lines, box {}x{}",
            self.clusters.len(),
            self.lines.len(),
            self.max_width,
            self.max_height
        );
    }
}

impl TextLayout for MonoLayout {
    fn text_len(&self) -> u32 {
        self.text_len
    }

    fn max_width(&self) -> f32 {
        self.max_width
    }

    fn max_height(&self) -> f32 {
        self.max_height
    }

    fn hit_test_text_position(&self, pos: u32, trailing: bool) -> PositionHit {
        self.position_hit(pos, trailing)
    }

    fn hit_test_point(&self, x: f32, y: f32) -> PointHit {
        self.point_hit(x, y)
    }

    fn hit_test_text_range(
        &self,
        start: u32,
        length: u32,
        origin_x: f32,
        origin_y: f32,
    ) -> Vec<HitTestMetrics> {
        self.range_hits(start, length, origin_x, origin_y)
    }

    fn line_metrics(&self) -> Vec<LineMetrics> {
        let line_h = self.line_height();
        self.lines
            .iter()
            .map(|l| LineMetrics {
                length: l.len,
                trailing_whitespace_length: l.trailing_whitespace_len,
                newline_length: l.newline_len,
                height: line_h,
                baseline: line_h * 0.8,
            })
            .collect()
    }

    fn cluster_metrics(&self) -> Vec<ClusterMetrics> {
        self.clusters
            .iter()
            .zip(&self.widths)
            .map(|(c, &width)| ClusterMetrics {
                length: c.len,
                width,
                can_wrap_after: c.can_wrap_after,
                is_whitespace: c.is_whitespace(),
                is_newline: c.kind == ClusterKind::Newline,
            })
            .collect()
    }

    fn run_property(&self, kind: PropertyKind, pos: u32) -> (RunProperty, TextRange) {
        self.runs.get(kind, pos)
    }

    fn set_run_property(&mut self, value: RunProperty, range: TextRange) {
        self.runs.set(value, range);
    }

    fn coalesce_runs(&mut self, keep: TextRange) {
        self.runs.coalesce(keep);
    }

    fn global_properties(&self) -> GlobalProperties {
        self.globals
    }

    fn set_global_properties(&mut self, props: GlobalProperties) {
        if self.globals != props {
            self.globals = props;
            self.reflow();
        }
    }
}

/// Factory for [`MonoLayout`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoLayoutFactory;

impl LayoutFactory for MonoLayoutFactory {
    fn create_layout(
        &self,
        text: &[u16],
        format: &TextFormat,
        max_width: f32,
        max_height: f32,
    ) -> Result<Box<dyn TextLayout>, LayoutError> {
        let layout = MonoLayout::new(text, format, max_width, max_height)?;
        Ok(Box::new(layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FontWeight;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn layout(s: &str, w: f32) -> MonoLayout {
        // font 10px: cell 5px, line 12px
        let format = TextFormat {
            font_size: 10.0,
            ..TextFormat::default()
        };
        MonoLayout::new(&utf16(s), &format, w, 100.0).unwrap()
    }

    #[test]
    fn rejects_non_finite_box() {
        let err = MonoLayout::new(&[], &TextFormat::default(), f32::NAN, 1.0).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidBox { .. }));
    }

    #[test]
    fn line_metrics_report_newlines() {
        let l = layout("ab\r\ncd", 100.0);
        let metrics = l.line_metrics();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].length, 4);
        assert_eq!(metrics[0].newline_length, 2);
        assert_eq!(metrics[1].length, 2);
        assert_eq!(metrics[1].newline_length, 0);
    }

    #[test]
    fn cluster_metrics_sum_to_text_length() {
        let l = layout("a\u{1F600} b\r\n", 100.0);
        let total: u32 = l.cluster_metrics().iter().map(|c| c.length).sum();
        assert_eq!(total, l.text_len());
    }

    #[test]
    fn centered_alignment_offsets_lines() {
        let mut l = layout("ab", 100.0);
        let mut g = l.global_properties();
        g.text_alignment = TextAlignment::Center;
        l.set_global_properties(g);
        // two cells of 5px in a 100px box
        assert_eq!(l.hit_test_text_position(0, false).x, 45.0);
    }

    #[test]
    fn no_wrap_keeps_a_single_line() {
        let mut l = layout("aaaa bbbb", 20.0);
        assert_eq!(l.line_metrics().len(), 2);
        let mut g = l.global_properties();
        g.word_wrapping = WordWrapping::NoWrap;
        l.set_global_properties(g);
        assert_eq!(l.line_metrics().len(), 1);
    }

    #[test]
    fn runs_are_reported_within_text() {
        let mut l = layout("hello", 100.0);
        l.set_run_property(
            RunProperty::FontWeight(FontWeight::BOLD),
            TextRange::new(1, 2),
        );
        let runs = l.runs(PropertyKind::FontWeight);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[2].0, TextRange::new(3, 2));
    }
}
