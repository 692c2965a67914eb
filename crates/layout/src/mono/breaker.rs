//! Greedy line breaking over clusters.

use super::cluster::{Cluster, ClusterKind};

/// A laid-out line: a contiguous range of clusters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Line {
    pub(crate) first_cluster: usize,
    /// Exclusive.
    pub(crate) end_cluster: usize,
    pub(crate) start: u32,
    pub(crate) len: u32,
    pub(crate) newline_len: u32,
    pub(crate) trailing_whitespace_len: u32,
    /// Advance of the line excluding hanging trailing whitespace.
    pub(crate) width: f32,
    pub(crate) top: f32,
    pub(crate) offset_x: f32,
}

fn make_line(clusters: &[Cluster], widths: &[f32], first: usize, end: usize, start: u32) -> Line {
    let span = &clusters[first..end];
    let len: u32 = span.iter().map(|c| c.len).sum();
    let newline_len = span
        .last()
        .filter(|c| c.kind == ClusterKind::Newline)
        .map(|c| c.len)
        .unwrap_or(0);

    let mut trailing_whitespace_len = 0;
    let mut content_end = end;
    for (i, c) in span.iter().enumerate().rev() {
        if !c.is_whitespace() {
            break;
        }
        trailing_whitespace_len += c.len;
        content_end = first + i;
    }
    let width = widths[first..content_end].iter().sum();

    Line {
        first_cluster: first,
        end_cluster: end,
        start,
        len,
        newline_len,
        trailing_whitespace_len,
        width,
        top: 0.0,
        offset_x: 0.0,
    }
}

/// Break `clusters` into lines no wider than `max_width` (when `wrap`),
/// honouring hard breaks. Always yields at least one line; text ending in a
/// newline yields a trailing empty line.
pub(crate) fn break_lines(
    clusters: &[Cluster],
    widths: &[f32],
    max_width: f32,
    wrap: bool,
) -> Vec<Line> {
    debug_assert_eq!(clusters.len(), widths.len());

    let n = clusters.len();
    let mut lines = Vec::new();
    let mut line_first = 0usize;
    let mut line_start = 0u32;
    let mut x = 0.0f32;
    let mut last_break: Option<usize> = None;
    let mut i = 0usize;

    while i < n {
        let c = &clusters[i];

        if c.kind == ClusterKind::Newline {
            lines.push(make_line(clusters, widths, line_first, i + 1, line_start));
            line_start = c.end();
            line_first = i + 1;
            x = 0.0;
            last_break = None;
            i += 1;
            continue;
        }

        // Whitespace hangs past the edge instead of forcing a break.
        let overflows = wrap && !c.is_whitespace() && x + widths[i] > max_width;
        if overflows && i > line_first {
            let end = match last_break {
                Some(b) if b >= line_first => b + 1,
                _ => i,
            };
            lines.push(make_line(clusters, widths, line_first, end, line_start));
            line_start = clusters[end].start;
            line_first = end;
            x = 0.0;
            last_break = None;
            i = end;
            continue;
        }

        x += widths[i];
        if c.can_wrap_after {
            last_break = Some(i);
        }
        i += 1;
    }

    if line_first < n || lines.last().is_none_or(|l: &Line| l.newline_len > 0) {
        lines.push(make_line(clusters, widths, line_first, n, line_start));
    }
    lines
}
