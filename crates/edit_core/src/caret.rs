//! Caret/selection state machine.
//!
//! The caret is a cluster-relative position: `index` is a code-unit offset
//! and `trailing` is how far past it the caret sits (zero for the leading
//! edge, the cluster length for the trailing edge). The absolute position is
//! their sum. The anchor is an absolute position; the selection is always
//! `[min(caret, anchor), max(caret, anchor))` clamped to the text.

use crate::buffer::{CR, LF};
use crate::selection::SelectionRange;
use layout::{LineMetrics, TextLayout};
use serde::Deserialize;

/// One caret transition.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum SelectionMode {
    /// One cluster left; a `\r\n` pair is crossed as a whole.
    Left,
    /// One cluster right; a `\r\n` pair is crossed as a whole.
    Right,
    /// The given number of code units left, no cluster snapping.
    LeftChar(u32),
    /// The given number of code units right, clamped to the text.
    RightChar(u32),
    Up,
    Down,
    LeftWord,
    RightWord,
    Home,
    End,
    First,
    Last,
    SelectAll,
    /// Leading edge of the given position.
    Leading(u32),
    /// Trailing edge of the cluster at the given position.
    Trailing(u32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaretPosition {
    pub index: u32,
    pub trailing: u32,
}

impl CaretPosition {
    #[inline]
    pub fn absolute(self) -> u32 {
        self.index.saturating_add(self.trailing)
    }

    #[inline]
    pub fn is_trailing(self) -> bool {
        self.trailing > 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaretState {
    caret: CaretPosition,
    anchor: u32,
}

impl CaretState {
    #[inline]
    pub fn caret(&self) -> CaretPosition {
        self.caret
    }

    #[inline]
    pub fn anchor(&self) -> u32 {
        self.anchor
    }

    #[inline]
    pub fn absolute(&self) -> u32 {
        self.caret.absolute()
    }

    pub fn selection_range(&self, len: u32) -> SelectionRange {
        SelectionRange::new(self.anchor.min(len), self.absolute().min(len))
    }

    /// Pull caret and anchor back inside `[0, len]` after a mutation.
    pub fn clamp(&mut self, len: u32) {
        if self.caret.absolute() > len {
            self.caret = CaretPosition {
                index: self.caret.index.min(len),
                trailing: 0,
            };
        }
        self.anchor = self.anchor.min(len);
    }

    /// Keep caret and anchor on the same text after `len` units were
    /// inserted at `pos`. Positions at or after `pos` advance.
    pub fn shift_for_insert(&mut self, pos: u32, len: u32) {
        if self.caret.index >= pos {
            self.caret.index += len;
        } else if self.caret.absolute() >= pos {
            self.caret = CaretPosition {
                index: self.caret.absolute() + len,
                trailing: 0,
            };
        }
        if self.anchor >= pos {
            self.anchor += len;
        }
    }

    /// Keep caret and anchor on the same text after `[start, start + len)`
    /// was removed. Positions inside the range collapse to `start`.
    pub fn shift_for_remove(&mut self, start: u32, len: u32) {
        let end = start + len;
        let map = |p: u32| {
            if p >= end {
                p - len
            } else if p > start {
                start
            } else {
                p
            }
        };
        if self.caret.index >= end {
            self.caret.index -= len;
        } else if self.caret.absolute() > start {
            self.caret = CaretPosition {
                index: map(self.caret.absolute()),
                trailing: 0,
            };
        }
        self.anchor = map(self.anchor);
    }

    /// Apply `mode`. Unless `extend` is set the anchor follows the caret,
    /// collapsing the selection. Returns whether the caret or the anchor
    /// moved.
    pub fn apply(
        &mut self,
        mode: SelectionMode,
        layout: &dyn TextLayout,
        text: &[u16],
        mut extend: bool,
    ) -> bool {
        let len = text.len() as u32;
        let old_absolute = self.absolute();
        let old_anchor = self.anchor;

        match mode {
            SelectionMode::Left => {
                self.caret.index = self.caret.absolute();
                self.caret.trailing = 0;
                if self.caret.index > 0 {
                    self.caret.index -= 1;
                    self.align_to_cluster(layout, false, true);
                    let abs = self.absolute();
                    if is_inside_crlf(text, abs) {
                        self.caret.index = abs - 1;
                        self.align_to_cluster(layout, false, true);
                    }
                }
            }
            SelectionMode::Right => {
                self.caret.index = self.caret.absolute();
                self.align_to_cluster(layout, true, true);
                let abs = self.absolute();
                if is_inside_crlf(text, abs) {
                    self.caret.index = abs + 1;
                    self.align_to_cluster(layout, false, true);
                }
            }
            SelectionMode::LeftChar(advance) => {
                let abs = self.absolute();
                self.caret = CaretPosition {
                    index: abs - advance.min(abs),
                    trailing: 0,
                };
            }
            SelectionMode::RightChar(advance) => {
                let target = self.absolute().saturating_add(advance);
                let hit = layout.hit_test_text_position(target, false).metrics;
                self.caret = CaretPosition {
                    index: target
                        .min(hit.text_position.saturating_add(hit.length))
                        .min(len),
                    trailing: 0,
                };
            }
            SelectionMode::Up | SelectionMode::Down => {
                self.move_vertically(layout, mode == SelectionMode::Up);
            }
            SelectionMode::LeftWord | SelectionMode::RightWord => {
                self.move_by_word(layout, mode == SelectionMode::LeftWord);
            }
            SelectionMode::Home | SelectionMode::End => {
                let lines = layout.line_metrics();
                let (line, line_start) = line_from_position(&lines, self.caret.index);
                self.caret = CaretPosition {
                    index: line_start,
                    trailing: 0,
                };
                if mode == SelectionMode::End {
                    let metrics = lines.get(line).copied().unwrap_or_default();
                    let content = metrics.length.saturating_sub(metrics.newline_length);
                    // An empty line keeps the caret at its start.
                    if content > 0 {
                        self.caret.index = line_start + content - 1;
                        self.align_to_cluster(layout, true, false);
                    }
                }
            }
            SelectionMode::First => {
                self.caret = CaretPosition::default();
            }
            SelectionMode::SelectAll | SelectionMode::Last => {
                if mode == SelectionMode::SelectAll {
                    self.anchor = 0;
                    extend = true;
                }
                self.caret = CaretPosition {
                    index: u32::MAX,
                    trailing: 0,
                };
                self.align_to_cluster(layout, true, false);
            }
            SelectionMode::Leading(pos) => {
                self.caret = CaretPosition {
                    index: pos.min(len),
                    trailing: 0,
                };
            }
            SelectionMode::Trailing(pos) => {
                self.caret.index = pos;
                self.align_to_cluster(layout, true, false);
            }
        }

        self.clamp(len);
        let absolute = self.absolute();
        if !extend {
            self.anchor = absolute;
        }
        let moved = absolute != old_absolute || self.anchor != old_anchor;
        log::trace!(
            target: "edit.caret",
            "{mode:?}: {old_absolute} -> {absolute}, anchor {old_anchor} -> {}, moved={moved}",
            self.anchor
        );
        moved
    }

    /// Snap the caret to the cluster containing `index`. With `trailing` the
    /// caret lands on the cluster's trailing edge. With `skip_zero_width` a
    /// zero-width cluster (a line break) is stepped over so the caret never
    /// rests inside it.
    fn align_to_cluster(&mut self, layout: &dyn TextLayout, trailing: bool, skip_zero_width: bool) {
        let hit = layout.hit_test_text_position(self.caret.index, false).metrics;
        self.caret.index = hit.text_position;
        self.caret.trailing = if trailing { hit.length } else { 0 };
        if skip_zero_width && hit.width == 0.0 {
            self.caret.index += self.caret.trailing;
            self.caret.trailing = 0;
        }
    }

    fn move_vertically(&mut self, layout: &dyn TextLayout, up: bool) {
        let lines = layout.line_metrics();
        if lines.is_empty() {
            return;
        }
        let (mut line, mut line_start) = line_from_position(&lines, self.caret.index);
        if up {
            if line == 0 {
                return;
            }
            line -= 1;
            line_start -= lines[line].length;
        } else {
            line_start += lines[line].length;
            line += 1;
            if line >= lines.len() {
                return;
            }
        }

        let x = layout
            .hit_test_text_position(self.caret.index, self.caret.is_trailing())
            .x;
        let y = layout.hit_test_text_position(line_start, false).y;
        let hit = layout.hit_test_point(x, y);
        self.caret = CaretPosition {
            index: hit.metrics.text_position,
            trailing: if hit.is_trailing { hit.metrics.length } else { 0 },
        };
    }

    fn move_by_word(&mut self, layout: &dyn TextLayout, left: bool) {
        let clusters = layout.cluster_metrics();
        if clusters.is_empty() {
            return;
        }
        let origin = self.absolute();
        let mut position = 0u32;

        if left {
            self.caret = CaretPosition::default();
            for cluster in &clusters {
                position += cluster.length;
                if cluster.can_wrap_after {
                    if position >= origin {
                        break;
                    }
                    self.caret.index = position;
                }
            }
        } else {
            for cluster in &clusters {
                self.caret = CaretPosition {
                    index: position,
                    trailing: cluster.length,
                };
                if position >= origin && cluster.can_wrap_after {
                    break;
                }
                position += cluster.length;
            }
        }
    }
}

/// `pos` sits between the `\r` and the `\n` of a line break.
fn is_inside_crlf(text: &[u16], pos: u32) -> bool {
    let i = pos as usize;
    i >= 1 && i < text.len() && text[i - 1] == CR && text[i] == LF
}

/// Line holding `pos` and the position its first unit sits at. Positions
/// past the last line resolve to the last line.
pub fn line_from_position(lines: &[LineMetrics], pos: u32) -> (usize, u32) {
    let mut line_start = 0;
    let mut next_start = 0;
    let mut line = 0;
    while line < lines.len() {
        line_start = next_start;
        next_start = line_start + lines[line].length;
        if next_start > pos {
            break;
        }
        line += 1;
    }
    (line.min(lines.len().saturating_sub(1)), line_start)
}
