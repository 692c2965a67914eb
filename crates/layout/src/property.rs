//! Ranged (per-run) formatting properties.
//!
//! Every property a layout can vary across the text is one variant of
//! [`RunProperty`]; [`PropertyKind::ALL`] lists them so run migration can be
//! written as a loop instead of one getter/setter pair per property.

use crate::format::{FontStretch, FontStyle, FontWeight, TextFormat};
use core_types::TextRange;

/// Opaque handle to a client drawing effect (brush, renderer context, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectId(pub u32);

/// Opaque handle to an inline object (image, embedded control, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InlineObjectId(pub u32);

/// Opaque handle to a set of OpenType typographic features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypographyId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    FontFamily,
    FontWeight,
    FontStyle,
    FontStretch,
    FontSize,
    Underline,
    Strikethrough,
    DrawingEffect,
    InlineObject,
    Locale,
    Typography,
}

impl PropertyKind {
    pub const COUNT: usize = 11;

    pub const ALL: [PropertyKind; Self::COUNT] = [
        PropertyKind::FontFamily,
        PropertyKind::FontWeight,
        PropertyKind::FontStyle,
        PropertyKind::FontStretch,
        PropertyKind::FontSize,
        PropertyKind::Underline,
        PropertyKind::Strikethrough,
        PropertyKind::DrawingEffect,
        PropertyKind::InlineObject,
        PropertyKind::Locale,
        PropertyKind::Typography,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RunProperty {
    FontFamily(String),
    FontWeight(FontWeight),
    FontStyle(FontStyle),
    FontStretch(FontStretch),
    FontSize(f32),
    Underline(bool),
    Strikethrough(bool),
    DrawingEffect(Option<EffectId>),
    InlineObject(Option<InlineObjectId>),
    Locale(String),
    Typography(Option<TypographyId>),
}

impl RunProperty {
    pub fn kind(&self) -> PropertyKind {
        match self {
            RunProperty::FontFamily(_) => PropertyKind::FontFamily,
            RunProperty::FontWeight(_) => PropertyKind::FontWeight,
            RunProperty::FontStyle(_) => PropertyKind::FontStyle,
            RunProperty::FontStretch(_) => PropertyKind::FontStretch,
            RunProperty::FontSize(_) => PropertyKind::FontSize,
            RunProperty::Underline(_) => PropertyKind::Underline,
            RunProperty::Strikethrough(_) => PropertyKind::Strikethrough,
            RunProperty::DrawingEffect(_) => PropertyKind::DrawingEffect,
            RunProperty::InlineObject(_) => PropertyKind::InlineObject,
            RunProperty::Locale(_) => PropertyKind::Locale,
            RunProperty::Typography(_) => PropertyKind::Typography,
        }
    }

    /// The value a freshly created layout reports for `kind`.
    pub fn default_for(kind: PropertyKind, format: &TextFormat) -> Self {
        match kind {
            PropertyKind::FontFamily => RunProperty::FontFamily(format.font_family.clone()),
            PropertyKind::FontWeight => RunProperty::FontWeight(format.weight),
            PropertyKind::FontStyle => RunProperty::FontStyle(format.style),
            PropertyKind::FontStretch => RunProperty::FontStretch(format.stretch),
            PropertyKind::FontSize => RunProperty::FontSize(format.font_size),
            PropertyKind::Underline => RunProperty::Underline(false),
            PropertyKind::Strikethrough => RunProperty::Strikethrough(false),
            PropertyKind::DrawingEffect => RunProperty::DrawingEffect(None),
            PropertyKind::InlineObject => RunProperty::InlineObject(None),
            PropertyKind::Locale => RunProperty::Locale(format.locale.clone()),
            PropertyKind::Typography => RunProperty::Typography(None),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Run {
    start: u32,
    value: RunProperty,
}

/// Runs of one property covering `[0, u32::MAX)`.
///
/// Runs keep the extents they were assigned with until [`coalesce`]
/// merges equal neighbours.
///
/// [`coalesce`]: RunList::coalesce
#[derive(Clone, Debug, PartialEq)]
pub struct RunList {
    runs: Vec<Run>,
}

impl RunList {
    pub fn new(initial: RunProperty) -> Self {
        Self {
            runs: vec![Run {
                start: 0,
                value: initial,
            }],
        }
    }

    fn run_index(&self, pos: u32) -> usize {
        self.runs
            .partition_point(|r| r.start <= pos)
            .saturating_sub(1)
    }

    fn run_end(&self, i: usize) -> u32 {
        self.runs.get(i + 1).map(|r| r.start).unwrap_or(u32::MAX)
    }

    /// Value at `pos` and the full extent of the run containing it.
    pub fn get(&self, pos: u32) -> (&RunProperty, TextRange) {
        let i = self.run_index(pos);
        let run = &self.runs[i];
        (&run.value, TextRange::from_bounds(run.start, self.run_end(i)))
    }

    fn split_at(&mut self, pos: u32) {
        if pos == 0 || pos == u32::MAX {
            return;
        }
        let i = self.run_index(pos);
        if self.runs[i].start == pos {
            return;
        }
        let value = self.runs[i].value.clone();
        self.runs.insert(i + 1, Run { start: pos, value });
    }

    pub fn set(&mut self, range: TextRange, value: RunProperty) {
        if range.is_empty() {
            return;
        }
        let start = range.start;
        let end = range.end();
        self.split_at(start);
        self.split_at(end);
        self.runs.retain(|r| r.start < start || r.start >= end);
        let at = self.runs.partition_point(|r| r.start < start);
        self.runs.insert(at, Run { start, value });
    }

    /// Drop every boundary between equal values other than the ones at
    /// `keep.start` and `keep.end()`.
    pub fn coalesce(&mut self, keep: TextRange) {
        let (a, b) = (keep.start, keep.end());
        self.runs
            .dedup_by(|next, prev| next.value == prev.value && next.start != a && next.start != b);
    }

    /// Runs intersecting `within`, clipped to it.
    pub fn runs_in(&self, within: TextRange) -> Vec<(TextRange, RunProperty)> {
        let end = within.end();
        let mut out = Vec::new();
        let mut i = self.run_index(within.start);
        while i < self.runs.len() && self.runs[i].start < end {
            let s = self.runs[i].start.max(within.start);
            let e = self.run_end(i).min(end);
            if s < e {
                out.push((TextRange::from_bounds(s, e), self.runs[i].value.clone()));
            }
            i += 1;
        }
        out
    }
}

/// One [`RunList`] per [`PropertyKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunStore {
    lists: Vec<RunList>,
}

impl RunStore {
    pub fn new(format: &TextFormat) -> Self {
        Self {
            lists: PropertyKind::ALL
                .iter()
                .map(|&k| RunList::new(RunProperty::default_for(k, format)))
                .collect(),
        }
    }

    pub fn get(&self, kind: PropertyKind, pos: u32) -> (RunProperty, TextRange) {
        let (value, range) = self.lists[kind.index()].get(pos);
        (value.clone(), range)
    }

    pub fn set(&mut self, value: RunProperty, range: TextRange) {
        let i = value.kind().index();
        self.lists[i].set(range, value);
    }

    pub fn coalesce(&mut self, keep: TextRange) {
        for list in &mut self.lists {
            list.coalesce(keep);
        }
    }

    pub fn list(&self, kind: PropertyKind) -> &RunList {
        &self.lists[kind.index()]
    }
}
