//! # layout
//!
//! The text-layout provider surface consumed by the editing engine, and
//! [`MonoLayout`], a fixed-pitch reference implementation of it.
//!
//! Editors never see a concrete backend: they hold a `Box<dyn TextLayout>`
//! produced by an injected [`LayoutFactory`]. A platform shaping engine can be
//! plugged in by implementing both traits.

mod error;
mod format;
mod mono;
mod property;
mod text;

pub use core_types::{Point, Rectangle, TextRange};
pub use error::LayoutError;
pub use format::{
    FlowDirection, FontStretch, FontStyle, FontWeight, GlobalProperties, LineSpacing,
    LineSpacingMethod, ParagraphAlignment, ReadingDirection, TextAlignment, TextFormat, Trimming,
    TrimmingGranularity, WordWrapping,
};
pub use mono::{MAX_TEXT_LEN, MonoLayout, MonoLayoutFactory};
pub use property::{
    EffectId, InlineObjectId, PropertyKind, RunList, RunProperty, RunStore, TypographyId,
};
pub use text::{
    ClusterMetrics, HitTestMetrics, LayoutFactory, LineMetrics, PointHit, PositionHit, TextLayout,
};
