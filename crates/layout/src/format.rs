//! Document-wide formatting: the default text format a layout is created
//! from, and the global (non-ranged) paragraph properties.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Oblique,
    Italic,
}

/// Font stretch, 1 (ultra condensed) ..= 9 (ultra expanded); 5 is normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontStretch(pub u8);

impl FontStretch {
    pub const NORMAL: Self = Self(5);
}

impl Default for FontStretch {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// OpenType-style weight (100..=950). 400 is regular, 700 bold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    #[default]
    Leading,
    Trailing,
    Center,
    Justified,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParagraphAlignment {
    #[default]
    Near,
    Far,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WordWrapping {
    #[default]
    Wrap,
    NoWrap,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    #[default]
    TopToBottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrimmingGranularity {
    #[default]
    None,
    Character,
    Word,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Trimming {
    pub granularity: TrimmingGranularity,
    /// Delimiter code point; 0 means none.
    pub delimiter: u32,
    pub delimiter_count: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineSpacingMethod {
    #[default]
    Default,
    Uniform,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineSpacing {
    pub method: LineSpacingMethod,
    /// Line advance for [`LineSpacingMethod::Uniform`]; ignored otherwise.
    pub spacing: f32,
    pub baseline: f32,
}

/// Properties that apply to the whole layout rather than to a text range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalProperties {
    pub text_alignment: TextAlignment,
    pub paragraph_alignment: ParagraphAlignment,
    pub word_wrapping: WordWrapping,
    pub reading_direction: ReadingDirection,
    pub flow_direction: FlowDirection,
    pub incremental_tab_stop: f32,
    pub trimming: Trimming,
    pub line_spacing: LineSpacing,
}

impl Default for GlobalProperties {
    fn default() -> Self {
        Self {
            text_alignment: TextAlignment::default(),
            paragraph_alignment: ParagraphAlignment::default(),
            word_wrapping: WordWrapping::default(),
            reading_direction: ReadingDirection::default(),
            flow_direction: FlowDirection::default(),
            incremental_tab_stop: 0.0,
            trimming: Trimming::default(),
            line_spacing: LineSpacing::default(),
        }
    }
}

/// The default format a layout is created from.
///
/// Passed explicitly to [`LayoutFactory::create_layout`](crate::LayoutFactory);
/// there is no shared format registry.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFormat {
    pub font_family: String,
    pub font_size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub stretch: FontStretch,
    pub locale: String,
    pub globals: GlobalProperties,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            font_family: "Segoe UI".to_owned(),
            font_size: 12.0,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
            stretch: FontStretch::NORMAL,
            locale: "en-us".to_owned(),
            globals: GlobalProperties::default(),
        }
    }
}

impl TextFormat {
    /// Line height used by the reference backend (`1.2 * font_size`).
    pub fn line_height(&self) -> f32 {
        match self.globals.line_spacing.method {
            LineSpacingMethod::Uniform if self.globals.line_spacing.spacing > 0.0 => {
                self.globals.line_spacing.spacing
            }
            _ => self.font_size * 1.2,
        }
    }
}
