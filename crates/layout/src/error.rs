use thiserror::Error;

/// Failure to produce a text layout.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("invalid layout box {width}x{height}")]
    InvalidBox { width: f32, height: f32 },

    #[error("text of {len} code units exceeds the layout limit")]
    TooLong { len: usize },

    #[error("layout backend failure: {0}")]
    Backend(String),
}
