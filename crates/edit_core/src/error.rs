use layout::LayoutError;
use thiserror::Error;

/// Failure of an editing operation.
///
/// No-op outcomes (caret did not move, nothing selected to delete) are not
/// errors; those operations report `false` instead.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EditError {
    #[error("text is read-only")]
    ReadOnly,
    #[error("rich-text copy is not supported")]
    UnsupportedRichCopy,
    #[error("layout creation failed: {0}")]
    LayoutCreationFailed(#[from] LayoutError),
    #[error("nothing is selected")]
    EmptySelection,
    #[error("payload holds no text")]
    EmptyPayload,
    #[error("a drag session is in progress")]
    DragInProgress,
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard transport failed: {0}")]
    Transport(String),
}

/// A clipboard/drag payload that cannot be decoded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload shorter than its length prefix")]
    Truncated,
    #[error("payload body is not a whole number of UTF-16 units ({bytes} bytes)")]
    LengthMismatch { bytes: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
