//! Clipboard transport.
//!
//! Text travels as a [`ClipboardPayload`]: a little-endian `u32` unit count
//! followed by that many UTF-16LE code units. The platform side only moves
//! opaque payloads around.

use crate::error::{ClipboardError, PayloadError};

const HEADER_LEN: usize = 4;

/// Formats `copy_to_payload` can produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyFormat {
    #[default]
    PlainText,
    /// Text together with its run formatting. Not supported.
    RichText,
}

/// Length-prefixed UTF-16 text blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    bytes: Vec<u8>,
}

impl ClipboardPayload {
    pub fn from_units(units: &[u16]) -> Self {
        let mut bytes = Vec::with_capacity(HEADER_LEN + units.len() * 2);
        bytes.extend_from_slice(&(units.len() as u32).to_le_bytes());
        for unit in units {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        Self { bytes }
    }

    pub fn from_text(text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        Self::from_units(&units)
    }

    /// Wrap raw bytes received from a transport. Validated by
    /// [`decode`](Self::decode).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The carried text. The unit count is the smaller of the prefix and the
    /// units actually present, and a NUL unit ends the text early.
    pub fn decode(&self) -> Result<Vec<u16>, PayloadError> {
        let Some((header, body)) = self.bytes.split_first_chunk::<HEADER_LEN>() else {
            return Err(PayloadError::Truncated);
        };
        if body.len() % 2 != 0 {
            return Err(PayloadError::LengthMismatch {
                bytes: self.bytes.len(),
            });
        }
        let declared = u32::from_le_bytes(*header) as usize;
        let count = declared.min(body.len() / 2);
        Ok(body
            .chunks_exact(2)
            .take(count)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .take_while(|&unit| unit != 0)
            .collect())
    }

    pub fn to_string_lossy(&self) -> Result<String, PayloadError> {
        Ok(String::from_utf16_lossy(&self.decode()?))
    }
}

/// A clipboard the editor copies to and pastes from.
pub trait Clipboard {
    /// Replace the clipboard content.
    fn set_payload(&mut self, payload: ClipboardPayload) -> Result<(), ClipboardError>;

    /// Current content, `None` when the clipboard holds no text.
    fn payload(&mut self) -> Result<Option<ClipboardPayload>, ClipboardError>;
}

/// Process-local clipboard.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    payload: Option<ClipboardPayload>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content as text, if any.
    pub fn text(&self) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|p| p.to_string_lossy().ok())
    }
}

impl Clipboard for MemoryClipboard {
    fn set_payload(&mut self, payload: ClipboardPayload) -> Result<(), ClipboardError> {
        self.payload = Some(payload);
        Ok(())
    }

    fn payload(&mut self) -> Result<Option<ClipboardPayload>, ClipboardError> {
        Ok(self.payload.clone())
    }
}
