//! The system clipboard behind [`edit_core::Clipboard`].

use edit_core::{Clipboard, ClipboardError, ClipboardPayload};

/// arboard-backed clipboard. Text crosses as UTF-16 payloads on the editor
/// side and as `String` on the system side.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Open the system clipboard. Failure is logged and leaves a clipboard
    /// that reports [`ClipboardError::Unavailable`].
    pub fn new() -> Self {
        let inner = arboard::Clipboard::new()
            .inspect_err(|err| log::warn!(target: "platform.clipboard", "clipboard unavailable: {err}"))
            .ok();
        Self { inner }
    }

    fn inner(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("system clipboard not opened".into()))
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn set_payload(&mut self, payload: ClipboardPayload) -> Result<(), ClipboardError> {
        let text = payload
            .to_string_lossy()
            .map_err(|err| ClipboardError::Transport(err.to_string()))?;
        self.inner()?
            .set_text(text)
            .map_err(|err| ClipboardError::Transport(err.to_string()))
    }

    fn payload(&mut self) -> Result<Option<ClipboardPayload>, ClipboardError> {
        match self.inner()?.get_text() {
            Ok(text) => Ok(Some(ClipboardPayload::from_text(&text))),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(ClipboardError::Transport(err.to_string())),
        }
    }
}
