//! Services an editor needs from the control hosting it.

use crate::clipboard::Clipboard;

/// Window-side services: the system caret, mouse capture, repaint requests
/// and the error alert. Coordinates are in layout space.
pub trait EditHost {
    fn create_caret(&mut self, width: f32, height: f32);

    fn set_caret_pos(&mut self, x: f32, y: f32);

    fn show_caret(&mut self);

    fn hide_caret(&mut self);

    fn set_capture(&mut self);

    fn release_capture(&mut self);

    /// Request a repaint.
    fn invalidate(&mut self);

    /// Audible alert for a rejected edit.
    fn beep(&mut self) {}
}

/// Per-call collaborators of an editor.
pub struct EditCtx<'a> {
    pub host: &'a mut dyn EditHost,
    pub clipboard: &'a mut dyn Clipboard,
}

impl<'a> EditCtx<'a> {
    pub fn new(host: &'a mut dyn EditHost, clipboard: &'a mut dyn Clipboard) -> Self {
        Self { host, clipboard }
    }
}

/// Host that ignores every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl EditHost for NullHost {
    fn create_caret(&mut self, _width: f32, _height: f32) {}
    fn set_caret_pos(&mut self, _x: f32, _y: f32) {}
    fn show_caret(&mut self) {}
    fn hide_caret(&mut self) {}
    fn set_capture(&mut self) {}
    fn release_capture(&mut self) {}
    fn invalidate(&mut self) {}
}
