use std::cell::Cell;
use std::rc::Rc;

use edit_core::{Clipboard, ClipboardError, ClipboardPayload, EditHost};
use layout::{LayoutError, LayoutFactory, MonoLayoutFactory, TextFormat, TextLayout};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    CreateCaret { width: f32, height: f32 },
    SetCaretPos { x: f32, y: f32 },
    ShowCaret,
    HideCaret,
    SetCapture,
    ReleaseCapture,
    Invalidate,
    Beep,
}

/// Host that records every request in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, event: HostEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    pub fn beeps(&self) -> usize {
        self.count(HostEvent::Beep)
    }

    /// Whether mouse capture is currently held.
    pub fn has_capture(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                HostEvent::SetCapture => Some(true),
                HostEvent::ReleaseCapture => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn last_caret_pos(&self) -> Option<(f32, f32)> {
        self.events.iter().rev().find_map(|e| match e {
            HostEvent::SetCaretPos { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EditHost for RecordingHost {
    fn create_caret(&mut self, width: f32, height: f32) {
        self.events.push(HostEvent::CreateCaret { width, height });
    }

    fn set_caret_pos(&mut self, x: f32, y: f32) {
        self.events.push(HostEvent::SetCaretPos { x, y });
    }

    fn show_caret(&mut self) {
        self.events.push(HostEvent::ShowCaret);
    }

    fn hide_caret(&mut self) {
        self.events.push(HostEvent::HideCaret);
    }

    fn set_capture(&mut self) {
        self.events.push(HostEvent::SetCapture);
    }

    fn release_capture(&mut self) {
        self.events.push(HostEvent::ReleaseCapture);
    }

    fn invalidate(&mut self) {
        self.events.push(HostEvent::Invalidate);
    }

    fn beep(&mut self) {
        self.events.push(HostEvent::Beep);
    }
}

/// Clipboard that is never available.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn set_payload(&mut self, _payload: ClipboardPayload) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("test clipboard".into()))
    }

    fn payload(&mut self) -> Result<Option<ClipboardPayload>, ClipboardError> {
        Err(ClipboardError::Unavailable("test clipboard".into()))
    }
}

/// Shared toggle controlling a [`FailingLayoutFactory`] after it has been
/// moved into an editor.
#[derive(Clone, Debug, Default)]
pub struct FailSwitch(Rc<Cell<bool>>);

impl FailSwitch {
    pub fn fail(&self) {
        self.0.set(true);
    }

    pub fn recover(&self) {
        self.0.set(false);
    }
}

/// Fixed-pitch layout factory that fails on demand.
#[derive(Debug)]
pub struct FailingLayoutFactory {
    switch: FailSwitch,
}

impl FailingLayoutFactory {
    pub fn new() -> (Self, FailSwitch) {
        let switch = FailSwitch::default();
        (
            Self {
                switch: switch.clone(),
            },
            switch,
        )
    }
}

impl LayoutFactory for FailingLayoutFactory {
    fn create_layout(
        &self,
        text: &[u16],
        format: &TextFormat,
        max_width: f32,
        max_height: f32,
    ) -> Result<Box<dyn TextLayout>, LayoutError> {
        if self.switch.0.get() {
            return Err(LayoutError::Backend("injected failure".into()));
        }
        MonoLayoutFactory.create_layout(text, format, max_width, max_height)
    }
}
