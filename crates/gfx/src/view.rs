//! An [`EditableText`] shown as an egui widget.
//!
//! The view translates egui pointer and keyboard events into editor calls
//! and paints the editor's [`RenderFrame`](edit_core::RenderFrame). Layout
//! coordinates are relative to the top-left corner of the widget.

use edit_core::{
    Clipboard, ClipboardPayload, DragRequest, DropEffect, DropPayload, EditCtx, EditError,
    EditableText, KeyCode, MemoryClipboard, Modifiers,
};
use egui::{Context, Event, EventFilter, Id, Key, Pos2, Rect, Response, Sense, Ui, Vec2};

use crate::host::EguiHost;
use crate::paint::{EditStyle, paint_edit_frame};

pub fn key_code(key: Key) -> Option<KeyCode> {
    Some(match key {
        Key::Enter => KeyCode::Return,
        Key::Backspace => KeyCode::Back,
        Key::Delete => KeyCode::Delete,
        Key::Tab => KeyCode::Tab,
        Key::ArrowLeft => KeyCode::Left,
        Key::ArrowRight => KeyCode::Right,
        Key::ArrowUp => KeyCode::Up,
        Key::ArrowDown => KeyCode::Down,
        Key::Home => KeyCode::Home,
        Key::End => KeyCode::End,
        Key::Insert => KeyCode::Insert,
        Key::A => KeyCode::A,
        Key::C => KeyCode::C,
        Key::V => KeyCode::V,
        Key::X => KeyCode::X,
        Key::Y => KeyCode::Y,
        Key::Z => KeyCode::Z,
        _ => return None,
    })
}

pub fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        control: m.ctrl || m.command,
    }
}

pub struct ViewOutput {
    pub response: Response,
    /// Set on the frame a drag leaves this view.
    pub drag: Option<DragRequest>,
}

pub struct EditView {
    editor: EditableText,
    host: EguiHost,
    style: EditStyle,
    rect: Rect,
    id: Option<Id>,
    pressed: bool,
    drop_hover: bool,
}

impl EditView {
    pub fn new(ctx: &Context, editor: EditableText, style: EditStyle) -> Self {
        Self {
            editor,
            host: EguiHost::new(ctx),
            style,
            rect: Rect::NOTHING,
            id: None,
            pressed: false,
            drop_hover: false,
        }
    }

    #[inline]
    pub fn editor(&self) -> &EditableText {
        &self.editor
    }

    #[inline]
    pub fn editor_mut(&mut self) -> &mut EditableText {
        &mut self.editor
    }

    /// Screen rectangle from the last [`show`](Self::show).
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Widget id from the last [`show`](Self::show).
    #[inline]
    pub fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        pos - self.rect.min.to_vec2()
    }

    pub fn show(&mut self, ui: &mut Ui, clipboard: &mut dyn Clipboard) -> ViewOutput {
        let layout = self.editor.layout();
        let size = Vec2::new(layout.max_width(), layout.max_height());
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        self.rect = rect;
        self.id = Some(response.id);

        if response.gained_focus() {
            self.editor.on_set_focus(&mut self.host);
        }
        if response.lost_focus() {
            self.editor.on_kill_focus(&mut self.host);
        }

        let drag = self.handle_pointer(ui, &response);

        if response.has_focus() {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    response.id,
                    EventFilter {
                        tab: true,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: false,
                    },
                )
            });
            let events = ui.input(|i| i.events.clone());
            for event in &events {
                if let Err(err) = self.apply_event(event, clipboard) {
                    log::debug!(target: "gfx.edit", "{event:?} not applied: {err}");
                }
            }
            self.editor.update(&mut self.host);
            if let Some(caret) = self.host.caret_rect() {
                let caret = caret.translate(rect.min.to_vec2());
                ui.ctx().output_mut(|o| {
                    o.ime = Some(egui::output::IMEOutput {
                        rect,
                        cursor_rect: caret,
                    })
                });
            }
        }

        if ui.is_rect_visible(rect) {
            let frame = self.editor.render(rect.min.x, rect.min.y);
            paint_edit_frame(&ui.painter_at(rect), rect, &frame, &self.style);
        }

        ViewOutput { response, drag }
    }

    fn handle_pointer(&mut self, ui: &Ui, response: &Response) -> Option<DragRequest> {
        let (pressed, released, moved, shift, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != Vec2::ZERO,
                i.modifiers.shift,
                i.pointer.interact_pos(),
            )
        });
        let pos = self.to_local(pos?);

        if pressed && response.hovered() {
            response.request_focus();
            self.pressed = true;
            self.editor
                .on_lbutton_down(&mut self.host, pos.x, pos.y, shift);
            return None;
        }
        if !self.pressed {
            return None;
        }
        if released {
            self.pressed = false;
            self.editor.on_lbutton_up(&mut self.host, pos.x, pos.y);
            return None;
        }
        if moved {
            let request = self
                .editor
                .on_lbutton_hold(&mut self.host, pos.x, pos.y, shift);
            if request.is_some() {
                self.pressed = false;
            }
            return request;
        }
        None
    }

    fn apply_event(&mut self, event: &Event, clipboard: &mut dyn Clipboard) -> Result<(), EditError> {
        match event {
            Event::Text(text) => {
                for ch in text.chars() {
                    self.editor.on_char(&mut self.host, ch)?;
                }
            }
            Event::Key {
                key: Key::Tab,
                pressed: true,
                modifiers,
                ..
            } if modifiers.is_none() => {
                self.editor.on_char(&mut self.host, '\t')?;
            }
            Event::Key {
                key,
                pressed: true,
                modifiers: mods,
                ..
            } => {
                if let Some(code) = key_code(*key) {
                    let mut ctx = EditCtx::new(&mut self.host, clipboard);
                    self.editor.on_key(&mut ctx, code, modifiers(*mods))?;
                }
            }
            Event::Copy => {
                let mut ctx = EditCtx::new(&mut self.host, clipboard);
                self.editor.on_key(&mut ctx, KeyCode::C, Modifiers::CONTROL)?;
            }
            Event::Cut => {
                let mut ctx = EditCtx::new(&mut self.host, clipboard);
                self.editor.on_key(&mut ctx, KeyCode::X, Modifiers::CONTROL)?;
            }
            Event::Paste(text) => {
                // The platform has already read the clipboard.
                let mut pasted = MemoryClipboard::new();
                pasted.set_payload(ClipboardPayload::from_text(text))?;
                let mut ctx = EditCtx::new(&mut self.host, &mut pasted);
                self.editor.paste_from_clipboard(&mut ctx)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Track an in-app drag. `pos` is the pointer in screen space, `None`
    /// once it has left every view. Returns whether a drop here would be
    /// accepted.
    pub fn drag_hover(&mut self, data: &DropPayload, pos: Option<Pos2>) -> bool {
        match pos.filter(|p| self.rect.contains(*p)) {
            Some(pos) => {
                if !self.drop_hover {
                    self.drop_hover = true;
                    self.editor.on_drag_enter(&mut self.host, data);
                }
                let pos = self.to_local(pos);
                self.editor.on_drag_over(&mut self.host, pos.x, pos.y)
            }
            None => {
                if self.drop_hover {
                    self.drop_hover = false;
                    self.editor.on_drag_leave(&mut self.host);
                }
                false
            }
        }
    }

    /// Drop onto this view if the drag is hovering it.
    pub fn drop_at(&mut self, pos: Pos2, effect: DropEffect) -> DropEffect {
        if !self.drop_hover {
            return DropEffect::None;
        }
        self.drop_hover = false;
        let pos = self.to_local(pos);
        self.editor
            .on_drop(&mut self.host, pos.x, pos.y, effect)
            .unwrap_or_else(|err| {
                log::warn!(target: "gfx.edit", "drop failed: {err}");
                DropEffect::None
            })
    }

    /// Report the outcome of a drag this view started.
    pub fn finish_drag(&mut self, effect: DropEffect) {
        if let Err(err) = self.editor.finish_drag(&mut self.host, effect) {
            log::warn!(target: "gfx.edit", "finishing drag failed: {err}");
        }
    }
}
