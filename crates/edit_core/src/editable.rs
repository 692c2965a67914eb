//! The editable-text component.
//!
//! Owns the buffer, the caret and the layout of one editor and translates
//! keyboard, mouse and drag-drop input into edits. Every text mutation is a
//! transaction: the buffer change is undone when the replacement layout
//! cannot be built, and the previous layout stays in use.

use crate::buffer::{TextBuffer, TextFlags, encode_char};
use crate::caret::{CaretPosition, CaretState, SelectionMode};
use crate::clipboard::{Clipboard, ClipboardPayload, CopyFormat};
use crate::config::EditConfig;
use crate::drag::{
    DragRequest, DragState, DropEffect, DropEffects, DropPayload, DropTarget,
    stale_range_after_drop,
};
use crate::error::EditError;
use crate::host::{EditCtx, EditHost};
use crate::id::EditorId;
use crate::keys::{KeyCode, Modifiers};
use crate::relayout::{LayoutAdapter, TextChange};
use crate::render::{RenderFrame, RenderGlyph, RenderLine};
use crate::selection::SelectionRange;
use core_types::{Point, Rectangle};
use layout::{LayoutFactory, TextFormat, TextLayout};

const CRLF: [u16; 2] = [b'\r' as u16, b'\n' as u16];

pub struct EditableText {
    id: EditorId,
    buffer: TextBuffer,
    layout: LayoutAdapter,
    caret: CaretState,
    config: EditConfig,
    focused: bool,
    press_point: Point,
    click_in_selection: bool,
    drag: Option<DragState>,
    drop_target: Option<DropTarget>,
}

impl EditableText {
    pub fn new(
        factory: Box<dyn LayoutFactory>,
        format: TextFormat,
        config: EditConfig,
        initial_text: &str,
    ) -> Result<Self, EditError> {
        let buffer = TextBuffer::from_text(initial_text, config.flags());
        let layout = LayoutAdapter::new(
            factory,
            format,
            config.width,
            config.height,
            buffer.as_units(),
        )
        .inspect_err(|err| {
            log::error!(target: "edit.layout", "initial layout failed: {err}");
        })?;
        Ok(Self {
            id: EditorId::next(),
            buffer,
            layout,
            caret: CaretState::default(),
            config,
            focused: false,
            press_point: Point::default(),
            click_in_selection: false,
            drag: None,
            drop_target: None,
        })
    }

    #[inline]
    pub fn id(&self) -> EditorId {
        self.id
    }

    pub fn text(&self) -> String {
        self.buffer.to_string_lossy()
    }

    #[inline]
    pub fn text_utf16(&self) -> &[u16] {
        self.buffer.as_units()
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn flags(&self) -> TextFlags {
        self.buffer.flags()
    }

    #[inline]
    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    #[inline]
    pub fn layout(&self) -> &dyn TextLayout {
        self.layout.layout()
    }

    /// Direct access for applying run formatting.
    #[inline]
    pub fn layout_mut(&mut self) -> &mut dyn TextLayout {
        self.layout.layout_mut()
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether an outgoing drag is awaiting [`finish_drag`](Self::finish_drag).
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn caret(&self) -> CaretPosition {
        self.caret.caret()
    }

    #[inline]
    pub fn anchor(&self) -> u32 {
        self.caret.anchor()
    }

    pub fn selection_range(&self) -> SelectionRange {
        self.caret.selection_range(self.buffer.len())
    }

    pub fn selected_text(&self) -> String {
        String::from_utf16_lossy(self.selection_range().slice(self.buffer.as_units()))
    }

    fn ensure_no_drag(&self) -> Result<(), EditError> {
        if self.drag.is_some() {
            log::debug!(target: "edit.drag", "edit rejected while dragging");
            return Err(EditError::DragInProgress);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Buffer mutation
    // ---------------------------------------------------------------------

    /// Splice `units` in at `pos` and rebuild the layout, migrating run
    /// formatting in rich mode. Caret and anchor at or after `pos` advance
    /// past the new text. Returns the number of units inserted.
    pub fn insert(&mut self, pos: u32, units: &[u16]) -> Result<u32, EditError> {
        self.ensure_no_drag()?;
        self.insert_units(pos, units)
    }

    /// Delete `[pos, pos + len)` and rebuild the layout. Caret and anchor
    /// past the range move back with the text. Returns `false` when nothing
    /// was removed, including on a read-only buffer.
    pub fn remove(&mut self, pos: u32, len: u32) -> Result<bool, EditError> {
        self.ensure_no_drag()?;
        self.remove_units(pos, len)
    }

    /// Replace the whole text, ignoring the read-only flag. Run formatting
    /// is reset.
    pub fn set_text(&mut self, text: &str) -> Result<(), EditError> {
        self.ensure_no_drag()?;
        let previous = self.buffer.replace_all(text.encode_utf16().collect());
        if let Err(err) = self
            .layout
            .rebuild(self.buffer.as_units(), TextChange::Reflow, false)
        {
            self.buffer.replace_all(previous);
            return Err(err.into());
        }
        self.caret.clamp(self.buffer.len());
        Ok(())
    }

    fn insert_units(&mut self, pos: u32, units: &[u16]) -> Result<u32, EditError> {
        if units.is_empty() {
            return Ok(0);
        }
        let pos = pos.min(self.buffer.len());
        let inserted = self.buffer.insert(pos, units)?;
        let change = TextChange::Inserted { pos, len: inserted };
        if let Err(err) = self
            .layout
            .rebuild(self.buffer.as_units(), change, self.buffer.flags().rich)
        {
            self.buffer.revert_insert(pos, inserted);
            return Err(err.into());
        }
        self.caret.shift_for_insert(pos, inserted);
        Ok(inserted)
    }

    fn remove_units(&mut self, pos: u32, len: u32) -> Result<bool, EditError> {
        let range = self.buffer.clip(pos, len);
        if range.is_empty() {
            return Ok(false);
        }
        let removed = match self.buffer.remove(range.start, range.len()) {
            Ok(removed) => removed,
            Err(EditError::ReadOnly) => return Ok(false),
            Err(err) => return Err(err),
        };
        let change = TextChange::Removed {
            pos: range.start,
            len: range.len(),
        };
        if let Err(err) = self
            .layout
            .rebuild(self.buffer.as_units(), change, self.buffer.flags().rich)
        {
            self.buffer.revert_remove(range.start, &removed);
            return Err(err.into());
        }
        self.caret.shift_for_remove(range.start, range.len());
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Caret and selection
    // ---------------------------------------------------------------------

    /// Apply a caret transition. Returns whether the caret or anchor moved.
    pub fn set_selection(&mut self, mode: SelectionMode, extend: bool) -> bool {
        self.caret
            .apply(mode, self.layout.layout(), self.buffer.as_units(), extend)
    }

    /// Move the caret to the text position under a point in layout
    /// coordinates.
    pub fn set_selection_from_point(&mut self, x: f32, y: f32, extend: bool) -> bool {
        let hit = self.layout.layout().hit_test_point(x, y);
        let pos = hit.metrics.text_position;
        let mode = if hit.is_trailing {
            SelectionMode::Trailing(pos)
        } else {
            SelectionMode::Leading(pos)
        };
        self.set_selection(mode, extend)
    }

    /// Delete the selected text and collapse the caret at its start.
    /// Returns `false` when nothing was selected or the text is read-only.
    pub fn delete_selection(&mut self) -> Result<bool, EditError> {
        self.ensure_no_drag()?;
        self.delete_selection_inner()
    }

    fn delete_selection_inner(&mut self) -> Result<bool, EditError> {
        let selection = self.selection_range();
        if selection.is_empty() || self.flags().read_only {
            return Ok(false);
        }
        if !self.remove_units(selection.start, selection.len())? {
            return Ok(false);
        }
        self.set_selection(SelectionMode::Leading(selection.start), false);
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Clipboard
    // ---------------------------------------------------------------------

    /// Package the selected text.
    pub fn copy_to_payload(&self, format: CopyFormat) -> Result<ClipboardPayload, EditError> {
        let selection = self.selection_range();
        if selection.is_empty() {
            return Err(EditError::EmptySelection);
        }
        if format == CopyFormat::RichText {
            log::warn!(target: "edit.clipboard", "rich-text copy requested; not supported");
            return Err(EditError::UnsupportedRichCopy);
        }
        if self.flags().rich {
            log::warn!(target: "edit.clipboard", "copying plain text; run formatting dropped");
        }
        Ok(ClipboardPayload::from_units(
            selection.slice(self.buffer.as_units()),
        ))
    }

    pub fn copy_to_clipboard(&self, clipboard: &mut dyn Clipboard) -> Result<(), EditError> {
        let payload = self.copy_to_payload(CopyFormat::PlainText)?;
        clipboard.set_payload(payload).inspect_err(|err| {
            log::warn!(target: "edit.clipboard", "copy failed: {err}");
        })?;
        log::debug!(target: "edit.clipboard", "copied {} units", self.selection_range().len());
        Ok(())
    }

    /// Copy the selection, then delete it.
    pub fn cut_to_clipboard(&mut self, ctx: &mut EditCtx<'_>) -> Result<bool, EditError> {
        self.ensure_no_drag()?;
        self.copy_to_clipboard(&mut *ctx.clipboard)?;
        if self.flags().read_only {
            ctx.host.beep();
            return Ok(false);
        }
        let deleted = self.delete_selection_inner()?;
        self.refresh(&mut *ctx.host, true);
        Ok(deleted)
    }

    /// Replace the selection with the payload's text and select the
    /// inserted text. Returns the number of units inserted.
    pub fn paste_from_payload(&mut self, payload: &ClipboardPayload) -> Result<u32, EditError> {
        self.ensure_no_drag()?;
        let units = payload.decode()?;
        self.paste_units(&units)
    }

    pub fn paste_from_clipboard(&mut self, ctx: &mut EditCtx<'_>) -> Result<u32, EditError> {
        self.ensure_no_drag()?;
        let payload = ctx
            .clipboard
            .payload()
            .inspect_err(|err| log::warn!(target: "edit.clipboard", "paste failed: {err}"))?
            .ok_or(EditError::EmptyPayload)?;
        let units = payload.decode()?;
        let pasted = self.paste_units(&units).inspect_err(|err| {
            if *err == EditError::ReadOnly {
                ctx.host.beep();
            }
        })?;
        self.refresh(&mut *ctx.host, true);
        Ok(pasted)
    }

    fn paste_units(&mut self, units: &[u16]) -> Result<u32, EditError> {
        if self.flags().read_only {
            return Err(EditError::ReadOnly);
        }
        if units.is_empty() {
            return Err(EditError::EmptyPayload);
        }
        self.delete_selection_inner()?;
        let at = self.caret.absolute();
        let inserted = self.insert_units(at, units)?;
        self.set_selection(SelectionMode::Leading(at), false);
        self.set_selection(SelectionMode::RightChar(inserted), true);
        log::debug!(target: "edit.clipboard", "pasted {inserted} units");
        Ok(inserted)
    }

    // ---------------------------------------------------------------------
    // Keyboard
    // ---------------------------------------------------------------------

    /// A typed character. Control characters other than tab are ignored.
    /// Returns whether the text changed.
    pub fn on_char(&mut self, host: &mut dyn EditHost, ch: char) -> Result<bool, EditError> {
        let accepted = ch >= ' ' || (ch == '\t' && self.config.tab_inserts);
        if !accepted {
            return Ok(false);
        }
        if self.flags().read_only {
            host.beep();
            return Err(EditError::ReadOnly);
        }
        self.ensure_no_drag()?;

        self.delete_selection_inner()?;
        let units = encode_char(ch);
        self.insert_units(self.caret.absolute(), &units)?;
        self.refresh(host, true);
        Ok(true)
    }

    /// A key press. Returns whether the text or the caret changed.
    pub fn on_key(
        &mut self,
        ctx: &mut EditCtx<'_>,
        key: KeyCode,
        mods: Modifiers,
    ) -> Result<bool, EditError> {
        match key {
            KeyCode::Return => {
                if !self.flags().multiline {
                    return Ok(false);
                }
                self.begin_edit(&mut *ctx.host)?;
                self.delete_selection_inner()?;
                let at = self.caret.absolute();
                self.insert_units(at, &CRLF)?;
                self.set_selection(SelectionMode::Leading(at + 2), false);
                self.refresh(&mut *ctx.host, true);
                Ok(true)
            }
            KeyCode::Back => {
                self.begin_edit(&mut *ctx.host)?;
                let changed = if !self.selection_range().is_empty() {
                    self.delete_selection_inner()?
                } else {
                    let at = self.caret.absolute();
                    if at == 0 {
                        false
                    } else {
                        let count = if self.buffer.is_crlf_before(at)
                            || self.buffer.is_surrogate_pair_before(at)
                        {
                            2
                        } else {
                            1
                        };
                        self.remove_units(at - count, count)?
                    }
                };
                self.refresh(&mut *ctx.host, true);
                Ok(changed)
            }
            KeyCode::Delete => {
                self.begin_edit(&mut *ctx.host)?;
                let changed = if !self.selection_range().is_empty() {
                    self.delete_selection_inner()?
                } else {
                    let at = self.caret.absolute();
                    let cluster = self.layout.layout().hit_test_text_position(at, false).metrics;
                    let mut count = cluster.length;
                    if count == 1 && self.buffer.is_crlf_at(cluster.text_position) {
                        count += 1;
                    }
                    let removed = self.remove_units(cluster.text_position, count)?;
                    if removed {
                        self.set_selection(SelectionMode::Leading(cluster.text_position), false);
                    }
                    removed
                };
                self.refresh(&mut *ctx.host, true);
                Ok(changed)
            }
            KeyCode::Tab | KeyCode::Y | KeyCode::Z => Ok(false),
            KeyCode::Left => {
                let mode = if mods.control {
                    SelectionMode::LeftWord
                } else {
                    SelectionMode::Left
                };
                Ok(self.navigate(&mut *ctx.host, mode, mods.shift))
            }
            KeyCode::Right => {
                let mode = if mods.control {
                    SelectionMode::RightWord
                } else {
                    SelectionMode::Right
                };
                Ok(self.navigate(&mut *ctx.host, mode, mods.shift))
            }
            KeyCode::Up | KeyCode::Down => {
                if !self.flags().multiline {
                    return Ok(false);
                }
                let mode = if key == KeyCode::Up {
                    SelectionMode::Up
                } else {
                    SelectionMode::Down
                };
                Ok(self.navigate(&mut *ctx.host, mode, mods.shift))
            }
            KeyCode::Home => {
                let mode = if mods.control {
                    SelectionMode::First
                } else {
                    SelectionMode::Home
                };
                Ok(self.navigate(&mut *ctx.host, mode, mods.shift))
            }
            KeyCode::End => {
                let mode = if mods.control {
                    SelectionMode::Last
                } else {
                    SelectionMode::End
                };
                Ok(self.navigate(&mut *ctx.host, mode, mods.shift))
            }
            KeyCode::C | KeyCode::Insert if mods.control => {
                self.copy_to_clipboard(&mut *ctx.clipboard)?;
                Ok(false)
            }
            KeyCode::Insert if mods.shift => Ok(self.paste_from_clipboard(ctx)? > 0),
            KeyCode::V if mods.control => Ok(self.paste_from_clipboard(ctx)? > 0),
            KeyCode::X if mods.control => self.cut_to_clipboard(ctx),
            KeyCode::A if mods.control => {
                Ok(self.navigate(&mut *ctx.host, SelectionMode::SelectAll, true))
            }
            KeyCode::A | KeyCode::C | KeyCode::V | KeyCode::X | KeyCode::Insert => Ok(false),
        }
    }

    /// Common gate for keyboard edits.
    fn begin_edit(&self, host: &mut dyn EditHost) -> Result<(), EditError> {
        if self.flags().read_only {
            host.beep();
            log::warn!(target: "edit.buffer", "edit rejected: read-only");
            return Err(EditError::ReadOnly);
        }
        self.ensure_no_drag()
    }

    fn navigate(&mut self, host: &mut dyn EditHost, mode: SelectionMode, extend: bool) -> bool {
        let moved = self.set_selection(mode, extend);
        if moved {
            self.refresh(host, true);
        }
        moved
    }

    // ---------------------------------------------------------------------
    // Focus and mouse
    // ---------------------------------------------------------------------

    pub fn on_set_focus(&mut self, host: &mut dyn EditHost) {
        self.focused = true;
        self.refresh(host, true);
        host.show_caret();
    }

    pub fn on_kill_focus(&mut self, host: &mut dyn EditHost) {
        host.hide_caret();
        self.focused = false;
    }

    /// Press inside a non-empty selection arms a drag; anywhere else moves
    /// the caret (extending the selection with shift).
    pub fn on_lbutton_down(&mut self, host: &mut dyn EditHost, x: f32, y: f32, shift: bool) {
        host.set_capture();
        self.press_point = Point::new(x, y);
        let selection = self.selection_range();
        self.click_in_selection = !selection.is_empty() && {
            let pos = self.layout.layout().hit_test_point(x, y).metrics.text_position;
            selection.contains(pos)
        };
        if !self.click_in_selection && self.set_selection_from_point(x, y, shift) {
            self.refresh(host, true);
        }
    }

    pub fn on_lbutton_up(&mut self, host: &mut dyn EditHost, x: f32, y: f32) {
        if self.click_in_selection && self.press_point == Point::new(x, y) {
            self.set_selection_from_point(x, y, false);
            self.refresh(host, false);
        }
        self.click_in_selection = false;
        host.release_capture();
    }

    /// Pointer moved with the button held. Starts a drag when the press
    /// landed inside the selection and the pointer has left the press point;
    /// otherwise extends the selection to the pointer.
    pub fn on_lbutton_hold(
        &mut self,
        host: &mut dyn EditHost,
        x: f32,
        y: f32,
        shift: bool,
    ) -> Option<DragRequest> {
        if shift || !self.click_in_selection {
            if self.set_selection_from_point(x, y, true) {
                self.refresh(host, true);
            }
            return None;
        }
        if self.press_point == Point::new(x, y) || self.drag.is_some() {
            return None;
        }

        let range = self.selection_range();
        let payload = ClipboardPayload::from_units(range.slice(self.buffer.as_units()));
        host.release_capture();
        self.click_in_selection = false;
        self.drag = Some(DragState {
            range,
            self_drop: None,
        });
        log::debug!(target: "edit.drag", "drag started for [{}, {})", range.start, range.end);
        Some(DragRequest {
            source: self.id,
            payload,
            allowed: DropEffects {
                copy: true,
                allow_move: !self.flags().read_only,
            },
        })
    }

    /// Complete an outgoing drag. A move deletes the dragged text, accounting
    /// for text dropped back into this editor. Returns whether the text
    /// changed.
    pub fn finish_drag(
        &mut self,
        host: &mut dyn EditHost,
        effect: DropEffect,
    ) -> Result<bool, EditError> {
        let Some(drag) = self.drag.take() else {
            return Ok(false);
        };
        log::debug!(target: "edit.drag", "drag finished with {effect:?}");
        if effect != DropEffect::Move || self.flags().read_only {
            return Ok(false);
        }

        let range = match drag.self_drop {
            Some(dropped) => stale_range_after_drop(drag.range, dropped.start, dropped.len()),
            None => drag.range,
        };
        if !self.remove_units(range.start, range.len())? {
            return Ok(false);
        }

        match drag.self_drop {
            Some(dropped) => {
                let start = if dropped.start >= range.end {
                    dropped.start - range.len()
                } else {
                    dropped.start
                };
                self.set_selection(SelectionMode::Leading(start), false);
                self.set_selection(SelectionMode::RightChar(dropped.len()), true);
            }
            None => {
                self.set_selection(SelectionMode::Leading(range.start), false);
            }
        }
        self.refresh(host, true);
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Drop target
    // ---------------------------------------------------------------------

    /// A drag entered the editor. Returns whether it is a foreign drag
    /// carrying text.
    pub fn on_drag_enter(&mut self, host: &mut dyn EditHost, data: &DropPayload) -> bool {
        let from_self = data.source == Some(self.id);
        let units = data.payload.as_ref().and_then(|p| {
            p.decode()
                .inspect_err(|err| log::debug!(target: "edit.drag", "unreadable drop payload: {err}"))
                .ok()
        });
        let target = DropTarget {
            from_self,
            units,
            was_focused: self.focused,
        };
        let accepted = !from_self && target.format_ok();
        log::debug!(target: "edit.drag", "drag enter: from_self={from_self}, text={}", target.format_ok());
        self.drop_target = Some(target);
        self.focused = true;
        host.show_caret();
        accepted
    }

    /// Track the pointer during a drag. Returns whether a drop here would
    /// be accepted; the caret previews the insertion point.
    pub fn on_drag_over(&mut self, host: &mut dyn EditHost, x: f32, y: f32) -> bool {
        let Some(target) = &self.drop_target else {
            return false;
        };
        if target.from_self && self.point_in_drag_range(x, y) {
            return false;
        }
        if !target.format_ok() {
            return false;
        }
        self.set_selection_from_point(x, y, false);
        self.refresh(host, false);
        true
    }

    pub fn on_drag_leave(&mut self, host: &mut dyn EditHost) {
        if let Some(target) = self.drop_target.take()
            && !target.was_focused
        {
            self.focused = false;
            host.hide_caret();
        }
    }

    /// Drop the dragged text at a point. Returns the effect performed.
    pub fn on_drop(
        &mut self,
        host: &mut dyn EditHost,
        x: f32,
        y: f32,
        effect: DropEffect,
    ) -> Result<DropEffect, EditError> {
        let Some(target) = self.drop_target.take() else {
            return Ok(DropEffect::None);
        };
        let Some(units) = target.units else {
            return Ok(DropEffect::None);
        };
        if effect == DropEffect::None {
            return Ok(DropEffect::None);
        }
        if self.flags().read_only {
            host.beep();
            return Err(EditError::ReadOnly);
        }
        if target.from_self && self.point_in_drag_range(x, y) {
            return Ok(DropEffect::None);
        }

        self.set_selection_from_point(x, y, false);
        let start = self.caret.absolute();
        let inserted = self.paste_units(&units)?;
        if target.from_self
            && let Some(drag) = self.drag.as_mut()
        {
            drag.self_drop = Some(SelectionRange::new(start, start + inserted));
        }
        log::debug!(target: "edit.drag", "dropped {inserted} units at {start}");
        self.refresh(host, true);
        Ok(effect)
    }

    fn point_in_drag_range(&self, x: f32, y: f32) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let pos = self.layout.layout().hit_test_point(x, y).metrics.text_position;
        drag.range.contains(pos)
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    /// Caret rectangle in layout coordinates.
    pub fn caret_rect(&self) -> Rectangle {
        let layout = self.layout.layout();
        let caret = self.caret.caret();
        let hit = layout.hit_test_text_position(caret.index, caret.is_trailing());
        let (mut y, mut height) = (hit.y, hit.metrics.height);
        if !self.selection_range().is_empty()
            && let Some(span) = layout.hit_test_text_range(caret.index, 0, 0.0, 0.0).first()
        {
            y = span.top;
            height = span.height;
        }
        let width = self.config.caret_width;
        Rectangle::new(hit.x - width * 0.5, y, width, height)
    }

    /// Push the caret geometry to the host; with `invalidate` also request
    /// a repaint. Does nothing while unfocused.
    fn refresh(&self, host: &mut dyn EditHost, invalidate: bool) {
        if !self.focused {
            return;
        }
        let rect = self.caret_rect();
        host.create_caret(rect.width, rect.height);
        host.set_caret_pos(rect.x, rect.y);
        if invalidate {
            host.invalidate();
        }
    }

    /// Per-frame housekeeping: re-sync the system caret.
    pub fn update(&mut self, host: &mut dyn EditHost) {
        self.caret.clamp(self.buffer.len());
        self.refresh(host, false);
    }

    /// Geometry for drawing the editor with its layout origin at `(x, y)`.
    pub fn render(&self, x: f32, y: f32) -> RenderFrame {
        let layout = self.layout.layout();
        let text = self.buffer.as_units();

        let selection = self.selection_range();
        let highlights = if selection.is_empty() {
            Vec::new()
        } else {
            layout
                .hit_test_text_range(selection.start, selection.len(), x, y)
                .into_iter()
                .map(|m| Rectangle::new(m.left, m.top, m.width, m.height))
                .collect()
        };

        let clusters = layout.cluster_metrics();
        let mut cluster = 0usize;
        let mut cluster_pos = 0u32;
        let mut lines = Vec::new();
        let mut start = 0u32;
        for line in layout.line_metrics() {
            let content_end = start + line.length.saturating_sub(line.newline_length);
            let mut glyphs = Vec::new();
            while let Some(metrics) = clusters.get(cluster)
                && cluster_pos < start + line.length
            {
                if cluster_pos < content_end && !metrics.is_whitespace {
                    let units = SelectionRange::new(cluster_pos, cluster_pos + metrics.length);
                    glyphs.push(RenderGlyph {
                        x: layout.hit_test_text_position(cluster_pos, false).x + x,
                        text: String::from_utf16_lossy(units.slice(text)),
                    });
                }
                cluster_pos += metrics.length;
                cluster += 1;
            }

            let origin = layout.hit_test_text_position(start, false);
            lines.push(RenderLine {
                origin: Point::new(origin.x + x, origin.y + y),
                text: String::from_utf16_lossy(SelectionRange::new(start, content_end).slice(text)),
                glyphs,
            });
            start += line.length;
        }

        let caret = self.focused.then(|| self.caret_rect().translate(x, y));
        log::trace!(
            target: "edit.render",
            "frame: {} lines, {} highlights, caret={}",
            lines.len(),
            highlights.len(),
            caret.is_some()
        );
        RenderFrame {
            highlights,
            lines,
            caret,
            selection_color: self.config.selection_color,
        }
    }

    /// Rebuild the layout from the current text, keeping global properties
    /// (and run formatting in rich mode).
    pub fn recreate(&mut self) -> Result<(), EditError> {
        self.layout
            .rebuild(self.buffer.as_units(), TextChange::Reflow, self.flags().rich)?;
        Ok(())
    }

    /// Change the layout box.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), EditError> {
        self.layout
            .resize(self.buffer.as_units(), width, height, self.flags().rich)?;
        self.config.width = width;
        self.config.height = height;
        Ok(())
    }
}

impl std::fmt::Debug for EditableText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableText")
            .field("id", &self.id)
            .field("text", &self.text())
            .field("caret", &self.caret)
            .field("focused", &self.focused)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::host::NullHost;
    use layout::MonoLayoutFactory;

    // 10px font: 5px cells, 12px lines.
    fn editor(text: &str, config: EditConfig) -> EditableText {
        let format = TextFormat {
            font_size: 10.0,
            ..TextFormat::default()
        };
        EditableText::new(Box::new(MonoLayoutFactory), format, config, text).unwrap()
    }

    fn plain(text: &str) -> EditableText {
        editor(
            text,
            EditConfig {
                width: 400.0,
                ..EditConfig::default()
            },
        )
    }

    fn multiline(text: &str) -> EditableText {
        editor(
            text,
            EditConfig {
                width: 400.0,
                height: 200.0,
                multiline: true,
                ..EditConfig::default()
            },
        )
    }

    fn key(e: &mut EditableText, key: KeyCode, mods: Modifiers) -> Result<bool, EditError> {
        let mut host = NullHost;
        let mut clip = MemoryClipboard::new();
        e.on_key(&mut EditCtx::new(&mut host, &mut clip), key, mods)
    }

    #[test]
    fn typing_appends_and_advances() {
        let mut e = plain("Hello");
        e.set_selection(SelectionMode::Last, false);
        assert!(e.on_char(&mut NullHost, '!').unwrap());
        assert_eq!(e.text(), "Hello!");
        assert_eq!(e.caret().absolute(), 6);
    }

    #[test]
    fn control_chars_are_ignored() {
        let mut e = plain("a");
        assert!(!e.on_char(&mut NullHost, '\u{8}').unwrap());
        assert_eq!(e.text(), "a");
    }

    #[test]
    fn return_inserts_crlf_only_when_multiline() {
        let mut e = plain("ab");
        e.set_selection(SelectionMode::Leading(1), false);
        assert!(!key(&mut e, KeyCode::Return, Modifiers::NONE).unwrap());
        assert_eq!(e.text(), "ab");

        let mut e = multiline("ab");
        e.set_selection(SelectionMode::Leading(1), false);
        assert!(key(&mut e, KeyCode::Return, Modifiers::NONE).unwrap());
        assert_eq!(e.text(), "a\r\nb");
        assert_eq!(e.caret().absolute(), 3);
    }

    #[test]
    fn backspace_removes_crlf_as_a_unit() {
        let mut e = multiline("a\r\nb");
        e.set_selection(SelectionMode::Leading(3), false);
        key(&mut e, KeyCode::Back, Modifiers::NONE).unwrap();
        assert_eq!(e.text(), "ab");
        assert_eq!(e.caret().absolute(), 1);
    }

    #[test]
    fn delete_removes_cluster_at_caret() {
        let mut e = plain("a\u{1F600}b");
        e.set_selection(SelectionMode::Leading(1), false);
        key(&mut e, KeyCode::Delete, Modifiers::NONE).unwrap();
        assert_eq!(e.text(), "ab");
        assert_eq!(e.caret().absolute(), 1);
    }

    #[test]
    fn delete_at_end_is_a_no_op() {
        let mut e = plain("ab");
        e.set_selection(SelectionMode::Last, false);
        assert!(!key(&mut e, KeyCode::Delete, Modifiers::NONE).unwrap());
        assert_eq!(e.text(), "ab");
    }

    #[test]
    fn read_only_rejects_typing() {
        let mut e = editor(
            "x",
            EditConfig {
                read_only: true,
                ..EditConfig::default()
            },
        );
        assert_eq!(e.on_char(&mut NullHost, 'y'), Err(EditError::ReadOnly));
        assert_eq!(e.text(), "x");
        assert_eq!(e.remove(0, 1), Ok(false));
    }

    #[test]
    fn caret_rect_is_centred_on_the_edge() {
        let mut e = plain("abc");
        e.set_selection(SelectionMode::Leading(2), false);
        let rect = e.caret_rect();
        assert_eq!(rect, Rectangle::new(9.0, 0.0, 2.0, 12.0));
    }

    #[test]
    fn render_reports_lines_and_highlights() {
        let mut e = multiline("ab\r\ncd");
        e.set_selection(SelectionMode::Leading(1), false);
        e.set_selection(SelectionMode::RightChar(4), true);
        let frame = e.render(10.0, 20.0);
        assert_eq!(frame.lines.len(), 2);
        assert_eq!(frame.lines[0].text, "ab");
        assert_eq!(frame.lines[1].text, "cd");
        assert_eq!(frame.lines[1].origin, Point::new(10.0, 32.0));
        let glyphs: Vec<(f32, &str)> = frame.lines[1]
            .glyphs
            .iter()
            .map(|g| (g.x, g.text.as_str()))
            .collect();
        assert_eq!(glyphs, vec![(10.0, "c"), (15.0, "d")]);
        assert_eq!(frame.highlights.len(), 2);
        assert_eq!(frame.highlights[0].x, 15.0);
        assert!(frame.caret.is_none());
    }

    #[test]
    fn mutations_are_rejected_while_dragging() {
        let mut e = plain("hello world");
        e.set_selection(SelectionMode::Leading(0), false);
        e.set_selection(SelectionMode::RightChar(5), true);
        e.on_lbutton_down(&mut NullHost, 6.0, 1.0, false);
        let request = e.on_lbutton_hold(&mut NullHost, 30.0, 1.0, false);
        assert!(request.is_some());
        assert!(e.is_dragging());
        assert_eq!(e.on_char(&mut NullHost, 'x'), Err(EditError::DragInProgress));
        assert_eq!(e.insert(0, &[0x61]), Err(EditError::DragInProgress));

        assert!(!e.finish_drag(&mut NullHost, DropEffect::Copy).unwrap());
        assert!(!e.is_dragging());
        assert_eq!(e.text(), "hello world");
    }
}
