//! Painting a [`RenderFrame`] with egui.

use core_types::Rectangle;
use edit_core::RenderFrame;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditStyle {
    /// Glyph size. The fixed-pitch layout uses half-em cells, so about 0.8
    /// of the layout's font size keeps monospace glyphs inside their cells.
    pub font_size: f32,
    pub text_color: Color32,
    pub caret_color: Color32,
    pub background: Color32,
    pub border: Stroke,
    pub focus_border: Stroke,
}

impl Default for EditStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            text_color: Color32::from_gray(230),
            caret_color: Color32::WHITE,
            background: Color32::from_gray(24),
            border: Stroke::new(1.0, Color32::from_gray(80)),
            focus_border: Stroke::new(1.0, Color32::from_rgb(135, 206, 250)),
        }
    }
}

pub fn to_rect(r: Rectangle) -> Rect {
    Rect::from_min_size(Pos2::new(r.x, r.y), Vec2::new(r.width, r.height))
}

pub fn to_color([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Selection highlights in screen space, zero-width spans dropped.
pub fn highlight_rects(frame: &RenderFrame) -> Vec<Rect> {
    frame
        .highlights
        .iter()
        .filter(|r| r.width > 0.0 && r.height > 0.0)
        .map(|r| to_rect(*r))
        .collect()
}

/// Draw background, highlights, glyphs and caret, in that order. `bounds`
/// is the editor box on screen; the frame must have been rendered with its
/// origin at `bounds.min`.
pub fn paint_edit_frame(painter: &Painter, bounds: Rect, frame: &RenderFrame, style: &EditStyle) {
    let focused = frame.caret.is_some();
    painter.rect_filled(bounds, 0.0, style.background);

    let selection = to_color(frame.selection_color);
    for rect in highlight_rects(frame) {
        painter.rect_filled(rect, 0.0, selection);
    }

    let font_id = FontId::monospace(style.font_size);
    for line in &frame.lines {
        for glyph in &line.glyphs {
            painter.text(
                Pos2::new(glyph.x, line.origin.y),
                Align2::LEFT_TOP,
                &glyph.text,
                font_id.clone(),
                style.text_color,
            );
        }
    }

    if let Some(caret) = frame.caret {
        painter.rect_filled(to_rect(caret), 0.0, style.caret_color);
    }

    let border = if focused {
        style.focus_border
    } else {
        style.border
    };
    painter.rect_stroke(bounds, 0.0, border, StrokeKind::Inside);
}
