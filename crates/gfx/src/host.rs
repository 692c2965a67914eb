use edit_core::EditHost;
use egui::{Context, Pos2, Rect, Vec2};

/// [`EditHost`] over an egui context.
///
/// egui has no system caret: the requested caret is kept here and exposed
/// to the platform as the IME cursor area. Invalidation becomes a repaint
/// request.
#[derive(Clone, Debug)]
pub struct EguiHost {
    ctx: Context,
    caret_size: Vec2,
    caret_pos: Pos2,
    caret_visible: bool,
    captured: bool,
}

impl EguiHost {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            caret_size: Vec2::ZERO,
            caret_pos: Pos2::ZERO,
            caret_visible: false,
            captured: false,
        }
    }

    /// Caret in layout coordinates while it is shown.
    pub fn caret_rect(&self) -> Option<Rect> {
        self.caret_visible
            .then(|| Rect::from_min_size(self.caret_pos, self.caret_size))
    }

    #[inline]
    pub fn has_capture(&self) -> bool {
        self.captured
    }
}

impl EditHost for EguiHost {
    fn create_caret(&mut self, width: f32, height: f32) {
        self.caret_size = Vec2::new(width, height);
    }

    fn set_caret_pos(&mut self, x: f32, y: f32) {
        self.caret_pos = Pos2::new(x, y);
    }

    fn show_caret(&mut self) {
        self.caret_visible = true;
    }

    fn hide_caret(&mut self) {
        self.caret_visible = false;
    }

    fn set_capture(&mut self) {
        self.captured = true;
    }

    fn release_capture(&mut self) {
        self.captured = false;
    }

    fn invalidate(&mut self) {
        self.ctx.request_repaint();
    }

    fn beep(&mut self) {
        log::info!(target: "gfx.edit", "rejected edit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_is_reported_only_while_shown() {
        let ctx = Context::default();
        let mut host = EguiHost::new(&ctx);
        host.create_caret(2.0, 12.0);
        host.set_caret_pos(9.0, 0.0);
        assert_eq!(host.caret_rect(), None);

        host.show_caret();
        assert_eq!(
            host.caret_rect(),
            Some(Rect::from_min_size(Pos2::new(9.0, 0.0), Vec2::new(2.0, 12.0)))
        );
        host.hide_caret();
        assert_eq!(host.caret_rect(), None);
    }

    #[test]
    fn capture_follows_requests() {
        let mut host = EguiHost::new(&Context::default());
        host.set_capture();
        assert!(host.has_capture());
        host.release_capture();
        assert!(!host.has_capture());
    }
}
