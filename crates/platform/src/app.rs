use std::sync::Arc;

use edit_core::{DragRequest, DropEffect, EditConfig, EditableText};
use gfx::{EditStyle, EditView, Renderer};
use layout::{MonoLayoutFactory, TextFormat};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::PlatformError;
use crate::clipboard::SystemClipboard;

const FONT_SIZE: f32 = 16.0;

/// A drag started by one of the views.
struct ActiveDrag {
    source: usize,
    request: DragRequest,
}

pub(crate) struct EditorApp {
    config: EditConfig,
    text: String,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    views: Vec<(&'static str, EditView)>,
    clipboard: SystemClipboard,
    drag: Option<ActiveDrag>,
    pub(crate) error: Option<PlatformError>,
}

impl EditorApp {
    pub(crate) fn new(config: EditConfig, text: String) -> Self {
        Self {
            config,
            text,
            window: None,
            renderer: None,
            views: Vec::new(),
            clipboard: SystemClipboard::new(),
            drag: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window = Arc::new(
            event_loop.create_window(Window::default_attributes().with_title("editkit"))?,
        );
        let renderer = Renderer::new(Arc::clone(&window))?;

        let format = TextFormat {
            font_size: FONT_SIZE,
            ..TextFormat::default()
        };
        let style = EditStyle {
            font_size: FONT_SIZE * 0.8,
            ..EditStyle::default()
        };
        let main = EditableText::new(
            Box::new(MonoLayoutFactory),
            format.clone(),
            self.config.clone(),
            &self.text,
        )?;
        let scratch = EditableText::new(
            Box::new(MonoLayoutFactory),
            format,
            EditConfig {
                multiline: false,
                height: FONT_SIZE * 1.2,
                ..self.config.clone()
            },
            "",
        )?;
        let ctx = renderer.context();
        self.views = vec![
            ("editor", EditView::new(ctx, main, style)),
            ("scratch", EditView::new(ctx, scratch, style)),
        ];

        self.window = Some(window);
        self.renderer = Some(renderer);
        log::info!(target: "platform", "window ready");
        Ok(())
    }

    fn redraw(&mut self) {
        let Self {
            window: Some(window),
            renderer: Some(renderer),
            views,
            clipboard,
            drag,
            ..
        } = self
        else {
            return;
        };

        renderer.render(window, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                for (i, (label, view)) in views.iter_mut().enumerate() {
                    ui.label(*label);
                    let output = view.show(ui, &mut *clipboard);
                    if let Some(request) = output.drag {
                        log::debug!(target: "platform.drag", "drag from view {i}");
                        *drag = Some(ActiveDrag { source: i, request });
                    }
                    ui.add_space(12.0);
                }
            });
            route_drag(ctx, views, drag);
        });
    }
}

/// Feed the pointer to every view while a drag is active and settle it on
/// release.
fn route_drag(
    ctx: &egui::Context,
    views: &mut [(&'static str, EditView)],
    drag: &mut Option<ActiveDrag>,
) {
    let Some(active) = drag.as_ref() else {
        return;
    };
    let (pos, released, copy) = ctx.input(|i| {
        (
            i.pointer.latest_pos(),
            !i.pointer.primary_down(),
            i.modifiers.ctrl || i.modifiers.command,
        )
    });
    let data = active.request.to_drop_payload();
    for (_, view) in views.iter_mut() {
        view.drag_hover(&data, pos);
    }
    if !released {
        return;
    }

    let requested = if copy || !active.request.allowed.allow_move {
        DropEffect::Copy
    } else {
        DropEffect::Move
    };
    let mut effect = DropEffect::None;
    let mut target = None;
    if let Some(pos) = pos {
        for (_, view) in views.iter_mut() {
            let result = view.drop_at(pos, requested);
            if result != DropEffect::None {
                effect = result;
                target = view.id();
            }
        }
    }
    if let Some((_, source)) = views.get_mut(active.source) {
        source.finish_drag(effect);
    }
    if let Some(id) = target {
        ctx.memory_mut(|m| m.request_focus(id));
    }
    log::debug!(target: "platform.drag", "drag settled with {effect:?}");
    *drag = None;
}

impl ApplicationHandler for EditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            log::error!(target: "platform", "startup failed: {err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };
        if renderer.on_window_event(window, &event) {
            window.request_redraw();
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_ref())
            && renderer.context().has_requested_repaint()
        {
            window.request_redraw();
        }
    }
}
