//! # platform
//!
//! Desktop shell: a winit window hosting two editors, with the system
//! clipboard and in-app drag and drop wired up.

mod app;
mod clipboard;

pub use clipboard::SystemClipboard;

use edit_core::{EditConfig, EditError};
use thiserror::Error;
use winit::event_loop::EventLoop;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("renderer: {0}")]
    Render(#[from] gfx::RenderError),
    #[error("editor: {0}")]
    Editor(#[from] EditError),
}

/// Open the editor window and block until it closes.
pub fn run(config: EditConfig, text: String) -> Result<(), PlatformError> {
    let event_loop = EventLoop::new()?;
    let mut app = app::EditorApp::new(config, text);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
