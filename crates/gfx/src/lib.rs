//! # gfx
//!
//! egui front end for `edit_core` editors.
//!
//! - [`EditView`]: an editor as an egui widget (input routing and painting)
//! - [`EguiHost`]: the editor host services mapped onto egui
//! - [`paint_edit_frame`]: draws a render frame
//! - [`Renderer`]: the wgpu surface the egui output lands on

mod host;
mod paint;
mod renderer;
mod view;

pub use host::EguiHost;
pub use paint::{EditStyle, highlight_rects, paint_edit_frame, to_color, to_rect};
pub use renderer::{RenderError, Renderer};
pub use view::{EditView, ViewOutput, key_code, modifiers};
