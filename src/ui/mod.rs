//! UI module for egui-based user interface.

pub mod boundary;
pub mod screens;
pub mod theme;
pub mod widgets;

pub use boundary::{render_guarded, show_fallback, RenderError};
pub use screens::Screen;
