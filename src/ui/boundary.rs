//! Top-level render boundary.
//!
//! A panic while drawing a screen is caught here and replaced with a
//! fallback notice instead of taking the whole window down.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use egui::{RichText, Ui};
use thiserror::Error;

use crate::ui::theme::palette;

/// A screen failed to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Rendering {screen} failed: {message}")]
pub struct RenderError {
    pub screen: &'static str,
    pub message: String,
}

/// Run a screen's render function, converting a panic into a [`RenderError`].
pub fn render_guarded<R>(
    ui: &mut Ui,
    screen: &'static str,
    render: impl FnOnce(&mut Ui) -> R,
) -> Result<R, RenderError> {
    catch_unwind(AssertUnwindSafe(|| render(ui))).map_err(|payload| {
        let error = RenderError {
            screen,
            message: panic_message(payload.as_ref()),
        };
        tracing::error!("{}", error);
        error
    })
}

/// Generic fallback. Returns `true` when the user asks to retry.
pub fn show_fallback(ui: &mut Ui, error: &RenderError) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            RichText::new("Something went wrong.")
                .heading()
                .color(palette::ERROR),
        );
        ui.label(format!("The {} view could not be displayed.", error.screen));
        ui.add_space(12.0);
        retry = ui.button("Try again").clicked();
    });
    retry
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload = catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom 1");

        let payload = catch_unwind(|| std::panic::panic_any(7u8)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
