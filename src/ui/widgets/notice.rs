//! Inline notices for non-fatal errors and confirmations.

use egui::{RichText, Ui};

use crate::ui::theme::palette;

/// A message shown above a form until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice::Info(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Show a notice slot. Returns with the slot cleared if the user dismissed it.
pub fn show_notice(ui: &mut Ui, notice: &mut Option<Notice>) {
    let Some(current) = notice.as_ref() else {
        return;
    };

    let color = if current.is_error() {
        palette::ERROR
    } else {
        palette::SUCCESS
    };

    let mut dismissed = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new(current.message()).color(color));
        if ui.small_button("✕").clicked() {
            dismissed = true;
        }
    });

    if dismissed {
        *notice = None;
    }
}
