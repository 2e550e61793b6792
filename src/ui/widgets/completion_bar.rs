//! Profile completion bar.

use egui::{ProgressBar, RichText, Ui};

use crate::profile::remaining;
use crate::ui::theme::palette;

/// Show the completion percentage with a hint while it is under 100.
pub fn completion_bar(ui: &mut Ui, completion: u8) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("Profile Completion: {}%", completion)).strong());
        if completion < 100 {
            ui.label(
                RichText::new(format!("Complete {}% more to finish!", remaining(completion)))
                    .color(palette::ERROR)
                    .small(),
            );
        }
    });
    ui.add(ProgressBar::new(f32::from(completion) / 100.0).fill(palette::ACCENT));
}
