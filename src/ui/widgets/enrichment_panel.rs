//! Scouting report card.

use egui::{RichText, Ui};

use crate::enrichment::EnrichmentResult;
use crate::ui::theme::palette;

/// Show one report. Returns `true` if the user dismissed it.
pub fn enrichment_card(ui: &mut Ui, athlete_name: &str, result: &EnrichmentResult) -> bool {
    let mut dismissed = false;

    ui.group(|ui| {
        ui.set_min_width(ui.available_width() - 8.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("🤖 {}", athlete_name)).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                    dismissed = true;
                }
                ui.label(
                    RichText::new(result.completed_at().format("%Y-%m-%d %H:%M").to_string()).small(),
                );
            });
        });

        let text = RichText::new(result.display_text());
        ui.label(if result.is_error() {
            text.color(palette::ERROR)
        } else {
            text
        });
    });

    dismissed
}
