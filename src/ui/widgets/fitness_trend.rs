//! Fitness level over time for one athlete.

use chrono::DateTime;
use egui::{Response, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::athletes::{level_label, FitnessTrend};
use crate::ui::theme::palette;

/// Line chart of a fitness trend with level names on the y axis.
pub struct FitnessTrendChart<'a> {
    id: String,
    trend: &'a FitnessTrend,
    height: f32,
}

impl<'a> FitnessTrendChart<'a> {
    pub fn new(id: impl Into<String>, trend: &'a FitnessTrend) -> Self {
        Self {
            id: id.into(),
            trend,
            height: 140.0,
        }
    }

    /// Set chart height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Show the chart in the UI.
    pub fn show(self, ui: &mut Ui) -> Response {
        let coords: Vec<[f64; 2]> = self
            .trend
            .points
            .iter()
            .map(|p| [p.timestamp_ms as f64, f64::from(p.level)])
            .collect();

        Plot::new(self.id)
            .height(self.height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .include_y(0.5)
            .include_y(4.5)
            .x_axis_formatter(|mark, _range| format_day(mark.value))
            .y_axis_formatter(|mark, _range| level_label(mark.value).unwrap_or_default().to_string())
            .label_formatter(|_name, value| {
                format!(
                    "{}\n{}",
                    format_day(value.x),
                    level_label(value.y.round()).unwrap_or("-")
                )
            })
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("Fitness", PlotPoints::new(coords.clone())).color(palette::ACCENT));
                plot_ui.points(Points::new("", PlotPoints::new(coords)).radius(3.0).color(palette::ACCENT));
            })
            .response
    }
}

/// "09 Mar" for a millisecond timestamp.
fn format_day(timestamp_ms: f64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|t| t.format("%d %b").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_day() {
        // 2025-03-09T00:00:00Z
        assert_eq!(format_day(1_741_478_400_000.0), "09 Mar");
    }
}
