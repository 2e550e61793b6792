//! Match calendar heatmap.

use chrono::{Datelike, NaiveDate};
use egui::{vec2, CornerRadius, Rect, Response, Sense, Ui};

use crate::athletes::{intensity, HeatmapBuckets, HeatmapWindow};
use crate::ui::theme::palette;

const CELL: f32 = 11.0;
const GAP: f32 = 2.0;

/// Calendar grid: one column per week, one row per weekday.
pub struct HeatmapCalendar<'a> {
    buckets: &'a HeatmapBuckets,
    window: HeatmapWindow,
}

impl<'a> HeatmapCalendar<'a> {
    pub fn new(buckets: &'a HeatmapBuckets, window: HeatmapWindow) -> Self {
        Self { buckets, window }
    }

    /// Show the grid in the UI.
    pub fn show(self, ui: &mut Ui) -> Response {
        let first_weekday = self.window.start.weekday().num_days_from_sunday();
        let total_days = (self.window.end - self.window.start).num_days() as u32 + 1;
        let weeks = (first_weekday + total_days).div_ceil(7);

        let size = vec2(
            weeks as f32 * (CELL + GAP),
            7.0 * (CELL + GAP),
        );
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let hover = response.hover_pos();
        let mut hovered: Option<(NaiveDate, f64)> = None;

        for (offset, day) in self.window.days().enumerate() {
            let slot = first_weekday + offset as u32;
            let (column, row) = (slot / 7, slot % 7);
            let min = rect.min + vec2(column as f32 * (CELL + GAP), row as f32 * (CELL + GAP));
            let cell = Rect::from_min_size(min, vec2(CELL, CELL));

            let count = self.buckets.get(day);
            let color = palette::HEATMAP[usize::from(intensity(count))];
            painter.rect_filled(cell, CornerRadius::same(2), color);

            if hover.is_some_and(|pos| cell.contains(pos)) {
                hovered = Some((day, count));
            }
        }

        match hovered {
            Some((day, count)) => response.on_hover_text(format!(
                "{}: {} matches",
                day.format("%Y-%m-%d"),
                count
            )),
            None => response,
        }
    }
}
