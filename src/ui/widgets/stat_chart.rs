//! Per-athlete stat charts.

use egui::{Color32, Response, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::athletes::{SeriesKind, StatSeries};
use crate::ui::theme::palette;

/// Bars and lines over athletes on the x axis.
pub struct StatChart<'a> {
    id: &'a str,
    series: &'a [StatSeries],
    height: f32,
    y_formatter: Option<fn(f64) -> Option<String>>,
}

impl<'a> StatChart<'a> {
    /// Create a chart; every series must share the same athlete order.
    pub fn new(id: &'a str, series: &'a [StatSeries]) -> Self {
        Self {
            id,
            series,
            height: 220.0,
            y_formatter: None,
        }
    }

    /// Set chart height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Label y-axis marks; marks mapped to `None` are left blank.
    pub fn y_labels(mut self, formatter: fn(f64) -> Option<String>) -> Self {
        self.y_formatter = Some(formatter);
        self
    }

    /// Show the chart in the UI.
    pub fn show(self, ui: &mut Ui) -> Response {
        let names: Vec<String> = self
            .series
            .first()
            .map(|s| s.points.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default();

        if names.is_empty() {
            return ui.label("No athletes to chart yet.");
        }

        let bar_series = self
            .series
            .iter()
            .filter(|s| s.kind == SeriesKind::Bar)
            .count()
            .max(1);
        let bar_width = 0.8 / bar_series as f64;

        let mut plot = Plot::new(self.id)
            .height(self.height)
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let index = mark.value.round();
                if (mark.value - index).abs() > f64::EPSILON || index < 0.0 {
                    return String::new();
                }
                names.get(index as usize).cloned().unwrap_or_default()
            });

        if let Some(formatter) = self.y_formatter {
            plot = plot.y_axis_formatter(move |mark, _range| formatter(mark.value).unwrap_or_default());
        }

        plot.show(ui, |plot_ui| {
            let mut bar_slot = 0usize;
            for series in self.series {
                let color = series_color(series.label);
                match series.kind {
                    SeriesKind::Bar => {
                        let offset = (bar_slot as f64 - (bar_series as f64 - 1.0) / 2.0) * bar_width;
                        bar_slot += 1;
                        let bars = series
                            .points
                            .iter()
                            .enumerate()
                            .map(|(i, (name, value))| {
                                Bar::new(i as f64 + offset, *value)
                                    .width(bar_width)
                                    .name(name)
                                    .fill(color)
                            })
                            .collect();
                        plot_ui.bar_chart(BarChart::new(series.label, bars).color(color));
                    }
                    SeriesKind::Line => {
                        let points: Vec<[f64; 2]> = series
                            .points
                            .iter()
                            .enumerate()
                            .map(|(i, (_, value))| [i as f64, *value])
                            .collect();
                        plot_ui.line(Line::new(series.label, PlotPoints::new(points)).color(color));
                    }
                }
            }
        })
        .response
    }
}

fn series_color(label: &str) -> Color32 {
    match label {
        "Matches Played" => palette::MATCHES,
        "Goals Scored" => palette::GOALS,
        "Assists" => palette::ASSISTS,
        _ => palette::ACCENT,
    }
}
