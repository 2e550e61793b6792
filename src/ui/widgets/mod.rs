//! UI widgets for reusable components.

pub mod completion_bar;
pub mod enrichment_panel;
pub mod fitness_trend;
pub mod heatmap;
pub mod notice;
pub mod stat_chart;

pub use completion_bar::completion_bar;
pub use enrichment_panel::enrichment_card;
pub use fitness_trend::FitnessTrendChart;
pub use heatmap::HeatmapCalendar;
pub use notice::{show_notice, Notice};
pub use stat_chart::StatChart;
