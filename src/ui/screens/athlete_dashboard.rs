//! Athlete dashboard: search, match heatmap, charts and athlete cards.

use chrono::Utc;
use egui::{RichText, ScrollArea, TextEdit, Ui};

use crate::athletes::{
    age_distribution, fitness_trend, stat_series, AthleteGateway, AthleteRecord, HeatmapBuckets,
    HeatmapWindow, SeriesKind, StatSeries, TableQuery,
};
use crate::storage::DocumentStore;
use crate::ui::screens::roster_feed::RosterFeed;
use crate::ui::widgets::{show_notice, FitnessTrendChart, HeatmapCalendar, Notice, StatChart};

/// Athlete dashboard screen state.
pub struct AthleteDashboard<S> {
    gateway: AthleteGateway<S>,
    feed: RosterFeed,
    records: Vec<AthleteRecord>,
    buckets: HeatmapBuckets,
    query: TableQuery,
    notice: Option<Notice>,
}

impl<S: DocumentStore + 'static> AthleteDashboard<S> {
    pub fn new(gateway: AthleteGateway<S>) -> Self {
        Self {
            gateway,
            feed: RosterFeed::default(),
            records: Vec::new(),
            buckets: HeatmapBuckets::default(),
            query: TableQuery::default(),
            notice: None,
        }
    }

    /// Subscribe to the roster and pick up new snapshots.
    fn sync_records(&mut self, ctx: &egui::Context) {
        if let Err(e) = self.feed.open(&self.gateway, ctx) {
            tracing::warn!("Failed to subscribe to roster: {}", e);
            self.notice = Some(Notice::error(format!("Could not load athletes: {}", e)));
        }
        if let Some(records) = self.feed.poll() {
            self.buckets = HeatmapBuckets::aggregate(&records);
            self.records = records;
        }
    }

    /// Render the dashboard.
    pub fn show(&mut self, ui: &mut Ui) {
        self.sync_records(ui.ctx());

        ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Athlete Dashboard");
            ui.add_space(8.0);
            show_notice(ui, &mut self.notice);

            ui.add(
                TextEdit::singleline(&mut self.query.search)
                    .hint_text("Search athletes...")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(12.0);

            ui.label(RichText::new("Match Activity (last 180 days)").strong());
            let window = HeatmapWindow::ending_on(Utc::now().date_naive());
            HeatmapCalendar::new(&self.buckets, window).show(ui);
            ui.add_space(12.0);

            let rows = self.query.apply(&self.records);
            let chart_rows: Vec<_> = rows.iter().map(|row| row.chart.clone()).collect();

            ui.label(RichText::new("Performance").strong());
            let stats = stat_series(&chart_rows);
            StatChart::new("athlete_stats", &stats).show(ui);

            ui.add_space(8.0);
            ui.label(RichText::new("Age Distribution").strong());
            let ages = [StatSeries {
                label: "Age",
                kind: SeriesKind::Bar,
                points: age_distribution(&chart_rows),
            }];
            StatChart::new("athlete_ages", &ages).height(160.0).show(ui);

            ui.add_space(12.0);
            for row in &rows {
                render_card(ui, row.record, &row.chart.name);
            }
        });
    }
}

fn render_card(ui: &mut Ui, record: &AthleteRecord, name: &str) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width() - 8.0);
        ui.label(RichText::new(name).size(16.0).strong());
        ui.label(format!("Sport: {}", record.sport));
        ui.label(format!("Age: {}", record.age));
        ui.label(format!(
            "Matches: {}  Goals: {}  Assists: {}",
            record.matches_played, record.goals_scored, record.assists
        ));
        ui.label(format!("Fitness Level: {}", record.fitness_level));

        if !record.injury_history.is_empty() {
            ui.label(RichText::new("Injuries").strong());
            for injury in &record.injury_history {
                ui.label(format!("• {}", injury));
            }
        }

        if let Some(trend) = fitness_trend(&record.fitness_history) {
            ui.label(RichText::new("Fitness Trend").strong());
            FitnessTrendChart::new(format!("trend_{}", record.id), &trend).show(ui);
        }
    });
    ui.add_space(6.0);
}
