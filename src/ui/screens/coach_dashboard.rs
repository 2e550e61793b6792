//! Coach dashboard: roster CRUD, sorting, filtering, injuries and AI reports.

use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, Sender};
use egui::{Button, Grid, RichText, ScrollArea, TextEdit, Ui};

use crate::athletes::{
    fitness_series, sport_facet, stat_series, AthleteForm, AthleteGateway, AthleteRecord,
    FitnessLevel, InjuryDraft, InjuryError, InjuryStatus, SaveError, SaveOutcome, SortField,
    TableQuery,
};
use crate::enrichment::{EnrichmentGate, GateStatus, TextGenerator};
use crate::storage::{DocumentStore, StoreError};
use crate::ui::screens::roster_feed::RosterFeed;
use crate::ui::theme::palette;
use crate::ui::widgets::{enrichment_card, show_notice, Notice, StatChart};

/// Results of background store calls.
enum CoachEvent {
    Saved(Result<SaveOutcome, SaveError>),
    Deleted(Result<(), StoreError>),
    InjuryRecorded(Result<(), InjuryError>),
}

/// What a table row asked for.
enum RowAction {
    Edit(AthleteRecord),
    Delete(String),
    Injury(AthleteRecord),
    Analyze(AthleteRecord),
}

/// Injury form for one athlete.
struct InjuryEditor {
    athlete_id: String,
    athlete_name: String,
    draft: InjuryDraft,
}

/// Coach dashboard screen state.
pub struct CoachDashboard<S, G> {
    gateway: AthleteGateway<S>,
    gate: EnrichmentGate<G>,
    feed: RosterFeed,
    records: Vec<AthleteRecord>,
    query: TableQuery,
    form: AthleteForm,
    saving: bool,
    injury: Option<InjuryEditor>,
    notice: Option<Notice>,
    events_tx: Sender<CoachEvent>,
    events_rx: Receiver<CoachEvent>,
}

impl<S, G> CoachDashboard<S, G>
where
    S: DocumentStore + 'static,
    G: TextGenerator + 'static,
{
    pub fn new(gateway: AthleteGateway<S>, gate: EnrichmentGate<G>) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            gateway,
            gate,
            feed: RosterFeed::default(),
            records: Vec::new(),
            query: TableQuery::default(),
            form: AthleteForm::new(),
            saving: false,
            injury: None,
            notice: None,
            events_tx,
            events_rx,
        }
    }

    /// Subscribe to the roster and pick up new snapshots.
    fn sync_records(&mut self, ctx: &egui::Context) {
        if let Err(e) = self.feed.open(&self.gateway, ctx) {
            tracing::warn!("Failed to subscribe to roster: {}", e);
            self.notice = Some(Notice::error(format!("Could not load athletes: {}", e)));
        }
        if let Some(records) = self.feed.poll() {
            self.records = records;
        }
    }

    /// Apply finished background calls.
    fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                CoachEvent::Saved(result) => {
                    self.saving = false;
                    self.form.apply_outcome(&result);
                    self.notice = match result {
                        Ok(SaveOutcome::Created(_)) => Some(Notice::info("Athlete added.")),
                        Ok(SaveOutcome::Updated) => Some(Notice::info("Athlete updated.")),
                        Ok(SaveOutcome::LostUpdate) => Some(Notice::error(
                            "This athlete was deleted before your changes were saved.",
                        )),
                        Err(e) => Some(Notice::error(e.to_string())),
                    };
                }
                CoachEvent::Deleted(Err(e)) | CoachEvent::InjuryRecorded(Err(InjuryError::Remote(e))) => {
                    self.notice = Some(Notice::error(e.to_string()));
                }
                CoachEvent::InjuryRecorded(Err(e)) => {
                    self.notice = Some(Notice::error(e.to_string()));
                }
                CoachEvent::Deleted(Ok(())) => {}
                CoachEvent::InjuryRecorded(Ok(())) => {
                    self.injury = None;
                    self.notice = Some(Notice::info("Injury recorded."));
                }
            }
        }
    }

    fn spawn_save(&mut self, ctx: &egui::Context) {
        self.saving = true;
        let gateway = self.gateway.clone();
        let draft = self.form.draft.clone();
        let editing_id = self.form.editing_id.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let result = gateway.save(&draft, editing_id.as_deref()).await;
            let _ = tx.send(CoachEvent::Saved(result));
            ctx.request_repaint();
        });
    }

    fn spawn_delete(&self, ctx: &egui::Context, id: String) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let result = gateway.delete(&id).await;
            let _ = tx.send(CoachEvent::Deleted(result));
            ctx.request_repaint();
        });
    }

    fn spawn_injury(&self, ctx: &egui::Context, id: String, draft: InjuryDraft) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let result = gateway.record_injury(&id, &draft).await;
            let _ = tx.send(CoachEvent::InjuryRecorded(result));
            ctx.request_repaint();
        });
    }

    /// Render the dashboard.
    pub fn show(&mut self, ui: &mut Ui) {
        self.sync_records(ui.ctx());
        self.process_events();

        if self.gate.is_busy() {
            ui.ctx().request_repaint_after(Duration::from_millis(250));
        }

        ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Coach Dashboard");
            ui.add_space(8.0);
            show_notice(ui, &mut self.notice);

            self.render_filters(ui);
            ui.add_space(8.0);
            self.render_form(ui);
            ui.add_space(12.0);
            ui.separator();
            self.render_table(ui);
            ui.add_space(12.0);
            self.render_reports(ui);
            ui.add_space(12.0);
            self.render_charts(ui);
        });

        self.render_injury_window(ui.ctx());
    }

    fn render_filters(&mut self, ui: &mut Ui) {
        ui.add(
            TextEdit::singleline(&mut self.query.search)
                .hint_text("Search athletes...")
                .desired_width(f32::INFINITY),
        );

        let sports = sport_facet(&self.records);
        let selected = self.query.sport.clone().unwrap_or_else(|| "All Sports".to_string());
        egui::ComboBox::from_id_salt("sport_filter")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                if ui.selectable_label(self.query.sport.is_none(), "All Sports").clicked() {
                    self.query.sport = None;
                }
                for sport in sports {
                    let is_selected = self.query.sport.as_deref() == Some(sport.as_str());
                    if ui.selectable_label(is_selected, &sport).clicked() {
                        self.query.sport = Some(sport);
                    }
                }
            });
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let draft = &mut self.form.draft;

        Grid::new("athlete_form")
            .num_columns(4)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                form_field(ui, "Name", &mut draft.name);
                form_field(ui, "Email", &mut draft.email);
                ui.end_row();
                form_field(ui, "Age", &mut draft.age);
                form_field(ui, "Sport", &mut draft.sport);
                ui.end_row();
                form_field(ui, "Matches Played", &mut draft.matches_played);
                form_field(ui, "Goals Scored", &mut draft.goals_scored);
                ui.end_row();
                form_field(ui, "Assists", &mut draft.assists);
                ui.label("Fitness Level");
                let shown = if draft.fitness_level.is_empty() {
                    "Select..."
                } else {
                    draft.fitness_level.as_str()
                };
                egui::ComboBox::from_id_salt("fitness_level")
                    .selected_text(shown.to_string())
                    .show_ui(ui, |ui| {
                        for level in FitnessLevel::ALL {
                            if ui
                                .selectable_label(draft.fitness_level == level.label(), level.label())
                                .clicked()
                            {
                                draft.fitness_level = level.label().to_string();
                            }
                        }
                    });
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let label = if self.form.is_editing() {
                "Update Athlete"
            } else {
                "Add Athlete"
            };
            if ui.add_enabled(!self.saving, Button::new(label)).clicked() {
                let ctx = ui.ctx().clone();
                self.spawn_save(&ctx);
            }
            if self.form.is_editing() && ui.button("Cancel").clicked() {
                self.form.reset();
            }
        });
    }

    fn render_table(&mut self, ui: &mut Ui) {
        let rows = self.query.apply(&self.records);
        let busy = self.gate.is_busy();
        let mut clicked_sort: Option<SortField> = None;
        let mut actions: Vec<RowAction> = Vec::new();

        if rows.is_empty() {
            ui.label("No athletes match the current filters.");
            return;
        }

        Grid::new("athlete_table")
            .striped(true)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for field in SortField::ALL {
                    let header = match self.query.sort.indicator(field) {
                        Some(arrow) => format!("{} {}", field.label(), arrow),
                        None => field.label().to_string(),
                    };
                    if ui.add(Button::new(RichText::new(header).strong()).frame(false)).clicked() {
                        clicked_sort = Some(field);
                    }
                }
                ui.label(RichText::new("Injuries").strong());
                ui.label(RichText::new("Actions").strong());
                ui.end_row();

                for row in &rows {
                    let record = row.record;
                    ui.label(&row.chart.name);
                    ui.label(&record.email);
                    ui.label(&record.age);
                    ui.label(&record.sport);
                    ui.label(&record.matches_played);
                    ui.label(&record.goals_scored);
                    ui.label(&record.assists);
                    ui.label(&record.fitness_level);
                    ui.label(
                        record
                            .injury_history
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", "),
                    );

                    ui.horizontal(|ui| {
                        if ui.small_button("✏").on_hover_text("Edit").clicked() {
                            actions.push(RowAction::Edit(record.clone()));
                        }
                        if ui
                            .add(Button::new(RichText::new("🗑").color(palette::ERROR)).small())
                            .on_hover_text("Delete")
                            .clicked()
                        {
                            actions.push(RowAction::Delete(record.id.clone()));
                        }
                        if ui.small_button("✚ Injury").clicked() {
                            actions.push(RowAction::Injury(record.clone()));
                        }
                        let analyze = if busy { "Analyzing..." } else { "🤖 Analyze" };
                        if ui.add_enabled(!busy, Button::new(analyze).small()).clicked() {
                            actions.push(RowAction::Analyze(record.clone()));
                        }
                    });
                    ui.end_row();
                }
            });

        if let Some(field) = clicked_sort {
            self.query.sort.toggle(field);
        }

        let ctx = ui.ctx().clone();
        for action in actions {
            match action {
                RowAction::Edit(record) => self.form.begin_edit(&record),
                RowAction::Delete(id) => self.spawn_delete(&ctx, id),
                RowAction::Injury(record) => {
                    self.injury = Some(InjuryEditor {
                        athlete_id: record.id.clone(),
                        athlete_name: record.name.clone(),
                        draft: InjuryDraft::default(),
                    });
                }
                RowAction::Analyze(record) => {
                    self.gate.trigger(&record);
                }
            }
        }
    }

    fn render_reports(&mut self, ui: &mut Ui) {
        let status = match self.gate.status() {
            GateStatus::Idle => None,
            GateStatus::Loading => Some(("Generating report...", palette::WARNING)),
            GateStatus::Success => Some(("Report ready", palette::SUCCESS)),
            GateStatus::Error => Some(("Last report failed", palette::ERROR)),
        };
        if let Some((text, color)) = status {
            ui.label(RichText::new(text).color(color));
        }

        let mut results: Vec<_> = self.gate.results().into_iter().collect();
        results.sort_by_key(|(_, result)| std::cmp::Reverse(result.completed_at()));

        for (athlete_id, result) in results {
            let name = self
                .records
                .iter()
                .find(|r| r.id == athlete_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| athlete_id.clone());
            if enrichment_card(ui, &name, &result) {
                self.gate.dismiss(&athlete_id);
            }
        }
    }

    fn render_charts(&self, ui: &mut Ui) {
        let rows: Vec<_> = self
            .query
            .apply(&self.records)
            .into_iter()
            .map(|row| row.chart)
            .collect();

        ui.label(RichText::new("Performance").strong());
        let stats = stat_series(&rows);
        StatChart::new("coach_stats", &stats).show(ui);

        ui.add_space(8.0);
        ui.label(RichText::new("Fitness Levels").strong());
        let fitness = [fitness_series(&rows)];
        StatChart::new("coach_fitness", &fitness)
            .height(160.0)
            .y_labels(|v| crate::athletes::level_label(v).map(str::to_string))
            .show(ui);
    }

    fn render_injury_window(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.injury.as_mut() else {
            return;
        };

        let mut open = true;
        let mut submit = false;
        egui::Window::new(format!("Record Injury: {}", editor.athlete_name))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add(TextEdit::singleline(&mut editor.draft.injury_type).hint_text("Injury type"));
                egui::ComboBox::from_id_salt("injury_status")
                    .selected_text(editor.draft.status.as_str())
                    .show_ui(ui, |ui| {
                        for status in InjuryStatus::ALL {
                            ui.selectable_value(&mut editor.draft.status, status, status.as_str());
                        }
                    });
                submit = ui.button("Save Injury").clicked();
            });

        if submit {
            let id = editor.athlete_id.clone();
            let draft = editor.draft.clone();
            self.spawn_injury(ctx, id, draft);
        }
        if !open {
            self.injury = None;
        }
    }
}

fn form_field(ui: &mut Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(TextEdit::singleline(value).desired_width(180.0));
}
