//! Profile screen: details, social links, drafts and picture upload.

use std::collections::HashSet;
use std::path::PathBuf;

use crossbeam::channel::{unbounded, Receiver, Sender};
use egui::{Button, DragValue, Grid, RichText, ScrollArea, TextEdit, Ui, Window};

use crate::athletes::FitnessLevel;
use crate::auth::Role;
use crate::profile::{
    profile_completion, ProfileDetails, ProfileError, ProfileManager, SocialPlatform, UserProfile,
};
use crate::storage::{BlobStore, DocumentStore};
use crate::ui::widgets::{completion_bar, show_notice, Notice};

/// Results of background profile calls.
enum ProfileEvent {
    Loaded(Result<Option<UserProfile>, ProfileError>),
    Updated(Result<u8, ProfileError>),
    DraftSaved(Result<(), ProfileError>),
    PictureUploaded(Result<String, String>),
}

/// Profile screen state.
pub struct ProfileScreen<S, B> {
    manager: ProfileManager<S, B>,
    uid: String,
    email: String,
    role: Role,
    profile: Option<UserProfile>,
    completion: u8,
    editing_links: HashSet<SocialPlatform>,
    preview_open: bool,
    busy: bool,
    loading: bool,
    notice: Option<Notice>,
    events_tx: Sender<ProfileEvent>,
    events_rx: Receiver<ProfileEvent>,
}

impl<S, B> ProfileScreen<S, B>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
{
    pub fn new(
        manager: ProfileManager<S, B>,
        uid: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            manager,
            uid: uid.into(),
            email: email.into(),
            role,
            profile: None,
            completion: 0,
            editing_links: HashSet::new(),
            preview_open: false,
            busy: false,
            loading: false,
            notice: None,
            events_tx,
            events_rx,
        }
    }

    fn spawn_load(&mut self, ctx: &egui::Context) {
        self.loading = true;
        let manager = self.manager.clone();
        let uid = self.uid.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let result = manager.load(&uid).await;
            let _ = tx.send(ProfileEvent::Loaded(result));
            ctx.request_repaint();
        });
    }

    fn spawn_update(&mut self, ctx: &egui::Context, profile: UserProfile) {
        self.busy = true;
        let manager = self.manager.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let result = manager.update(&profile).await;
            let _ = tx.send(ProfileEvent::Updated(result));
            ctx.request_repaint();
        });
    }

    fn spawn_save_draft(&mut self, ctx: &egui::Context, profile: UserProfile) {
        self.busy = true;
        let manager = self.manager.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let result = manager.save_draft(&profile).await;
            let _ = tx.send(ProfileEvent::DraftSaved(result));
            ctx.request_repaint();
        });
    }

    fn spawn_upload(&mut self, ctx: &egui::Context, path: PathBuf) {
        self.busy = true;
        let manager = self.manager.clone();
        let uid = self.uid.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => manager
                    .upload_picture(&uid, bytes)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(format!("Could not read {}: {}", path.display(), e)),
            };
            let _ = tx.send(ProfileEvent::PictureUploaded(result));
            ctx.request_repaint();
        });
    }

    /// Apply finished background calls.
    fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ProfileEvent::Loaded(Ok(profile)) => {
                    self.loading = false;
                    let profile = profile.unwrap_or_else(|| {
                        tracing::info!("No profile document for {}, starting empty", self.uid);
                        UserProfile::new(&self.uid, "", &self.email, self.role)
                    });
                    self.completion = profile_completion(&profile);
                    self.profile = Some(profile);
                }
                ProfileEvent::Loaded(Err(e)) => {
                    self.loading = false;
                    tracing::warn!("Failed to load profile: {}", e);
                    self.notice = Some(Notice::error(format!("Could not load profile: {}", e)));
                }
                ProfileEvent::Updated(Ok(completion)) => {
                    self.busy = false;
                    self.completion = completion;
                    self.editing_links.clear();
                    self.notice = Some(Notice::info("Profile updated successfully!"));
                }
                ProfileEvent::DraftSaved(Ok(())) => {
                    self.busy = false;
                    self.notice = Some(Notice::info("Draft saved."));
                }
                ProfileEvent::Updated(Err(e)) | ProfileEvent::DraftSaved(Err(e)) => {
                    self.busy = false;
                    self.notice = Some(Notice::error(e.to_string()));
                }
                ProfileEvent::PictureUploaded(Ok(url)) => {
                    self.busy = false;
                    if let Some(profile) = self.profile.as_mut() {
                        profile.photo_url = Some(url);
                    }
                    self.notice = Some(Notice::info("Profile picture updated."));
                }
                ProfileEvent::PictureUploaded(Err(message)) => {
                    self.busy = false;
                    self.notice = Some(Notice::error(message));
                }
            }
        }
    }

    /// Render the screen.
    pub fn show(&mut self, ui: &mut Ui) {
        if self.profile.is_none() && !self.loading && self.notice.is_none() {
            self.spawn_load(ui.ctx());
        }
        self.process_events();

        ScrollArea::vertical().show(ui, |ui| {
            ui.heading("My Profile");
            ui.add_space(8.0);
            show_notice(ui, &mut self.notice);

            let Some(profile) = self.profile.as_mut() else {
                ui.spinner();
                return;
            };

            completion_bar(ui, self.completion);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                match &profile.photo_url {
                    Some(url) => ui.label(RichText::new(format!("Photo: {}", url)).small()),
                    None => ui.label(RichText::new("No profile picture").weak()),
                };
            });
            ui.add_space(8.0);

            Grid::new("profile_fields")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.add(TextEdit::singleline(&mut profile.name).desired_width(260.0));
                    ui.end_row();

                    ui.label("Email");
                    ui.label(profile.email.as_str());
                    ui.end_row();

                    ui.label("Achievements");
                    ui.add(
                        TextEdit::multiline(&mut profile.achievements)
                            .desired_rows(2)
                            .desired_width(260.0),
                    );
                    ui.end_row();

                    render_details(ui, &mut profile.details);
                });

            ui.add_space(12.0);
            ui.label(RichText::new("Social Links").strong());
            render_social_links(ui, profile, &mut self.editing_links);
        });

        self.render_actions(ui);
        self.render_preview(ui.ctx());
    }

    fn render_actions(&mut self, ui: &mut Ui) {
        let Some(profile) = self.profile.clone() else {
            return;
        };

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let enabled = !self.busy;
            if ui.add_enabled(enabled, Button::new("Update Profile")).clicked() {
                self.spawn_update(ui.ctx(), profile.clone());
            }
            if ui.add_enabled(enabled, Button::new("Save Draft")).clicked() {
                self.spawn_save_draft(ui.ctx(), profile.clone());
            }
            if ui.button("Preview").clicked() {
                self.preview_open = true;
            }
            if ui.add_enabled(enabled, Button::new("Upload Picture")).clicked() {
                let picked = rfd::FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
                    .pick_file();
                if let Some(path) = picked {
                    self.spawn_upload(ui.ctx(), path);
                }
            }
            if self.busy {
                ui.spinner();
            }
        });
    }

    fn render_preview(&mut self, ctx: &egui::Context) {
        let Some(profile) = self.profile.as_ref() else {
            return;
        };

        let mut open = self.preview_open;
        Window::new("Profile Preview")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(RichText::new(&profile.name).size(20.0).strong());
                ui.label(format!("{} · {}", profile.role(), profile.email));
                if !profile.achievements.is_empty() {
                    ui.add_space(6.0);
                    ui.label(profile.achievements.as_str());
                }
                ui.add_space(6.0);
                match &profile.details {
                    ProfileDetails::Athlete(d) => {
                        ui.label(format!("Age: {}  Sport: {}", d.age, d.sport));
                        ui.label(format!(
                            "Matches: {}  Goals: {}  Assists: {}",
                            d.matches_played, d.goals_scored, d.assists
                        ));
                        ui.label(format!("Fitness Level: {}", d.fitness_level));
                    }
                    ProfileDetails::Coach(d) => {
                        ui.label(format!("Experience: {}", d.experience));
                        ui.label(format!("Teams Managed: {}", d.teams_managed));
                        ui.label(format!("Certifications: {}", d.certifications));
                    }
                }
                for platform in SocialPlatform::ALL {
                    let link = profile.social_links.get(platform);
                    if !link.is_empty() {
                        ui.hyperlink_to(platform.to_string(), link);
                    }
                }
            });
        self.preview_open = open;
    }
}

fn render_details(ui: &mut Ui, details: &mut ProfileDetails) {
    match details {
        ProfileDetails::Athlete(d) => {
            ui.label("Age");
            ui.add(TextEdit::singleline(&mut d.age).desired_width(80.0));
            ui.end_row();

            ui.label("Sport");
            ui.add(TextEdit::singleline(&mut d.sport).desired_width(260.0));
            ui.end_row();

            ui.label("Matches Played");
            ui.add(DragValue::new(&mut d.matches_played).range(0..=10_000));
            ui.end_row();

            ui.label("Goals Scored");
            ui.add(DragValue::new(&mut d.goals_scored).range(0..=10_000));
            ui.end_row();

            ui.label("Assists");
            ui.add(DragValue::new(&mut d.assists).range(0..=10_000));
            ui.end_row();

            ui.label("Fitness Level");
            let selected = if d.fitness_level.is_empty() {
                "Select".to_string()
            } else {
                d.fitness_level.clone()
            };
            egui::ComboBox::from_id_salt("profile_fitness")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for level in FitnessLevel::ALL {
                        let label = level.label();
                        if ui.selectable_label(d.fitness_level == label, label).clicked() {
                            d.fitness_level = label.to_string();
                        }
                    }
                });
            ui.end_row();
        }
        ProfileDetails::Coach(d) => {
            ui.label("Experience");
            ui.add(TextEdit::singleline(&mut d.experience).desired_width(260.0));
            ui.end_row();

            ui.label("Teams Managed");
            ui.add(TextEdit::singleline(&mut d.teams_managed).desired_width(260.0));
            ui.end_row();

            ui.label("Certifications");
            ui.add(TextEdit::singleline(&mut d.certifications).desired_width(260.0));
            ui.end_row();
        }
    }
}

fn render_social_links(
    ui: &mut Ui,
    profile: &mut UserProfile,
    editing: &mut HashSet<SocialPlatform>,
) {
    for platform in SocialPlatform::ALL {
        ui.horizontal(|ui| {
            ui.label(format!("{}:", platform));
            let link = profile.social_links.get_mut(platform);
            if editing.contains(&platform) {
                ui.add(
                    TextEdit::singleline(link)
                        .hint_text(format!("https://{}.com/...", platform.key()))
                        .desired_width(260.0),
                );
                if ui.small_button("Done").clicked() {
                    editing.remove(&platform);
                }
            } else {
                if link.is_empty() {
                    ui.label(RichText::new("Not set").weak());
                } else {
                    ui.label(link.as_str());
                }
                if ui.small_button("Edit").clicked() {
                    editing.insert(platform);
                }
            }
        });
    }
}
