//! Sign-in and sign-up screen.

use egui::{Button, RichText, TextEdit, Ui};

use crate::auth::{FederatedProvider, Role};
use crate::ui::widgets::{show_notice, Notice};

/// Which form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

/// What the user asked for. The app runs the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        name: String,
        email: String,
        password: String,
        role: Role,
    },
    Federated(FederatedProvider),
}

/// Login screen state.
#[derive(Default)]
pub struct LoginScreen {
    mode: LoginMode,
    name: String,
    email: String,
    password: String,
    role: Role,
    notice: Option<Notice>,
    pending: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an error and re-enable the form.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.pending = false;
        self.notice = Some(Notice::error(message));
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Render the screen.
    pub fn show(&mut self, ui: &mut Ui) -> Option<LoginAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(RichText::new("AthleteHub").size(32.0).strong());
            ui.add_space(8.0);
            let title = match self.mode {
                LoginMode::SignIn => "Sign in to your account",
                LoginMode::SignUp => "Create an account",
            };
            ui.label(title);
            ui.add_space(16.0);

            ui.set_max_width(320.0);
            show_notice(ui, &mut self.notice);

            if self.mode == LoginMode::SignUp {
                ui.add(TextEdit::singleline(&mut self.name).hint_text("Full name"));
                ui.add_space(6.0);
            }
            ui.add(TextEdit::singleline(&mut self.email).hint_text("Email"));
            ui.add_space(6.0);
            ui.add(
                TextEdit::singleline(&mut self.password)
                    .hint_text("Password")
                    .password(true),
            );
            ui.add_space(6.0);

            if self.mode == LoginMode::SignUp {
                ui.horizontal(|ui| {
                    ui.label("I am a:");
                    for role in Role::ALL {
                        ui.radio_value(&mut self.role, role, role.to_string());
                    }
                });
                ui.add_space(6.0);
            }

            let submit_label = match self.mode {
                LoginMode::SignIn => "Sign In",
                LoginMode::SignUp => "Sign Up",
            };
            let submit = ui.add_enabled(
                !self.pending,
                Button::new(submit_label).min_size(egui::vec2(320.0, 32.0)),
            );
            if submit.clicked() {
                action = self.submit();
            }

            ui.add_space(6.0);
            let google = ui.add_enabled(
                !self.pending,
                Button::new("Continue with Google").min_size(egui::vec2(320.0, 32.0)),
            );
            if google.clicked() {
                self.pending = true;
                action = Some(LoginAction::Federated(FederatedProvider::Google));
            }

            ui.add_space(12.0);
            let switch_label = match self.mode {
                LoginMode::SignIn => "Don't have an account? Sign up",
                LoginMode::SignUp => "Already have an account? Sign in",
            };
            if ui.link(switch_label).clicked() {
                self.mode = match self.mode {
                    LoginMode::SignIn => LoginMode::SignUp,
                    LoginMode::SignUp => LoginMode::SignIn,
                };
                self.notice = None;
            }

            if self.pending {
                ui.add_space(8.0);
                ui.spinner();
            }
        });

        action
    }

    fn submit(&mut self) -> Option<LoginAction> {
        let email = self.email.trim().to_string();
        if email.is_empty() || self.password.is_empty() {
            self.notice = Some(Notice::error("Email and password are required."));
            return None;
        }

        let action = match self.mode {
            LoginMode::SignIn => LoginAction::SignIn {
                email,
                password: self.password.clone(),
            },
            LoginMode::SignUp => {
                let name = self.name.trim().to_string();
                if name.is_empty() {
                    self.notice = Some(Notice::error("Name is required."));
                    return None;
                }
                LoginAction::SignUp {
                    name,
                    email,
                    password: self.password.clone(),
                    role: self.role,
                }
            }
        };

        self.pending = true;
        self.notice = None;
        Some(action)
    }
}
