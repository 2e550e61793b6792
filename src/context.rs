//! Process-wide application context.
//!
//! Holds the theme preference and the signed-in user. Built once at startup
//! and passed to screens explicitly.

use std::path::PathBuf;

use crate::auth::{Role, Session};
use crate::storage::config::{get_config_path, save_config_to, AppConfig, ConfigError, Theme};

/// The signed-in user and their resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub session: Session,
    pub role: Role,
}

/// Shared state handed to every screen.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: AppConfig,
    config_path: PathBuf,
    user: Option<SignedInUser>,
}

impl AppContext {
    /// Context persisting to the default config location.
    pub fn new(config: AppConfig) -> Self {
        Self::with_config_path(config, get_config_path())
    }

    /// Context persisting to a specific config file.
    pub fn with_config_path(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            user: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.config.ui.theme
    }

    /// Switch theme and write the preference back.
    ///
    /// The in-memory theme changes even if the write fails.
    pub fn toggle_theme(&mut self) -> Result<Theme, ConfigError> {
        self.config.ui.theme = self.config.ui.theme.toggled();
        save_config_to(&self.config, &self.config_path)?;
        tracing::debug!("Theme set to {}", self.config.ui.theme);
        Ok(self.config.ui.theme)
    }

    pub fn user(&self) -> Option<&SignedInUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn sign_in(&mut self, session: Session, role: Role) {
        tracing::info!("{} signed in as {}", session.email, role);
        self.user = Some(SignedInUser { session, role });
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}
