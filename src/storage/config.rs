//! Application configuration.
//!
//! Persisted as TOML in the platform data directory. The UI theme is the one
//! client-side preference: read at startup, written on every toggle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the identity provider API key.
pub const FIREBASE_KEY_ENV: &str = "ATHLETEHUB_FIREBASE_KEY";

/// Environment variable overriding the generative-text API key.
pub const GEMINI_KEY_ENV: &str = "ATHLETEHUB_GEMINI_KEY";

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Theme matching the operating system preference.
    pub fn system() -> Self {
        match dark_light::detect() {
            dark_light::Mode::Light => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Backend settings
    #[serde(default)]
    pub backend: BackendSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            backend: BackendSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

impl AppConfig {
    /// Defaults with the theme taken from the OS.
    pub fn with_system_theme(data_dir: PathBuf) -> Self {
        let mut config = Self {
            data_dir,
            ..Self::default()
        };
        config.ui.theme = Theme::system();
        config
    }

    /// Path of the document database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.backend.database_file)
    }

    /// Directory holding uploaded blobs.
    pub fn blob_dir(&self) -> PathBuf {
        self.data_dir.join("blobs")
    }

    /// Apply API key overrides from the environment.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(FIREBASE_KEY_ENV) {
            self.backend.firebase_api_key = Some(key);
        }
        if let Ok(key) = std::env::var(GEMINI_KEY_ENV) {
            self.backend.gemini_api_key = Some(key);
        }
    }
}

/// Backend-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Identity provider web API key
    pub firebase_api_key: Option<String>,
    /// Generative-text API key
    pub gemini_api_key: Option<String>,
    /// Generative model name
    pub gemini_model: String,
    /// Document database file name inside the data directory
    pub database_file: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            firebase_api_key: None,
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            database_file: "athletehub.db".to_string(),
        }
    }
}

/// UI-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Theme preference
    pub theme: Theme,
    /// Font scale multiplier
    pub font_scale: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_scale: 1.0,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "athletehub", "AthleteHub")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from a specific file.
///
/// A missing file yields defaults with the theme taken from the OS.
pub fn load_config_from(path: &PathBuf) -> Result<AppConfig, ConfigError> {
    let mut config = if path.exists() {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?
    } else {
        AppConfig::with_system_theme(PathBuf::new())
    };

    if let Some(parent) = path.parent() {
        config.data_dir = parent.to_path_buf();
    }
    config.apply_env_overrides();

    Ok(config)
}

/// Save configuration to a specific file.
pub fn save_config_to(config: &AppConfig, path: &PathBuf) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_theme_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.ui.theme = Theme::Light;
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.ui.theme, Theme::Light);
        assert_eq!(loaded.data_dir, dir.path());
        assert_eq!(loaded.backend.gemini_model, "gemini-1.5-flash");
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        let mut config = AppConfig::default();
        config.ui.theme = Theme::Light;
        let content = toml::to_string_pretty(&config).unwrap();
        assert!(content.contains("theme = \"light\""));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "version = \"0.1.0\"\n").unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.backend.database_file, "athletehub.db");
        assert_eq!(loaded.ui.theme, Theme::Dark);
    }

    #[test]
    fn test_missing_file_follows_system_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.ui.theme, Theme::system());
        assert_eq!(loaded.data_dir, dir.path());

        let fallback = AppConfig::with_system_theme(dir.path().to_path_buf());
        assert_eq!(fallback.ui.theme, Theme::system());
        assert_eq!(fallback.database_path(), dir.path().join("athletehub.db"));
    }
}
