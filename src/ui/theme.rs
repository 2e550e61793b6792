//! UI theme definitions.

use egui::{Color32, Visuals};

use crate::storage::config::Theme;

impl Theme {
    /// Get the egui Visuals for this theme.
    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => dark_visuals(),
            Theme::Light => light_visuals(),
        }
    }

    /// Icon for the toggle button (shows the theme you switch to).
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "🌙",
        }
    }
}

/// Dark theme colors.
pub struct DarkTheme;

impl DarkTheme {
    /// Background color
    pub const BACKGROUND: Color32 = Color32::from_rgb(17, 24, 39);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(31, 41, 55);
    /// Card background
    pub const CARD_BG: Color32 = Color32::from_rgb(55, 65, 81);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(243, 244, 246);
    /// Secondary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(156, 163, 175);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(75, 85, 99);
}

/// Light theme colors.
pub struct LightTheme;

impl LightTheme {
    /// Background color
    pub const BACKGROUND: Color32 = Color32::from_rgb(243, 244, 246);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(255, 255, 255);
    /// Card background
    pub const CARD_BG: Color32 = Color32::from_rgb(249, 250, 251);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(17, 24, 39);
    /// Secondary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(75, 85, 99);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(209, 213, 219);
}

/// Colors shared by both themes.
pub mod palette {
    use egui::Color32;

    /// Accent (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Success (green)
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
    /// Warning (amber)
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);
    /// Error (red)
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
    /// Series colors for the stat charts
    pub const MATCHES: Color32 = Color32::from_rgb(136, 132, 216);
    pub const GOALS: Color32 = Color32::from_rgb(130, 202, 157);
    pub const ASSISTS: Color32 = Color32::from_rgb(255, 198, 88);

    /// Heatmap cell colors, index = intensity class (0 = empty).
    pub const HEATMAP: [Color32; 5] = [
        Color32::from_rgb(235, 237, 240),
        Color32::from_rgb(155, 233, 168),
        Color32::from_rgb(64, 196, 99),
        Color32::from_rgb(48, 161, 78),
        Color32::from_rgb(33, 110, 57),
    ];
}

/// Create dark theme visuals.
fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_fill = DarkTheme::PANEL_BG;
    visuals.panel_fill = DarkTheme::PANEL_BG;
    visuals.faint_bg_color = DarkTheme::CARD_BG;
    visuals.extreme_bg_color = DarkTheme::BACKGROUND;

    visuals.widgets.noninteractive.bg_fill = DarkTheme::CARD_BG;
    visuals.widgets.inactive.bg_fill = DarkTheme::CARD_BG;
    visuals.widgets.active.bg_fill = palette::ACCENT;

    visuals.selection.bg_fill = palette::ACCENT.linear_multiply(0.4);
    visuals.selection.stroke.color = palette::ACCENT;

    visuals.widgets.noninteractive.fg_stroke.color = DarkTheme::TEXT_PRIMARY;
    visuals.widgets.inactive.fg_stroke.color = DarkTheme::TEXT_SECONDARY;
    visuals.widgets.hovered.fg_stroke.color = DarkTheme::TEXT_PRIMARY;

    visuals.widgets.noninteractive.bg_stroke.color = DarkTheme::BORDER;
    visuals.widgets.inactive.bg_stroke.color = DarkTheme::BORDER;

    visuals
}

/// Create light theme visuals.
fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    visuals.window_fill = LightTheme::PANEL_BG;
    visuals.panel_fill = LightTheme::PANEL_BG;
    visuals.faint_bg_color = LightTheme::CARD_BG;
    visuals.extreme_bg_color = LightTheme::BACKGROUND;

    visuals.widgets.noninteractive.bg_fill = LightTheme::CARD_BG;
    visuals.widgets.inactive.bg_fill = LightTheme::CARD_BG;
    visuals.widgets.active.bg_fill = palette::ACCENT;

    visuals.selection.bg_fill = palette::ACCENT.linear_multiply(0.2);
    visuals.selection.stroke.color = palette::ACCENT;

    visuals.widgets.noninteractive.fg_stroke.color = LightTheme::TEXT_PRIMARY;
    visuals.widgets.inactive.fg_stroke.color = LightTheme::TEXT_SECONDARY;
    visuals.widgets.hovered.fg_stroke.color = LightTheme::TEXT_PRIMARY;
    visuals.widgets.active.fg_stroke.color = Color32::WHITE;

    visuals.widgets.noninteractive.bg_stroke.color = LightTheme::BORDER;
    visuals.widgets.inactive.bg_stroke.color = LightTheme::BORDER;

    visuals
}
