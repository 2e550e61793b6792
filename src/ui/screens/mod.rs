//! UI screens for the application.

pub mod athlete_dashboard;
pub mod coach_dashboard;
pub mod login;
pub mod profile;
pub mod roster_feed;

pub use athlete_dashboard::AthleteDashboard;
pub use coach_dashboard::CoachDashboard;
pub use login::{LoginAction, LoginMode, LoginScreen};
pub use profile::ProfileScreen;
pub use roster_feed::RosterFeed;

/// Screen navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Sign-in and sign-up
    #[default]
    Login,
    /// Roster management for coaches
    CoachDashboard,
    /// Team analytics for athletes
    AthleteDashboard,
    /// The signed-in user's profile
    Profile,
}

impl Screen {
    /// Name used in logs and the render fallback.
    pub fn name(self) -> &'static str {
        match self {
            Screen::Login => "sign-in",
            Screen::CoachDashboard => "coach dashboard",
            Screen::AthleteDashboard => "athlete dashboard",
            Screen::Profile => "profile",
        }
    }
}
