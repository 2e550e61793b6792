//! Profile completion score.

use super::types::{ProfileDetails, UserProfile};

/// Field total for athlete profiles.
pub const ATHLETE_TOTAL_FIELDS: u32 = 15;

/// Field total for coach profiles.
pub const COACH_TOTAL_FIELDS: u32 = 10;

/// Completion percentage, 0..=100.
///
/// Counts name, achievements and the role's own fields that are filled, plus
/// one for having any social link at all.
pub fn profile_completion(profile: &UserProfile) -> u8 {
    let mut filled = [!profile.name.is_empty(), !profile.achievements.is_empty()]
        .into_iter()
        .filter(|f| *f)
        .count() as u32;

    let total = match &profile.details {
        ProfileDetails::Athlete(d) => {
            filled += [
                !d.age.is_empty(),
                !d.sport.is_empty(),
                d.matches_played > 0,
                d.goals_scored > 0,
                d.assists > 0,
                !d.fitness_level.is_empty(),
            ]
            .into_iter()
            .filter(|f| *f)
            .count() as u32;
            ATHLETE_TOTAL_FIELDS
        }
        ProfileDetails::Coach(d) => {
            filled += [
                !d.experience.is_empty(),
                !d.teams_managed.is_empty(),
                !d.certifications.is_empty(),
            ]
            .into_iter()
            .filter(|f| *f)
            .count() as u32;
            COACH_TOTAL_FIELDS
        }
    };

    if profile.social_links.any_filled() {
        filled += 1;
    }

    let percent = (100.0 * f64::from(filled) / f64::from(total)).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Percentage still missing.
pub fn remaining(completion: u8) -> u8 {
    100u8.saturating_sub(completion)
}
