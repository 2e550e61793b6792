//! Unit tests for the profile completion score.

use athletehub::auth::Role;
use athletehub::profile::{profile_completion, remaining, ProfileDetails, UserProfile};

#[test]
fn test_athlete_with_only_name() {
    let profile = UserProfile::new("u1", "Ana", "", Role::Athlete);
    assert_eq!(profile_completion(&profile), 7);
    assert_eq!(remaining(7), 93);
}

#[test]
fn test_coach_with_everything() {
    let mut profile = UserProfile::new("u2", "Carter", "c@club.org", Role::Coach);
    profile.achievements = "League title".to_string();
    profile.social_links.twitter = "https://twitter.com/carter".to_string();
    if let ProfileDetails::Coach(details) = &mut profile.details {
        details.experience = "10 years".to_string();
        details.teams_managed = "3".to_string();
        details.certifications = "UEFA B".to_string();
    }

    // 6 of 10
    assert_eq!(profile_completion(&profile), 60);
}

#[test]
fn test_empty_profile_is_zero() {
    let profile = UserProfile::new("u3", "", "", Role::Athlete);
    assert_eq!(profile_completion(&profile), 0);
    assert_eq!(remaining(0), 100);
}
