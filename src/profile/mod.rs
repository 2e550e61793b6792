//! User profiles: role-tagged details, completion score and persistence.

pub mod completion;
pub mod manager;
pub mod types;

pub use completion::{profile_completion, remaining, ATHLETE_TOTAL_FIELDS, COACH_TOTAL_FIELDS};
pub use manager::{ProfileError, ProfileManager};
pub use types::{
    AthleteDetails, CoachDetails, ProfileDetails, SocialLinks, SocialPlatform, UserProfile,
};
