//! User profile types.
//!
//! Stored under `users/{uid}` as `{name, email, role, photoURL,
//! additionalDetails}`. The role-specific part of `additionalDetails` is read
//! into [`ProfileDetails`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use crate::athletes::types::value_text;
use crate::auth::Role;
use crate::storage::Document;

/// Social platforms a profile can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    Facebook,
    Twitter,
    LinkedIn,
    Instagram,
}

static FACEBOOK: Lazy<Regex> = Lazy::new(|| link_pattern("facebook"));
static TWITTER: Lazy<Regex> = Lazy::new(|| link_pattern("twitter"));
static LINKEDIN: Lazy<Regex> = Lazy::new(|| link_pattern("linkedin"));
static INSTAGRAM: Lazy<Regex> = Lazy::new(|| link_pattern("instagram"));

fn link_pattern(domain: &str) -> Regex {
    Regex::new(&format!(r"^(https?://)?(www\.)?{}\.com/.+", domain))
        .expect("valid social link regex")
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::Facebook,
        SocialPlatform::Twitter,
        SocialPlatform::LinkedIn,
        SocialPlatform::Instagram,
    ];

    /// Stored key.
    pub fn key(self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::LinkedIn => "linkedin",
            SocialPlatform::Instagram => "instagram",
        }
    }

    /// Whether a URL points at this platform.
    pub fn is_valid_link(self, url: &str) -> bool {
        let pattern = match self {
            SocialPlatform::Facebook => &FACEBOOK,
            SocialPlatform::Twitter => &TWITTER,
            SocialPlatform::LinkedIn => &LINKEDIN,
            SocialPlatform::Instagram => &INSTAGRAM,
        };
        pattern.is_match(url)
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Social links, empty string for unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks {
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
    pub instagram: String,
}

impl SocialLinks {
    pub fn get(&self, platform: SocialPlatform) -> &str {
        match platform {
            SocialPlatform::Facebook => &self.facebook,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::LinkedIn => &self.linkedin,
            SocialPlatform::Instagram => &self.instagram,
        }
    }

    pub fn get_mut(&mut self, platform: SocialPlatform) -> &mut String {
        match platform {
            SocialPlatform::Facebook => &mut self.facebook,
            SocialPlatform::Twitter => &mut self.twitter,
            SocialPlatform::LinkedIn => &mut self.linkedin,
            SocialPlatform::Instagram => &mut self.instagram,
        }
    }

    /// Whether at least one link is set.
    pub fn any_filled(&self) -> bool {
        SocialPlatform::ALL
            .iter()
            .any(|p| !self.get(*p).is_empty())
    }

    /// First platform whose non-empty link does not match.
    pub fn first_invalid(&self) -> Option<SocialPlatform> {
        SocialPlatform::ALL.into_iter().find(|p| {
            let url = self.get(*p);
            !url.is_empty() && !p.is_valid_link(url)
        })
    }

    fn from_value(value: Option<&Value>) -> Self {
        let link = |key: &str| {
            value
                .and_then(|v| v.get(key))
                .map(value_text)
                .unwrap_or_default()
        };
        Self {
            facebook: link("facebook"),
            twitter: link("twitter"),
            linkedin: link("linkedin"),
            instagram: link("instagram"),
        }
    }

    fn to_value(&self) -> Value {
        json!({
            "facebook": self.facebook,
            "twitter": self.twitter,
            "linkedin": self.linkedin,
            "instagram": self.instagram,
        })
    }
}

/// Athlete-only profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AthleteDetails {
    pub age: String,
    pub sport: String,
    pub matches_played: u32,
    pub goals_scored: u32,
    pub assists: u32,
    pub fitness_level: String,
}

/// Coach-only profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoachDetails {
    pub experience: String,
    pub teams_managed: String,
    pub certifications: String,
}

/// Role-specific profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileDetails {
    Athlete(AthleteDetails),
    Coach(CoachDetails),
}

impl ProfileDetails {
    /// Empty details for a role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Athlete => ProfileDetails::Athlete(AthleteDetails::default()),
            Role::Coach => ProfileDetails::Coach(CoachDetails::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ProfileDetails::Athlete(_) => Role::Athlete,
            ProfileDetails::Coach(_) => Role::Coach,
        }
    }

    fn from_value(role: Role, value: Option<&Value>) -> Self {
        let text = |key: &str| {
            value
                .and_then(|v| v.get(key))
                .map(value_text)
                .unwrap_or_default()
        };
        let count = |key: &str| value.and_then(|v| v.get(key)).map(count_value).unwrap_or(0);

        match role {
            Role::Athlete => ProfileDetails::Athlete(AthleteDetails {
                age: text("age"),
                sport: text("sport"),
                matches_played: count("matchesPlayed"),
                goals_scored: count("goalsScored"),
                assists: count("assists"),
                fitness_level: text("fitnessLevel"),
            }),
            Role::Coach => ProfileDetails::Coach(CoachDetails {
                experience: text("experience"),
                teams_managed: text("teamsManaged"),
                certifications: text("certifications"),
            }),
        }
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        match self {
            ProfileDetails::Athlete(d) => {
                map.insert("age".into(), json!(d.age));
                map.insert("sport".into(), json!(d.sport));
                map.insert("matchesPlayed".into(), json!(d.matches_played));
                map.insert("goalsScored".into(), json!(d.goals_scored));
                map.insert("assists".into(), json!(d.assists));
                map.insert("fitnessLevel".into(), json!(d.fitness_level));
            }
            ProfileDetails::Coach(d) => {
                map.insert("experience".into(), json!(d.experience));
                map.insert("teamsManaged".into(), json!(d.teams_managed));
                map.insert("certifications".into(), json!(d.certifications));
            }
        }
    }
}

/// Non-negative count stored as a number or numeric text.
fn count_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// A user's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub achievements: String,
    pub social_links: SocialLinks,
    pub details: ProfileDetails,
}

impl UserProfile {
    /// Fresh profile for a new account.
    pub fn new(uid: impl Into<String>, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            email: email.into(),
            photo_url: None,
            achievements: String::new(),
            social_links: SocialLinks::default(),
            details: ProfileDetails::for_role(role),
        }
    }

    pub fn role(&self) -> Role {
        self.details.role()
    }

    /// Read a stored user document; missing fields take their defaults.
    pub fn from_document(doc: &Document) -> Self {
        let text = |field: &str| doc.get(field).map(value_text).unwrap_or_default();
        let role = Role::parse(&text("role")).unwrap_or_default();
        let details = doc.get("additionalDetails");

        Self {
            uid: doc.id.clone(),
            name: text("name"),
            email: text("email"),
            photo_url: Some(text("photoURL")).filter(|url| !url.is_empty()),
            achievements: details
                .and_then(|d| d.get("achievements"))
                .map(value_text)
                .unwrap_or_default(),
            social_links: SocialLinks::from_value(details.and_then(|d| d.get("socialLinks"))),
            details: ProfileDetails::from_value(role, details),
        }
    }

    /// Stored `additionalDetails` object.
    pub fn additional_details(&self) -> Value {
        let mut map = Map::new();
        map.insert("achievements".into(), json!(self.achievements));
        map.insert("socialLinks".into(), self.social_links.to_value());
        self.details.write_into(&mut map);
        Value::Object(map)
    }
}
