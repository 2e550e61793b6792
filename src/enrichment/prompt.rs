//! Scouting-report prompt template and response cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::athletes::AthleteRecord;

static BOLD_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold marker regex"));

/// Build the analysis prompt from a record snapshot.
pub fn build_prompt(record: &AthleteRecord) -> String {
    let injuries = if record.injury_history.is_empty() {
        "None reported".to_string()
    } else {
        record
            .injury_history
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let or_zero = |value: &str| {
        if value.trim().is_empty() {
            "0".to_string()
        } else {
            value.to_string()
        }
    };

    format!(
        "**Athlete Analysis Request**\n\
         **Profile:**\n\
         - Name: {name}\n\
         - Sport: {sport}\n\
         - Age: {age}\n\
         - Fitness Level: {fitness}/10\n\
         \n\
         **Performance Data:**\n\
         - Matches: {matches}\n\
         - Goals: {goals}\n\
         - Assists: {assists}\n\
         - Injuries: {injuries}\n\
         \n\
         **Required Output Format:**\n\
         • Summary: [1-sentence overview]\n\
         • Strengths: [2 key strengths]\n\
         • Improvements: [2 actionable areas]\n\
         • Injury Risk: [Low/Medium/High] - [Brief reason]\n\
         • Recommendation: [1 specific training drill]\n\
         \n\
         Provide concise, coach-friendly advice.",
        name = record.name,
        sport = record.sport,
        age = record.age,
        fitness = record.fitness_level,
        matches = record.matches_played,
        goals = or_zero(&record.goals_scored),
        assists = or_zero(&record.assists),
        injuries = injuries,
    )
}

/// Swap `•` bullets for `◦` and strip `**bold**` markers.
pub fn clean_response(text: &str) -> String {
    let bullets = text.replace('•', "◦");
    BOLD_MARKERS.replace_all(&bullets, "$1").into_owned()
}
