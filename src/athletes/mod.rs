//! Athlete roster: record types, derived views and the mutation gateway.

pub mod gateway;
pub mod heatmap;
pub mod normalize;
pub mod trend;
pub mod types;
pub mod validation;
pub mod views;

pub use gateway::{AthleteForm, AthleteGateway, InjuryError, SaveError, SaveOutcome, ATHLETES};
pub use heatmap::{intensity, HeatmapBuckets, HeatmapWindow};
pub use normalize::{normalize, normalize_all, ChartRow};
pub use trend::{fitness_trend, level_label, FitnessTrend, TrendPoint};
pub use types::{
    AthleteDraft, AthleteRecord, FitnessLevel, FitnessSnapshot, InjuryDraft, InjuryEntry,
    InjuryStatus,
};
pub use validation::{validate_draft, ValidationError};
pub use views::{
    age_distribution, fitness_series, sport_facet, stat_series, SeriesKind, SortDirection,
    SortField, SortState, StatSeries, TableQuery, TableRow,
};
