//! scholarlens-common — Shared types, errors, and configuration used across all ScholarLens crates.

pub mod error;
pub mod entities;
pub mod config;
pub mod roster;
pub mod early_career;

// Re-export commonly used types
pub use config::{CustomScheme, DisplayConfig, JoinPolicy, RosterConfig, ScholarLensConfig, ScoringConfig, WeightConfig};
pub use early_career::EarlyCareerIndex;
pub use entities::{EarlyCareerRecord, EarlyCareerSummary, ScholarDetail, ScholarRecord, Topic, TopWork, YearlyWorks};
pub use error::{Result, ScholarLensError};
pub use roster::Roster;

/// Calendar year used when no override is configured.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}
