//! scholarlens-insights — Population statistics and distributions over the
//! scholar and early-career rosters.

pub mod stats;
pub mod distribution;
pub mod early_career;
pub mod overview;

pub use distribution::{
    category_distribution, citation_histogram, country_distribution, h_index_histogram,
    institution_distribution, CountEntry, HistogramBucket,
};
pub use early_career::{
    early_career_insights, early_career_statistics, youngest_scholars, EarlyCareerInsights,
    EarlyCareerStatistics, YoungScholar,
};
pub use overview::{overview, Overview};
pub use stats::{scatter_points, summary_statistics, top_scholars, ScatterPoint, SummaryStatistics};
