//! scholarlens-ranker — Multi-metric ranking and scoring engine.
//!
//! Pipeline: records → [`metrics`] → [`normalise`] (per-metric rank maps,
//! computed once per population) → [`scorer`] (weighted composite per
//! perspective). Separately, [`dimensions`] → [`tags`].

pub mod career_provider;
pub mod metrics;
pub mod normalise;
pub mod weights;
pub mod scorer;
pub mod cache;
pub mod dimensions;
pub mod tags;
pub mod engine;

pub use cache::RankingCache;
pub use career_provider::CareerProvider;
pub use dimensions::{compute_dimension_scores, overall_score, Dimension, DimensionPopulation, DimensionScore};
pub use engine::{build_profiles, LeaderboardRow, RankingEngine, ScholarProfile};
pub use metrics::{derive_metrics, ExtendedScholar, MetricKey};
pub use normalise::{rank_by_metric, RankEntry, RankMap, RankTier};
pub use scorer::{compute_composite, CompositeResult, MetricRankings};
pub use tags::{compute_tags, CareerStage, ImpactLevel, ScholarTag};
pub use weights::{Perspective, WeightVector, WeightingScheme};
