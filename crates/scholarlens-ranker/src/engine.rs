//! Ranking engine: one immutable population snapshot plus its rank maps.
//!
//! Metrics and per-metric rank maps are computed once at construction.
//! Every scheme query re-derives composite scores from those maps without
//! touching them, so an engine can be shared across threads behind an `Arc`.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};

use scholarlens_common::{
    EarlyCareerIndex, EarlyCareerRecord, Result, Roster, ScholarDetail, ScholarLensConfig, ScholarRecord,
};

use crate::cache::RankingCache;
use crate::career_provider::CareerProvider;
use crate::dimensions::{compute_dimension_scores, overall_score, DimensionPopulation, DimensionScore};
use crate::metrics::{derive_metrics, ExtendedScholar, MetricKey};
use crate::normalise::{RankEntry, RankMap, RankTier};
use crate::scorer::{compute_composite, CompositeResult, MetricRankings};
use crate::tags::{compute_tags, CareerStage, ImpactLevel, ScholarTag};
use crate::weights::{Perspective, WeightingScheme};

/// One row of a composite leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: f64,
    pub tier: RankTier,
    /// Per-metric standing in [`MetricKey::ALL`] order
    pub metrics: Vec<(MetricKey, RankEntry)>,
}

#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: ScholarLensConfig,
    current_year: i32,
    scholars: Arc<[ExtendedScholar]>,
    rankings: Arc<MetricRankings>,
}

impl RankingEngine {
    pub fn new(config: ScholarLensConfig, records: &[ScholarRecord], career: &dyn CareerProvider) -> Self {
        let current_year = config.effective_year();
        let scholars: Arc<[ExtendedScholar]> = derive_metrics(records, career, current_year).into();
        let rankings = Arc::new(MetricRankings::compute(&scholars));
        info!(
            scholars = scholars.len(),
            current_year,
            "Ranking engine initialised"
        );
        Self { config, current_year, scholars, rankings }
    }

    /// Build from parsed rosters, joining early-career data by name under the
    /// configured join policy.
    pub fn from_rosters(
        config: ScholarLensConfig,
        scholars: &Roster<ScholarRecord>,
        early_career: &Roster<EarlyCareerRecord>,
    ) -> Self {
        let index = EarlyCareerIndex::build(early_career.records(), config.roster.join_policy);
        Self::new(config, scholars.records(), &index)
    }

    /// Read both rosters from the paths in `config`.
    pub fn load(config: ScholarLensConfig) -> anyhow::Result<Self> {
        let scholars = Roster::<ScholarRecord>::from_path(&config.roster.scholars_path)
            .context("Failed to load scholar roster")?;
        let early_career = Roster::<EarlyCareerRecord>::from_path_allow_duplicates(&config.roster.early_career_path)
            .context("Failed to load early-career roster")?;
        Ok(Self::from_rosters(config, &scholars, &early_career))
    }

    /// Read the detail roster from `roster.details_path` and profile every
    /// scholar in it.
    pub fn load_profiles(&self) -> anyhow::Result<Vec<ScholarProfile>> {
        let details = Roster::<ScholarDetail>::from_path(&self.config.roster.details_path)
            .context("Failed to load scholar detail roster")?;
        let profiles = build_profiles(details.records(), self.current_year);
        info!(profiles = profiles.len(), skipped = details.skipped(), "Scholar profiles built");
        Ok(profiles)
    }

    pub fn config(&self) -> &ScholarLensConfig {
        &self.config
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn scholars(&self) -> &[ExtendedScholar] {
        &self.scholars
    }

    pub fn rankings(&self) -> &MetricRankings {
        &self.rankings
    }

    pub fn rank_map(&self, key: MetricKey) -> Option<&RankMap> {
        self.rankings.get(key)
    }

    pub fn scheme(&self, name: &str) -> Result<WeightingScheme> {
        WeightingScheme::resolve(name, &self.config)
    }

    pub fn composite(&self, perspective: Perspective) -> CompositeResult {
        compute_composite(&self.scholars, &self.rankings, &perspective.weights())
    }

    /// Composite ranking under a built-in or configured scheme.
    pub fn composite_for(&self, scheme_name: &str) -> Result<CompositeResult> {
        let scheme = self.scheme(scheme_name)?;
        debug!(scheme = %scheme.name, "Computing composite ranking");
        Ok(compute_composite(&self.scholars, &self.rankings, &scheme.weights))
    }

    pub fn default_composite(&self) -> Result<CompositeResult> {
        self.composite_for(&self.config.scoring.default_perspective)
    }

    /// Composite ranking restricted to one category. The subset is ranked
    /// on its own, with rank maps memoised in `cache`.
    pub fn composite_within(
        &self,
        cache: &mut RankingCache,
        category: &str,
        scheme_name: &str,
    ) -> Result<CompositeResult> {
        let scheme = self.scheme(scheme_name)?;
        let subset: Vec<ExtendedScholar> = self
            .scholars
            .iter()
            .filter(|s| s.record.category.as_deref() == Some(category))
            .cloned()
            .collect();
        debug!(category, scholars = subset.len(), scheme = %scheme.name, "Ranking category subset");
        Ok(cache.composite(&subset, &scheme.weights))
    }

    /// First `n` rows of the composite ranking under `scheme_name`.
    pub fn leaderboard(&self, scheme_name: &str, n: usize) -> Result<Vec<LeaderboardRow>> {
        let composite = self.composite_for(scheme_name)?;
        let population = composite.order.len();
        let rows = composite
            .top(n)
            .iter()
            .enumerate()
            .filter_map(|(pos, id)| {
                let scholar = self.scholars.iter().find(|s| s.id() == id)?;
                Some(LeaderboardRow {
                    rank: pos + 1,
                    id: id.clone(),
                    name: scholar.name().to_string(),
                    score: composite.score(id).unwrap_or(0.0),
                    tier: RankTier::classify(pos + 1, population),
                    metrics: MetricKey::ALL
                        .iter()
                        .map(|key| (*key, self.rankings.entry(id, *key)))
                        .collect(),
                })
            })
            .collect();
        Ok(rows)
    }

    /// Leaderboard under the default perspective, `display.top_n` rows long.
    pub fn default_leaderboard(&self) -> Result<Vec<LeaderboardRow>> {
        self.leaderboard(&self.config.scoring.default_perspective, self.config.display.top_n)
    }
}

/// Dimension scores, tags and bands for one detail profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScholarProfile {
    pub id: String,
    pub name: String,
    pub dimensions: Vec<DimensionScore>,
    pub overall: u8,
    pub tags: Vec<ScholarTag>,
    pub impact_level: ImpactLevel,
    pub career_stage: CareerStage,
}

/// Profiles every scholar in `details` against the whole detail population.
pub fn build_profiles(details: &[ScholarDetail], current_year: i32) -> Vec<ScholarProfile> {
    let population = DimensionPopulation::build(details, current_year);
    details.iter().map(|d| profile(d, &population)).collect()
}

pub fn profile(detail: &ScholarDetail, population: &DimensionPopulation) -> ScholarProfile {
    let year = population.current_year();
    let dimensions = compute_dimension_scores(detail, population);
    let tags = compute_tags(detail, &dimensions, year);
    ScholarProfile {
        id: detail.id.clone(),
        name: detail.name.clone(),
        overall: overall_score(&dimensions),
        impact_level: ImpactLevel::from_citations(detail.cited_by_count),
        career_stage: CareerStage::from_age(detail.academic_age(year)),
        dimensions,
        tags,
    }
}
