//! Seven-dimension scholar profile.
//!
//! Each dimension is a 0–100 percentile against the detail population,
//! except Breadth which is a fixed linear scale. The population is limited
//! to scholars with at least one work and one citation.

use serde::Serialize;
use tracing::debug;

use scholarlens_common::ScholarDetail;

use crate::metrics::{efficiency, recent_momentum, top_paper_concentration, topic_diversity, works_per_year};
use crate::normalise::PercentilePool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Impact,
    Momentum,
    Output,
    Efficiency,
    Novelty,
    Breadth,
    PeakPower,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Impact,
        Dimension::Momentum,
        Dimension::Output,
        Dimension::Efficiency,
        Dimension::Novelty,
        Dimension::Breadth,
        Dimension::PeakPower,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Impact => "Impact",
            Dimension::Momentum => "Momentum",
            Dimension::Output => "Output",
            Dimension::Efficiency => "Efficiency",
            Dimension::Novelty => "Novelty",
            Dimension::Breadth => "Breadth",
            Dimension::PeakPower => "Peak Power",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// Percentile 0–100
    pub score: u8,
    pub raw_value: f64,
    pub description: String,
}

/// Blend of citations and h-index behind the Impact dimension.
pub fn impact_value(cited_by_count: u64, h_index: u32) -> f64 {
    cited_by_count as f64 * 0.5 + h_index as f64 * 1000.0 * 0.5
}

/// Precomputed percentile pools for one detail population.
///
/// Momentum uses two pools that are never mixed: positive two-year
/// citedness values, and recent-momentum ratios for scholars without one.
#[derive(Debug, Clone)]
pub struct DimensionPopulation {
    current_year: i32,
    size: usize,
    impact: PercentilePool,
    two_year: PercentilePool,
    momentum: PercentilePool,
    works: PercentilePool,
    citations_per_paper: PercentilePool,
    topic_diversity: PercentilePool,
    top_paper_concentration: PercentilePool,
}

impl DimensionPopulation {
    pub fn build(details: &[ScholarDetail], current_year: i32) -> Self {
        let valid: Vec<&ScholarDetail> = details
            .iter()
            .filter(|s| s.works_count > 0 && s.cited_by_count > 0)
            .collect();

        let pool = |f: &dyn Fn(&ScholarDetail) -> f64| PercentilePool::new(valid.iter().map(|s| f(*s)));

        let population = Self {
            current_year,
            size: valid.len(),
            impact: pool(&|s| impact_value(s.cited_by_count, s.h_index)),
            two_year: PercentilePool::new(
                valid
                    .iter()
                    .map(|s| s.two_year_mean_citedness)
                    .filter(|v| *v > 0.0),
            ),
            momentum: pool(&|s| recent_momentum(&s.yearly_data, current_year)),
            works: pool(&|s| s.works_count as f64),
            citations_per_paper: pool(&|s| efficiency(s.works_count, s.cited_by_count).unwrap_or(0.0)),
            topic_diversity: pool(&|s| topic_diversity(&s.topics) as f64),
            top_paper_concentration: pool(&|s| top_paper_concentration(&s.top_works, s.cited_by_count)),
        };

        debug!(
            population = population.size,
            excluded = details.len() - population.size,
            two_year_pool = population.two_year.len(),
            "Built dimension population"
        );
        population
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Scholars contributing to the pools.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Seven dimension scores for `scholar`, in [`Dimension::ALL`] order.
pub fn compute_dimension_scores(scholar: &ScholarDetail, population: &DimensionPopulation) -> Vec<DimensionScore> {
    let year = population.current_year;
    let mut scores = Vec::with_capacity(Dimension::ALL.len());

    let impact = impact_value(scholar.cited_by_count, scholar.h_index);
    scores.push(DimensionScore {
        dimension: Dimension::Impact,
        score: population.impact.percentile(impact),
        raw_value: scholar.cited_by_count as f64,
        description: format!(
            "{} citations, h={}",
            group_thousands(scholar.cited_by_count),
            scholar.h_index
        ),
    });

    let two_year = scholar.two_year_mean_citedness;
    let momentum = if two_year > 0.0 {
        DimensionScore {
            dimension: Dimension::Momentum,
            score: population.two_year.percentile(two_year),
            raw_value: two_year,
            description: format!("2yr mean: {:.1}", two_year),
        }
    } else {
        let ratio = recent_momentum(&scholar.yearly_data, year);
        DimensionScore {
            dimension: Dimension::Momentum,
            score: population.momentum.percentile(ratio),
            raw_value: ratio * 10.0,
            description: "Based on publication trend".to_string(),
        }
    };
    scores.push(momentum);

    let per_year = works_per_year(scholar.works_count, scholar.academic_age(year));
    scores.push(DimensionScore {
        dimension: Dimension::Output,
        score: population.works.percentile(scholar.works_count as f64),
        raw_value: scholar.works_count as f64,
        description: format!("{} papers ({:.1}/year)", scholar.works_count, per_year),
    });

    let cites_per_paper = efficiency(scholar.works_count, scholar.cited_by_count).unwrap_or(0.0);
    scores.push(DimensionScore {
        dimension: Dimension::Efficiency,
        score: population.citations_per_paper.percentile(cites_per_paper),
        raw_value: cites_per_paper,
        description: format!("{} cites/paper", cites_per_paper.round()),
    });

    let diversity = topic_diversity(&scholar.topics);
    scores.push(DimensionScore {
        dimension: Dimension::Novelty,
        score: population.topic_diversity.percentile(diversity as f64),
        raw_value: diversity as f64,
        description: format!("{} unique research topics", diversity),
    });

    let topic_count = scholar.topics.len();
    scores.push(DimensionScore {
        dimension: Dimension::Breadth,
        score: (topic_count * 10).min(100) as u8,
        raw_value: topic_count as f64,
        description: format!("{} topic areas", topic_count),
    });

    let concentration = top_paper_concentration(&scholar.top_works, scholar.cited_by_count);
    scores.push(DimensionScore {
        dimension: Dimension::PeakPower,
        score: population.top_paper_concentration.percentile(concentration),
        raw_value: concentration * 100.0,
        description: format!("Top 3 papers: {:.0}% of citations", concentration * 100.0),
    });

    scores
}

/// Score for `dimension`, 0 when absent.
pub fn score_of(scores: &[DimensionScore], dimension: Dimension) -> f64 {
    scores
        .iter()
        .find(|s| s.dimension == dimension)
        .map(|s| s.score as f64)
        .unwrap_or(0.0)
}

/// Raw value for `dimension`, 0 when absent.
pub fn raw_of(scores: &[DimensionScore], dimension: Dimension) -> f64 {
    scores
        .iter()
        .find(|s| s.dimension == dimension)
        .map(|s| s.raw_value)
        .unwrap_or(0.0)
}

/// Rounded mean of all dimension scores.
pub fn overall_score(scores: &[DimensionScore]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: f64 = scores.iter().map(|s| s.score as f64).sum();
    (sum / scores.len() as f64).round() as u8
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
