//! Descriptive tags assigned from dimension-score combinations.
//!
//! Tags are recomputed on every call and carry no state. Predicates that
//! depend on academic age never fire when the first publication year is
//! unknown; a missing early-career share reads as 0.

use serde::Serialize;

use scholarlens_common::ScholarDetail;

use crate::dimensions::{raw_of, score_of, Dimension, DimensionScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScholarTag {
    Prolific,
    Genius,
    LateBloomer,
    EarlyBurst,
    DarkHorse,
    AllRounder,
    LandmarkPaper,
    Pioneer,
    Legend,
}

impl ScholarTag {
    /// Evaluation order.
    pub const ALL: [ScholarTag; 9] = [
        ScholarTag::Prolific,
        ScholarTag::Genius,
        ScholarTag::LateBloomer,
        ScholarTag::EarlyBurst,
        ScholarTag::DarkHorse,
        ScholarTag::AllRounder,
        ScholarTag::LandmarkPaper,
        ScholarTag::Pioneer,
        ScholarTag::Legend,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScholarTag::Prolific => "Prolific",
            ScholarTag::Genius => "Genius",
            ScholarTag::LateBloomer => "Late Bloomer",
            ScholarTag::EarlyBurst => "Early Burst",
            ScholarTag::DarkHorse => "Dark Horse",
            ScholarTag::AllRounder => "All-Rounder",
            ScholarTag::LandmarkPaper => "Landmark Paper",
            ScholarTag::Pioneer => "Pioneer",
            ScholarTag::Legend => "Legend",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScholarTag::Prolific => "Extremely high output with sustained momentum",
            ScholarTag::Genius => "High impact with exceptional efficiency, quality over quantity",
            ScholarTag::LateBloomer => "Academic influence grew significantly over time",
            ScholarTag::EarlyBurst => "Major early career impact, possibly seminal work",
            ScholarTag::DarkHorse => "Rapidly rising influence in the field",
            ScholarTag::AllRounder => "Strong and balanced across all dimensions",
            ScholarTag::LandmarkPaper => "Impact driven by iconic publications",
            ScholarTag::Pioneer => "Exploring diverse research frontiers",
            ScholarTag::Legend => "One of the most influential figures in the field",
        }
    }
}

/// Inputs the predicates read, gathered once per scholar.
struct TagInputs {
    impact: f64,
    momentum: f64,
    output: f64,
    efficiency: f64,
    novelty: f64,
    peak_power: f64,
    peak_power_raw: f64,
    mean: f64,
    min: f64,
    academic_age: Option<i32>,
    early_pct: f64,
    cited_by_count: u64,
}

impl TagInputs {
    fn gather(scholar: &ScholarDetail, scores: &[DimensionScore], current_year: i32) -> Self {
        let (mean, min) = if scores.is_empty() {
            (0.0, 0.0)
        } else {
            let values = scores.iter().map(|s| s.score as f64);
            let sum: f64 = values.clone().sum();
            (sum / scores.len() as f64, values.fold(f64::INFINITY, f64::min))
        };
        Self {
            impact: score_of(scores, Dimension::Impact),
            momentum: score_of(scores, Dimension::Momentum),
            output: score_of(scores, Dimension::Output),
            efficiency: score_of(scores, Dimension::Efficiency),
            novelty: score_of(scores, Dimension::Novelty),
            peak_power: score_of(scores, Dimension::PeakPower),
            peak_power_raw: raw_of(scores, Dimension::PeakPower),
            mean,
            min,
            academic_age: scholar.academic_age(current_year),
            early_pct: scholar.early_pct(),
            cited_by_count: scholar.cited_by_count,
        }
    }

    fn matches(&self, tag: ScholarTag) -> bool {
        match tag {
            ScholarTag::Prolific => self.output >= 80.0 && self.momentum >= 50.0,
            ScholarTag::Genius => self.efficiency >= 80.0 && self.impact >= 70.0 && self.output < 70.0,
            ScholarTag::LateBloomer => {
                self.academic_age.is_some_and(|age| age > 15) && self.early_pct < 15.0 && self.momentum >= 60.0
            }
            ScholarTag::EarlyBurst => self.early_pct >= 30.0 && self.impact >= 60.0,
            ScholarTag::DarkHorse => {
                self.momentum >= 80.0 && self.impact < 60.0 && self.academic_age.is_some_and(|age| age < 15)
            }
            ScholarTag::AllRounder => self.mean >= 60.0 && self.min >= 40.0,
            ScholarTag::LandmarkPaper => self.peak_power >= 80.0 && self.peak_power_raw >= 50.0,
            ScholarTag::Pioneer => self.novelty >= 75.0,
            ScholarTag::Legend => self.impact >= 95.0 && self.cited_by_count >= 100_000,
        }
    }
}

/// Every tag whose predicate holds, in [`ScholarTag::ALL`] order.
pub fn compute_tags(scholar: &ScholarDetail, scores: &[DimensionScore], current_year: i32) -> Vec<ScholarTag> {
    let inputs = TagInputs::gather(scholar, scores, current_year);
    ScholarTag::ALL.into_iter().filter(|tag| inputs.matches(*tag)).collect()
}

/// Citation band shown on a scholar profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Emerging,
    Rising,
    Established,
    Distinguished,
    Elite,
    Legendary,
}

impl ImpactLevel {
    pub fn from_citations(cited_by_count: u64) -> Self {
        match cited_by_count {
            c if c >= 100_000 => ImpactLevel::Legendary,
            c if c >= 50_000 => ImpactLevel::Elite,
            c if c >= 20_000 => ImpactLevel::Distinguished,
            c if c >= 10_000 => ImpactLevel::Established,
            c if c >= 5_000 => ImpactLevel::Rising,
            _ => ImpactLevel::Emerging,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::Emerging => "Emerging",
            ImpactLevel::Rising => "Rising",
            ImpactLevel::Established => "Established",
            ImpactLevel::Distinguished => "Distinguished",
            ImpactLevel::Elite => "Elite",
            ImpactLevel::Legendary => "Legendary",
        }
    }
}

/// Career stage by academic age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerStage {
    Unknown,
    EarlyCareer,
    MidCareer,
    Established,
    Senior,
}

impl CareerStage {
    pub fn from_age(academic_age: Option<i32>) -> Self {
        match academic_age {
            None => CareerStage::Unknown,
            Some(age) if age >= 30 => CareerStage::Senior,
            Some(age) if age >= 20 => CareerStage::Established,
            Some(age) if age >= 10 => CareerStage::MidCareer,
            Some(_) => CareerStage::EarlyCareer,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CareerStage::Unknown => "Unknown",
            CareerStage::EarlyCareer => "Early-Career",
            CareerStage::MidCareer => "Mid-Career",
            CareerStage::Established => "Established",
            CareerStage::Senior => "Senior",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scholarlens_test_utils::DetailBuilder;

    fn scores(values: [u8; 7], peak_raw: f64) -> Vec<DimensionScore> {
        Dimension::ALL
            .iter()
            .zip(values)
            .map(|(dimension, score)| DimensionScore {
                dimension: *dimension,
                score,
                raw_value: if *dimension == Dimension::PeakPower { peak_raw } else { 0.0 },
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_prolific_and_all_rounder() {
        let scholar = DetailBuilder::new("A", "Ada").citations(30_000).build();
        // Impact, Momentum, Output, Efficiency, Novelty, Breadth, PeakPower
        let dims = scores([70, 55, 85, 60, 60, 50, 45], 10.0);
        let tags = compute_tags(&scholar, &dims, 2025);
        assert_eq!(tags, vec![ScholarTag::Prolific, ScholarTag::AllRounder]);
    }

    #[test]
    fn test_genius_requires_modest_output() {
        let scholar = DetailBuilder::new("A", "Ada").build();
        let dims = scores([75, 0, 65, 90, 0, 0, 0], 0.0);
        assert_eq!(compute_tags(&scholar, &dims, 2025), vec![ScholarTag::Genius]);

        let dims = scores([75, 0, 70, 90, 0, 0, 0], 0.0);
        assert!(compute_tags(&scholar, &dims, 2025).is_empty());
    }

    #[test]
    fn test_age_tags_need_known_age() {
        let dims = scores([40, 90, 0, 0, 0, 0, 0], 0.0);

        let unknown = DetailBuilder::new("A", "Ada").build();
        assert!(compute_tags(&unknown, &dims, 2025).is_empty());

        let young = DetailBuilder::new("B", "Bob").early_career(2015, 5.0).build();
        assert_eq!(compute_tags(&young, &dims, 2025), vec![ScholarTag::DarkHorse]);

        let veteran = DetailBuilder::new("C", "Cy").early_career(1995, 5.0).build();
        assert_eq!(compute_tags(&veteran, &dims, 2025), vec![ScholarTag::LateBloomer]);
    }

    #[test]
    fn test_early_burst() {
        let dims = scores([65, 0, 0, 0, 0, 0, 0], 0.0);
        let burst = DetailBuilder::new("A", "Ada").early_career(2000, 35.0).build();
        assert_eq!(compute_tags(&burst, &dims, 2025), vec![ScholarTag::EarlyBurst]);
    }

    #[test]
    fn test_landmark_paper_needs_raw_share() {
        let scholar = DetailBuilder::new("A", "Ada").build();
        let dims = scores([0, 0, 0, 0, 80, 0, 85], 60.0);
        assert_eq!(
            compute_tags(&scholar, &dims, 2025),
            vec![ScholarTag::LandmarkPaper, ScholarTag::Pioneer]
        );
        let dims = scores([0, 0, 0, 0, 0, 0, 85], 30.0);
        assert!(compute_tags(&scholar, &dims, 2025).is_empty());
    }

    #[test]
    fn test_legend_needs_both_conditions() {
        let dims = scores([96, 0, 0, 0, 0, 0, 0], 0.0);
        let big = DetailBuilder::new("A", "Ada").citations(120_000).build();
        let small = DetailBuilder::new("B", "Bob").citations(90_000).build();
        assert_eq!(compute_tags(&big, &dims, 2025), vec![ScholarTag::Legend]);
        assert!(compute_tags(&small, &dims, 2025).is_empty());

        let weak = scores([94, 0, 0, 0, 0, 0, 0], 0.0);
        assert!(compute_tags(&big, &weak, 2025).is_empty());
    }

    #[test]
    fn test_empty_scores_yield_no_tags() {
        let scholar = DetailBuilder::new("A", "Ada").citations(500_000).build();
        assert!(compute_tags(&scholar, &[], 2025).is_empty());
    }

    #[test]
    fn test_impact_level_and_career_stage() {
        assert_eq!(ImpactLevel::from_citations(4_999), ImpactLevel::Emerging);
        assert_eq!(ImpactLevel::from_citations(10_000), ImpactLevel::Established);
        assert_eq!(ImpactLevel::from_citations(100_000), ImpactLevel::Legendary);
        assert_eq!(CareerStage::from_age(None), CareerStage::Unknown);
        assert_eq!(CareerStage::from_age(Some(9)), CareerStage::EarlyCareer);
        assert_eq!(CareerStage::from_age(Some(20)), CareerStage::Established);
        assert_eq!(CareerStage::from_age(Some(30)).label(), "Senior");
    }
}
