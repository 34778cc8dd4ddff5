//! Secondary per-scholar metrics.
//!
//! Every derived metric is `Option<f64>`: `None` means the scholar lacks the
//! data for it and must be left out of that metric's ranking population. It
//! is never coerced to zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use scholarlens_common::{ScholarRecord, ScholarLensError, Topic, TopWork, YearlyWorks};

use crate::career_provider::CareerProvider;

/// Floor applied to the historical works/year average in [`recent_momentum`].
pub const MOMENTUM_FLOOR: f64 = 0.1;

/// Upper bound on [`recent_momentum`].
pub const MOMENTUM_CAP: f64 = 3.0;

/// Rankable metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    HIndex,
    TwoYearMeanCitedness,
    Efficiency,
    MIndex,
    CitedByCount,
    WorksCount,
    I10Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// Accumulated prestige
    Stature,
    /// Current activity
    Momentum,
    /// Output shape
    Structure,
    /// Career-length adjustment
    Fairness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Primary,
    Secondary,
    Auxiliary,
}

/// Display metadata for a metric.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricInfo {
    pub key: MetricKey,
    pub label: &'static str,
    pub short_label: &'static str,
    pub description: &'static str,
    pub category: MetricCategory,
    pub importance: Importance,
}

impl MetricKey {
    pub const ALL: [MetricKey; 7] = [
        MetricKey::HIndex,
        MetricKey::TwoYearMeanCitedness,
        MetricKey::Efficiency,
        MetricKey::MIndex,
        MetricKey::CitedByCount,
        MetricKey::WorksCount,
        MetricKey::I10Index,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::HIndex => "h_index",
            MetricKey::TwoYearMeanCitedness => "two_year_mean_citedness",
            MetricKey::Efficiency => "efficiency",
            MetricKey::MIndex => "m_index",
            MetricKey::CitedByCount => "cited_by_count",
            MetricKey::WorksCount => "works_count",
            MetricKey::I10Index => "i10_index",
        }
    }

    pub fn info(&self) -> MetricInfo {
        use Importance::*;
        use MetricCategory::*;
        let (label, short_label, description, category, importance) = match self {
            MetricKey::HIndex => ("H-Index", "H-Index", "H-index metric", Stature, Primary),
            MetricKey::TwoYearMeanCitedness => (
                "2-Year Impact",
                "2Yr",
                "Recent impact (2-year mean citedness)",
                Momentum,
                Primary,
            ),
            MetricKey::Efficiency => (
                "Citations/Paper",
                "Eff",
                "Average citations per paper (efficiency)",
                Structure,
                Primary,
            ),
            MetricKey::MIndex => (
                "M-Index",
                "M-Idx",
                "H-index / Academic Age (career-adjusted)",
                Fairness,
                Primary,
            ),
            MetricKey::CitedByCount => {
                ("Total Citations", "Citations", "Total number of citations", Stature, Secondary)
            }
            MetricKey::WorksCount => ("Publications", "Pubs", "Total publications", Structure, Auxiliary),
            MetricKey::I10Index => ("i10-Index", "i10", "Papers with 10+ citations", Structure, Auxiliary),
        };
        MetricInfo { key: *self, label, short_label, description, category, importance }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = ScholarLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h_index" => Ok(MetricKey::HIndex),
            "two_year_mean_citedness" | "mean_citedness_2yr" => Ok(MetricKey::TwoYearMeanCitedness),
            "efficiency" => Ok(MetricKey::Efficiency),
            "m_index" => Ok(MetricKey::MIndex),
            "cited_by_count" => Ok(MetricKey::CitedByCount),
            "works_count" => Ok(MetricKey::WorksCount),
            "i10_index" => Ok(MetricKey::I10Index),
            other => Err(ScholarLensError::Config(format!("unknown metric: {other}"))),
        }
    }
}

/// A scholar record with its derived metrics attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedScholar {
    pub record: ScholarRecord,
    pub academic_age: Option<i32>,
    /// Early-career citation share (0–100) from the joined roster
    pub early_pct: Option<f64>,
    pub efficiency: Option<f64>,
    pub m_index: Option<f64>,
    pub works_per_year: f64,
}

impl ExtendedScholar {
    pub fn new(record: ScholarRecord, first_pub_year: Option<i32>, current_year: i32) -> Self {
        let academic_age = academic_age(first_pub_year, current_year);
        Self {
            efficiency: efficiency(record.works_count, record.cited_by_count),
            m_index: m_index(record.h_index, academic_age),
            works_per_year: works_per_year(record.works_count, academic_age),
            academic_age,
            early_pct: None,
            record,
        }
    }

    /// Attach the early-career citation share.
    pub fn with_early_pct(mut self, early_pct: Option<f64>) -> Self {
        self.early_pct = early_pct.filter(|p| p.is_finite());
        self
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Metric value, `None` when undefined for this scholar.
    pub fn value(&self, key: MetricKey) -> Option<f64> {
        let value = match key {
            MetricKey::HIndex => Some(self.record.h_index as f64),
            MetricKey::TwoYearMeanCitedness => Some(self.record.two_year_mean_citedness),
            MetricKey::Efficiency => self.efficiency,
            MetricKey::MIndex => self.m_index,
            MetricKey::CitedByCount => Some(self.record.cited_by_count as f64),
            MetricKey::WorksCount => Some(self.record.works_count as f64),
            MetricKey::I10Index => Some(self.record.i10_index as f64),
        };
        value.filter(|v| v.is_finite())
    }
}

/// Attach derived metrics to every record.
/// Academic age and early share are joined through `career` by exact display name.
pub fn derive_metrics(
    scholars: &[ScholarRecord],
    career: &dyn CareerProvider,
    current_year: i32,
) -> Vec<ExtendedScholar> {
    let extended: Vec<ExtendedScholar> = scholars
        .iter()
        .map(|s| {
            ExtendedScholar::new(s.clone(), career.first_pub_year(&s.name), current_year)
                .with_early_pct(career.early_pct(&s.name))
        })
        .collect();

    debug!(
        scholars = extended.len(),
        with_academic_age = extended.iter().filter(|s| s.academic_age.is_some()).count(),
        with_m_index = extended.iter().filter(|s| s.m_index.is_some()).count(),
        with_early_pct = extended.iter().filter(|s| s.early_pct.is_some()).count(),
        "Derived scholar metrics"
    );
    extended
}

// ── Formulas ────────────────────────────────────────────────────────────────

/// Citations per paper; undefined without any works.
pub fn efficiency(works_count: u64, cited_by_count: u64) -> Option<f64> {
    if works_count == 0 {
        return None;
    }
    Some(cited_by_count as f64 / works_count as f64)
}

/// Years since first publication. An implausible year that overflows the
/// subtraction reads as unknown.
pub fn academic_age(first_pub_year: Option<i32>, current_year: i32) -> Option<i32> {
    first_pub_year.and_then(|y| current_year.checked_sub(y))
}

/// h-index per year of academic age; undefined unless both are positive.
pub fn m_index(h_index: u32, academic_age: Option<i32>) -> Option<f64> {
    match academic_age {
        Some(age) if age > 0 && h_index > 0 => Some(h_index as f64 / age as f64),
        _ => None,
    }
}

/// Number of distinct topic names.
pub fn topic_diversity(topics: &[Topic]) -> usize {
    let mut names: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names.len()
}

/// Works per year over `[current_year - 3, current_year]` (divided by 3)
/// relative to the mean across the whole yearly series.
///
/// The historical mean is floored at [`MOMENTUM_FLOOR`] and the ratio capped
/// at [`MOMENTUM_CAP`]. An empty series has no momentum.
pub fn recent_momentum(yearly: &[YearlyWorks], current_year: i32) -> f64 {
    if yearly.is_empty() {
        return 0.0;
    }
    let recent_total: u64 = yearly
        .iter()
        .filter(|d| d.year >= current_year - 3)
        .map(|d| d.works)
        .sum();
    let all_total: u64 = yearly.iter().map(|d| d.works).sum();

    let avg_per_year = all_total as f64 / yearly.len() as f64;
    let recent_avg = recent_total as f64 / 3.0;
    (recent_avg / avg_per_year.max(MOMENTUM_FLOOR)).min(MOMENTUM_CAP)
}

/// Share of total citations held by the first three listed works.
pub fn top_paper_concentration(top_works: &[TopWork], cited_by_count: u64) -> f64 {
    if top_works.is_empty() || cited_by_count == 0 {
        return 0.0;
    }
    let top3: u64 = top_works.iter().take(3).map(|w| w.citations).sum();
    top3 as f64 / cited_by_count as f64
}

/// Works normalised by academic age when known, raw works otherwise.
pub fn works_per_year(works_count: u64, academic_age: Option<i32>) -> f64 {
    match academic_age {
        Some(age) => works_count as f64 / age.max(1) as f64,
        None => works_count as f64,
    }
}
