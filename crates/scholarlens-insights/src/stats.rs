//! Summary statistics over the scholar roster.
//!
//! Zero values are dropped from each series before aggregating, so scholars
//! with missing counts do not drag the means down.

use serde::Serialize;
use tracing::debug;

use scholarlens_common::ScholarRecord;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CitationStats {
    pub mean: u64,
    pub median: u64,
    pub max: u64,
    /// Citation count at the 10% mark of the descending series
    pub top_10_percent: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HIndexStats {
    /// One decimal place
    pub mean: f64,
    pub median: u64,
    pub max: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorksStats {
    pub mean: u64,
    pub median: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_scholars: usize,
    pub citations: CitationStats,
    pub h_index: HIndexStats,
    pub works: WorksStats,
}

fn rounded(value: Option<f64>) -> u64 {
    value.map(|v| v.round() as u64).unwrap_or(0)
}

pub fn summary_statistics(scholars: &[ScholarRecord]) -> SummaryStatistics {
    let mut citations: Vec<u64> = scholars.iter().map(|s| s.cited_by_count).filter(|c| *c > 0).collect();
    let h: Vec<u32> = scholars.iter().map(|s| s.h_index).filter(|h| *h > 0).collect();
    let works: Vec<f64> = scholars
        .iter()
        .map(|s| s.works_count)
        .filter(|w| *w > 0)
        .map(|w| w as f64)
        .collect();

    let citation_values: Vec<f64> = citations.iter().map(|c| *c as f64).collect();
    let h_values: Vec<f64> = h.iter().map(|h| *h as f64).collect();

    citations.sort_unstable_by(|a, b| b.cmp(a));
    let top_10_percent = citations.get(citations.len() / 10).copied().unwrap_or(0);

    let stats = SummaryStatistics {
        total_scholars: scholars.len(),
        citations: CitationStats {
            mean: rounded(mean(&citation_values)),
            median: rounded(median(&citation_values)),
            max: citations.first().copied().unwrap_or(0),
            top_10_percent,
        },
        h_index: HIndexStats {
            mean: mean(&h_values).map(|m| (m * 10.0).round() / 10.0).unwrap_or(0.0),
            median: rounded(median(&h_values)),
            max: h.iter().copied().max().unwrap_or(0),
        },
        works: WorksStats {
            mean: rounded(mean(&works)),
            median: rounded(median(&works)),
        },
    };
    debug!(scholars = stats.total_scholars, "Computed summary statistics");
    stats
}

/// The `n` most cited scholars; ties keep roster order.
pub fn top_scholars(scholars: &[ScholarRecord], n: usize) -> Vec<&ScholarRecord> {
    let mut sorted: Vec<&ScholarRecord> = scholars.iter().collect();
    sorted.sort_by(|a, b| b.cited_by_count.cmp(&a.cited_by_count));
    sorted.truncate(n);
    sorted
}

/// Citations against h-index for one scholar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub citations: u64,
    pub h_index: u32,
    pub works: u64,
    pub category: Option<String>,
}

/// One point per scholar with both citations and an h-index.
pub fn scatter_points(scholars: &[ScholarRecord]) -> Vec<ScatterPoint> {
    scholars
        .iter()
        .filter(|s| s.cited_by_count > 0 && s.h_index > 0)
        .map(|s| ScatterPoint {
            name: s.name.clone(),
            citations: s.cited_by_count,
            h_index: s.h_index,
            works: s.works_count,
            category: s.category.clone(),
        })
        .collect()
}
