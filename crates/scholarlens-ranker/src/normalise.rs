//! Rank and percentile normalisation.
//!
//! Ties are broken by input order: the descending sort is stable, so equal
//! values keep their relative position from the population slice.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::metrics::{ExtendedScholar, MetricKey};

/// A scholar's standing for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankEntry {
    /// 1-based rank within the scholars that have a value, and percentile 0–100
    Ranked { rank: usize, percentile: u8 },
    /// No value for this metric; render a placeholder, never a position
    NotRanked,
}

impl RankEntry {
    pub fn rank(&self) -> Option<usize> {
        match self {
            RankEntry::Ranked { rank, .. } => Some(*rank),
            RankEntry::NotRanked => None,
        }
    }

    pub fn percentile(&self) -> Option<u8> {
        match self {
            RankEntry::Ranked { percentile, .. } => Some(*percentile),
            RankEntry::NotRanked => None,
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, RankEntry::Ranked { .. })
    }
}

/// Sorted value pool for percentile lookups.
#[derive(Debug, Clone, Default)]
pub struct PercentilePool {
    sorted: Vec<f64>,
}

impl PercentilePool {
    /// Non-finite values are dropped.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        Self { sorted }
    }

    /// `round(100 * i / N)` where `i` is the first ascending index holding a
    /// value >= `value`; 100 when `value` exceeds the whole pool.
    pub fn percentile(&self, value: f64) -> u8 {
        let n = self.sorted.len();
        let idx = self.sorted.partition_point(|v| *v < value);
        // An empty pool lands here too, so N is never zero below.
        if idx >= n {
            return 100;
        }
        (100.0 * idx as f64 / n as f64).round() as u8
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

/// Percentile of `value` within `values`.
pub fn percentile_of(value: f64, values: &[f64]) -> u8 {
    PercentilePool::new(values.iter().copied()).percentile(value)
}

/// Indices of items with a defined value, ordered best-first.
/// Items whose value is `None` or non-finite are left out.
pub fn stable_rank_descending<T>(items: &[T], value: impl Fn(&T) -> Option<f64>) -> Vec<(usize, f64)> {
    let mut indexed: Vec<(usize, f64)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| value(item).filter(|v| v.is_finite()).map(|v| (i, v)))
        .collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed
}

/// Map `rank` within a population of `population` to (0, 1]; rank 1 → 1.0.
pub fn normalised_rank(rank: usize, population: usize) -> f64 {
    if population == 0 {
        return 0.0;
    }
    1.0 - (rank.saturating_sub(1)) as f64 / population as f64
}

/// Ranks for one metric over one population.
#[derive(Debug, Clone, Serialize)]
pub struct RankMap {
    metric: MetricKey,
    entries: HashMap<String, RankEntry>,
    /// Ranked scholar ids, best first
    order: Vec<String>,
}

impl RankMap {
    pub fn metric(&self) -> MetricKey {
        self.metric
    }

    /// Entry for `id`; unknown ids are `NotRanked`.
    pub fn get(&self, id: &str) -> RankEntry {
        self.entries.get(id).copied().unwrap_or(RankEntry::NotRanked)
    }

    /// Number of scholars holding a rank (the K in 1..=K).
    pub fn ranked_count(&self) -> usize {
        self.order.len()
    }

    /// Ranked ids, best first.
    pub fn ranked_ids(&self) -> &[String] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Rank `scholars` by `key`, descending.
///
/// Scholars without a value get [`RankEntry::NotRanked`] and do not count
/// toward the population size. A sole ranked scholar sits at percentile 100.
pub fn rank_by_metric(scholars: &[ExtendedScholar], key: MetricKey) -> RankMap {
    let mut seen = HashSet::with_capacity(scholars.len());
    let unique: Vec<&ExtendedScholar> = scholars
        .iter()
        .filter(|s| {
            let fresh = seen.insert(s.id());
            if !fresh {
                warn!(id = s.id(), metric = %key, "Duplicate scholar id ignored in ranking");
            }
            fresh
        })
        .collect();

    let sorted = stable_rank_descending(&unique, |s| s.value(key));
    let ranked = sorted.len();
    let pool = PercentilePool::new(sorted.iter().map(|(_, v)| *v));

    let mut entries = HashMap::with_capacity(unique.len());
    let mut order = Vec::with_capacity(ranked);
    for (pos, (idx, value)) in sorted.iter().enumerate() {
        let id = unique[*idx].id().to_string();
        let percentile = if ranked == 1 { 100 } else { pool.percentile(*value) };
        entries.insert(id.clone(), RankEntry::Ranked { rank: pos + 1, percentile });
        order.push(id);
    }
    for s in &unique {
        entries.entry(s.id().to_string()).or_insert(RankEntry::NotRanked);
    }

    debug!(metric = %key, ranked, unranked = unique.len() - ranked, "Ranked metric");
    RankMap { metric: key, entries, order }
}

/// Display band for a rank relative to its population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    Top5,
    Top10,
    Top25,
    Top50,
    Bottom50,
}

impl RankTier {
    pub fn classify(rank: usize, population: usize) -> RankTier {
        if population == 0 || rank == 0 {
            return RankTier::Bottom50;
        }
        let fraction = rank as f64 / population as f64;
        if fraction <= 0.05 {
            RankTier::Top5
        } else if fraction <= 0.10 {
            RankTier::Top10
        } else if fraction <= 0.25 {
            RankTier::Top25
        } else if fraction <= 0.50 {
            RankTier::Top50
        } else {
            RankTier::Bottom50
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankTier::Top5 => "Top 5%",
            RankTier::Top10 => "Top 10%",
            RankTier::Top25 => "Top 25%",
            RankTier::Top50 => "Top 50%",
            RankTier::Bottom50 => "Bottom 50%",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarlens_test_utils::ScholarBuilder;

    fn extended(id: &str, works: u64, citations: u64) -> ExtendedScholar {
        let record = ScholarBuilder::new(id, id).works(works).citations(citations).build();
        ExtendedScholar::new(record, None, 2025)
    }

    #[test]
    fn test_percentile_basic() {
        let values = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_of(10.0, &values), 0);
        assert_eq!(percentile_of(25.0, &values), 50);
        assert_eq!(percentile_of(40.0, &values), 75);
        assert_eq!(percentile_of(41.0, &values), 100);
    }

    #[test]
    fn test_percentile_ties_use_first_index() {
        let values = [5.0, 5.0, 5.0, 9.0];
        assert_eq!(percentile_of(5.0, &values), 0);
        assert_eq!(percentile_of(9.0, &values), 75);
    }

    #[test]
    fn test_percentile_empty_pool() {
        assert_eq!(percentile_of(3.0, &[]), 100);
        assert!(PercentilePool::new(vec![f64::NAN]).is_empty());
    }

    #[test]
    fn test_rank_excludes_undefined() {
        let scholars = vec![
            extended("A", 20, 10_000),
            extended("B", 0, 0),
            extended("C", 5, 500),
        ];
        let map = rank_by_metric(&scholars, MetricKey::Efficiency);
        assert_eq!(map.ranked_count(), 2);
        assert_eq!(map.get("A").rank(), Some(1));
        assert_eq!(map.get("C").rank(), Some(2));
        assert_eq!(map.get("B"), RankEntry::NotRanked);
        assert_eq!(map.get("missing"), RankEntry::NotRanked);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let scholars = vec![
            extended("first", 10, 100),
            extended("second", 10, 100),
            extended("third", 10, 200),
        ];
        let map = rank_by_metric(&scholars, MetricKey::Efficiency);
        assert_eq!(map.ranked_ids(), &["third", "first", "second"]);
    }

    #[test]
    fn test_rank_empty_and_single() {
        let map = rank_by_metric(&[], MetricKey::HIndex);
        assert!(map.is_empty());

        let only = vec![extended("solo", 3, 30)];
        let map = rank_by_metric(&only, MetricKey::CitedByCount);
        assert_eq!(map.get("solo"), RankEntry::Ranked { rank: 1, percentile: 100 });
    }

    #[test]
    fn test_duplicate_ids_ranked_once() {
        let scholars = vec![extended("A", 10, 100), extended("A", 10, 900)];
        let map = rank_by_metric(&scholars, MetricKey::CitedByCount);
        assert_eq!(map.ranked_count(), 1);
        assert_eq!(map.get("A").rank(), Some(1));
    }

    #[test]
    fn test_normalised_rank() {
        assert_eq!(normalised_rank(1, 4), 1.0);
        assert_eq!(normalised_rank(3, 4), 0.5);
        assert_eq!(normalised_rank(1, 0), 0.0);
    }

    #[test]
    fn test_rank_tiers() {
        assert_eq!(RankTier::classify(1, 100), RankTier::Top5);
        assert_eq!(RankTier::classify(10, 100), RankTier::Top10);
        assert_eq!(RankTier::classify(11, 100), RankTier::Top25);
        assert_eq!(RankTier::classify(50, 100), RankTier::Top50);
        assert_eq!(RankTier::classify(51, 100), RankTier::Bottom50);
        assert_eq!(RankTier::classify(0, 100), RankTier::Bottom50);
        assert_eq!(RankTier::classify(1, 0), RankTier::Bottom50);
    }
}
