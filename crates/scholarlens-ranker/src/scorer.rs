//! Composite scholar score computation.
//!
//! For each metric with positive weight and a rank for the scholar:
//!
//! n_m = 1 − (rank_m − 1) / K_m
//! S   = Σ(w_m × n_m) / Σ w_m
//!
//! K_m is the ranked population of that metric, so the m-index (only
//! scholars with a known academic age) is normalised against its own size.
//! A scholar with no weighted rank at all scores 0.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::metrics::{ExtendedScholar, MetricKey};
use crate::normalise::{normalised_rank, rank_by_metric, RankEntry, RankMap};
use crate::weights::WeightVector;

/// Scheme-independent rank maps for every metric of one population.
#[derive(Debug, Clone, Serialize)]
pub struct MetricRankings {
    maps: BTreeMap<MetricKey, RankMap>,
    population: usize,
}

impl MetricRankings {
    pub fn compute(scholars: &[ExtendedScholar]) -> Self {
        let maps = MetricKey::ALL
            .iter()
            .map(|key| (*key, rank_by_metric(scholars, *key)))
            .collect();
        Self { maps, population: scholars.len() }
    }

    pub fn get(&self, key: MetricKey) -> Option<&RankMap> {
        self.maps.get(&key)
    }

    pub fn entry(&self, id: &str, key: MetricKey) -> RankEntry {
        self.get(key).map(|m| m.get(id)).unwrap_or(RankEntry::NotRanked)
    }

    /// Size of the population the maps were computed over.
    pub fn population(&self) -> usize {
        self.population
    }
}

/// Composite scores and the resulting overall ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResult {
    pub scores: HashMap<String, f64>,
    pub ranks: HashMap<String, usize>,
    /// Scholar ids, best first
    pub order: Vec<String>,
}

impl CompositeResult {
    pub fn score(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    pub fn top(&self, n: usize) -> &[String] {
        &self.order[..n.min(self.order.len())]
    }
}

/// Composite score for one scholar.
pub fn composite_score(id: &str, rankings: &MetricRankings, weights: &WeightVector) -> f64 {
    let mut score = 0.0;
    let mut total_weight = 0.0;

    for key in MetricKey::ALL {
        let weight = weights.weight(key);
        if weight <= 0.0 {
            continue;
        }
        let Some(map) = rankings.get(key) else { continue };
        if let Some(rank) = map.get(id).rank() {
            score += normalised_rank(rank, map.ranked_count()) * weight;
            total_weight += weight;
        }
    }

    if total_weight > 0.0 {
        score / total_weight
    } else {
        0.0
    }
}

/// Score every scholar and order them best-first; ties keep input order.
pub fn compute_composite(
    scholars: &[ExtendedScholar],
    rankings: &MetricRankings,
    weights: &WeightVector,
) -> CompositeResult {
    let mut seen = HashSet::with_capacity(scholars.len());
    let mut scored: Vec<(&str, f64)> = scholars
        .iter()
        .filter(|s| seen.insert(s.id()))
        .map(|s| (s.id(), composite_score(s.id(), rankings, weights)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut scores = HashMap::with_capacity(scored.len());
    let mut ranks = HashMap::with_capacity(scored.len());
    let mut order = Vec::with_capacity(scored.len());
    for (pos, (id, score)) in scored.into_iter().enumerate() {
        scores.insert(id.to_string(), score);
        ranks.insert(id.to_string(), pos + 1);
        order.push(id.to_string());
    }

    debug!(
        scholars = order.len(),
        leader = order.first().map(String::as_str).unwrap_or("-"),
        "Computed composite ranking"
    );
    CompositeResult { scores, ranks, order }
}

/// Scholars ordered by one metric's rank; unranked scholars follow in input order.
pub fn sort_by_metric<'a>(
    scholars: &'a [ExtendedScholar],
    rankings: &MetricRankings,
    key: MetricKey,
) -> Vec<&'a ExtendedScholar> {
    let mut sorted: Vec<&ExtendedScholar> = scholars.iter().collect();
    sorted.sort_by_key(|s| rankings.entry(s.id(), key).rank().unwrap_or(usize::MAX));
    sorted
}

/// Scholars in composite order.
pub fn sort_by_composite<'a>(
    scholars: &'a [ExtendedScholar],
    composite: &CompositeResult,
) -> Vec<&'a ExtendedScholar> {
    let mut sorted: Vec<&ExtendedScholar> = scholars.iter().collect();
    sorted.sort_by_key(|s| composite.rank(s.id()).unwrap_or(usize::MAX));
    sorted
}
