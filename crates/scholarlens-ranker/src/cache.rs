//! Memoised per-metric rank maps.
//!
//! Rank maps depend only on the population, so they are keyed by a SHA-256
//! fingerprint of the population's ids and metric values. Composite scores
//! depend on the scheme as well and are always recomputed from the cached
//! maps.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::metrics::{ExtendedScholar, MetricKey};
use crate::scorer::{compute_composite, CompositeResult, MetricRankings};
use crate::weights::WeightVector;

const DEFAULT_CAPACITY: usize = 16;

/// Identity of a population: order-sensitive, since order breaks ties.
pub fn population_fingerprint(scholars: &[ExtendedScholar]) -> String {
    let mut hasher = Sha256::new();
    for s in scholars {
        hasher.update(s.id().as_bytes());
        hasher.update([0u8]);
        for key in MetricKey::ALL {
            match s.value(key) {
                Some(v) => {
                    hasher.update([1u8]);
                    hasher.update(v.to_bits().to_le_bytes());
                }
                None => hasher.update([0u8]),
            }
        }
    }
    format!("{:x}", hasher.finalize())
}

/// FIFO-bounded cache of [`MetricRankings`] by population fingerprint.
#[derive(Debug)]
pub struct RankingCache {
    entries: HashMap<String, Arc<MetricRankings>>,
    insertion_order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for RankingCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RankingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Rank maps for `scholars`, computed on first sight of the population.
    pub fn rankings(&mut self, scholars: &[ExtendedScholar]) -> Arc<MetricRankings> {
        let key = population_fingerprint(scholars);
        if let Some(found) = self.entries.get(&key) {
            self.hits += 1;
            debug!(fingerprint = %&key[..12], "Rank map cache hit");
            return Arc::clone(found);
        }

        self.misses += 1;
        debug!(fingerprint = %&key[..12], population = scholars.len(), "Rank map cache miss");
        let rankings = Arc::new(MetricRankings::compute(scholars));

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&rankings));
        rankings
    }

    /// Composite ranking of `scholars` under `weights`, reusing cached rank maps.
    pub fn composite(&mut self, scholars: &[ExtendedScholar], weights: &WeightVector) -> CompositeResult {
        let rankings = self.rankings(scholars);
        compute_composite(scholars, &rankings, weights)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
