//! Trait for early-career data access.
//!
//! Decouples metric derivation from how the early-career roster is joined,
//! so academic age can come from the name-keyed index or from test data.

use std::collections::HashMap;

use scholarlens_common::EarlyCareerIndex;

/// Trait for looking up career-start information by scholar name.
pub trait CareerProvider: Send + Sync {
    /// First publication year for a scholar.
    ///
    /// Returns None if:
    /// - Name not in the early-career roster
    /// - Name is ambiguous under the join policy
    /// - The record has no first publication year
    fn first_pub_year(&self, name: &str) -> Option<i32>;

    /// Early-career citation share (0–100).
    fn early_pct(&self, name: &str) -> Option<f64>;
}

impl CareerProvider for EarlyCareerIndex {
    fn first_pub_year(&self, name: &str) -> Option<i32> {
        EarlyCareerIndex::first_pub_year(self, name)
    }

    fn early_pct(&self, name: &str) -> Option<f64> {
        EarlyCareerIndex::early_pct(self, name)
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock provider with hardcoded data for unit tests.
#[derive(Debug, Clone, Default)]
pub struct MockCareerProvider {
    data: HashMap<String, (Option<i32>, f64)>,
}

impl MockCareerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scholar's first publication year and early-career share.
    pub fn with(mut self, name: &str, first_pub_year: i32, early_pct: f64) -> Self {
        self.data.insert(name.to_string(), (Some(first_pub_year), early_pct));
        self
    }

    /// Add a scholar whose record lacks a first publication year.
    pub fn with_unknown_start(mut self, name: &str) -> Self {
        self.data.insert(name.to_string(), (None, 0.0));
        self
    }
}

impl CareerProvider for MockCareerProvider {
    fn first_pub_year(&self, name: &str) -> Option<i32> {
        self.data.get(name).and_then(|(year, _)| *year)
    }

    fn early_pct(&self, name: &str) -> Option<f64> {
        self.data.get(name).map(|(_, pct)| *pct)
    }
}
