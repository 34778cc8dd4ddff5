//! Fail-soft parsing of the bundled JSON rosters.
//!
//! Each array element is deserialized on its own, so one malformed record
//! never aborts the rest of the population. Skipped elements are logged.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::entities::{EarlyCareerRecord, ScholarDetail, ScholarRecord};

/// A record that can be held in a roster.
pub trait RosterEntry: DeserializeOwned {
    /// Uniqueness key within the roster.
    fn key(&self) -> &str;

    /// Basic presence checks; records failing them are skipped.
    fn is_well_formed(&self) -> bool {
        !self.key().trim().is_empty()
    }
}

impl RosterEntry for ScholarRecord {
    fn key(&self) -> &str {
        &self.id
    }

    fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.name.trim().is_empty()
            && self.two_year_mean_citedness.is_finite()
            && self.two_year_mean_citedness >= 0.0
    }
}

impl RosterEntry for ScholarDetail {
    fn key(&self) -> &str {
        &self.id
    }

    fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.name.trim().is_empty()
            && self.two_year_mean_citedness.is_finite()
            && self.two_year_mean_citedness >= 0.0
    }
}

/// Early-career records are keyed by display name. Duplicates are kept here
/// and resolved by [`crate::EarlyCareerIndex`] according to the join policy.
impl RosterEntry for EarlyCareerRecord {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Immutable, ordered collection of parsed records.
#[derive(Debug, Clone)]
pub struct Roster<T> {
    records: Vec<T>,
    skipped: usize,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self { records: Vec::new(), skipped: 0 }
    }
}

impl<T: RosterEntry> Roster<T> {
    /// Parse a JSON array, skipping malformed elements and duplicate keys.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(json).context("roster is not a JSON array")?;
        Ok(Self::from_values(raw, true))
    }

    /// Like [`Roster::from_json_str`] but keeps records sharing a key.
    pub fn from_json_str_allow_duplicates(json: &str) -> anyhow::Result<Self> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(json).context("roster is not a JSON array")?;
        Ok(Self::from_values(raw, false))
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::from_json_str(&read_roster(path.as_ref())?)
    }

    /// Like [`Roster::from_path`] but keeps records sharing a key.
    pub fn from_path_allow_duplicates(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::from_json_str_allow_duplicates(&read_roster(path.as_ref())?)
    }

    fn from_values(raw: Vec<serde_json::Value>, unique_keys: bool) -> Self {
        let mut records = Vec::with_capacity(raw.len());
        let mut seen = HashSet::new();
        let mut skipped = 0;

        for (idx, value) in raw.into_iter().enumerate() {
            let record: T = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    warn!(index = idx, error = %e, "Skipping malformed roster record");
                    skipped += 1;
                    continue;
                }
            };
            if !record.is_well_formed() {
                warn!(index = idx, key = record.key(), "Skipping incomplete roster record");
                skipped += 1;
                continue;
            }
            if unique_keys && !seen.insert(record.key().to_string()) {
                warn!(index = idx, key = record.key(), "Skipping duplicate roster record");
                skipped += 1;
                continue;
            }
            records.push(record);
        }

        debug!(loaded = records.len(), skipped, "Roster parsed");
        Self { records, skipped }
    }
}

fn read_roster(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read roster: {:?}", path))
}

impl<T> Roster<T> {
    pub fn from_records(records: Vec<T>) -> Self {
        Self { records, skipped: 0 }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Number of input elements dropped during parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
