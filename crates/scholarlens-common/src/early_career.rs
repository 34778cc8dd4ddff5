//! Name-keyed lookup over the early-career roster.
//!
//! The early-career roster has no foreign key into the scholar roster; the
//! join is by exact display name. The index is built once and passed
//! explicitly to whatever needs academic age.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::config::JoinPolicy;
use crate::entities::EarlyCareerRecord;

#[derive(Debug, Clone, Default)]
pub struct EarlyCareerIndex {
    by_name: HashMap<String, EarlyCareerRecord>,
    ambiguous: BTreeSet<String>,
}

impl EarlyCareerIndex {
    pub fn build(records: &[EarlyCareerRecord], policy: JoinPolicy) -> Self {
        let mut by_name: HashMap<String, EarlyCareerRecord> = HashMap::with_capacity(records.len());
        let mut ambiguous = BTreeSet::new();

        for record in records {
            if by_name.contains_key(&record.name) || ambiguous.contains(&record.name) {
                ambiguous.insert(record.name.clone());
                continue;
            }
            by_name.insert(record.name.clone(), record.clone());
        }

        if !ambiguous.is_empty() {
            warn!(
                count = ambiguous.len(),
                policy = ?policy,
                names = ?ambiguous,
                "Early-career roster has duplicate names"
            );
            if policy == JoinPolicy::SkipAmbiguous {
                for name in &ambiguous {
                    by_name.remove(name);
                }
            }
        }

        debug!(entries = by_name.len(), "Early-career index built");
        Self { by_name, ambiguous }
    }

    pub fn get(&self, name: &str) -> Option<&EarlyCareerRecord> {
        self.by_name.get(name)
    }

    pub fn first_pub_year(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(|r| r.first_pub_year)
    }

    pub fn early_pct(&self, name: &str) -> Option<f64> {
        self.get(name).map(|r| r.early_pct)
    }

    /// Names that appeared more than once in the source roster.
    pub fn ambiguous_names(&self) -> impl Iterator<Item = &str> {
        self.ambiguous.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, year: Option<i32>) -> EarlyCareerRecord {
        EarlyCareerRecord {
            name: name.to_string(),
            institution: None,
            first_pub_year: year,
            early_career_end: year.map(|y| y + 5),
            early_works_count: 3,
            early_career_citations: 40,
            total_citations: 400,
            h_index: 9,
            early_pct: 10.0,
            top_paper: None,
            top_paper_citations: 0,
        }
    }

    #[test]
    fn test_exact_name_join() {
        let idx = EarlyCareerIndex::build(&[record("Ada Lovelace", Some(1990))], JoinPolicy::SkipAmbiguous);
        assert_eq!(idx.first_pub_year("Ada Lovelace"), Some(1990));
        assert_eq!(idx.first_pub_year("ada lovelace"), None);
        assert_eq!(idx.first_pub_year("Ada Lovelace "), None);
    }

    #[test]
    fn test_duplicate_names_skipped() {
        let records = vec![
            record("Ada", Some(1990)),
            record("Ada", Some(2004)),
            record("Ada", Some(2010)),
            record("Bob", Some(2000)),
        ];
        let idx = EarlyCareerIndex::build(&records, JoinPolicy::SkipAmbiguous);
        assert_eq!(idx.first_pub_year("Ada"), None);
        assert_eq!(idx.first_pub_year("Bob"), Some(2000));
        assert_eq!(idx.ambiguous_names().collect::<Vec<_>>(), vec!["Ada"]);
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let records = vec![record("Ada", Some(1990)), record("Ada", Some(2004))];
        let idx = EarlyCareerIndex::build(&records, JoinPolicy::FirstWins);
        assert_eq!(idx.first_pub_year("Ada"), Some(1990));
        assert_eq!(idx.len(), 1);
    }
}
