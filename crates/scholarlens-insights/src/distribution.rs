//! Roster breakdowns by country, institution and category, plus the
//! citation and h-index histograms.

use std::collections::HashMap;

use serde::Serialize;

use scholarlens_common::ScholarRecord;

/// Label reported for scholars without a category.
pub const UNCATEGORISED: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub range: &'static str,
    pub count: usize,
}

/// Count labels, most frequent first; ties keep first-seen order.
fn count_by<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        match index.get(label) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(label, entries.len());
                entries.push(CountEntry { label: label.to_string(), count: 1 });
            }
        }
    }
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn country_distribution(scholars: &[ScholarRecord]) -> Vec<CountEntry> {
    count_by(scholars.iter().filter_map(|s| non_empty(&s.country)))
}

/// The `limit` institutions with the most scholars.
pub fn institution_distribution(scholars: &[ScholarRecord], limit: usize) -> Vec<CountEntry> {
    let mut entries = count_by(scholars.iter().filter_map(|s| non_empty(&s.institution)));
    entries.truncate(limit);
    entries
}

pub fn category_distribution(scholars: &[ScholarRecord]) -> Vec<CountEntry> {
    count_by(scholars.iter().map(|s| non_empty(&s.category).unwrap_or(UNCATEGORISED)))
}

const CITATION_BUCKETS: [(&str, u64, u64); 6] = [
    ("0-5K", 0, 5_000),
    ("5K-10K", 5_000, 10_000),
    ("10K-20K", 10_000, 20_000),
    ("20K-50K", 20_000, 50_000),
    ("50K-100K", 50_000, 100_000),
    ("100K+", 100_000, u64::MAX),
];

const H_INDEX_BUCKETS: [(&str, u64, u64); 6] = [
    ("0-20", 0, 20),
    ("20-40", 20, 40),
    ("40-60", 40, 60),
    ("60-80", 60, 80),
    ("80-100", 80, 100),
    ("100+", 100, u64::MAX),
];

fn histogram(buckets: &[(&'static str, u64, u64)], values: &[u64]) -> Vec<HistogramBucket> {
    buckets
        .iter()
        .map(|&(range, min, max)| HistogramBucket {
            range,
            count: values.iter().filter(|v| **v >= min && (**v < max || max == u64::MAX)).count(),
        })
        .collect()
}

/// Scholars per citation band; lower bounds inclusive.
pub fn citation_histogram(scholars: &[ScholarRecord]) -> Vec<HistogramBucket> {
    let values: Vec<u64> = scholars.iter().map(|s| s.cited_by_count).collect();
    histogram(&CITATION_BUCKETS, &values)
}

pub fn h_index_histogram(scholars: &[ScholarRecord]) -> Vec<HistogramBucket> {
    let values: Vec<u64> = scholars.iter().map(|s| s.h_index as u64).collect();
    histogram(&H_INDEX_BUCKETS, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scholarlens_test_utils::ScholarBuilder;

    fn roster() -> Vec<ScholarRecord> {
        vec![
            ScholarBuilder::new("A", "A").country("US").institution("MIT").category("theory").citations(4_999).h_index(19).build(),
            ScholarBuilder::new("B", "B").country("GB").institution("UCL").citations(5_000).h_index(20).build(),
            ScholarBuilder::new("C", "C").country("GB").institution("UCL").category("theory").citations(250_000).h_index(140).build(),
            ScholarBuilder::new("D", "D").category("").build(),
        ]
    }

    #[test]
    fn test_country_distribution_orders_by_count() {
        let dist = country_distribution(&roster());
        assert_eq!(
            dist,
            vec![
                CountEntry { label: "GB".to_string(), count: 2 },
                CountEntry { label: "US".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_institution_limit() {
        let dist = institution_distribution(&roster(), 1);
        assert_eq!(dist, vec![CountEntry { label: "UCL".to_string(), count: 2 }]);
    }

    #[test]
    fn test_missing_category_is_other() {
        let dist = category_distribution(&roster());
        assert_eq!(dist[0], CountEntry { label: "theory".to_string(), count: 2 });
        assert_eq!(dist[1], CountEntry { label: UNCATEGORISED.to_string(), count: 2 });
    }

    #[test]
    fn test_histogram_bounds() {
        let citations: Vec<usize> = citation_histogram(&roster()).iter().map(|b| b.count).collect();
        assert_eq!(citations, vec![2, 1, 0, 0, 0, 1]);

        let h = h_index_histogram(&roster());
        assert_eq!(h[0].range, "0-20");
        assert_eq!(h.iter().map(|b| b.count).collect::<Vec<_>>(), vec![2, 1, 0, 0, 0, 1]);
    }
}
