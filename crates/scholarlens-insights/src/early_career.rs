//! Early-career views: citation statistics, cohort counts, and the youngest
//! scholars by academic age.

use serde::Serialize;

use scholarlens_common::EarlyCareerRecord;

use crate::stats::{mean, median};

/// Early-career share at or above which a scholar counts as an early achiever.
pub const HIGH_EARLY_PCT: f64 = 20.0;
/// First publication year from which a scholar counts as modern.
pub const MODERN_FROM: i32 = 2005;
/// First publication year before which a scholar counts as classic.
pub const CLASSIC_BEFORE: i32 = 1990;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EarlyCareerStatistics {
    pub mean: u64,
    pub median: u64,
    pub max: u64,
    pub total: usize,
}

pub fn early_career_statistics(records: &[EarlyCareerRecord]) -> EarlyCareerStatistics {
    let citations: Vec<f64> = records.iter().map(|r| r.early_career_citations as f64).collect();
    EarlyCareerStatistics {
        mean: mean(&citations).map(|m| m.round() as u64).unwrap_or(0),
        median: median(&citations).map(|m| m.round() as u64).unwrap_or(0),
        max: records.iter().map(|r| r.early_career_citations).max().unwrap_or(0),
        total: records.len(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EarlyCareerInsights {
    pub high_early_share: usize,
    pub modern: usize,
    pub classic: usize,
    pub average_early_citations: u64,
}

/// Cohort counts. Records without a first publication year belong to neither
/// the modern nor the classic cohort.
pub fn early_career_insights(records: &[EarlyCareerRecord]) -> EarlyCareerInsights {
    EarlyCareerInsights {
        high_early_share: records.iter().filter(|r| r.early_pct >= HIGH_EARLY_PCT).count(),
        modern: records.iter().filter(|r| r.first_pub_year.is_some_and(|y| y >= MODERN_FROM)).count(),
        classic: records.iter().filter(|r| r.first_pub_year.is_some_and(|y| y < CLASSIC_BEFORE)).count(),
        average_early_citations: early_career_statistics(records).mean,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YoungScholar {
    pub name: String,
    pub institution: Option<String>,
    pub first_pub_year: i32,
    pub academic_age: i32,
    pub total_citations: u64,
    pub h_index: u32,
    pub citations_per_year: u64,
}

/// The `n` scholars with the shortest careers. Records without a first
/// publication year, or starting in `current_year` or later, are skipped.
pub fn youngest_scholars(records: &[EarlyCareerRecord], current_year: i32, n: usize) -> Vec<YoungScholar> {
    let mut young: Vec<YoungScholar> = records
        .iter()
        .filter_map(|r| {
            let first_pub_year = r.first_pub_year?;
            let academic_age = r.academic_age(current_year).filter(|age| *age > 0)?;
            Some(YoungScholar {
                name: r.name.clone(),
                institution: r.institution.clone(),
                first_pub_year,
                academic_age,
                total_citations: r.total_citations,
                h_index: r.h_index,
                citations_per_year: (r.total_citations as f64 / academic_age as f64).round() as u64,
            })
        })
        .collect();
    young.sort_by_key(|y| y.academic_age);
    young.truncate(n);
    young
}
