/// Core entity types mirroring the bundled JSON rosters.
/// Records are loaded once and never mutated.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scholar roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub works_count: u64,
    pub cited_by_count: u64,
    pub h_index: u32,
    #[serde(default)]
    pub i10_index: u32,
    #[serde(rename = "mean_citedness_2yr", default)]
    pub two_year_mean_citedness: f64,
}

impl ScholarRecord {
    /// Trailing segment of the OpenAlex-style id (`https://openalex.org/A123` → `A123`).
    pub fn short_id(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}

// ---------------------------------------------------------------------------
// Early-career roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyCareerRecord {
    pub name: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub first_pub_year: Option<i32>,
    #[serde(default)]
    pub early_career_end: Option<i32>,
    #[serde(default)]
    pub early_works_count: u64,
    #[serde(default)]
    pub early_career_citations: u64,
    #[serde(default)]
    pub total_citations: u64,
    #[serde(default)]
    pub h_index: u32,
    /// Share of total citations earned in the early-career window (0–100).
    #[serde(default)]
    pub early_pct: f64,
    #[serde(default)]
    pub top_paper: Option<String>,
    #[serde(default)]
    pub top_paper_citations: u64,
}

impl EarlyCareerRecord {
    /// Years since first publication; `None` without a first publication year
    /// or when the difference does not fit an `i32`.
    pub fn academic_age(&self, current_year: i32) -> Option<i32> {
        self.first_pub_year.and_then(|y| current_year.checked_sub(y))
    }
}

// ---------------------------------------------------------------------------
// Scholar detail profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopWork {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub citations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyWorks {
    pub year: i32,
    pub works: u64,
}

/// Early-career summary embedded in a detail profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyCareerSummary {
    #[serde(default)]
    pub first_pub_year: Option<i32>,
    #[serde(default)]
    pub early_career_end: Option<i32>,
    #[serde(default)]
    pub early_works_count: u64,
    #[serde(default)]
    pub early_career_citations: u64,
    #[serde(default)]
    pub early_pct: f64,
}

/// Full per-scholar profile used for dimension scoring.
/// `top_works` is expected in descending citation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarDetail {
    pub id: String,
    pub name: String,
    pub works_count: u64,
    pub cited_by_count: u64,
    pub h_index: u32,
    #[serde(default)]
    pub i10_index: u32,
    #[serde(default)]
    pub two_year_mean_citedness: f64,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub top_works: Vec<TopWork>,
    #[serde(default)]
    pub yearly_data: Vec<YearlyWorks>,
    #[serde(default)]
    pub early_career: Option<EarlyCareerSummary>,
}

impl ScholarDetail {
    pub fn first_pub_year(&self) -> Option<i32> {
        self.early_career.as_ref().and_then(|e| e.first_pub_year)
    }

    /// Years since first publication; `None` when the profile has no early-career data.
    pub fn academic_age(&self, current_year: i32) -> Option<i32> {
        self.first_pub_year().and_then(|y| current_year.checked_sub(y))
    }

    /// Early-career citation share, 0 when unknown.
    pub fn early_pct(&self) -> f64 {
        self.early_career.as_ref().map(|e| e.early_pct).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scholar_record_json_field_names() {
        let json = r#"{
            "id": "https://openalex.org/A5023888391",
            "name": "Jane Doe",
            "works_count": 120,
            "cited_by_count": 4500,
            "h_index": 30,
            "i10_index": 60,
            "institution": null,
            "country": "GB",
            "category": "Theory",
            "mean_citedness_2yr": 3.4
        }"#;
        let record: ScholarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.short_id(), "A5023888391");
        assert_eq!(record.institution, None);
        assert!((record.two_year_mean_citedness - 3.4).abs() < 1e-9);
    }

    #[test]
    fn test_early_career_academic_age() {
        let json = r#"{"name": "Jane Doe", "firstPubYear": 1999, "earlyPct": 12.5}"#;
        let record: EarlyCareerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.academic_age(2025), Some(26));

        let json = r#"{"name": "John Roe", "firstPubYear": null}"#;
        let record: EarlyCareerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.academic_age(2025), None);
    }

    #[test]
    fn test_detail_without_early_career() {
        let json = r#"{
            "id": "A1", "name": "Jane Doe", "worksCount": 10,
            "citedByCount": 100, "hIndex": 5, "earlyCareer": null
        }"#;
        let detail: ScholarDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.academic_age(2025), None);
        assert_eq!(detail.early_pct(), 0.0);
        assert!(detail.topics.is_empty());
    }
}
