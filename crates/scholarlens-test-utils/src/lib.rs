//! Fixture builders shared by ScholarLens tests.

use scholarlens_common::{
    EarlyCareerRecord, EarlyCareerSummary, ScholarDetail, ScholarRecord, Topic, TopWork, YearlyWorks,
};

/// Builder for [`ScholarRecord`] with zeroed metrics.
#[derive(Debug, Clone)]
pub struct ScholarBuilder {
    record: ScholarRecord,
}

impl ScholarBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            record: ScholarRecord {
                id: id.into(),
                name: name.into(),
                institution: None,
                country: None,
                category: None,
                works_count: 0,
                cited_by_count: 0,
                h_index: 0,
                i10_index: 0,
                two_year_mean_citedness: 0.0,
            },
        }
    }

    pub fn h_index(mut self, h: u32) -> Self {
        self.record.h_index = h;
        self
    }

    pub fn citations(mut self, cited: u64) -> Self {
        self.record.cited_by_count = cited;
        self
    }

    pub fn works(mut self, works: u64) -> Self {
        self.record.works_count = works;
        self
    }

    pub fn two_year(mut self, mean: f64) -> Self {
        self.record.two_year_mean_citedness = mean;
        self
    }

    pub fn i10(mut self, i10: u32) -> Self {
        self.record.i10_index = i10;
        self
    }

    pub fn institution(mut self, institution: &str) -> Self {
        self.record.institution = Some(institution.to_string());
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.record.country = Some(country.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.record.category = Some(category.to_string());
        self
    }

    pub fn build(self) -> ScholarRecord {
        self.record
    }
}

/// Builder for [`ScholarDetail`] profiles.
#[derive(Debug, Clone)]
pub struct DetailBuilder {
    detail: ScholarDetail,
}

impl DetailBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            detail: ScholarDetail {
                id: id.into(),
                name: name.into(),
                works_count: 0,
                cited_by_count: 0,
                h_index: 0,
                i10_index: 0,
                two_year_mean_citedness: 0.0,
                topics: Vec::new(),
                top_works: Vec::new(),
                yearly_data: Vec::new(),
                early_career: None,
            },
        }
    }

    pub fn works(mut self, works: u64) -> Self {
        self.detail.works_count = works;
        self
    }

    pub fn citations(mut self, cited: u64) -> Self {
        self.detail.cited_by_count = cited;
        self
    }

    pub fn h_index(mut self, h: u32) -> Self {
        self.detail.h_index = h;
        self
    }

    pub fn two_year(mut self, mean: f64) -> Self {
        self.detail.two_year_mean_citedness = mean;
        self
    }

    pub fn topics(mut self, names: &[&str]) -> Self {
        self.detail.topics = names
            .iter()
            .map(|n| Topic { name: n.to_string(), score: 0.5, level: 2 })
            .collect();
        self
    }

    /// Top works by citation count, in the order given.
    pub fn top_works(mut self, citations: &[u64]) -> Self {
        self.detail.top_works = citations
            .iter()
            .enumerate()
            .map(|(i, c)| TopWork { title: format!("Work {}", i + 1), year: None, citations: *c })
            .collect();
        self
    }

    pub fn yearly(mut self, points: &[(i32, u64)]) -> Self {
        self.detail.yearly_data = points.iter().map(|&(year, works)| YearlyWorks { year, works }).collect();
        self
    }

    pub fn early_career(mut self, first_pub_year: i32, early_pct: f64) -> Self {
        self.detail.early_career = Some(EarlyCareerSummary {
            first_pub_year: Some(first_pub_year),
            early_career_end: Some(first_pub_year + 10),
            early_pct,
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> ScholarDetail {
        self.detail
    }
}

/// Builder for [`EarlyCareerRecord`] rows.
#[derive(Debug, Clone)]
pub struct EarlyCareerBuilder {
    record: EarlyCareerRecord,
}

impl EarlyCareerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            record: EarlyCareerRecord {
                name: name.into(),
                institution: None,
                first_pub_year: None,
                early_career_end: None,
                early_works_count: 0,
                early_career_citations: 0,
                total_citations: 0,
                h_index: 0,
                early_pct: 0.0,
                top_paper: None,
                top_paper_citations: 0,
            },
        }
    }

    pub fn first_pub_year(mut self, year: i32) -> Self {
        self.record.first_pub_year = Some(year);
        self.record.early_career_end = Some(year + 10);
        self
    }

    pub fn citations(mut self, early: u64, total: u64) -> Self {
        self.record.early_career_citations = early;
        self.record.total_citations = total;
        self.record.early_pct = if total > 0 { early as f64 * 100.0 / total as f64 } else { 0.0 };
        self
    }

    pub fn institution(mut self, institution: &str) -> Self {
        self.record.institution = Some(institution.to_string());
        self
    }

    pub fn build(self) -> EarlyCareerRecord {
        self.record
    }
}

/// The four-scholar population used across ranking tests. `D` has no works.
pub fn sample_scholars() -> Vec<ScholarRecord> {
    vec![
        ScholarBuilder::new("A", "Alice Ames").h_index(50).citations(10_000).works(20).two_year(5.0).build(),
        ScholarBuilder::new("B", "Bruno Berg").h_index(80).citations(50_000).works(100).two_year(15.0).build(),
        ScholarBuilder::new("C", "Chen Cao").h_index(10).citations(500).works(5).two_year(1.0).build(),
        ScholarBuilder::new("D", "Dana Diaz").h_index(5).citations(0).works(0).two_year(0.5).build(),
    ]
}

/// Early-career rows matching [`sample_scholars`] except `Dana Diaz`.
pub fn sample_early_career() -> Vec<EarlyCareerRecord> {
    vec![
        EarlyCareerBuilder::new("Alice Ames").first_pub_year(2000).citations(2_000, 10_000).build(),
        EarlyCareerBuilder::new("Bruno Berg").first_pub_year(1985).citations(5_000, 50_000).build(),
        EarlyCareerBuilder::new("Chen Cao").first_pub_year(2015).citations(100, 500).build(),
    ]
}

/// Serialise records as the JSON array the roster loader expects.
pub fn to_json_array<T: serde::Serialize>(records: &[T]) -> String {
    serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string())
}
