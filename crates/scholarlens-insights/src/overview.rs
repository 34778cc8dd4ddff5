//! Dashboard overview: every roster-wide view in one pass, sized by the
//! display settings.

use serde::Serialize;
use tracing::debug;

use scholarlens_common::{DisplayConfig, ScholarRecord};

use crate::distribution::{
    category_distribution, citation_histogram, country_distribution, h_index_histogram, institution_distribution,
    CountEntry, HistogramBucket,
};
use crate::stats::{scatter_points, summary_statistics, top_scholars, ScatterPoint, SummaryStatistics};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview<'a> {
    pub summary: SummaryStatistics,
    /// Most cited scholars, `display.top_scholars` long
    pub top_scholars: Vec<&'a ScholarRecord>,
    pub countries: Vec<CountEntry>,
    /// Largest institutions, `display.institution_limit` long
    pub institutions: Vec<CountEntry>,
    pub categories: Vec<CountEntry>,
    pub citation_histogram: Vec<HistogramBucket>,
    pub h_index_histogram: Vec<HistogramBucket>,
    pub scatter: Vec<ScatterPoint>,
}

pub fn overview<'a>(scholars: &'a [ScholarRecord], display: &DisplayConfig) -> Overview<'a> {
    let overview = Overview {
        summary: summary_statistics(scholars),
        top_scholars: top_scholars(scholars, display.top_scholars),
        countries: country_distribution(scholars),
        institutions: institution_distribution(scholars, display.institution_limit),
        categories: category_distribution(scholars),
        citation_histogram: citation_histogram(scholars),
        h_index_histogram: h_index_histogram(scholars),
        scatter: scatter_points(scholars),
    };
    debug!(
        scholars = scholars.len(),
        top_scholars = overview.top_scholars.len(),
        institutions = overview.institutions.len(),
        "Built roster overview"
    );
    overview
}
