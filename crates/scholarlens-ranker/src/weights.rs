//! Weighting schemes for composite scoring.
//!
//! A perspective is an explicit parameter to the scorer, never shared state.
//! Weights need not sum to one: the scorer divides by the weight actually
//! used for each scholar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use scholarlens_common::{Result, ScholarLensConfig, ScholarLensError, WeightConfig};

use crate::metrics::MetricKey;

/// Per-metric weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Sustained high-impact output
    pub h_index: f64,
    /// Recent impact, the "still at the centre of the field" signal
    pub two_year_mean_citedness: f64,
    /// Citations per paper
    pub efficiency: f64,
    /// h-index over academic age
    pub m_index: f64,
    /// Cross-community reach
    pub cited_by_count: f64,
    /// Output scale only
    pub works_count: f64,
    /// Largely redundant with citations and h-index
    pub i10_index: f64,
}

impl WeightVector {
    pub fn weight(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::HIndex => self.h_index,
            MetricKey::TwoYearMeanCitedness => self.two_year_mean_citedness,
            MetricKey::Efficiency => self.efficiency,
            MetricKey::MIndex => self.m_index,
            MetricKey::CitedByCount => self.cited_by_count,
            MetricKey::WorksCount => self.works_count,
            MetricKey::I10Index => self.i10_index,
        }
    }

    /// Weights in [`MetricKey::ALL`] order.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.h_index,
            self.two_year_mean_citedness,
            self.efficiency,
            self.m_index,
            self.cited_by_count,
            self.works_count,
            self.i10_index,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// All weights finite and non-negative, at least one positive.
    pub fn validate(&self) -> bool {
        let weights = self.as_array();
        weights.iter().all(|w| w.is_finite() && *w >= 0.0) && weights.iter().any(|w| *w > 0.0)
    }

    /// Renormalise weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.h_index                 /= sum;
            self.two_year_mean_citedness /= sum;
            self.efficiency              /= sum;
            self.m_index                 /= sum;
            self.cited_by_count          /= sum;
            self.works_count             /= sum;
            self.i10_index               /= sum;
        }
    }

    /// Every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            h_index: self.h_index * factor,
            two_year_mean_citedness: self.two_year_mean_citedness * factor,
            efficiency: self.efficiency * factor,
            m_index: self.m_index * factor,
            cited_by_count: self.cited_by_count * factor,
            works_count: self.works_count * factor,
            i10_index: self.i10_index * factor,
        }
    }
}

impl From<&WeightConfig> for WeightVector {
    fn from(cfg: &WeightConfig) -> Self {
        Self {
            h_index: cfg.h_index,
            two_year_mean_citedness: cfg.two_year_mean_citedness,
            efficiency: cfg.efficiency,
            m_index: cfg.m_index,
            cited_by_count: cfg.cited_by_count,
            works_count: cfg.works_count,
            i10_index: cfg.i10_index,
        }
    }
}

/// Built-in evaluation perspectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// Balanced historical and current standing
    #[default]
    Stature,
    /// Current activity, for choosing advisors or collaborators
    Advisor,
    /// Cumulative impact, for field founders
    Legacy,
}

impl Perspective {
    pub const ALL: [Perspective; 3] = [Perspective::Stature, Perspective::Advisor, Perspective::Legacy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Stature => "stature",
            Perspective::Advisor => "advisor",
            Perspective::Legacy => "legacy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Perspective::Stature => "Academic Stature",
            Perspective::Advisor => "Advisor/Collaborator",
            Perspective::Legacy => "Historical Legacy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Perspective::Stature => "Balanced evaluation of historical contributions and current activity",
            Perspective::Advisor => {
                "Emphasizes current activity, suitable for finding advisors or collaborators"
            }
            Perspective::Legacy => "Emphasizes cumulative impact, evaluates field founders",
        }
    }

    pub fn weights(&self) -> WeightVector {
        match self {
            Perspective::Stature => WeightVector {
                h_index:                 0.35,
                two_year_mean_citedness: 0.30,
                efficiency:              0.15,
                m_index:                 0.10,
                cited_by_count:          0.10,
                works_count:             0.0,
                i10_index:               0.0,
            },
            Perspective::Advisor => WeightVector {
                h_index:                 0.20,
                two_year_mean_citedness: 0.45,
                efficiency:              0.15,
                m_index:                 0.15,
                cited_by_count:          0.05,
                works_count:             0.0,
                i10_index:               0.0,
            },
            Perspective::Legacy => WeightVector {
                h_index:                 0.35,
                two_year_mean_citedness: 0.05,
                efficiency:              0.15,
                m_index:                 0.05,
                cited_by_count:          0.40,
                works_count:             0.0,
                i10_index:               0.0,
            },
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Perspective {
    type Err = ScholarLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stature" => Ok(Perspective::Stature),
            "advisor" => Ok(Perspective::Advisor),
            "legacy" => Ok(Perspective::Legacy),
            other => Err(ScholarLensError::UnknownScheme(other.to_string())),
        }
    }
}

/// A resolved scheme: built-in perspective or a configured custom one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightingScheme {
    pub name: String,
    pub description: String,
    pub weights: WeightVector,
}

impl From<Perspective> for WeightingScheme {
    fn from(p: Perspective) -> Self {
        Self {
            name: p.as_str().to_string(),
            description: p.description().to_string(),
            weights: p.weights(),
        }
    }
}

impl WeightingScheme {
    /// Look up `name` among the built-in perspectives, then the configured custom schemes.
    pub fn resolve(name: &str, config: &ScholarLensConfig) -> Result<Self> {
        if let Ok(p) = name.parse::<Perspective>() {
            return Ok(p.into());
        }
        let custom = config
            .custom_scheme(name)
            .ok_or_else(|| ScholarLensError::UnknownScheme(name.to_string()))?;
        custom.weights.validate(&custom.name)?;
        Ok(Self {
            name: custom.name.clone(),
            description: custom.description.clone(),
            weights: WeightVector::from(&custom.weights),
        })
    }

    /// Every scheme available under `config`, built-ins first.
    pub fn available(config: &ScholarLensConfig) -> Vec<Self> {
        let mut schemes: Vec<Self> = Perspective::ALL.iter().map(|p| (*p).into()).collect();
        schemes.extend(
            config
                .scoring
                .custom_schemes
                .iter()
                .filter(|c| c.weights.validate(&c.name).is_ok())
                .map(|c| Self {
                    name: c.name.clone(),
                    description: c.description.clone(),
                    weights: WeightVector::from(&c.weights),
                }),
        );
        schemes
    }
}
