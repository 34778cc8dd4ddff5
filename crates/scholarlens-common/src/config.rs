//! Configuration for the ranking core.
//!
//! Reads scholarlens.toml (or the path in SCHOLARLENS_CONFIG). YAML and JSON
//! files are accepted as well. Every section is optional; defaults reproduce
//! the built-in dashboard behaviour.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScholarLensError};

/// Names of the perspectives compiled into the ranker.
pub const BUILTIN_SCHEMES: [&str; 3] = ["stature", "advisor", "legacy"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScholarLensConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Perspective selected when the caller does not choose one
    #[serde(default = "default_perspective")]
    pub default_perspective: String,

    /// Pin the reference year used for academic age (defaults to the current UTC year)
    #[serde(default)]
    pub current_year: Option<i32>,

    /// Additional user-defined weighting schemes
    #[serde(default)]
    pub custom_schemes: Vec<CustomScheme>,
}

fn default_perspective() -> String { "stature".to_string() }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_perspective: default_perspective(),
            current_year: None,
            custom_schemes: vec![],
        }
    }
}

/// A named weighting scheme declared in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomScheme {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weights: WeightConfig,
}

/// Per-metric weights. Omitted metrics weigh 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    #[serde(default)]
    pub h_index: f64,
    #[serde(default)]
    pub two_year_mean_citedness: f64,
    #[serde(default)]
    pub efficiency: f64,
    #[serde(default)]
    pub m_index: f64,
    #[serde(default)]
    pub cited_by_count: f64,
    #[serde(default)]
    pub works_count: f64,
    #[serde(default)]
    pub i10_index: f64,
}

impl WeightConfig {
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

    /// Weights must be finite, non-negative, and not all zero.
    pub fn validate(&self, scheme: &str) -> Result<()> {
        let weights = self.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScholarLensError::InvalidWeights {
                scheme: scheme.to_string(),
                reason: "weights must be finite and non-negative".to_string(),
            });
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(ScholarLensError::InvalidWeights {
                scheme: scheme.to_string(),
                reason: "at least one weight must be positive".to_string(),
            });
        }
        Ok(())
    }
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// How duplicate names in the early-career roster are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// Names that occur more than once join nothing
    #[default]
    SkipAmbiguous,
    /// The first record with a given name wins
    FirstWins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_scholars_path")]
    pub scholars_path: String,

    #[serde(default = "default_early_career_path")]
    pub early_career_path: String,

    #[serde(default = "default_details_path")]
    pub details_path: String,

    #[serde(default)]
    pub join_policy: JoinPolicy,
}

fn default_scholars_path() -> String { "data/scholars.json".to_string() }
fn default_early_career_path() -> String { "data/earlyCareer.json".to_string() }
fn default_details_path() -> String { "data/scholarDetails.json".to_string() }

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            scholars_path: default_scholars_path(),
            early_career_path: default_early_career_path(),
            details_path: default_details_path(),
            join_policy: JoinPolicy::default(),
        }
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows shown in the ranking matrix
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Institutions listed in the distribution
    #[serde(default = "default_institution_limit")]
    pub institution_limit: usize,

    /// Scholars listed by total citations
    #[serde(default = "default_top_scholars")]
    pub top_scholars: usize,
}

fn default_top_n() -> usize { 50 }
fn default_institution_limit() -> usize { 15 }
fn default_top_scholars() -> usize { 20 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            institution_limit: default_institution_limit(),
            top_scholars: default_top_scholars(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl ScholarLensConfig {
    /// Load configuration.
    /// Checks SCHOLARLENS_CONFIG env var first, then scholarlens.toml in the
    /// current directory, and falls back to defaults when neither exists.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var("SCHOLARLENS_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| "scholarlens.toml".to_string());

        if !Path::new(&path).exists() {
            if explicit.is_some() {
                return Err(ScholarLensError::Config(format!("Config file not found: {path}")));
            }
            info!("No scholarlens.toml found, using defaults");
            return Ok(Self::default());
        }

        let config = Self::from_path(&path)?;
        info!(path = %path, "Configuration loaded");
        Ok(config)
    }

    /// Load from a file, choosing the format by extension (toml, yaml/yml, json).
    pub fn from_path(path: &str) -> Result<Self> {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            _ => Self::from_toml(path),
        }
    }

    pub fn from_toml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check custom scheme weights and that the default perspective exists.
    pub fn validate(&self) -> Result<()> {
        for scheme in &self.scoring.custom_schemes {
            if BUILTIN_SCHEMES.contains(&scheme.name.as_str()) {
                return Err(ScholarLensError::Config(format!(
                    "custom scheme '{}' shadows a built-in perspective",
                    scheme.name
                )));
            }
            scheme.weights.validate(&scheme.name)?;
        }

        let default = self.scoring.default_perspective.as_str();
        let known = BUILTIN_SCHEMES.contains(&default)
            || self.scoring.custom_schemes.iter().any(|s| s.name == default);
        if !known {
            return Err(ScholarLensError::UnknownScheme(default.to_string()));
        }
        Ok(())
    }

    /// Reference year for academic age.
    pub fn effective_year(&self) -> i32 {
        self.scoring.current_year.unwrap_or_else(crate::current_year)
    }

    pub fn custom_scheme(&self, name: &str) -> Option<&CustomScheme> {
        self.scoring.custom_schemes.iter().find(|s| s.name == name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ScholarLensConfig::default();
        assert_eq!(config.scoring.default_perspective, "stature");
        assert_eq!(config.roster.join_policy, JoinPolicy::SkipAmbiguous);
        assert_eq!(config.display.top_n, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_sections() {
        let config: ScholarLensConfig = toml::from_str(
            r#"
            [scoring]
            default_perspective = "rising"
            current_year = 2025

            [[scoring.custom_schemes]]
            name = "rising"
            description = "Career-normalised momentum"
            weights = { m_index = 0.6, two_year_mean_citedness = 0.4 }

            [roster]
            join_policy = "first_wins"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_year(), 2025);
        assert_eq!(config.roster.join_policy, JoinPolicy::FirstWins);
        let rising = config.custom_scheme("rising").unwrap();
        assert_eq!(rising.weights.h_index, 0.0);
        assert_eq!(rising.weights.m_index, 0.6);
        assert_eq!(config.display.institution_limit, 15);
    }

    #[test]
    fn test_unknown_default_perspective_rejected() {
        let mut config = ScholarLensConfig::default();
        config.scoring.default_perspective = "bogus".to_string();
        assert!(matches!(config.validate(), Err(ScholarLensError::UnknownScheme(_))));
    }

    #[test]
    fn test_invalid_custom_weights_rejected() {
        let mut config = ScholarLensConfig::default();
        config.scoring.custom_schemes.push(CustomScheme {
            name: "empty".to_string(),
            description: String::new(),
            weights: WeightConfig::default(),
        });
        assert!(matches!(config.validate(), Err(ScholarLensError::InvalidWeights { .. })));

        config.scoring.custom_schemes[0].weights.h_index = -0.5;
        assert!(matches!(config.validate(), Err(ScholarLensError::InvalidWeights { .. })));
    }

    #[test]
    fn test_custom_scheme_cannot_shadow_builtin() {
        let mut config = ScholarLensConfig::default();
        config.scoring.custom_schemes.push(CustomScheme {
            name: "legacy".to_string(),
            description: String::new(),
            weights: WeightConfig { h_index: 1.0, ..Default::default() },
        });
        assert!(matches!(config.validate(), Err(ScholarLensError::Config(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ScholarLensConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: ScholarLensConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.roster.scholars_path, parsed.roster.scholars_path);
        assert_eq!(config.scoring.default_perspective, parsed.scoring.default_perspective);
    }
}
