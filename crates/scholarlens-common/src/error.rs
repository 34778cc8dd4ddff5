use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScholarLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown weighting scheme: {0}")]
    UnknownScheme(String),

    #[error("Invalid weights for scheme '{scheme}': {reason}")]
    InvalidWeights { scheme: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ScholarLensError>;
