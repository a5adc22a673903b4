use thiserror::Error;

/// Errors raised while loading or validating client settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment variable held a value of the wrong shape.
    #[error("Invalid value '{value}' for environment variable {key}")]
    InvalidEnvValue { key: String, value: String },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}
