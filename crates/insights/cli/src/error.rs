//! CLI error types

use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Variant comparison failed
    #[error("Comparison error: {0}")]
    Comparison(#[from] insights_variants::ComparatorError),

    /// What-changed analysis failed
    #[error("Diagnostics error: {0}")]
    Diagnostics(#[from] insights_diagnostics::DiagnosticsError),

    /// Sample-size planning failed
    #[error("Statistics error: {0}")]
    Stats(#[from] insights_stats::StatsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML rendering error
    #[error("TOML error: {0}")]
    TomlRender(#[from] toml::ser::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
