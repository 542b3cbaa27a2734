//! CLI configuration

use crate::error::{CliError, CliResult};
use insights_diagnostics::DiagnosticsConfig;
use insights_variants::ComparatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
///
/// Every section is optional; anything left out takes its built-in default.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Variant comparison settings
    pub comparator: ComparatorConfig,

    /// Change detection and hypothesis settings
    pub diagnostics: DiagnosticsConfig,
}

impl CliConfig {
    /// Load configuration from file
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(CliConfig::default())
        }
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engines would refuse.
    pub fn validate(&self) -> CliResult<()> {
        self.comparator
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.diagnostics
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("campaign-insights").join("config.toml"))
    }
}
