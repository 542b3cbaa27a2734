//! Variant comparison configuration.

use insights_stats::{DEFAULT_ALPHA, DEFAULT_CONFIDENCE_LEVEL};
use serde::{Deserialize, Serialize};

use crate::error::{ComparatorError, ComparatorResult};

/// Tunables for the significance test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Significance level; a variant is significant when `p < alpha`.
    pub alpha: f64,

    /// Coverage of the reported confidence intervals.
    pub confidence_level: f64,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl ComparatorConfig {
    /// Check that both levels are proper probabilities.
    pub fn validate(&self) -> ComparatorResult<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ComparatorError::ConfigurationError(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ComparatorError::ConfigurationError(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ComparatorConfig::default();
        assert!((cfg.alpha - 0.05).abs() < f64::EPSILON);
        assert!((cfg.confidence_level - 0.95).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_levels() {
        let cfg = ComparatorConfig {
            alpha: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ComparatorConfig {
            confidence_level: 1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ComparatorConfig {
            alpha: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
