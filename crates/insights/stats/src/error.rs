//! Error types for statistical planning.

use thiserror::Error;

/// Errors from statistical helpers that validate their parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// A parameter fell outside its valid open range.
    #[error("invalid parameter {name}: {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Result type for statistical helpers.
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = StatsError::InvalidParameter {
            name: "power",
            value: 1.2,
            expected: "0 < power < 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter power: 1.2 (expected 0 < power < 1)"
        );
    }
}
