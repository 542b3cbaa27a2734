//! Error types for variant comparison.

use thiserror::Error;

/// Errors that can occur while comparing variants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComparatorError {
    /// A comparison needs a control and at least one test variant.
    #[error("insufficient variants: need at least 2, got {found}")]
    InsufficientVariants { found: usize },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for variant comparison.
pub type ComparatorResult<T> = Result<T, ComparatorError>;
