//! Error types for the shared data model.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while constructing data-model values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// A reporting period whose end precedes its start.
    #[error("invalid reporting period: {start} is after {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}

/// Result type for data-model construction.
pub type TypesResult<T> = Result<T, TypesError>;
