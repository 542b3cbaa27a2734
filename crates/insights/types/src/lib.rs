//! # insights-types
//!
//! Shared data model for the campaign performance analytics core.
//!
//! Everything in this crate is a plain value: snapshots and counters are
//! fetched by upstream collaborators, handed to the analytics crates, and
//! never mutated in place.

#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod metrics;
pub mod period;
pub mod variant;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use error::{TypesError, TypesResult};
pub use ids::{AccountId, VariantId};
pub use metrics::{
    ConversionMetrics, FinancialMetrics, MailMetrics, Metric, MetricSnapshot, ResponseMetrics,
};
pub use period::ReportingPeriod;
pub use variant::VariantStats;

/// Divide `numerator` by `denominator`, resolving an empty denominator to zero.
///
/// Every rate in the data model goes through this so that no rate is ever
/// `NaN` or infinite.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_empty_denominator_is_zero() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
    }

    #[test]
    fn ratio_divides_normally() {
        assert!((ratio(20.0, 1000.0) - 0.02).abs() < f64::EPSILON);
    }
}
