//! Error types for the diagnostics engine and its data sources.

use insights_types::ReportingPeriod;
use thiserror::Error;

/// Errors that abort a what-changed analysis.
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    /// A metric snapshot could not be fetched; no report can be built.
    #[error("metrics unavailable for {period}: {source}")]
    MetricsUnavailable {
        period: ReportingPeriod,
        #[source]
        source: SourceError,
    },

    /// No comparison period could be derived.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for diagnostics operations.
pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;

/// Failure reported by an external metrics or evidence collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The collaborator has no data for the request.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The collaborator failed while serving the request.
    #[error("backend failure: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn error_display_messages() {
        let period = ReportingPeriod::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .unwrap();
        let err = DiagnosticsError::MetricsUnavailable {
            period,
            source: SourceError::Backend("timeout".into()),
        };
        assert_eq!(
            err.to_string(),
            "metrics unavailable for 2024-03-01..=2024-03-31: backend failure: timeout"
        );

        let err = DiagnosticsError::ConfigurationError("bad threshold".into());
        assert_eq!(err.to_string(), "configuration error: bad threshold");

        assert_eq!(
            SourceError::Unavailable("phone health".into()).to_string(),
            "unavailable: phone health"
        );
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiagnosticsError>();
        assert_send_sync::<SourceError>();
    }
}
