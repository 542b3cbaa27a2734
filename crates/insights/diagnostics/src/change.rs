//! Period-over-period change detection.

use insights_types::{Metric, MetricSnapshot};
use tracing::debug;

use crate::config::ChangeDetectionConfig;
use crate::error::DiagnosticsResult;
use crate::types::{Direction, MetricChange};

/// Measures how each canonical metric moved between two snapshots.
#[derive(Clone, Debug, Default)]
pub struct ChangeDetector {
    config: ChangeDetectionConfig,
}

impl ChangeDetector {
    pub fn new(config: ChangeDetectionConfig) -> DiagnosticsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// One change per canonical metric, in canonical order.
    pub fn detect(&self, previous: &MetricSnapshot, current: &MetricSnapshot) -> Vec<MetricChange> {
        Metric::CANONICAL
            .iter()
            .map(|&metric| self.measure(metric, previous.value(metric), current.value(metric)))
            .collect()
    }

    /// Change record for a single metric.
    pub fn measure(&self, metric: Metric, previous: f64, current: f64) -> MetricChange {
        let absolute_change = current - previous;
        let percent_change = if previous != 0.0 {
            absolute_change / previous.abs()
        } else if current != 0.0 {
            1.0
        } else {
            0.0
        };

        let epsilon = self.config.direction_epsilon;
        let direction = if absolute_change > epsilon {
            Direction::Up
        } else if absolute_change < -epsilon {
            Direction::Down
        } else {
            Direction::Stable
        };
        let significance = self.config.thresholds(metric).classify(percent_change);

        debug!(
            %metric,
            previous,
            current,
            percent_change,
            %direction,
            %significance,
            "measured change"
        );

        MetricChange {
            metric,
            previous_value: previous,
            current_value: current,
            absolute_change,
            percent_change,
            direction,
            significance,
        }
    }
}

/// Whether any change is a decline worth explaining.
pub fn warrants_explanation(changes: &[MetricChange]) -> bool {
    changes.iter().any(MetricChange::is_notable_decline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Significance;

    fn detector() -> ChangeDetector {
        ChangeDetector::default()
    }

    #[test]
    fn halved_response_rate_is_a_high_decline() {
        let change = detector().measure(Metric::ResponseRate, 0.02, 0.01);
        assert_eq!(change.direction, Direction::Down);
        assert!((change.percent_change + 0.5).abs() < 1e-12);
        assert!((change.absolute_change + 0.01).abs() < 1e-12);
        assert_eq!(change.significance, Significance::High);
    }

    #[test]
    fn zero_baseline_uses_unit_sentinel() {
        let up = detector().measure(Metric::Roi, 0.0, 0.4);
        assert_eq!(up.percent_change, 1.0);
        assert_eq!(up.significance, Significance::High);

        let flat = detector().measure(Metric::Roi, 0.0, 0.0);
        assert_eq!(flat.percent_change, 0.0);
        assert_eq!(flat.direction, Direction::Stable);
        assert_eq!(flat.significance, Significance::Low);
    }

    #[test]
    fn negative_baseline_divides_by_magnitude() {
        let change = detector().measure(Metric::Roi, -0.5, -0.25);
        assert_eq!(change.direction, Direction::Up);
        assert!((change.percent_change - 0.5).abs() < 1e-12);
    }

    #[test]
    fn small_absolute_moves_are_stable_but_keep_their_tier() {
        // 0.010 -> 0.0092 is an 8% drop inside the epsilon band.
        let change = detector().measure(Metric::DeliveryRate, 0.010, 0.0092);
        assert_eq!(change.direction, Direction::Stable);
        assert_eq!(change.significance, Significance::Medium);
        assert!(!change.is_notable_decline());
    }

    #[test]
    fn large_cost_changes_use_currency_scale() {
        let change = detector().measure(Metric::CostPerContract, 4000.0, 5000.0);
        assert_eq!(change.direction, Direction::Up);
        assert_eq!(change.significance, Significance::High);
    }

    #[test]
    fn detect_covers_canonical_metrics_in_order() {
        let previous = MetricSnapshot::default().with(Metric::ResponseRate, 0.02);
        let current = MetricSnapshot::default().with(Metric::ResponseRate, 0.01);

        let changes = detector().detect(&previous, &current);
        let metrics: Vec<Metric> = changes.iter().map(|c| c.metric).collect();
        assert_eq!(metrics, Metric::CANONICAL.to_vec());
        for change in &changes {
            assert_eq!(
                change.absolute_change,
                change.current_value - change.previous_value
            );
        }
        assert!(warrants_explanation(&changes));
    }

    #[test]
    fn improvements_do_not_warrant_explanation() {
        let previous = MetricSnapshot::default()
            .with(Metric::ResponseRate, 0.01)
            .with(Metric::Roi, 1.0);
        let current = MetricSnapshot::default()
            .with(Metric::ResponseRate, 0.02)
            .with(Metric::Roi, 1.0);
        let changes = detector().detect(&previous, &current);
        assert!(!warrants_explanation(&changes));
    }

    #[test]
    fn low_tier_declines_do_not_warrant_explanation() {
        let previous = MetricSnapshot::default().with(Metric::CostPerContract, 1000.0);
        let current = MetricSnapshot::default().with(Metric::CostPerContract, 950.0);
        let changes = detector().detect(&previous, &current);
        assert_eq!(changes[4].direction, Direction::Down);
        assert_eq!(changes[4].significance, Significance::Low);
        assert!(!warrants_explanation(&changes));
    }
}
