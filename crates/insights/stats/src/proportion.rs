//! Two-proportion significance testing and proportion intervals.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};
use statrs::function::erf::{erf_inv, erfc};

/// Default significance level for variant comparisons.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default coverage of reported confidence intervals.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Highest coverage accepted before the critical value diverges.
const MAX_CONFIDENCE_LEVEL: f64 = 0.999_999;

/// A closed range estimate for a true proportion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// The interval reported when there is no data.
    pub const EMPTY: ConfidenceInterval = ConfidenceInterval {
        lower: 0.0,
        upper: 0.0,
    };
}

/// Two-tailed p-value of a pooled two-proportion z-test.
///
/// Tests whether `conversions_a / total_a` and `conversions_b / total_b`
/// differ. Returns `1.0` when either sample is empty or the pooled
/// proportion is 0 or 1 (no variance to test against). Conversions above
/// their total are capped at the total.
pub fn p_value(conversions_a: u64, total_a: u64, conversions_b: u64, total_b: u64) -> f64 {
    if total_a == 0 || total_b == 0 {
        return 1.0;
    }

    let n_a = total_a as f64;
    let n_b = total_b as f64;
    let c_a = conversions_a.min(total_a) as f64;
    let c_b = conversions_b.min(total_b) as f64;

    let pooled = (c_a + c_b) / (n_a + n_b);
    if pooled <= 0.0 || pooled >= 1.0 {
        return 1.0;
    }

    let standard_error = (pooled * (1.0 - pooled) * (1.0 / n_a + 1.0 / n_b)).sqrt();
    if !standard_error.is_finite() || standard_error <= 0.0 {
        return 1.0;
    }

    let z = (c_a / n_a - c_b / n_b) / standard_error;
    // P(|Z| >= |z|) = erfc(|z| / sqrt(2))
    erfc(z.abs() / SQRT_2).clamp(0.0, 1.0)
}

/// Wilson score interval for `conversions / total` at the given coverage.
///
/// Returns [`ConfidenceInterval::EMPTY`] for an empty sample. Bounds are
/// clamped to `[0, 1]`. A non-finite `level` falls back to
/// [`DEFAULT_CONFIDENCE_LEVEL`].
pub fn confidence_interval(conversions: u64, total: u64, level: f64) -> ConfidenceInterval {
    if total == 0 {
        return ConfidenceInterval::EMPTY;
    }

    let n = total as f64;
    let p = conversions.min(total) as f64 / n;
    let z = z_critical(level);
    let z2 = z * z;

    let denominator = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denominator;
    let half_width = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

    let lower = (center - half_width).clamp(0.0, 1.0);
    let upper = (center + half_width).clamp(0.0, 1.0);
    ConfidenceInterval {
        lower: lower.min(upper),
        upper,
    }
}

/// Whether a p-value clears the significance level.
pub fn is_significant(p_value: f64, alpha: f64) -> bool {
    p_value < alpha
}

/// Two-sided standard normal critical value for a coverage level.
pub(crate) fn z_critical(level: f64) -> f64 {
    let level = if level.is_finite() {
        level.clamp(0.0, MAX_CONFIDENCE_LEVEL)
    } else {
        DEFAULT_CONFIDENCE_LEVEL
    };
    SQRT_2 * erf_inv(level)
}
