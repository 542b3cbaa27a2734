//! Sample-size planning for fixed-horizon variant tests.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erf_inv;

use crate::error::{StatsError, StatsResult};
use crate::proportion::z_critical;

/// Delivered pieces needed per arm to detect a relative lift.
///
/// Uses the normal approximation for a two-sided two-proportion test:
///
/// `n = (z_{α/2}·√(2p̄(1-p̄)) + z_β·√(p₁(1-p₁) + p₂(1-p₂)))² / (p₂ - p₁)²`
///
/// where `p₂ = base_rate · (1 + minimum_detectable_lift)`.
pub fn required_sample_size(
    base_rate: f64,
    minimum_detectable_lift: f64,
    alpha: f64,
    power: f64,
) -> StatsResult<u64> {
    check_open_unit("base_rate", base_rate, "0 < base_rate < 1")?;
    check_open_unit("alpha", alpha, "0 < alpha < 1")?;
    check_open_unit("power", power, "0 < power < 1")?;

    let target_rate = base_rate * (1.0 + minimum_detectable_lift);
    if minimum_detectable_lift == 0.0 || !minimum_detectable_lift.is_finite() {
        return Err(StatsError::InvalidParameter {
            name: "minimum_detectable_lift",
            value: minimum_detectable_lift,
            expected: "a finite non-zero lift",
        });
    }
    check_open_unit("target_rate", target_rate, "0 < base_rate * (1 + lift) < 1")?;

    let z_alpha = z_critical(1.0 - alpha);
    let z_beta = SQRT_2 * erf_inv(2.0 * power - 1.0);

    let (p1, p2) = (base_rate, target_rate);
    let mean = (p1 + p2) / 2.0;
    let numerator = z_alpha * (2.0 * mean * (1.0 - mean)).sqrt()
        + z_beta * (p1 * (1.0 - p1) + p2 * (1.0 - p2)).sqrt();
    let effect = p2 - p1;

    Ok((numerator * numerator / (effect * effect)).ceil() as u64)
}

fn check_open_unit(name: &'static str, value: f64, expected: &'static str) -> StatsResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidParameter {
            name,
            value,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_percent_baseline_fifty_percent_lift() {
        let n = required_sample_size(0.02, 0.5, 0.05, 0.8).unwrap();
        // Textbook value for 2% vs 3% at α = 0.05, power 0.8 is ≈ 3,800.
        assert!((3700..=3900).contains(&n), "n = {n}");
    }

    #[test]
    fn smaller_lift_needs_more_volume() {
        let big = required_sample_size(0.02, 0.5, 0.05, 0.8).unwrap();
        let small = required_sample_size(0.02, 0.2, 0.05, 0.8).unwrap();
        assert!(small > big);
    }

    #[test]
    fn higher_power_needs_more_volume() {
        let low = required_sample_size(0.02, 0.5, 0.05, 0.5).unwrap();
        let high = required_sample_size(0.02, 0.5, 0.05, 0.9).unwrap();
        assert!(high > low);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(required_sample_size(0.0, 0.5, 0.05, 0.8).is_err());
        assert!(required_sample_size(0.02, 0.0, 0.05, 0.8).is_err());
        assert!(required_sample_size(0.02, 0.5, 1.0, 0.8).is_err());
        assert!(required_sample_size(0.02, 0.5, 0.05, 1.0).is_err());
        assert!(required_sample_size(0.6, 1.0, 0.05, 0.8).is_err());
        assert!(required_sample_size(0.02, f64::NAN, 0.05, 0.8).is_err());
    }
}
