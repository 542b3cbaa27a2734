//! Lift of a variant rate over a baseline rate.

use serde::{Deserialize, Serialize};

/// Change of a variant rate relative to a baseline rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lift {
    /// `variant_rate - base_rate`.
    pub absolute_change: f64,
    /// `absolute_change / base_rate`, or a sentinel when the baseline is zero.
    pub relative_change: f64,
}

/// Compute the lift of `variant_rate` over `base_rate`.
///
/// With a zero (or negative) baseline the relative change is `1.0` if the
/// variant shows any response at all and `0.0` otherwise.
pub fn lift(base_rate: f64, variant_rate: f64) -> Lift {
    let absolute_change = variant_rate - base_rate;
    let relative_change = if base_rate > 0.0 {
        absolute_change / base_rate
    } else if variant_rate > 0.0 {
        1.0
    } else {
        0.0
    };

    Lift {
        absolute_change,
        relative_change,
    }
}
