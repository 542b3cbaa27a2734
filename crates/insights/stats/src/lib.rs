//! # insights-stats
//!
//! Pure statistics for comparing two response proportions.
//!
//! - [`p_value`]: pooled two-proportion z-test, two-tailed
//! - [`confidence_interval`]: Wilson score interval on one proportion
//! - [`lift`]: absolute and relative change of a rate over a baseline
//! - [`is_significant`]: p-value against an alpha
//! - [`required_sample_size`]: per-arm volume needed to detect a lift
//!
//! Degenerate inputs never produce `NaN` or infinities. Zero samples and
//! zero variance resolve to the least informative answer (`p = 1`,
//! interval `[0, 0]`), which downstream significance decisions rely on.

#![deny(unsafe_code)]

pub mod error;
pub mod lift;
pub mod planning;
pub mod proportion;

pub use error::{StatsError, StatsResult};
pub use lift::{lift, Lift};
pub use planning::required_sample_size;
pub use proportion::{
    confidence_interval, is_significant, p_value, ConfidenceInterval, DEFAULT_ALPHA,
    DEFAULT_CONFIDENCE_LEVEL,
};
