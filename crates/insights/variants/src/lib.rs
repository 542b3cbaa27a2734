//! # insights-variants
//!
//! Controlled-experiment comparison for campaign variants.
//!
//! Given the counters of a control and one or more test variants, the
//! [`VariantComparator`] reports per-variant rates, lift over the control,
//! a two-proportion significance test on response rate, and the variant (if
//! any) worth promoting.
//!
//! Only response rate (calls per delivered piece) is hypothesis-tested.
//! Contract rate and profit per piece are reported alongside it; profit per
//! piece breaks the choice between significant, positive-lift variants.

#![deny(unsafe_code)]

pub mod comparator;
pub mod config;
pub mod error;
pub mod result;

pub use comparator::VariantComparator;
pub use config::ComparatorConfig;
pub use error::{ComparatorError, ComparatorResult};
pub use result::{
    ControlSelection, ControlSummary, VariantComparisonResult, VariantOutcome,
    WinnerRecommendation,
};
