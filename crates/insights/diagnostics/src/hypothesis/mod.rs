//! Hypothesis generation for performance declines.
//!
//! Five independent generators look for a likely cause from different
//! angles. Each implements [`HypothesisGenerator`] over its own evidence
//! type; the [`HypothesisBank`] holds one of each in registration order.

pub mod generators;
pub mod types;

pub use generators::{
    CreativeFatigueGenerator, ListShiftGenerator, OfferChangeGenerator,
    SeasonalPatternGenerator, TelephonyIssueGenerator,
};
pub use types::{GenerationContext, HypothesisGenerator};

use crate::config::HypothesisConfig;

/// One generator per category, configured from a [`HypothesisConfig`].
#[derive(Clone, Debug, Default)]
pub struct HypothesisBank {
    pub telephony: TelephonyIssueGenerator,
    pub creative_fatigue: CreativeFatigueGenerator,
    pub list_shift: ListShiftGenerator,
    pub seasonal: SeasonalPatternGenerator,
    pub offer_change: OfferChangeGenerator,
}

impl HypothesisBank {
    pub fn from_config(config: &HypothesisConfig) -> Self {
        Self {
            telephony: TelephonyIssueGenerator::new(config.telephony.clone()),
            creative_fatigue: CreativeFatigueGenerator::new(config.creative_fatigue.clone()),
            list_shift: ListShiftGenerator::new(config.list_shift.clone()),
            seasonal: SeasonalPatternGenerator::new(config.seasonal.clone()),
            offer_change: OfferChangeGenerator::new(config.offer_change.clone()),
        }
    }
}
