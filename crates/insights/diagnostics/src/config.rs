//! Thresholds and confidence constants for change detection and the
//! hypothesis bank.

use insights_types::Metric;
use serde::{Deserialize, Serialize};

use crate::error::{DiagnosticsError, DiagnosticsResult};
use crate::types::Significance;

// ── Change Detection ────────────────────────────────────────────────────

/// Medium/high cut-offs applied to `|percent_change|`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub medium: f64,
    pub high: f64,
}

impl TierThresholds {
    pub const fn new(medium: f64, high: f64) -> Self {
        Self { medium, high }
    }

    /// Tier for a relative change; the sign is ignored.
    pub fn classify(&self, percent_change: f64) -> Significance {
        let magnitude = percent_change.abs();
        if magnitude >= self.high {
            Significance::High
        } else if magnitude >= self.medium {
            Significance::Medium
        } else {
            Significance::Low
        }
    }

    fn validate(&self, metric: Metric) -> DiagnosticsResult<()> {
        let ok = self.medium.is_finite()
            && self.high.is_finite()
            && self.medium >= 0.0
            && self.medium <= self.high;
        if ok {
            Ok(())
        } else {
            Err(DiagnosticsError::ConfigurationError(format!(
                "{metric} thresholds must satisfy 0 <= medium <= high (got {} / {})",
                self.medium, self.high
            )))
        }
    }
}

/// Configuration for the change detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeDetectionConfig {
    /// Absolute changes within this band are `stable`.
    pub direction_epsilon: f64,
    pub response_rate: TierThresholds,
    pub contract_rate: TierThresholds,
    pub close_rate: TierThresholds,
    pub roi: TierThresholds,
    pub cost_per_contract: TierThresholds,
    pub delivery_rate: TierThresholds,
    pub qualified_rate: TierThresholds,
}

impl Default for ChangeDetectionConfig {
    fn default() -> Self {
        Self {
            direction_epsilon: 0.001,
            response_rate: TierThresholds::new(0.10, 0.25),
            contract_rate: TierThresholds::new(0.10, 0.25),
            close_rate: TierThresholds::new(0.10, 0.20),
            roi: TierThresholds::new(0.15, 0.30),
            cost_per_contract: TierThresholds::new(0.10, 0.20),
            delivery_rate: TierThresholds::new(0.05, 0.10),
            qualified_rate: TierThresholds::new(0.10, 0.20),
        }
    }
}

impl ChangeDetectionConfig {
    /// Thresholds for a canonical metric.
    pub fn thresholds(&self, metric: Metric) -> TierThresholds {
        match metric {
            Metric::ResponseRate => self.response_rate,
            Metric::ContractRate => self.contract_rate,
            Metric::CloseRate => self.close_rate,
            Metric::Roi => self.roi,
            Metric::CostPerContract => self.cost_per_contract,
            Metric::DeliveryRate => self.delivery_rate,
            Metric::QualifiedRate => self.qualified_rate,
        }
    }

    pub fn validate(&self) -> DiagnosticsResult<()> {
        if !self.direction_epsilon.is_finite() || self.direction_epsilon < 0.0 {
            return Err(DiagnosticsError::ConfigurationError(format!(
                "direction_epsilon must be a non-negative number (got {})",
                self.direction_epsilon
            )));
        }
        for metric in Metric::CANONICAL {
            self.thresholds(metric).validate(metric)?;
        }
        Ok(())
    }
}

// ── Generator Rules ─────────────────────────────────────────────────────

/// Telephony health rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelephonyRules {
    /// Average reputation drop (points) that triggers on its own.
    pub reputation_drop_threshold: f64,
    /// Share of spam-flagged numbers that triggers on its own.
    pub spam_rate_threshold: f64,
    /// Average answer rate below which the generator triggers.
    pub low_answer_rate: f64,
    pub base_confidence: f64,
    /// The drop is divided by this before being added to the confidence.
    pub drop_divisor: f64,
    pub spam_boost: f64,
    pub low_answer_boost: f64,
    pub max_confidence: f64,
    /// Drops above this are high impact even without spam flags.
    pub high_impact_drop: f64,
}

impl Default for TelephonyRules {
    fn default() -> Self {
        Self {
            reputation_drop_threshold: 10.0,
            spam_rate_threshold: 0.1,
            low_answer_rate: 0.3,
            base_confidence: 0.5,
            drop_divisor: 50.0,
            spam_boost: 0.2,
            low_answer_boost: 0.2,
            max_confidence: 0.9,
            high_impact_drop: 20.0,
        }
    }
}

/// Creative fatigue rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeFatigueRules {
    /// A variant must have mailed more than this many pieces.
    pub min_pieces_mailed: u64,
    /// ...and have been in use for more than this many days.
    pub min_days_active: i64,
    pub base_confidence: f64,
    pub per_variant_boost: f64,
    pub max_confidence: f64,
    /// More fatigued variants than this is high impact.
    pub high_impact_count: usize,
}

impl Default for CreativeFatigueRules {
    fn default() -> Self {
        Self {
            min_pieces_mailed: 5000,
            min_days_active: 60,
            base_confidence: 0.5,
            per_variant_boost: 0.1,
            max_confidence: 0.85,
            high_impact_count: 2,
        }
    }
}

/// Distress-mix shift rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListShiftRules {
    /// Minimum L1 distance between share distributions.
    pub shift_threshold: f64,
    pub base_confidence: f64,
    pub max_confidence: f64,
    pub high_impact_shift: f64,
}

impl Default for ListShiftRules {
    fn default() -> Self {
        Self {
            shift_threshold: 0.15,
            base_confidence: 0.4,
            max_confidence: 0.8,
            high_impact_shift: 0.3,
        }
    }
}

/// Seasonality rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalRules {
    /// Multipliers below this mark a slow month.
    pub low_activity_multiplier: f64,
    /// Lowest multiplier below this is high impact.
    pub high_impact_multiplier: f64,
    pub confidence: f64,
}

impl Default for SeasonalRules {
    fn default() -> Self {
        Self {
            low_activity_multiplier: 0.9,
            high_impact_multiplier: 0.7,
            confidence: 0.75,
        }
    }
}

/// Offer strategy change rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferChangeRules {
    /// How many recent active strategies are compared per period.
    pub recent_window: usize,
    pub confidence: f64,
    /// Average offer-percentage delta (points) above which impact is high.
    pub high_impact_delta: f64,
}

impl Default for OfferChangeRules {
    fn default() -> Self {
        Self {
            recent_window: 5,
            confidence: 0.7,
            high_impact_delta: 5.0,
        }
    }
}

/// Rules for every generator in the bank.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HypothesisConfig {
    pub telephony: TelephonyRules,
    pub creative_fatigue: CreativeFatigueRules,
    pub list_shift: ListShiftRules,
    pub seasonal: SeasonalRules,
    pub offer_change: OfferChangeRules,
}

impl HypothesisConfig {
    pub fn validate(&self) -> DiagnosticsResult<()> {
        let t = &self.telephony;
        unit("telephony.spam_rate_threshold", t.spam_rate_threshold)?;
        unit("telephony.low_answer_rate", t.low_answer_rate)?;
        unit("telephony.base_confidence", t.base_confidence)?;
        unit("telephony.max_confidence", t.max_confidence)?;
        if !(t.drop_divisor.is_finite() && t.drop_divisor > 0.0) {
            return Err(DiagnosticsError::ConfigurationError(format!(
                "telephony.drop_divisor must be positive (got {})",
                t.drop_divisor
            )));
        }

        let c = &self.creative_fatigue;
        unit("creative_fatigue.base_confidence", c.base_confidence)?;
        unit("creative_fatigue.max_confidence", c.max_confidence)?;

        let l = &self.list_shift;
        unit("list_shift.base_confidence", l.base_confidence)?;
        unit("list_shift.max_confidence", l.max_confidence)?;

        unit("seasonal.confidence", self.seasonal.confidence)?;

        let o = &self.offer_change;
        unit("offer_change.confidence", o.confidence)?;
        if o.recent_window == 0 {
            return Err(DiagnosticsError::ConfigurationError(
                "offer_change.recent_window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ── Top Level ───────────────────────────────────────────────────────────

/// Configuration for the what-changed engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub change: ChangeDetectionConfig,
    pub hypotheses: HypothesisConfig,
    /// Hypotheses at or above this confidence contribute a recommendation.
    pub recommendation_min_confidence: f64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            change: ChangeDetectionConfig::default(),
            hypotheses: HypothesisConfig::default(),
            recommendation_min_confidence: 0.7,
        }
    }
}

impl DiagnosticsConfig {
    pub fn validate(&self) -> DiagnosticsResult<()> {
        self.change.validate()?;
        self.hypotheses.validate()?;
        unit(
            "recommendation_min_confidence",
            self.recommendation_min_confidence,
        )
    }
}

fn unit(name: &str, value: f64) -> DiagnosticsResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DiagnosticsError::ConfigurationError(format!(
            "{name} must be in [0, 1] (got {value})"
        )))
    }
}
