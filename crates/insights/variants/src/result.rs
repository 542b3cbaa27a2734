//! Comparison output types.

use insights_stats::ConfidenceInterval;
use insights_types::VariantId;
use serde::{Deserialize, Serialize};

/// How the control variant was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlSelection {
    /// A variant was explicitly flagged as the control.
    Flagged,
    /// No variant was flagged; the earliest-created one stands in.
    FirstCreated,
}

impl std::fmt::Display for ControlSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flagged => write!(f, "flagged"),
            Self::FirstCreated => write!(f, "first-created"),
        }
    }
}

/// Observed performance of the control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSummary {
    pub id: VariantId,
    pub name: String,
    pub selection: ControlSelection,
    pub pieces_mailed: u64,
    pub pieces_delivered: u64,
    pub calls: u64,
    pub contracts: u64,
    pub response_rate: f64,
    pub contract_rate: f64,
    pub profit_per_piece: f64,
    pub confidence_interval: ConfidenceInterval,
}

/// One test variant measured against the control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOutcome {
    pub id: VariantId,
    pub name: String,
    pub allocation_percent: f64,
    pub pieces_mailed: u64,
    pub pieces_delivered: u64,
    pub calls: u64,
    pub contracts: u64,
    pub response_rate: f64,
    pub contract_rate: f64,
    pub profit_per_piece: f64,
    /// Relative lift of response rate over the control.
    pub lift_vs_control: f64,
    /// Two-proportion test on response rate against the control.
    pub p_value: f64,
    pub is_significant: bool,
    /// Interval on this variant's response rate.
    pub confidence_interval: ConfidenceInterval,
}

/// The variant recommended for promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRecommendation {
    pub id: VariantId,
    pub name: String,
    pub profit_per_piece: f64,
    pub lift_vs_control: f64,
    pub p_value: f64,
}

/// Full result of comparing a campaign's variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantComparisonResult {
    pub control: ControlSummary,
    /// Test variants, in input order.
    pub variants: Vec<VariantOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_winner: Option<WinnerRecommendation>,
}

impl VariantComparisonResult {
    /// Outcome for a specific variant, if it was compared.
    pub fn outcome(&self, id: &VariantId) -> Option<&VariantOutcome> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// Test variants whose response rate differs significantly from the control.
    pub fn significant(&self) -> impl Iterator<Item = &VariantOutcome> {
        self.variants.iter().filter(|v| v.is_significant)
    }
}
