//! Per-variant campaign counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::VariantId;
use crate::ratio;

/// Raw counters for one variant of a campaign.
///
/// Rates are derived on demand from the counters so they can never go stale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantStats {
    pub id: VariantId,
    pub name: String,
    #[serde(default)]
    pub is_control: bool,
    #[serde(default)]
    pub pieces_mailed: u64,
    #[serde(default)]
    pub pieces_delivered: u64,
    #[serde(default)]
    pub calls: u64,
    #[serde(default)]
    pub contracts: u64,
    #[serde(default)]
    pub gross_profit: f64,
    /// Share of the campaign's list allocated to this variant (0-100).
    #[serde(default)]
    pub allocation_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl VariantStats {
    /// A variant with all counters at zero.
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_control: false,
            pieces_mailed: 0,
            pieces_delivered: 0,
            calls: 0,
            contracts: 0,
            gross_profit: 0.0,
            allocation_percent: 0.0,
            created_at: None,
        }
    }

    /// Mark this variant as the experiment control.
    pub fn control(mut self) -> Self {
        self.is_control = true;
        self
    }

    /// Set mail counters.
    pub fn mailed(mut self, mailed: u64, delivered: u64) -> Self {
        self.pieces_mailed = mailed;
        self.pieces_delivered = delivered;
        self
    }

    /// Set outcome counters.
    pub fn outcomes(mut self, calls: u64, contracts: u64, gross_profit: f64) -> Self {
        self.calls = calls;
        self.contracts = contracts;
        self.gross_profit = gross_profit;
        self
    }

    /// Calls per delivered piece.
    pub fn response_rate(&self) -> f64 {
        ratio(self.calls as f64, self.pieces_delivered as f64)
    }

    /// Contracts per delivered piece.
    pub fn contract_rate(&self) -> f64 {
        ratio(self.contracts as f64, self.pieces_delivered as f64)
    }

    /// Gross profit per mailed piece.
    pub fn profit_per_piece(&self) -> f64 {
        ratio(self.gross_profit, self.pieces_mailed as f64)
    }
}
