//! Evidence consumed by the hypothesis generators.
//!
//! Each generator gets its own evidence type, fetched independently from an
//! [`EvidenceSource`](crate::source::EvidenceSource). An empty value means
//! "nothing to go on" and yields no hypothesis.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use insights_types::{AccountId, ReportingPeriod, VariantId};
use serde::{Deserialize, Serialize};

/// The account and the two periods an analysis compares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceScope {
    pub account_id: AccountId,
    pub current: ReportingPeriod,
    pub previous: ReportingPeriod,
}

// ── Telephony ───────────────────────────────────────────────────────────

/// One health check of a tracking phone number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneHealthLog {
    pub phone_number: String,
    /// Carrier reputation score (0 to 100).
    pub reputation_score: f64,
    #[serde(default)]
    pub is_spam_flagged: bool,
    /// Share of inbound calls answered, when the carrier reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_rate: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

/// Phone health logs recorded in each period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelephonyEvidence {
    pub current: Vec<PhoneHealthLog>,
    pub previous: Vec<PhoneHealthLog>,
}

// ── Creative ────────────────────────────────────────────────────────────

/// Lifetime usage of a mail creative variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantUsage {
    pub variant_id: VariantId,
    pub name: String,
    pub pieces_mailed: u64,
    /// First time the variant was mailed; unknown usage never counts as stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_used_at: Option<DateTime<Utc>>,
}

impl VariantUsage {
    /// Whole days between first use and `now`.
    pub fn days_active(&self, now: DateTime<Utc>) -> Option<i64> {
        self.first_used_at.map(|first| (now - first).num_days())
    }
}

/// Creative variants in use during the current period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeEvidence {
    pub variants: Vec<VariantUsage>,
}

// ── Lists ───────────────────────────────────────────────────────────────

/// Mailed-property counts per distress type in each period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistressMix {
    pub current: BTreeMap<String, u64>,
    pub previous: BTreeMap<String, u64>,
}

impl DistressMix {
    /// L1 distance between the two share distributions.
    ///
    /// `None` when either period has no properties at all.
    pub fn shift(&self) -> Option<f64> {
        let current = shares(&self.current)?;
        let previous = shares(&self.previous)?;

        let mut distance = 0.0;
        for (kind, share) in &current {
            distance += (share - previous.get(kind).copied().unwrap_or(0.0)).abs();
        }
        for (kind, share) in &previous {
            if !current.contains_key(kind) {
                distance += share;
            }
        }
        Some(distance)
    }
}

fn shares(counts: &BTreeMap<String, u64>) -> Option<BTreeMap<&str, f64>> {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return None;
    }
    Some(
        counts
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(kind, &count)| (kind.as_str(), count as f64 / total as f64))
            .collect(),
    )
}

// ── Seasonality ─────────────────────────────────────────────────────────

/// Expected market activity for a region in a calendar month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalityProfile {
    pub region: String,
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// 1.0 is a typical month; below 1.0 is quieter than usual.
    pub activity_multiplier: f64,
}

/// Seasonality profiles for the account's markets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalityEvidence {
    pub profiles: Vec<SeasonalityProfile>,
}

// ── Offers ──────────────────────────────────────────────────────────────

/// An offer strategy and when it was last applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferStrategyUse {
    pub strategy_id: String,
    /// Offer as a percentage of estimated value.
    pub offer_percentage: f64,
    pub last_used_at: DateTime<Utc>,
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

/// Offer strategies used in each period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferHistory {
    pub current: Vec<OfferStrategyUse>,
    pub previous: Vec<OfferStrategyUse>,
}

impl OfferHistory {
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.previous.is_empty()
    }
}

/// Up to `window` active strategies, most recently used first.
///
/// Ties in `last_used_at` are broken by strategy id so the selection does not
/// depend on input order.
pub fn recent_active(uses: &[OfferStrategyUse], window: usize) -> Vec<&OfferStrategyUse> {
    let mut active: Vec<&OfferStrategyUse> = uses.iter().filter(|u| u.is_active).collect();
    active.sort_by(|a, b| {
        b.last_used_at
            .cmp(&a.last_used_at)
            .then_with(|| a.strategy_id.cmp(&b.strategy_id))
    });
    active.truncate(window);
    active
}
