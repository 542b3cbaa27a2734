//! Collaborator interfaces for metrics and evidence, plus an in-memory
//! implementation over pre-materialised data.

use async_trait::async_trait;
use insights_types::{AccountId, MetricSnapshot, ReportingPeriod};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::evidence::{
    CreativeEvidence, DistressMix, EvidenceScope, OfferHistory, SeasonalityEvidence,
    TelephonyEvidence,
};

/// Supplies aggregated metric snapshots.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Aggregated metrics for `account_id` over `period`.
    async fn metric_snapshot(
        &self,
        account_id: &AccountId,
        period: &ReportingPeriod,
    ) -> Result<MetricSnapshot, SourceError>;
}

/// Supplies the evidence each hypothesis generator consumes.
///
/// Every fetch is independent; a failure in one only skips the generator that
/// needed it.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Phone-number health logs for both periods.
    async fn phone_health(&self, scope: &EvidenceScope) -> Result<TelephonyEvidence, SourceError>;

    /// Creative variants mailed in the current period.
    async fn variant_usage(&self, scope: &EvidenceScope) -> Result<CreativeEvidence, SourceError>;

    /// Distress-type counts of mailed properties for both periods.
    async fn distress_mix(&self, scope: &EvidenceScope) -> Result<DistressMix, SourceError>;

    /// Seasonality profiles for the account's markets.
    async fn seasonality(&self, scope: &EvidenceScope)
        -> Result<SeasonalityEvidence, SourceError>;

    /// Offer strategies used in both periods.
    async fn offer_history(&self, scope: &EvidenceScope) -> Result<OfferHistory, SourceError>;
}

// ── Static Sources ──────────────────────────────────────────────────────

/// Metrics for one exact period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub period: ReportingPeriod,
    pub metrics: MetricSnapshot,
}

/// Metrics and evidence held in memory, e.g. loaded from a JSON fixture.
///
/// Snapshots are matched on the exact period regardless of account. Evidence
/// sections left out are reported as unavailable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticSources {
    pub snapshots: Vec<PeriodSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephony: Option<TelephonyEvidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creative: Option<CreativeEvidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distress_mix: Option<DistressMix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<SeasonalityEvidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<OfferHistory>,
}

impl StaticSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, period: ReportingPeriod, metrics: MetricSnapshot) -> Self {
        self.snapshots.push(PeriodSnapshot { period, metrics });
        self
    }
}

fn section<T: Clone>(value: &Option<T>, name: &str) -> Result<T, SourceError> {
    value
        .clone()
        .ok_or_else(|| SourceError::Unavailable(format!("no {name} evidence loaded")))
}

#[async_trait]
impl MetricsSource for StaticSources {
    async fn metric_snapshot(
        &self,
        _account_id: &AccountId,
        period: &ReportingPeriod,
    ) -> Result<MetricSnapshot, SourceError> {
        self.snapshots
            .iter()
            .find(|s| &s.period == period)
            .map(|s| s.metrics.clone())
            .ok_or_else(|| SourceError::Unavailable(format!("no snapshot for {period}")))
    }
}

#[async_trait]
impl EvidenceSource for StaticSources {
    async fn phone_health(&self, _scope: &EvidenceScope) -> Result<TelephonyEvidence, SourceError> {
        section(&self.telephony, "phone health")
    }

    async fn variant_usage(&self, _scope: &EvidenceScope) -> Result<CreativeEvidence, SourceError> {
        section(&self.creative, "variant usage")
    }

    async fn distress_mix(&self, _scope: &EvidenceScope) -> Result<DistressMix, SourceError> {
        section(&self.distress_mix, "distress mix")
    }

    async fn seasonality(
        &self,
        _scope: &EvidenceScope,
    ) -> Result<SeasonalityEvidence, SourceError> {
        section(&self.seasonality, "seasonality")
    }

    async fn offer_history(&self, _scope: &EvidenceScope) -> Result<OfferHistory, SourceError> {
        section(&self.offers, "offer history")
    }
}
