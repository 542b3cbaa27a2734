use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use insights_diagnostics::{
    CreativeEvidence, DiagnosticsConfig, Direction, DistressMix, EvidenceScope, EvidenceSource,
    HypothesisCategory, OfferHistory, SeasonalityEvidence, Significance, SourceError,
    StaticSources, TelephonyEvidence, WhatChangedEngine,
};
use insights_types::{AccountId, Metric, ReportingPeriod};

fn june() -> ReportingPeriod {
    ReportingPeriod::new(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
    )
    .unwrap()
}

fn may() -> ReportingPeriod {
    june().preceding().unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
}

fn account() -> AccountId {
    AccountId::new("acct-42")
}

/// Response rate fell 40% while everything else held; every generator has
/// something to say.
fn declining_account() -> StaticSources {
    serde_json::from_str(
        r#"{
            "snapshots": [
                {"period": {"start": "2024-06-01", "end": "2024-06-30"},
                 "metrics": {
                    "mail": {"totalMailed": 10000, "deliveryRate": 0.95},
                    "response": {"totalCalls": 114, "responseRate": 0.012, "qualifiedRate": 0.4},
                    "conversion": {"contracts": 11, "contractRate": 0.1, "closeRate": 0.5},
                    "financial": {"roi": 2.0, "costPerContract": 3000.0}
                 }},
                {"period": {"start": "2024-05-02", "end": "2024-05-31"},
                 "metrics": {
                    "mail": {"totalMailed": 10000, "deliveryRate": 0.95},
                    "response": {"totalCalls": 190, "responseRate": 0.02, "qualifiedRate": 0.4},
                    "conversion": {"contracts": 19, "contractRate": 0.1, "closeRate": 0.5},
                    "financial": {"roi": 2.0, "costPerContract": 3000.0}
                 }}
            ],
            "telephony": {
                "current": [{"phoneNumber": "+15125550100", "reputationScore": 60.0,
                             "isSpamFlagged": true, "recordedAt": "2024-06-15T00:00:00Z"}],
                "previous": [{"phoneNumber": "+15125550100", "reputationScore": 85.0,
                              "recordedAt": "2024-05-15T00:00:00Z"}]
            },
            "creative": {"variants": [
                {"variantId": "yl", "name": "Yellow letter", "piecesMailed": 8000,
                 "firstUsedAt": "2024-03-01T00:00:00Z"}
            ]},
            "distressMix": {
                "current": {"probate": 50, "vacant": 50},
                "previous": {"probate": 100}
            },
            "seasonality": {"profiles": [
                {"region": "TX", "month": 6, "activityMultiplier": 0.8}
            ]},
            "offers": {
                "current": [{"strategyId": "a", "offerPercentage": 60.0,
                             "lastUsedAt": "2024-06-10T00:00:00Z"}],
                "previous": [{"strategyId": "b", "offerPercentage": 70.0,
                              "lastUsedAt": "2024-05-10T00:00:00Z"}]
            }
        }"#,
    )
    .unwrap()
}

/// Counts evidence fetches and optionally fails the telephony one.
struct InstrumentedEvidence {
    inner: StaticSources,
    calls: Arc<AtomicUsize>,
    fail_telephony: bool,
}

impl InstrumentedEvidence {
    fn new(inner: StaticSources) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: Arc::clone(&calls),
                fail_telephony: false,
            },
            calls,
        )
    }
}

#[async_trait]
impl EvidenceSource for InstrumentedEvidence {
    async fn phone_health(&self, scope: &EvidenceScope) -> Result<TelephonyEvidence, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_telephony {
            return Err(SourceError::Backend("carrier api down".into()));
        }
        self.inner.phone_health(scope).await
    }

    async fn variant_usage(&self, scope: &EvidenceScope) -> Result<CreativeEvidence, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.variant_usage(scope).await
    }

    async fn distress_mix(&self, scope: &EvidenceScope) -> Result<DistressMix, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.distress_mix(scope).await
    }

    async fn seasonality(
        &self,
        scope: &EvidenceScope,
    ) -> Result<SeasonalityEvidence, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.seasonality(scope).await
    }

    async fn offer_history(&self, scope: &EvidenceScope) -> Result<OfferHistory, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.offer_history(scope).await
    }
}

fn engine(sources: StaticSources) -> WhatChangedEngine<StaticSources, StaticSources> {
    WhatChangedEngine::new(sources.clone(), sources, DiagnosticsConfig::default()).unwrap()
}

#[tokio::test]
async fn explains_a_response_rate_decline() {
    let report = engine(declining_account())
        .analyze(&account(), june(), None, now())
        .await
        .unwrap();

    assert_eq!(report.previous_period, may());
    let response = report.change(Metric::ResponseRate).unwrap();
    assert_eq!(response.direction, Direction::Down);
    assert_eq!(response.significance, Significance::High);

    let order: Vec<HypothesisCategory> = report.hypotheses.iter().map(|h| h.category).collect();
    assert_eq!(
        order,
        vec![
            HypothesisCategory::TelephonyIssue,
            HypothesisCategory::ListShift,
            HypothesisCategory::SeasonalPattern,
            HypothesisCategory::OfferChange,
            HypothesisCategory::CreativeFatigue,
        ]
    );
    for pair in report.hypotheses.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }

    // One from the response-rate decline, one per hypothesis at 0.7 or above.
    assert_eq!(report.recommendations.len(), 5);
    assert!(report.skipped_generators.is_empty());
}

#[tokio::test]
async fn changes_cover_the_canonical_metrics() {
    let report = engine(declining_account())
        .analyze(&account(), june(), Some(may()), now())
        .await
        .unwrap();

    let metrics: Vec<Metric> = report.changes.iter().map(|c| c.metric).collect();
    assert_eq!(metrics, Metric::CANONICAL.to_vec());
    for change in &report.changes {
        assert_eq!(change.absolute_change, change.current_value - change.previous_value);
    }
}

#[tokio::test]
async fn improvement_skips_hypotheses_without_fetching_evidence() {
    let mut sources = declining_account();
    // Swap the periods so the response rate rises instead.
    let (a, b) = (sources.snapshots[0].period, sources.snapshots[1].period);
    sources.snapshots[0].period = b;
    sources.snapshots[1].period = a;

    let (evidence, calls) = InstrumentedEvidence::new(sources.clone());
    let engine = WhatChangedEngine::new(sources, evidence, DiagnosticsConfig::default()).unwrap();
    let report = engine
        .analyze(&account(), june(), None, now())
        .await
        .unwrap();

    assert!(report.hypotheses.is_empty());
    assert!(report.recommendations.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_evidence_fetch_skips_only_that_generator() {
    let sources = declining_account();
    let (mut evidence, calls) = InstrumentedEvidence::new(sources.clone());
    evidence.fail_telephony = true;
    let engine = WhatChangedEngine::new(sources, evidence, DiagnosticsConfig::default()).unwrap();

    let report = engine
        .analyze(&account(), june(), None, now())
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(report.hypotheses.len(), 4);
    assert!(report
        .hypotheses
        .iter()
        .all(|h| h.category != HypothesisCategory::TelephonyIssue));
    assert_eq!(report.skipped_generators.len(), 1);
    assert_eq!(
        report.skipped_generators[0].category,
        HypothesisCategory::TelephonyIssue
    );
    assert_eq!(
        report.skipped_generators[0].reason,
        "backend failure: carrier api down"
    );
}

#[tokio::test]
async fn missing_evidence_sections_are_reported_as_skipped() {
    let mut sources = declining_account();
    sources.offers = None;
    let report = engine(sources)
        .analyze(&account(), june(), None, now())
        .await
        .unwrap();

    assert_eq!(report.hypotheses.len(), 4);
    assert_eq!(
        report.skipped_generators[0].category,
        HypothesisCategory::OfferChange
    );
}

#[tokio::test]
async fn identical_inputs_serialize_identically() {
    let engine = engine(declining_account());
    let first = engine
        .analyze(&account(), june(), None, now())
        .await
        .unwrap();
    let second = engine
        .analyze(&account(), june(), None, now())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn report_json_uses_camel_case() {
    let report = engine(declining_account())
        .analyze(&account(), june(), None, now())
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["accountId"], "acct-42");
    assert_eq!(json["generatedAt"], "2024-06-30T12:00:00Z");
    assert_eq!(json["changes"][0]["metric"], "responseRate");
    assert_eq!(json["hypotheses"][0]["category"], "TELEPHONY_ISSUE");
    assert!(json["skippedGenerators"].as_array().unwrap().is_empty());
}
