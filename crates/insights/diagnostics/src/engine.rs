//! The what-changed engine.
//!
//! Pipeline: fetch both metric snapshots → detect changes → if any metric
//! declined notably, fetch evidence and run the five generators concurrently
//! → rank hypotheses and derive recommendations.

use std::future::Future;

use chrono::{DateTime, Utc};
use insights_types::{AccountId, MetricSnapshot, ReportingPeriod};
use tracing::{debug, info, instrument, warn};

use crate::aggregator::HypothesisAggregator;
use crate::change::{warrants_explanation, ChangeDetector};
use crate::config::DiagnosticsConfig;
use crate::error::{DiagnosticsError, DiagnosticsResult, SourceError};
use crate::evidence::EvidenceScope;
use crate::hypothesis::{GenerationContext, HypothesisBank, HypothesisGenerator};
use crate::source::{EvidenceSource, MetricsSource};
use crate::types::{Hypothesis, MetricChange, SkippedGenerator, WhatChangedReport};

/// Explains period-over-period performance of an account.
///
/// Holds no per-request state; one engine can serve concurrent analyses.
pub struct WhatChangedEngine<M, E> {
    metrics: M,
    evidence: E,
    detector: ChangeDetector,
    bank: HypothesisBank,
    aggregator: HypothesisAggregator,
}

impl<M, E> WhatChangedEngine<M, E>
where
    M: MetricsSource,
    E: EvidenceSource,
{
    /// Create an engine, validating the configuration.
    pub fn new(metrics: M, evidence: E, config: DiagnosticsConfig) -> DiagnosticsResult<Self> {
        config.validate()?;
        Ok(Self {
            metrics,
            evidence,
            detector: ChangeDetector::new(config.change)?,
            bank: HypothesisBank::from_config(&config.hypotheses),
            aggregator: HypothesisAggregator::new(config.recommendation_min_confidence),
        })
    }

    /// Build a report comparing `current` against `previous`.
    ///
    /// Without an explicit `previous`, the window of equal length directly
    /// before `current` is used. `now` is the reference time for every
    /// age and calendar rule and is stamped on the report.
    #[instrument(skip_all, fields(account = %account_id, current = %current))]
    pub async fn analyze(
        &self,
        account_id: &AccountId,
        current: ReportingPeriod,
        previous: Option<ReportingPeriod>,
        now: DateTime<Utc>,
    ) -> DiagnosticsResult<WhatChangedReport> {
        let previous = match previous {
            Some(previous) => previous,
            None => current.preceding().ok_or_else(|| {
                DiagnosticsError::InvalidPeriod(format!("no period precedes {current}"))
            })?,
        };

        let fetch = |period: ReportingPeriod| async move {
            self.metrics
                .metric_snapshot(account_id, &period)
                .await
                .map_err(|source| DiagnosticsError::MetricsUnavailable { period, source })
        };
        let (current_metrics, previous_metrics) =
            futures::try_join!(fetch(current), fetch(previous))?;

        let scope = EvidenceScope {
            account_id: account_id.clone(),
            current,
            previous,
        };
        Ok(self
            .analyze_snapshots(scope, current_metrics, previous_metrics, now)
            .await)
    }

    /// Build a report from snapshots that were already fetched.
    pub async fn analyze_snapshots(
        &self,
        scope: EvidenceScope,
        current_metrics: MetricSnapshot,
        previous_metrics: MetricSnapshot,
        now: DateTime<Utc>,
    ) -> WhatChangedReport {
        let changes = self.detector.detect(&previous_metrics, &current_metrics);
        let (hypotheses, skipped_generators) = self
            .explain(&scope, &changes, GenerationContext::new(now))
            .await;
        let (hypotheses, recommendations) = self.aggregator.aggregate(&changes, hypotheses);

        info!(
            account = %scope.account_id,
            hypotheses = hypotheses.len(),
            recommendations = recommendations.len(),
            skipped = skipped_generators.len(),
            "what-changed report ready"
        );

        WhatChangedReport {
            account_id: scope.account_id,
            current_period: scope.current,
            previous_period: scope.previous,
            current_metrics,
            previous_metrics,
            changes,
            hypotheses,
            recommendations,
            skipped_generators,
            generated_at: now,
        }
    }

    /// Run the generator bank if the changes call for it.
    ///
    /// Results come back in registration order.
    async fn explain(
        &self,
        scope: &EvidenceScope,
        changes: &[MetricChange],
        ctx: GenerationContext,
    ) -> (Vec<Hypothesis>, Vec<SkippedGenerator>) {
        if !warrants_explanation(changes) {
            debug!("no notable decline; skipping hypothesis generation");
            return (Vec::new(), Vec::new());
        }

        let bank = &self.bank;
        let outcomes = futures::join!(
            run_one(&bank.telephony, self.evidence.phone_health(scope), &ctx),
            run_one(&bank.creative_fatigue, self.evidence.variant_usage(scope), &ctx),
            run_one(&bank.list_shift, self.evidence.distress_mix(scope), &ctx),
            run_one(&bank.seasonal, self.evidence.seasonality(scope), &ctx),
            run_one(&bank.offer_change, self.evidence.offer_history(scope), &ctx),
        );

        let mut hypotheses = Vec::new();
        let mut skipped = Vec::new();
        for outcome in [outcomes.0, outcomes.1, outcomes.2, outcomes.3, outcomes.4] {
            match outcome {
                Ok(Some(hypothesis)) => hypotheses.push(hypothesis),
                Ok(None) => {}
                Err(s) => skipped.push(s),
            }
        }
        (hypotheses, skipped)
    }
}

/// Fetch one generator's evidence and run it, isolating fetch failures.
async fn run_one<G, F>(
    generator: &G,
    fetch: F,
    ctx: &GenerationContext,
) -> Result<Option<Hypothesis>, SkippedGenerator>
where
    G: HypothesisGenerator,
    F: Future<Output = Result<G::Evidence, SourceError>>,
{
    match fetch.await {
        Ok(evidence) => {
            let hypothesis = generator.generate(&evidence, ctx);
            debug!(
                generator = generator.name(),
                proposed = hypothesis.is_some(),
                "generator finished"
            );
            Ok(hypothesis)
        }
        Err(err) => {
            warn!(
                generator = generator.name(),
                error = %err,
                "evidence fetch failed; skipping generator"
            );
            Err(SkippedGenerator {
                category: generator.category(),
                reason: err.to_string(),
            })
        }
    }
}
