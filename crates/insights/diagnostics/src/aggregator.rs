//! Ranking of hypotheses and derivation of recommendations.

use insights_types::Metric;

use crate::types::{Hypothesis, HypothesisCategory, MetricChange};

/// Action suggested when a metric falls sharply, if falling is bad for it.
pub fn metric_recommendation(metric: Metric) -> Option<&'static str> {
    match metric {
        Metric::ResponseRate => {
            Some("Refresh creative and verify tracking numbers are reachable.")
        }
        Metric::ContractRate => {
            Some("Review call handling and follow-up cadence for inbound leads.")
        }
        Metric::CloseRate => Some("Audit offer levels and title issues on stalled contracts."),
        Metric::Roi => Some("Pause the lowest-margin segments until ROI recovers."),
        // Falling cost per contract is an improvement.
        Metric::CostPerContract => None,
        Metric::DeliveryRate => Some("Run the mailing list through address verification."),
        Metric::QualifiedRate => Some("Tighten list criteria to motivated-seller distress types."),
    }
}

/// Action suggested by a confident hypothesis.
pub fn category_recommendation(category: HypothesisCategory) -> &'static str {
    match category {
        HypothesisCategory::TelephonyIssue => {
            "Rotate tracking numbers with poor reputation or spam flags."
        }
        HypothesisCategory::CreativeFatigue => {
            "Refresh creative and verify tracking numbers are reachable."
        }
        HypothesisCategory::ListShift => "Rebalance list pulls toward the previous distress mix.",
        HypothesisCategory::SeasonalPattern => {
            "Adjust expectations and budget for the seasonal slowdown."
        }
        HypothesisCategory::OfferChange => "Compare results before and after the offer change.",
    }
}

/// Merges generator output into the ranked hypotheses and recommendations of
/// a report.
#[derive(Clone, Debug)]
pub struct HypothesisAggregator {
    min_confidence: f64,
}

impl Default for HypothesisAggregator {
    fn default() -> Self {
        Self::new(0.7)
    }
}

impl HypothesisAggregator {
    /// `min_confidence` gates which hypotheses contribute recommendations.
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    /// Sort by descending confidence; equal confidences keep their input
    /// order.
    pub fn rank(&self, mut hypotheses: Vec<Hypothesis>) -> Vec<Hypothesis> {
        hypotheses.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        hypotheses
    }

    /// Recommendations from severe declines, then from confident hypotheses,
    /// without repeats.
    pub fn recommendations(
        &self,
        changes: &[MetricChange],
        hypotheses: &[Hypothesis],
    ) -> Vec<String> {
        let from_changes = changes
            .iter()
            .filter(|c| c.is_severe_decline())
            .filter_map(|c| metric_recommendation(c.metric));
        let from_hypotheses = hypotheses
            .iter()
            .filter(|h| h.confidence >= self.min_confidence)
            .map(|h| category_recommendation(h.category));

        let mut out: Vec<String> = Vec::new();
        for rec in from_changes.chain(from_hypotheses) {
            if !out.iter().any(|existing| existing == rec) {
                out.push(rec.to_string());
            }
        }
        out
    }

    /// Rank the hypotheses and derive recommendations in one step.
    pub fn aggregate(
        &self,
        changes: &[MetricChange],
        hypotheses: Vec<Hypothesis>,
    ) -> (Vec<Hypothesis>, Vec<String>) {
        let ranked = self.rank(hypotheses);
        let recommendations = self.recommendations(changes, &ranked);
        (ranked, recommendations)
    }
}
