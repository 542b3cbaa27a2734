//! Period metric snapshots and the canonical comparison metrics.

use serde::{Deserialize, Serialize};

// ── Canonical Metrics ───────────────────────────────────────────────────

/// The metrics compared period over period, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    ResponseRate,
    ContractRate,
    CloseRate,
    Roi,
    CostPerContract,
    DeliveryRate,
    QualifiedRate,
}

impl Metric {
    /// Every canonical metric, in the fixed order used by change reports.
    pub const CANONICAL: [Metric; 7] = [
        Metric::ResponseRate,
        Metric::ContractRate,
        Metric::CloseRate,
        Metric::Roi,
        Metric::CostPerContract,
        Metric::DeliveryRate,
        Metric::QualifiedRate,
    ];

    /// Wire key, matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ResponseRate => "responseRate",
            Self::ContractRate => "contractRate",
            Self::CloseRate => "closeRate",
            Self::Roi => "roi",
            Self::CostPerContract => "costPerContract",
            Self::DeliveryRate => "deliveryRate",
            Self::QualifiedRate => "qualifiedRate",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ResponseRate => "response rate",
            Self::ContractRate => "contract rate",
            Self::CloseRate => "close rate",
            Self::Roi => "ROI",
            Self::CostPerContract => "cost per contract",
            Self::DeliveryRate => "delivery rate",
            Self::QualifiedRate => "qualified lead rate",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ── Snapshot ────────────────────────────────────────────────────────────

/// Mail production and delivery figures for a period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MailMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_mailed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cost_per_piece: Option<f64>,
}

/// Inbound call response figures for a period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_calls: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_rate: Option<f64>,
}

/// Deal conversion figures for a period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contracts: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_rate: Option<f64>,
}

/// Spend and return figures for a period. `roi` may be negative.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_contract: Option<f64>,
}

/// Named scalar metrics for one account over one period.
///
/// Any figure may be absent when the upstream aggregation had nothing to
/// report; absent figures read as `0` through [`MetricSnapshot::value`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricSnapshot {
    pub mail: MailMetrics,
    pub response: ResponseMetrics,
    pub conversion: ConversionMetrics,
    pub financial: FinancialMetrics,
}

impl MetricSnapshot {
    /// The recorded value of a canonical metric, if any.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::ResponseRate => self.response.response_rate,
            Metric::ContractRate => self.conversion.contract_rate,
            Metric::CloseRate => self.conversion.close_rate,
            Metric::Roi => self.financial.roi,
            Metric::CostPerContract => self.financial.cost_per_contract,
            Metric::DeliveryRate => self.mail.delivery_rate,
            Metric::QualifiedRate => self.response.qualified_rate,
        }
    }

    /// The value of a canonical metric, defaulting to `0` when missing.
    pub fn value(&self, metric: Metric) -> f64 {
        self.get(metric).unwrap_or(0.0)
    }

    /// Return a copy with one canonical metric set.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        let slot = match metric {
            Metric::ResponseRate => &mut self.response.response_rate,
            Metric::ContractRate => &mut self.conversion.contract_rate,
            Metric::CloseRate => &mut self.conversion.close_rate,
            Metric::Roi => &mut self.financial.roi,
            Metric::CostPerContract => &mut self.financial.cost_per_contract,
            Metric::DeliveryRate => &mut self.mail.delivery_rate,
            Metric::QualifiedRate => &mut self.response.qualified_rate,
        };
        *slot = Some(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_fixed() {
        let keys: Vec<&str> = Metric::CANONICAL.iter().map(|m| m.key()).collect();
        assert_eq!(
            keys,
            vec![
                "responseRate",
                "contractRate",
                "closeRate",
                "roi",
                "costPerContract",
                "deliveryRate",
                "qualifiedRate"
            ]
        );
    }

    #[test]
    fn key_matches_serialized_form() {
        for metric in Metric::CANONICAL {
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", metric.key()));
        }
    }

    #[test]
    fn missing_values_read_as_zero() {
        let snapshot = MetricSnapshot::default();
        for metric in Metric::CANONICAL {
            assert_eq!(snapshot.get(metric), None);
            assert_eq!(snapshot.value(metric), 0.0);
        }
    }

    #[test]
    fn with_sets_the_grouped_field() {
        let snapshot = MetricSnapshot::default()
            .with(Metric::ResponseRate, 0.02)
            .with(Metric::Roi, -0.4);
        assert_eq!(snapshot.response.response_rate, Some(0.02));
        assert_eq!(snapshot.financial.roi, Some(-0.4));
        assert_eq!(snapshot.value(Metric::Roi), -0.4);
    }

    #[test]
    fn partial_json_deserializes() {
        let snapshot: MetricSnapshot = serde_json::from_str(
            r#"{"response":{"responseRate":0.021},"financial":{"roi":1.4}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.value(Metric::ResponseRate), 0.021);
        assert_eq!(snapshot.value(Metric::Roi), 1.4);
        assert_eq!(snapshot.get(Metric::CloseRate), None);
    }
}
