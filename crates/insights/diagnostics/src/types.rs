//! Core type definitions for change detection and hypothesis reporting.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use insights_types::{AccountId, Metric, MetricSnapshot, ReportingPeriod};
use serde::{Deserialize, Serialize};

// ── Metric Changes ──────────────────────────────────────────────────────

/// Direction a metric moved between periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// How large a relative change is for its metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Movement of one canonical metric between two periods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChange {
    pub metric: Metric,
    pub previous_value: f64,
    pub current_value: f64,
    /// Always `current_value - previous_value`.
    pub absolute_change: f64,
    pub percent_change: f64,
    pub direction: Direction,
    pub significance: Significance,
}

impl MetricChange {
    /// A decline large enough to go looking for causes.
    pub fn is_notable_decline(&self) -> bool {
        self.direction == Direction::Down && self.significance >= Significance::Medium
    }

    /// A decline in the highest significance tier.
    pub fn is_severe_decline(&self) -> bool {
        self.direction == Direction::Down && self.significance == Significance::High
    }
}

// ── Hypotheses ──────────────────────────────────────────────────────────

/// The families of explanation the generator bank can propose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HypothesisCategory {
    TelephonyIssue,
    CreativeFatigue,
    ListShift,
    SeasonalPattern,
    OfferChange,
}

impl HypothesisCategory {
    /// Generator registration order; ties in confidence keep this order.
    pub const ALL: [HypothesisCategory; 5] = [
        HypothesisCategory::TelephonyIssue,
        HypothesisCategory::CreativeFatigue,
        HypothesisCategory::ListShift,
        HypothesisCategory::SeasonalPattern,
        HypothesisCategory::OfferChange,
    ];
}

impl std::fmt::Display for HypothesisCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TelephonyIssue => write!(f, "TELEPHONY_ISSUE"),
            Self::CreativeFatigue => write!(f, "CREATIVE_FATIGUE"),
            Self::ListShift => write!(f, "LIST_SHIFT"),
            Self::SeasonalPattern => write!(f, "SEASONAL_PATTERN"),
            Self::OfferChange => write!(f, "OFFER_CHANGE"),
        }
    }
}

/// Expected effect on performance if the hypothesis holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A candidate explanation for a decline, with its supporting figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hypothesis {
    pub category: HypothesisCategory,
    pub title: String,
    pub description: String,
    /// Confidence in this explanation (0.0 to 1.0).
    pub confidence: f64,
    pub impact: Impact,
    pub suggested_action: String,
    /// Figures the generator based its decision on, keyed by name.
    pub evidence: BTreeMap<String, serde_json::Value>,
    /// Which generator proposed this hypothesis.
    pub generator: String,
}

// ── Report ──────────────────────────────────────────────────────────────

/// A generator that could not run because its evidence fetch failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedGenerator {
    pub category: HypothesisCategory,
    pub reason: String,
}

/// Period-over-period explanation of an account's performance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatChangedReport {
    pub account_id: AccountId,
    pub current_period: ReportingPeriod,
    pub previous_period: ReportingPeriod,
    pub current_metrics: MetricSnapshot,
    pub previous_metrics: MetricSnapshot,
    /// Exactly the canonical metrics, in canonical order.
    pub changes: Vec<MetricChange>,
    /// Sorted by descending confidence.
    pub hypotheses: Vec<Hypothesis>,
    /// Deduplicated, in first-derived order.
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub skipped_generators: Vec<SkippedGenerator>,
    pub generated_at: DateTime<Utc>,
}

impl WhatChangedReport {
    /// Changes that moved down by at least the medium tier.
    pub fn notable_declines(&self) -> impl Iterator<Item = &MetricChange> {
        self.changes.iter().filter(|c| c.is_notable_decline())
    }

    /// The change record for a metric.
    pub fn change(&self, metric: Metric) -> Option<&MetricChange> {
        self.changes.iter().find(|c| c.metric == metric)
    }
}
