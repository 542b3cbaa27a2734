//! # insights-diagnostics
//!
//! Explains *why* an account's aggregate performance moved between two
//! reporting periods.
//!
//! ## Pipeline
//!
//! ```text
//! MetricsSource ──► ChangeDetector ──► gate ──► HypothesisBank (×5, concurrent)
//!                                                    │
//!                           WhatChangedReport ◄── HypothesisAggregator
//! ```
//!
//! The bank only runs when at least one metric declined by a medium or high
//! tier. Each generator fetches its own evidence from an [`EvidenceSource`];
//! a failed fetch skips that generator and is recorded on the report, while
//! a failed metric snapshot fetch aborts the analysis.

#![deny(unsafe_code)]

pub mod aggregator;
pub mod change;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod hypothesis;
pub mod source;
pub mod types;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use aggregator::{category_recommendation, metric_recommendation, HypothesisAggregator};
pub use change::{warrants_explanation, ChangeDetector};
pub use config::{
    ChangeDetectionConfig, CreativeFatigueRules, DiagnosticsConfig, HypothesisConfig,
    ListShiftRules, OfferChangeRules, SeasonalRules, TelephonyRules, TierThresholds,
};
pub use engine::WhatChangedEngine;
pub use error::{DiagnosticsError, DiagnosticsResult, SourceError};
pub use evidence::{
    CreativeEvidence, DistressMix, EvidenceScope, OfferHistory, OfferStrategyUse,
    PhoneHealthLog, SeasonalityEvidence, SeasonalityProfile, TelephonyEvidence, VariantUsage,
};
pub use hypothesis::{GenerationContext, HypothesisBank, HypothesisGenerator};
pub use source::{EvidenceSource, MetricsSource, PeriodSnapshot, StaticSources};
pub use types::{
    Direction, Hypothesis, HypothesisCategory, Impact, MetricChange, Significance,
    SkippedGenerator, WhatChangedReport,
};
