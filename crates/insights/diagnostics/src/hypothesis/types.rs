//! The generator trait and its shared context.

use chrono::{DateTime, Utc};

use crate::types::{Hypothesis, HypothesisCategory};

/// Inputs shared by every generator in one analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationContext {
    /// Reference time for age and calendar rules.
    pub now: DateTime<Utc>,
}

impl GenerationContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

/// A rule-based detector proposing at most one explanation for a decline.
///
/// Generators are pure: the same evidence and context always produce the
/// same result. Fetching the evidence is the engine's job.
pub trait HypothesisGenerator: Send + Sync {
    /// Evidence this generator inspects.
    type Evidence: Send;

    /// Category of every hypothesis this generator proposes.
    fn category(&self) -> HypothesisCategory;

    /// Stable name recorded on each hypothesis.
    fn name(&self) -> &str;

    /// Inspect the evidence; `None` when nothing points at this cause.
    fn generate(&self, evidence: &Self::Evidence, ctx: &GenerationContext) -> Option<Hypothesis>;
}
