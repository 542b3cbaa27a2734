//! Built-in hypothesis generators.
//!
//! Five generators look for a cause behind a decline:
//! 1. **TelephonyIssue**: tracking numbers losing reputation or answer rate
//! 2. **CreativeFatigue**: long-running, heavily mailed creatives
//! 3. **ListShift**: a different distress-type mix being mailed
//! 4. **SeasonalPattern**: a seasonally slow month in the account's markets
//! 5. **OfferChange**: the active offer strategies were swapped

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use serde_json::{json, Value};

use crate::config::{
    CreativeFatigueRules, ListShiftRules, OfferChangeRules, SeasonalRules, TelephonyRules,
};
use crate::evidence::{
    recent_active, CreativeEvidence, DistressMix, OfferHistory, OfferStrategyUse,
    PhoneHealthLog, SeasonalityEvidence, TelephonyEvidence,
};
use crate::types::{Hypothesis, HypothesisCategory, Impact};

use super::types::{GenerationContext, HypothesisGenerator};

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

fn avg_reputation(logs: &[PhoneHealthLog]) -> Option<f64> {
    mean(logs.iter().map(|l| l.reputation_score))
}

// ── 1. Telephony Issue Generator ────────────────────────────────────────

/// Flags deteriorating tracking-number health.
///
/// Triggers on a reputation drop, a high share of spam-flagged numbers, or a
/// low average answer rate in the current period.
#[derive(Clone, Debug, Default)]
pub struct TelephonyIssueGenerator {
    rules: TelephonyRules,
}

impl TelephonyIssueGenerator {
    pub fn new(rules: TelephonyRules) -> Self {
        Self { rules }
    }
}

impl HypothesisGenerator for TelephonyIssueGenerator {
    type Evidence = TelephonyEvidence;

    fn category(&self) -> HypothesisCategory {
        HypothesisCategory::TelephonyIssue
    }

    fn name(&self) -> &str {
        "telephony-health"
    }

    fn generate(&self, evidence: &TelephonyEvidence, _ctx: &GenerationContext) -> Option<Hypothesis> {
        let rules = &self.rules;
        let current = avg_reputation(&evidence.current)?;
        let previous = avg_reputation(&evidence.previous);
        let drop = previous.map_or(0.0, |p| p - current);

        let flagged = evidence.current.iter().filter(|l| l.is_spam_flagged).count();
        let spam_rate = flagged as f64 / evidence.current.len() as f64;
        let answer_rate = mean(evidence.current.iter().filter_map(|l| l.answer_rate));

        let has_drop = drop > rules.reputation_drop_threshold;
        let has_spam = spam_rate > rules.spam_rate_threshold;
        let has_low_answer = answer_rate.is_some_and(|a| a < rules.low_answer_rate);
        if !(has_drop || has_spam || has_low_answer) {
            return None;
        }

        let mut confidence = rules.base_confidence + drop.max(0.0) / rules.drop_divisor;
        if has_spam {
            confidence += rules.spam_boost;
        }
        if has_low_answer {
            confidence += rules.low_answer_boost;
        }
        let impact = if has_spam || drop > rules.high_impact_drop {
            Impact::High
        } else {
            Impact::Medium
        };

        let mut signals = Vec::new();
        if has_drop {
            signals.push(format!("average reputation fell {drop:.1} points"));
        }
        if has_spam {
            signals.push(format!(
                "{flagged} of {} numbers are spam-flagged",
                evidence.current.len()
            ));
        }
        if let Some(rate) = answer_rate.filter(|_| has_low_answer) {
            signals.push(format!("only {:.0}% of calls are answered", rate * 100.0));
        }

        let mut facts = BTreeMap::new();
        facts.insert("numbersChecked".into(), json!(evidence.current.len()));
        facts.insert("avgReputationCurrent".into(), json!(current));
        facts.insert("avgReputationPrevious".into(), json!(previous));
        facts.insert("reputationDrop".into(), json!(drop));
        facts.insert("spamRate".into(), json!(spam_rate));
        facts.insert("avgAnswerRate".into(), json!(answer_rate));

        Some(Hypothesis {
            category: self.category(),
            title: "Tracking numbers may be losing calls".into(),
            description: format!(
                "Phone health degraded this period: {}.",
                signals.join("; ")
            ),
            confidence: confidence.min(rules.max_confidence),
            impact,
            suggested_action: "Rotate spam-flagged or low-reputation tracking numbers and \
                               register the replacements with carriers."
                .into(),
            evidence: facts,
            generator: self.name().into(),
        })
    }
}

// ── 2. Creative Fatigue Generator ───────────────────────────────────────

/// Flags creatives that have been mailed heavily for a long time.
#[derive(Clone, Debug, Default)]
pub struct CreativeFatigueGenerator {
    rules: CreativeFatigueRules,
}

impl CreativeFatigueGenerator {
    pub fn new(rules: CreativeFatigueRules) -> Self {
        Self { rules }
    }
}

impl HypothesisGenerator for CreativeFatigueGenerator {
    type Evidence = CreativeEvidence;

    fn category(&self) -> HypothesisCategory {
        HypothesisCategory::CreativeFatigue
    }

    fn name(&self) -> &str {
        "creative-fatigue"
    }

    fn generate(&self, evidence: &CreativeEvidence, ctx: &GenerationContext) -> Option<Hypothesis> {
        let rules = &self.rules;
        let fatigued: Vec<(&str, u64, i64)> = evidence
            .variants
            .iter()
            .filter(|v| v.pieces_mailed > rules.min_pieces_mailed)
            .filter_map(|v| {
                let days = v.days_active(ctx.now)?;
                (days > rules.min_days_active).then_some((v.name.as_str(), v.pieces_mailed, days))
            })
            .collect();
        if fatigued.is_empty() {
            return None;
        }

        let count = fatigued.len();
        let confidence =
            (rules.base_confidence + rules.per_variant_boost * count as f64).min(rules.max_confidence);
        let impact = if count > rules.high_impact_count {
            Impact::High
        } else {
            Impact::Medium
        };
        let names: Vec<&str> = fatigued.iter().map(|(name, _, _)| *name).collect();

        let mut facts = BTreeMap::new();
        facts.insert("fatiguedCount".into(), json!(count));
        facts.insert(
            "fatiguedVariants".into(),
            Value::Array(
                fatigued
                    .iter()
                    .map(|(name, pieces, days)| {
                        json!({"name": name, "piecesMailed": pieces, "daysActive": days})
                    })
                    .collect(),
            ),
        );

        Some(Hypothesis {
            category: self.category(),
            title: "Creative fatigue".into(),
            description: format!(
                "{count} creative(s) have mailed over {} pieces for more than {} days: {}.",
                rules.min_pieces_mailed,
                rules.min_days_active,
                names.join(", ")
            ),
            confidence,
            impact,
            suggested_action: "Launch a fresh creative test against the longest-running \
                               variants."
                .into(),
            evidence: facts,
            generator: self.name().into(),
        })
    }
}

// ── 3. List Shift Generator ─────────────────────────────────────────────

/// Flags a change in the distress-type mix of mailed properties.
#[derive(Clone, Debug, Default)]
pub struct ListShiftGenerator {
    rules: ListShiftRules,
}

impl ListShiftGenerator {
    pub fn new(rules: ListShiftRules) -> Self {
        Self { rules }
    }
}

impl HypothesisGenerator for ListShiftGenerator {
    type Evidence = DistressMix;

    fn category(&self) -> HypothesisCategory {
        HypothesisCategory::ListShift
    }

    fn name(&self) -> &str {
        "list-shift"
    }

    fn generate(&self, mix: &DistressMix, _ctx: &GenerationContext) -> Option<Hypothesis> {
        let rules = &self.rules;
        let shift = mix.shift()?;
        if shift <= rules.shift_threshold {
            return None;
        }

        let impact = if shift > rules.high_impact_shift {
            Impact::High
        } else {
            Impact::Medium
        };

        let mut facts = BTreeMap::new();
        facts.insert("distributionShift".into(), json!(shift));
        facts.insert("currentCounts".into(), json!(mix.current));
        facts.insert("previousCounts".into(), json!(mix.previous));

        Some(Hypothesis {
            category: self.category(),
            title: "Mailing list composition changed".into(),
            description: format!(
                "The distress-type mix of mailed properties shifted by {:.0}% between periods.",
                shift * 100.0
            ),
            confidence: (rules.base_confidence + shift).min(rules.max_confidence),
            impact,
            suggested_action: "Review list filters and compare response by distress type \
                               before the next drop."
                .into(),
            evidence: facts,
            generator: self.name().into(),
        })
    }
}

// ── 4. Seasonal Pattern Generator ───────────────────────────────────────

/// Flags a seasonally slow month in any of the account's markets.
#[derive(Clone, Debug, Default)]
pub struct SeasonalPatternGenerator {
    rules: SeasonalRules,
}

impl SeasonalPatternGenerator {
    pub fn new(rules: SeasonalRules) -> Self {
        Self { rules }
    }
}

impl HypothesisGenerator for SeasonalPatternGenerator {
    type Evidence = SeasonalityEvidence;

    fn category(&self) -> HypothesisCategory {
        HypothesisCategory::SeasonalPattern
    }

    fn name(&self) -> &str {
        "seasonal-pattern"
    }

    fn generate(&self, evidence: &SeasonalityEvidence, ctx: &GenerationContext) -> Option<Hypothesis> {
        let rules = &self.rules;
        let month = ctx.now.month();
        let slow: Vec<_> = evidence
            .profiles
            .iter()
            .filter(|p| p.month == month && p.activity_multiplier < rules.low_activity_multiplier)
            .collect();
        let lowest = slow
            .iter()
            .map(|p| p.activity_multiplier)
            .min_by(f64::total_cmp)?;

        let impact = if lowest < rules.high_impact_multiplier {
            Impact::High
        } else {
            Impact::Medium
        };
        let regions: Vec<&str> = slow.iter().map(|p| p.region.as_str()).collect();

        let mut facts = BTreeMap::new();
        facts.insert("month".into(), json!(month));
        facts.insert("slowRegions".into(), json!(regions));
        facts.insert("lowestMultiplier".into(), json!(lowest));

        Some(Hypothesis {
            category: self.category(),
            title: "Seasonal slowdown".into(),
            description: format!(
                "Month {month} is historically slow in {} (activity as low as {:.0}% of normal).",
                regions.join(", "),
                lowest * 100.0
            ),
            confidence: rules.confidence,
            impact,
            suggested_action: "Compare against the same month last year before changing \
                               creative or lists."
                .into(),
            evidence: facts,
            generator: self.name().into(),
        })
    }
}

// ── 5. Offer Change Generator ───────────────────────────────────────────

/// Flags a change in the set of recently active offer strategies.
#[derive(Clone, Debug, Default)]
pub struct OfferChangeGenerator {
    rules: OfferChangeRules,
}

impl OfferChangeGenerator {
    pub fn new(rules: OfferChangeRules) -> Self {
        Self { rules }
    }
}

fn avg_offer(uses: &[&OfferStrategyUse]) -> Option<f64> {
    mean(uses.iter().map(|u| u.offer_percentage))
}

impl HypothesisGenerator for OfferChangeGenerator {
    type Evidence = OfferHistory;

    fn category(&self) -> HypothesisCategory {
        HypothesisCategory::OfferChange
    }

    fn name(&self) -> &str {
        "offer-change"
    }

    fn generate(&self, history: &OfferHistory, _ctx: &GenerationContext) -> Option<Hypothesis> {
        if history.is_empty() {
            return None;
        }
        let rules = &self.rules;
        let current = recent_active(&history.current, rules.recent_window);
        let previous = recent_active(&history.previous, rules.recent_window);

        let current_ids: BTreeSet<&str> = current.iter().map(|u| u.strategy_id.as_str()).collect();
        let previous_ids: BTreeSet<&str> =
            previous.iter().map(|u| u.strategy_id.as_str()).collect();
        let added: Vec<&str> = current_ids.difference(&previous_ids).copied().collect();
        let removed: Vec<&str> = previous_ids.difference(&current_ids).copied().collect();
        if added.is_empty() && removed.is_empty() {
            return None;
        }

        let current_avg = avg_offer(&current);
        let previous_avg = avg_offer(&previous);
        let delta = match (current_avg, previous_avg) {
            (Some(c), Some(p)) => (c - p).abs(),
            _ => 0.0,
        };
        let impact = if delta > rules.high_impact_delta {
            Impact::High
        } else {
            Impact::Medium
        };

        let mut facts = BTreeMap::new();
        facts.insert("added".into(), json!(added));
        facts.insert("removed".into(), json!(removed));
        facts.insert("avgOfferCurrent".into(), json!(current_avg));
        facts.insert("avgOfferPrevious".into(), json!(previous_avg));
        facts.insert("avgOfferDelta".into(), json!(delta));

        Some(Hypothesis {
            category: self.category(),
            title: "Offer strategy changed".into(),
            description: format!(
                "Active offer strategies changed ({} added, {} removed); average offer moved \
                 {delta:.1} points.",
                added.len(),
                removed.len()
            ),
            confidence: rules.confidence,
            impact,
            suggested_action: "Check that the new offer levels are still competitive with \
                               local cash buyers."
                .into(),
            evidence: facts,
            generator: self.name().into(),
        })
    }
}
