//! The variant comparator.

use insights_stats::{confidence_interval, is_significant, lift, p_value};
use insights_types::VariantStats;
use tracing::{debug, instrument, warn};

use crate::config::ComparatorConfig;
use crate::error::{ComparatorError, ComparatorResult};
use crate::result::{
    ControlSelection, ControlSummary, VariantComparisonResult, VariantOutcome,
    WinnerRecommendation,
};

/// Compares test variants against a control.
///
/// Stateless apart from its configuration; safe to share across threads and
/// call concurrently.
#[derive(Debug, Clone, Default)]
pub struct VariantComparator {
    config: ComparatorConfig,
}

impl VariantComparator {
    /// Create a comparator, validating the configuration.
    pub fn new(config: ComparatorConfig) -> ComparatorResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compare every non-control variant against the control.
    ///
    /// `variants` must be in creation order when no variant is flagged as
    /// control and creation timestamps are missing, since the control then
    /// falls back to the first one.
    #[instrument(skip_all, fields(variants = variants.len()))]
    pub fn compare(&self, variants: &[VariantStats]) -> ComparatorResult<VariantComparisonResult> {
        if variants.len() < 2 {
            return Err(ComparatorError::InsufficientVariants {
                found: variants.len(),
            });
        }

        let (control_index, selection) = select_control(variants);
        let control = &variants[control_index];
        let control_rate = control.response_rate();

        let outcomes: Vec<VariantOutcome> = variants
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != control_index)
            .map(|(_, variant)| self.measure(control, control_rate, variant))
            .collect();

        let recommended_winner = pick_winner(&outcomes);
        match &recommended_winner {
            Some(winner) => debug!(winner = %winner.id, "recommended winner"),
            None => debug!("no variant beats the control significantly"),
        }

        Ok(VariantComparisonResult {
            control: ControlSummary {
                id: control.id.clone(),
                name: control.name.clone(),
                selection,
                pieces_mailed: control.pieces_mailed,
                pieces_delivered: control.pieces_delivered,
                calls: control.calls,
                contracts: control.contracts,
                response_rate: control_rate,
                contract_rate: control.contract_rate(),
                profit_per_piece: control.profit_per_piece(),
                confidence_interval: confidence_interval(
                    control.calls,
                    control.pieces_delivered,
                    self.config.confidence_level,
                ),
            },
            variants: outcomes,
            recommended_winner,
        })
    }

    fn measure(
        &self,
        control: &VariantStats,
        control_rate: f64,
        variant: &VariantStats,
    ) -> VariantOutcome {
        let response_rate = variant.response_rate();
        let p = p_value(
            control.calls,
            control.pieces_delivered,
            variant.calls,
            variant.pieces_delivered,
        );
        let significant = is_significant(p, self.config.alpha);
        let lift_vs_control = lift(control_rate, response_rate).relative_change;

        debug!(
            variant = %variant.id,
            response_rate,
            lift_vs_control,
            p_value = p,
            significant,
            "measured variant"
        );

        VariantOutcome {
            id: variant.id.clone(),
            name: variant.name.clone(),
            allocation_percent: variant.allocation_percent,
            pieces_mailed: variant.pieces_mailed,
            pieces_delivered: variant.pieces_delivered,
            calls: variant.calls,
            contracts: variant.contracts,
            response_rate,
            contract_rate: variant.contract_rate(),
            profit_per_piece: variant.profit_per_piece(),
            lift_vs_control,
            p_value: p,
            is_significant: significant,
            confidence_interval: confidence_interval(
                variant.calls,
                variant.pieces_delivered,
                self.config.confidence_level,
            ),
        }
    }
}

/// Index of the control and how it was chosen.
///
/// The first flagged variant wins. Without a flag, the earliest `created_at`
/// is used; variants without a timestamp sort after timestamped ones and
/// ties keep input order.
fn select_control(variants: &[VariantStats]) -> (usize, ControlSelection) {
    let mut flagged = variants.iter().enumerate().filter(|(_, v)| v.is_control);
    if let Some((index, control)) = flagged.next() {
        let extra = flagged.count();
        if extra > 0 {
            warn!(
                control = %control.id,
                extra,
                "multiple variants flagged as control; using the first"
            );
        }
        return (index, ControlSelection::Flagged);
    }

    // min_by_key keeps the first of equal keys
    let index = variants
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| (v.created_at.is_none(), v.created_at))
        .map(|(index, _)| index)
        .unwrap_or(0);
    warn!(
        control = %variants[index].id,
        "no variant flagged as control; falling back to the first created"
    );
    (index, ControlSelection::FirstCreated)
}

/// Highest profit per piece among significant variants with positive lift.
///
/// Ties go to the earlier variant.
fn pick_winner(outcomes: &[VariantOutcome]) -> Option<WinnerRecommendation> {
    let mut best: Option<&VariantOutcome> = None;
    for outcome in outcomes
        .iter()
        .filter(|o| o.is_significant && o.lift_vs_control > 0.0)
    {
        match best {
            Some(current) if outcome.profit_per_piece <= current.profit_per_piece => {}
            _ => best = Some(outcome),
        }
    }

    best.map(|o| WinnerRecommendation {
        id: o.id.clone(),
        name: o.name.clone(),
        profit_per_piece: o.profit_per_piece,
        lift_vs_control: o.lift_vs_control,
        p_value: o.p_value,
    })
}
