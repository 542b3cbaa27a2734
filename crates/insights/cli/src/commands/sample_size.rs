//! Sample-size planning command

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use colored::*;
use insights_stats::required_sample_size;
use serde::Serialize;

/// A planned test size
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePlan {
    pub base_rate: f64,
    pub minimum_detectable_lift: f64,
    pub alpha: f64,
    pub power: f64,
    /// Delivered pieces needed in each arm
    pub pieces_per_arm: u64,
}

/// Compute the per-arm volume for the given test parameters
pub fn plan(base_rate: f64, lift: f64, alpha: f64, power: f64) -> CliResult<SamplePlan> {
    let pieces_per_arm = required_sample_size(base_rate, lift, alpha, power)?;
    Ok(SamplePlan {
        base_rate,
        minimum_detectable_lift: lift,
        alpha,
        power,
        pieces_per_arm,
    })
}

/// Execute the sample-size command
pub fn execute(
    base_rate: f64,
    lift: f64,
    alpha: f64,
    power: f64,
    format: OutputFormat,
) -> CliResult<()> {
    let plan = plan(base_rate, lift, alpha, power)?;
    match format {
        OutputFormat::Table => {
            println!(
                "{} delivered pieces per arm",
                plan.pieces_per_arm.to_string().bold()
            );
            println!(
                "  to detect a {} lift on a {} response rate (alpha {}, power {})",
                output::signed_percent(plan.minimum_detectable_lift),
                output::percent(plan.base_rate),
                plan.alpha,
                plan.power
            );
        }
        _ => output::print_single(&plan, format)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_plan_matches_statistics() {
        let plan = plan(0.02, 0.5, 0.05, 0.8).unwrap();
        assert_eq!(
            plan.pieces_per_arm,
            required_sample_size(0.02, 0.5, 0.05, 0.8).unwrap()
        );
    }

    #[test]
    fn test_plan_rejects_bad_rate() {
        assert!(matches!(plan(1.5, 0.5, 0.05, 0.8), Err(CliError::Stats(_))));
    }
}
