//! Variant comparison command

use crate::commands::read_input;
use crate::error::CliResult;
use crate::output::{self, percent, print_info, print_success, print_warning, OutputFormat};
use colored::*;
use insights_types::VariantStats;
use insights_variants::{
    ComparatorConfig, ControlSelection, VariantComparator, VariantComparisonResult,
};
use tabled::Tabled;

/// Table row for one test variant
#[derive(Debug, Tabled)]
struct VariantRow {
    #[tabled(rename = "Variant")]
    name: String,
    #[tabled(rename = "Delivered")]
    delivered: u64,
    #[tabled(rename = "Calls")]
    calls: u64,
    #[tabled(rename = "Response")]
    response_rate: String,
    #[tabled(rename = "Interval")]
    interval: String,
    #[tabled(rename = "Lift")]
    lift: String,
    #[tabled(rename = "p-value")]
    p_value: String,
    #[tabled(rename = "Significant")]
    significant: String,
    #[tabled(rename = "Profit/piece")]
    profit_per_piece: String,
}

/// Execute the compare command
pub fn execute(file: &str, config: &ComparatorConfig, format: OutputFormat) -> CliResult<()> {
    let variants: Vec<VariantStats> = read_input(file)?;
    let comparator = VariantComparator::new(config.clone())?;
    let result = comparator.compare(&variants)?;

    match format {
        OutputFormat::Table => print_report(&result),
        _ => output::print_single(&result, format)?,
    }
    Ok(())
}

fn print_report(result: &VariantComparisonResult) {
    let control = &result.control;
    println!(
        "{} {} ({} calls / {} delivered, response {})",
        "Control:".bold(),
        control.name,
        control.calls,
        control.pieces_delivered,
        percent(control.response_rate)
    );
    if control.selection == ControlSelection::FirstCreated {
        print_warning("No variant is flagged as control; using the first created");
    }

    let rows: Vec<VariantRow> = result
        .variants
        .iter()
        .map(|v| VariantRow {
            name: v.name.clone(),
            delivered: v.pieces_delivered,
            calls: v.calls,
            response_rate: percent(v.response_rate),
            interval: format!(
                "{} - {}",
                percent(v.confidence_interval.lower),
                percent(v.confidence_interval.upper)
            ),
            lift: output::signed_percent(v.lift_vs_control),
            p_value: format!("{:.4}", v.p_value),
            significant: if v.is_significant {
                "yes".green().to_string()
            } else {
                "no".dimmed().to_string()
            },
            profit_per_piece: format!("${:.2}", v.profit_per_piece),
        })
        .collect();
    output::print_table(rows);

    let significant = result.significant().count();
    print_info(&format!(
        "{} of {} test variants differ significantly from the control",
        significant,
        result.variants.len()
    ));

    match &result.recommended_winner {
        Some(winner) => print_success(&format!(
            "Recommended winner: {} ({} lift, ${:.2} per piece)",
            winner.name,
            output::signed_percent(winner.lift_vs_control),
            winner.profit_per_piece
        )),
        None => print_info("No variant significantly beats the control"),
    }
}
