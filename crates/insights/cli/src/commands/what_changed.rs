//! What-changed report command

use crate::commands::read_input;
use crate::error::{CliError, CliResult};
use crate::output::{self, print_heading, print_info, print_warning, OutputFormat};
use chrono::{DateTime, Utc};
use colored::*;
use insights_diagnostics::{
    DiagnosticsConfig, Direction, Significance, StaticSources, WhatChangedEngine,
    WhatChangedReport,
};
use insights_types::{AccountId, ReportingPeriod};
use serde::Deserialize;
use tabled::Tabled;

/// Input file for a what-changed run
///
/// Holds the periods to compare and the pre-fetched metrics and evidence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatChangedFixture {
    pub account_id: AccountId,
    pub current_period: ReportingPeriod,
    /// Defaults to the window directly before `current_period`.
    #[serde(default)]
    pub previous_period: Option<ReportingPeriod>,
    pub sources: StaticSources,
}

#[derive(Debug, Tabled)]
struct ChangeRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "Significance")]
    significance: String,
}

#[derive(Debug, Tabled)]
struct HypothesisRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Hypothesis")]
    title: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Impact")]
    impact: String,
}

/// Parse an RFC 3339 reference time
pub fn parse_now(value: &str) -> CliResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CliError::InvalidInput(format!("--now {value:?}: {e}")))
}

/// Execute the what-changed command
pub async fn execute(
    file: &str,
    now: Option<&str>,
    config: &DiagnosticsConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let fixture: WhatChangedFixture = read_input(file)?;
    let now = match now {
        Some(value) => parse_now(value)?,
        None => Utc::now(),
    };

    let sources = fixture.sources;
    let engine = WhatChangedEngine::new(sources.clone(), sources, config.clone())?;
    let report = engine
        .analyze(
            &fixture.account_id,
            fixture.current_period,
            fixture.previous_period,
            now,
        )
        .await?;

    match format {
        OutputFormat::Table => print_report(&report),
        _ => output::print_single(&report, format)?,
    }
    Ok(())
}

fn colorize_direction(change: Direction, significance: Significance) -> String {
    let label = change.to_string();
    match (change, significance) {
        (Direction::Down, Significance::High | Significance::Medium) => label.red().to_string(),
        (Direction::Up, _) => label.green().to_string(),
        _ => label.dimmed().to_string(),
    }
}

fn print_report(report: &WhatChangedReport) {
    println!(
        "{} {}  {} vs {}",
        "What changed for".bold(),
        report.account_id.as_str(),
        report.current_period,
        report.previous_period
    );

    print_heading("Metric changes");
    output::print_table(
        report
            .changes
            .iter()
            .map(|c| ChangeRow {
                metric: c.metric.label().to_string(),
                previous: format!("{:.4}", c.previous_value),
                current: format!("{:.4}", c.current_value),
                change: output::signed_percent(c.percent_change),
                direction: colorize_direction(c.direction, c.significance),
                significance: c.significance.to_string(),
            })
            .collect(),
    );

    let declines: Vec<&str> = report.notable_declines().map(|c| c.metric.label()).collect();
    if declines.is_empty() {
        print_info("No notable declines; nothing to explain");
        return;
    }
    print_warning(&format!("Notable declines: {}", declines.join(", ")));

    print_heading("Hypotheses");
    if report.hypotheses.is_empty() {
        print_info("No hypothesis matched the available evidence");
    } else {
        output::print_table(
            report
                .hypotheses
                .iter()
                .map(|h| HypothesisRow {
                    category: h.category.to_string(),
                    title: h.title.clone(),
                    confidence: format!("{:.2}", h.confidence),
                    impact: h.impact.to_string(),
                })
                .collect(),
        );
    }
    for skipped in &report.skipped_generators {
        print_warning(&format!("{} skipped: {}", skipped.category, skipped.reason));
    }

    if !report.recommendations.is_empty() {
        print_heading("Recommendations");
        for (i, rec) in report.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec);
        }
    }
}
