//! Campaign Insights CLI
//!
//! Terminal access to the performance analytics core:
//! - Compare mail variants against a control
//! - Explain period-over-period changes for an account
//! - Plan test volumes before a drop

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{compare, sample_size, what_changed};
use config::CliConfig;
use error::CliResult;

/// Campaign Insights CLI application
#[derive(Parser)]
#[command(name = "insights")]
#[command(about = "Campaign Insights - direct-mail performance analytics", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "INSIGHTS_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Compare campaign variants against the control
    Compare {
        /// Path to a JSON or YAML list of variant statistics
        file: String,
    },

    /// Explain what changed between two reporting periods
    #[command(name = "what-changed")]
    WhatChanged {
        /// Path to a what-changed fixture (JSON or YAML)
        file: String,

        /// Reference time (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,
    },

    /// Delivered pieces per arm needed to detect a lift
    #[command(name = "sample-size")]
    SampleSize {
        /// Control response rate, e.g. 0.02
        #[arg(long)]
        base_rate: f64,

        /// Minimum relative lift to detect, e.g. 0.25
        #[arg(long)]
        lift: f64,

        /// Significance level; defaults to the configured alpha
        #[arg(long)]
        alpha: Option<f64>,

        /// Statistical power
        #[arg(long, default_value_t = 0.8)]
        power: f64,
    },

    /// Show configuration
    Config,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // Load config
    let config = CliConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded configuration");

    // Execute command
    match cli.command {
        Commands::Compare { file } => compare::execute(&file, &config.comparator, cli.output),
        Commands::WhatChanged { file, now } => {
            what_changed::execute(&file, now.as_deref(), &config.diagnostics, cli.output).await
        }
        Commands::SampleSize {
            base_rate,
            lift,
            alpha,
            power,
        } => sample_size::execute(
            base_rate,
            lift,
            alpha.unwrap_or(config.comparator.alpha),
            power,
            cli.output,
        ),
        Commands::Config => {
            match cli.config.as_deref() {
                Some(path) => println!("# Config: {}", path),
                None => match CliConfig::default_config_path() {
                    Ok(path) => println!("# Config: {}", path.display()),
                    Err(_) => println!("# Config: built-in defaults"),
                },
            }
            match cli.output {
                output::OutputFormat::Table => print!("{}", toml::to_string_pretty(&config)?),
                format => output::print_single(&config, format)?,
            }
            Ok(())
        }
    }
}
