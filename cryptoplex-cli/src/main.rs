// Cryptoplex CLI - Complexity analysis runner
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Cryptoplex CLI
//!
//! Complexity of blockchain energy efficiency and its correlation with
//! market capitalization.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a master table
//! cryptoplex --csv master.csv --kind monthly --output report.json
//!
//! # Synthetic demo with weekly windows only
//! cryptoplex --synthetic-days 730 --scales W --kind weekly
//! ```

mod app;
mod error;

use app::{load_panel, run, summary_lines, AppConfig, Overrides, Source};
use clap::Parser;
use cryptoplex_testdata::Dataset;
use error::CliError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Default synthetic history when no CSV is given.
const DEFAULT_SYNTHETIC_DAYS: usize = 1461;

/// Blockchain complexity analysis
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Master table CSV: Date, "<Entity> Transactions per kW", "<entity>_market_cap"
    #[arg(short, long, conflicts_with = "synthetic_days")]
    csv: Option<PathBuf>,

    /// Generate a synthetic panel covering this many days
    #[arg(long)]
    synthetic_days: Option<usize>,

    /// Seed for the synthetic generator
    #[arg(long, default_value = "42")]
    seed: u64,

    /// JSON config file with optional "complexity" and "correlation" sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated entities to analyze (default: all)
    #[arg(short, long)]
    entities: Option<String>,

    /// Window scales for bucketed and sliding modes, e.g. "W,M"
    #[arg(long)]
    scales: Option<String>,

    /// Window modes to run, e.g. "fixed,bucketed,expanding,sliding"
    #[arg(long)]
    modes: Option<String>,

    /// Complexity series to correlate (weekly, monthly, cumulative)
    #[arg(short, long)]
    kind: Option<String>,

    /// EMA span for smoothed views
    #[arg(long)]
    span: Option<usize>,

    /// Bins per series for mutual information
    #[arg(long)]
    bins: Option<usize>,

    /// Write the full JSON report here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the loaded panel as a master-table CSV
    #[arg(long)]
    write_csv: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Cryptoplex v{}", env!("CARGO_PKG_VERSION"));

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply(&Overrides {
        scales: args.scales,
        modes: args.modes,
        kind: args.kind,
        span: args.span,
        bins: args.bins,
    })?;
    config.validate()?;

    let source = match args.csv {
        Some(path) => Source::Csv(path),
        None => Source::Synthetic {
            days: args.synthetic_days.unwrap_or(DEFAULT_SYNTHETIC_DAYS),
            seed: args.seed,
        },
    };
    let entities: Option<Vec<String>> = args.entities.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    });
    let panel = load_panel(&source, entities.as_deref())?;

    if let Some(path) = &args.write_csv {
        Dataset::from_panel(&panel).to_csv(path)?;
        info!(path = %path.display(), "master table written");
    }

    let output = run(&config, &panel)?;

    print!("{}", summary_lines(&output.complexity));
    println!();
    println!("{} complexity vs market cap", output.correlation.kind);
    print!("{}", output.correlation.render_table());
    for skipped in &output.correlation.skipped {
        println!("skipped {}: {}", skipped.entity, skipped.reason);
    }

    if let Some(path) = &args.output {
        output.write_json(path)?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
