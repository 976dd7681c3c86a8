#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs one foraging round over a scenario file.

mod report;
mod scenario;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use insect_forage_core::InsectReport;
use insect_forage_system_round::simulate;
use report::OutputFormat;
use scenario::ScenarioError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Simulates a single round of insects foraging on a square board.
#[derive(Debug, Parser)]
#[command(name = "insect-forage", version, about)]
struct Cli {
    /// Scenario file to read.
    #[arg(long, default_value = "input.txt")]
    input: PathBuf,
    /// File receiving the reports or the validation error.
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,
    /// Layout of the reports.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Tracing filter directive, e.g. `debug` or `insect_forage_system_movement=trace`.
    /// Falls back to `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,
}

/// Entry point for the Insect Forage command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let body = match run(&cli) {
        Ok(reports) => {
            info!(insects = reports.len(), "round simulated");
            report::render(&reports, cli.format).context("failed to encode reports")?
        }
        Err(error) => {
            warn!(%error, input = %cli.input.display(), "scenario rejected");
            report::render_error(&error)
        }
    };

    fs::write(&cli.output, body)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    Ok(())
}

fn run(cli: &Cli) -> Result<Vec<InsectReport>, ScenarioError> {
    let text = fs::read_to_string(&cli.input)?;
    let mut world = scenario::load(&text)?;
    Ok(simulate(&mut world))
}

fn init_tracing(directive: Option<&str>) {
    let filter = directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
