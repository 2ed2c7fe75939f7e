//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments into a `RunConfig`
//! - sets up logging
//! - picks the statistics source
//! - runs the pipeline and prints the table

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{warn, Level};

use crate::cli::Cli;
use crate::data::{self, ReqwestFetch};
use crate::domain::{RunConfig, RunOutcome};
use crate::error::AppError;

pub mod pipeline;
pub mod progress;

use progress::StatusLine;

/// Entry point for the `gemrxiv` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Read the clock once; everything below takes the date explicitly.
    let today = Local::now().date_naive();
    let config = config_from_cli(&cli)?;

    let http = ReqwestFetch::new()?;
    let source = data::source_for(config.api, &http);

    let mut status = StatusLine::new(!config.verbose);
    let outcome = pipeline::run(&config, source.as_ref(), today, &mut |done, total| {
        status.update(done, total)
    })?;
    status.clear();

    print_outcome(&outcome)
}

pub fn config_from_cli(cli: &Cli) -> Result<RunConfig, AppError> {
    let limits = cli.api.limits();
    if let Some(requested) = cli.entries {
        if !limits.accepts(requested) {
            warn!(
                action = "clamp",
                component = "config",
                requested,
                max = limits.max,
                default = limits.default,
                "Entries out of range, using default"
            );
        }
    }

    let finish = cli.finish.as_deref().map(parse_finish).transpose()?;

    Ok(RunConfig {
        api: cli.api,
        entries: limits.resolve(cli.entries),
        days: cli.days,
        finish,
        cut: !cli.nocut,
        verbose: cli.verbose,
    })
}

fn parse_finish(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::invalid_date(format!("Invalid --finish date '{raw}' (expected YYYY-MM-DD): {e}")))
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn print_outcome(outcome: &RunOutcome) -> Result<(), AppError> {
    let text = match outcome {
        RunOutcome::NothingToShow {
            source,
            candidate_count,
            cut_count,
        } => crate::report::format_nothing_to_show(source, *candidate_count, *cut_count),
        RunOutcome::Ranked(results) => format!(
            "{}\n{}",
            crate::report::format_summary(results),
            crate::report::format_table(&results.rows)
        ),
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| AppError::output(format!("Failed to write output: {e}")))
}
