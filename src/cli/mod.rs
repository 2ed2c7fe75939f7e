//! Command-line parsing.
//!
//! Argument parsing is kept apart from the pipeline: `app` converts `Cli` into
//! a plain `RunConfig` before anything touches the network.

use clap::{ArgAction, Parser};

use crate::domain::ApiVersion;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gemrxiv",
    version,
    disable_version_flag = true,
    about = "Rank ChemRxiv preprints by downloads per day online"
)]
pub struct Cli {
    /// Print version and exit.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Which statistics API to query.
    #[arg(short = 'a', long, value_enum, default_value_t = ApiVersion::Engage)]
    pub api: ApiVersion,

    /// Number of candidate articles to request (legacy: 1-1000, engage: 1-50).
    ///
    /// Out-of-range values fall back to the API's default.
    #[arg(short = 'e', long)]
    pub entries: Option<usize>,

    /// Exclude articles published within this many days of the finish date.
    #[arg(short = 'd', long, default_value_t = 180)]
    pub days: u32,

    /// Reference end-date (YYYY-MM-DD); defaults to today.
    #[arg(short = 'f', long, value_name = "DATE")]
    pub finish: Option<String>,

    /// Disable exclusion filtering entirely.
    #[arg(short = 'n', long)]
    pub nocut: bool,

    /// Log fetch progress and request details to stderr.
    #[arg(long)]
    pub verbose: bool,
}
