//! CLI argument definitions using clap derive macros.
//!
//! Options that also exist in the config file are `Option`s here so an
//! absent flag falls through to the file value.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use vplan_core::FilterMode;

/// Download the Siemens-Gymnasium substitution plan PDFs.
///
/// Fetches the substitution-plan page, finds the linked PDF schedules and
/// saves them to <downloads>/SiemensGymPDFs/.
#[derive(Parser, Debug)]
#[command(name = "vplan")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Page to scan for PDF links
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Base directory instead of the platform downloads folder
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Subdirectory of the base directory that receives the files
    #[arg(long, value_name = "NAME")]
    pub subdirectory: Option<String>,

    /// Download only the first matching link or all of them
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Substring a link must contain
    #[arg(long, value_name = "TEXT", conflicts_with = "no_contains")]
    pub contains: Option<String>,

    /// Accept links regardless of their content (suffix still applies)
    #[arg(long)]
    pub no_contains: bool,

    /// Suffix a link must end with
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Maximum concurrent downloads (1-16)
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub concurrency: Option<u8>,

    /// Maximum attempts per file for transient failures (0-10)
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub max_retries: Option<u8>,

    /// Keep files that already exist instead of downloading them again
    #[arg(long)]
    pub skip_existing: bool,

    /// Keep the URL query string in file names
    #[arg(long)]
    pub keep_query: bool,

    /// Print the first table of the page
    #[arg(long)]
    pub table: bool,

    /// Print the run report as JSON instead of status lines
    #[arg(long)]
    pub json: bool,

    /// Open each downloaded file with the system viewer
    #[arg(long)]
    pub open: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Link selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    FirstMatch,
    AllMatching,
}

impl From<ModeArg> for FilterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FirstMatch => FilterMode::FirstMatch,
            ModeArg::AllMatching => FilterMode::AllMatching,
        }
    }
}
