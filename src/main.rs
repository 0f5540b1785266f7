//! CLI entry point for the substitution-plan fetcher.

use clap::Parser;
use tracing::debug;

mod app;
mod app_config;
mod cli;
mod output;

use cli::Args;

/// Process exit outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every document downloaded, or none were listed.
    Success,
    /// Some documents downloaded, some failed.
    Partial,
    /// Page unavailable, every download failed, interrupted, or a setup error.
    Failure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let exit = match app::run_vplan(args).await {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ProcessExit::Failure
        }
    };

    std::process::exit(exit.code());
}
