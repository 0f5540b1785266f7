//! CLI output formatting and display helpers.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use vplan_core::{DownloadTarget, RunReport, StatusListener, StatusUpdate};

/// Prints one status line per phase transition to stdout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleListener {
    /// Suppress status lines (quiet or JSON mode).
    silent: bool,
    /// Open each ready file with the system viewer.
    open_files: bool,
}

impl ConsoleListener {
    pub(crate) fn new(silent: bool, open_files: bool) -> Self {
        Self { silent, open_files }
    }
}

impl StatusListener for ConsoleListener {
    fn on_status_changed(&self, update: &StatusUpdate) {
        if self.silent {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{update}");
    }

    fn on_file_ready(&self, target: &DownloadTarget) {
        if !self.open_files {
            return;
        }
        debug!(path = %target.path.display(), "opening downloaded file");
        // Detached so the pipeline never waits on the viewer process.
        if let Err(e) = open::that_detached(&target.path) {
            warn!(path = %target.path.display(), error = %e, "could not open file");
        }
    }
}

/// Prints the report as pretty JSON.
pub(crate) fn print_json_report(report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    println!("{json}");
    Ok(())
}

/// Prints the extracted table (or its sentinel), followed by one line per failure.
pub(crate) fn print_summary(report: &RunReport) {
    if let Some(table) = &report.table {
        println!("{table}");
    }
    for failure in report.results.iter().filter(|r| !r.succeeded()) {
        println!(
            "  failed: {} ({})",
            failure.source_url(),
            failure.error_reason().unwrap_or("unknown error")
        );
    }
}
