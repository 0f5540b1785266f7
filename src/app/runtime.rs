//! One CLI run: resolve config, wire the pipeline, print the outcome.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use vplan_core::{
    DirectoryHandle, DownloadOrchestrator, HttpClient, HttpPageFetcher, LogNotifier, RunOutcome,
};

use crate::ProcessExit;
use crate::app::{config_runtime, exit_handler};
use crate::app_config::load_config;
use crate::cli::Args;
use crate::output::{self, ConsoleListener};

pub(crate) async fn run_vplan(args: Args) -> Result<ProcessExit> {
    let file_config = load_config(args.config.as_deref())?;
    let resolved =
        config_runtime::resolve_config(&args, &file_config, DirectoryHandle::platform_downloads)?;
    let pipeline = resolved.pipeline;
    debug!(?pipeline, base_dir = %resolved.base_dir.display(), "resolved configuration");

    let fetcher = HttpPageFetcher::with_timeouts(pipeline.timeouts)
        .context("Failed to build HTTP client for the plan page")?;
    let downloader = HttpClient::with_timeouts(pipeline.timeouts)
        .context("Failed to build HTTP client for downloads")?
        .with_existing_file_policy(pipeline.existing_files)
        .with_filename_policy(pipeline.filenames);

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_signal = Arc::clone(&interrupted);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupted_signal.store(true, Ordering::SeqCst);
            warn!("Interrupt received, finishing downloads in flight. Press Ctrl-C again to abort.");
        }
        // A second Ctrl-C aborts without waiting for in-flight downloads.
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(ProcessExit::Failure.code());
        }
    });

    let source_url = pipeline.source_url.clone();
    let orchestrator = DownloadOrchestrator::new(
        pipeline,
        Arc::new(fetcher),
        Arc::new(downloader),
        Arc::new(LogNotifier),
        DirectoryHandle::new(&resolved.base_dir),
    )?
    .with_interrupt(Arc::clone(&interrupted));

    let listener = ConsoleListener::new(args.quiet || args.json, args.open);
    let report = orchestrator.run(&source_url, &listener).await;

    if args.json {
        output::print_json_report(&report)?;
    } else if !args.quiet {
        output::print_summary(&report);
    }

    match &report.outcome {
        RunOutcome::Finished {
            cancelled: true,
            succeeded,
            ..
        } => warn!(succeeded, "Interrupted. Run again to fetch the remaining files."),
        outcome => info!(?outcome, "Run complete"),
    }

    Ok(exit_handler::determine_exit_outcome(&report.outcome))
}
