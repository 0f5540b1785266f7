//! The fetch → extract → download → report pipeline.
//!
//! [`DownloadOrchestrator`] drives a single run: it fetches the configured
//! page, extracts matching PDF links, downloads each one (retrying transient
//! failures), then announces every finished file. A failure of one link never
//! stops the others; only an unavailable page aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vplan_core::{
//!     DirectoryHandle, DownloadOrchestrator, HttpClient, HttpPageFetcher, LogNotifier,
//!     NoopListener, PipelineConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default();
//! let orchestrator = DownloadOrchestrator::new(
//!     config.clone(),
//!     Arc::new(HttpPageFetcher::new()?),
//!     Arc::new(HttpClient::new()?),
//!     Arc::new(LogNotifier),
//!     DirectoryHandle::new("./downloads"),
//! )?;
//! let report = orchestrator.run(&config.source_url, &NoopListener).await;
//! println!("{} downloaded", report.succeeded());
//! # Ok(())
//! # }
//! ```

mod report;
mod status;

pub use report::{DownloadResult, RunOutcome, RunReport};
pub use status::{NoopListener, StatusListener, StatusUpdate};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::join_all;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::config::{MAX_CONCURRENCY, MIN_CONCURRENCY, PipelineConfig};
use crate::download::{
    DirectoryHandle, DownloadError, DownloadTarget, FileDownloader, NameAllocator, RetryDecision,
    classify_error, derive_file_name,
};
use crate::notify::NotificationPublisher;
use crate::page::PageFetcher;
use crate::parser::{LinkMatch, TABLE_FETCH_FAILED, extract_first_table, extract_links};

/// Errors raised when constructing an orchestrator.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency { value: usize },
}

/// A link paired with the file name it will be saved under.
struct PlannedDownload {
    source_url: String,
    file_name: Result<String, DownloadError>,
}

/// Result of one started download, with the target kept for reporting.
struct Attempt {
    result: DownloadResult,
    target: Option<DownloadTarget>,
}

/// Runs the substitution-plan pipeline.
pub struct DownloadOrchestrator {
    config: PipelineConfig,
    fetcher: Arc<dyn PageFetcher>,
    downloader: Arc<dyn FileDownloader>,
    notifier: Arc<dyn NotificationPublisher>,
    base: DirectoryHandle,
    interrupt: Arc<AtomicBool>,
}

impl DownloadOrchestrator {
    /// Creates an orchestrator writing under `base`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::InvalidConcurrency`] if
    /// `config.concurrency` is outside `1..=16`.
    pub fn new(
        config: PipelineConfig,
        fetcher: Arc<dyn PageFetcher>,
        downloader: Arc<dyn FileDownloader>,
        notifier: Arc<dyn NotificationPublisher>,
        base: DirectoryHandle,
    ) -> Result<Self, OrchestratorError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&config.concurrency) {
            return Err(OrchestratorError::InvalidConcurrency {
                value: config.concurrency,
            });
        }

        debug!(
            concurrency = config.concurrency,
            max_attempts = config.retry_policy.max_attempts(),
            subdirectory = %config.subdirectory,
            base = %base.root().display(),
            "creating download orchestrator"
        );

        Ok(Self {
            config,
            fetcher,
            downloader,
            notifier,
            base,
            interrupt: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Uses `flag` as the interrupt signal; once it is set no new download starts.
    #[must_use]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = flag;
        self
    }

    /// A handle that cancels the run when set to `true`.
    #[must_use]
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    /// Runs the pipeline against `url`.
    ///
    /// Never fails as a whole: an unreachable page yields
    /// [`RunOutcome::PageUnavailable`] with no results, and per-link failures
    /// are recorded in [`RunReport::results`].
    #[instrument(skip(self, listener))]
    pub async fn run(&self, url: &str, listener: &dyn StatusListener) -> RunReport {
        listener.on_status_changed(&StatusUpdate::Searching {
            url: url.to_string(),
        });

        let document = match self.fetcher.fetch(url).await {
            Ok(document) => document,
            Err(e) => {
                let reason = e.to_string();
                warn!(url, error = %reason, "page unavailable");
                listener.on_status_changed(&StatusUpdate::PageUnavailable {
                    reason: reason.clone(),
                });
                let table = self
                    .config
                    .extract_table
                    .then(|| TABLE_FETCH_FAILED.to_string());
                return RunReport::without_results(RunOutcome::PageUnavailable { reason }, table);
            }
        };

        let table = if self.config.extract_table {
            match extract_first_table(&document.html) {
                Ok(table) => Some(table),
                Err(e) => return parse_failed(&e, listener, None),
            }
        } else {
            None
        };

        let links = match extract_links(&document.html, &document.url, &self.config.link_filter) {
            Ok(links) => links,
            Err(e) => return parse_failed(&e, listener, table),
        };

        if links.is_empty() {
            info!(url = %document.url, "no matching documents");
            listener.on_status_changed(&StatusUpdate::NoneFound);
            return RunReport::without_results(RunOutcome::NoDocumentsFound, table);
        }

        info!(count = links.len(), "found documents");
        listener.on_status_changed(&StatusUpdate::Found { count: links.len() });

        let attempts = self.download_all(self.plan(links), listener).await;
        let cancelled = self.is_interrupted();
        if cancelled {
            listener.on_status_changed(&StatusUpdate::Cancelled);
        }

        for target in attempts.iter().filter_map(|a| a.target.as_ref()) {
            listener.on_file_ready(target);
            if let Err(e) = self.notifier.publish(target).await {
                warn!(file = %target.file_name, error = %e, "notification failed");
            }
        }

        let results: Vec<DownloadResult> = attempts.into_iter().map(|a| a.result).collect();
        let succeeded = results.iter().filter(|r| r.succeeded()).count();
        let failed = results.len() - succeeded;
        info!(succeeded, failed, cancelled, "run finished");
        listener.on_status_changed(&StatusUpdate::Finished { succeeded, failed });

        RunReport {
            outcome: RunOutcome::Finished {
                succeeded,
                failed,
                cancelled,
            },
            results,
            table,
        }
    }

    /// Assigns every link a distinct file name before any download starts.
    fn plan(&self, links: Vec<LinkMatch>) -> Vec<PlannedDownload> {
        let mut names = NameAllocator::new();
        links
            .into_iter()
            .map(|link| {
                let source_url = link.absolute_url.to_string();
                let file_name = derive_file_name(&source_url, self.config.filenames)
                    .map(|name| names.claim(&name));
                PlannedDownload {
                    source_url,
                    file_name,
                }
            })
            .collect()
    }

    async fn download_all(
        &self,
        planned: Vec<PlannedDownload>,
        listener: &dyn StatusListener,
    ) -> Vec<Attempt> {
        let semaphore = Semaphore::new(self.config.concurrency);
        let total = planned.len();

        let attempts = planned.into_iter().enumerate().map(|(index, item)| {
            let semaphore = &semaphore;
            async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return None;
                };
                if self.is_interrupted() {
                    debug!(url = %item.source_url, "interrupted, not starting download");
                    return None;
                }
                Some(self.download_one(item, index + 1, total, listener).await)
            }
        });

        join_all(attempts).await.into_iter().flatten().collect()
    }

    async fn download_one(
        &self,
        item: PlannedDownload,
        index: usize,
        total: usize,
        listener: &dyn StatusListener,
    ) -> Attempt {
        listener.on_status_changed(&StatusUpdate::Downloading {
            url: item.source_url.clone(),
            index,
            total,
        });

        let outcome = match item.file_name {
            Ok(file_name) => self.download_with_retry(&item.source_url, &file_name).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(target) => {
                listener.on_status_changed(&StatusUpdate::Downloaded {
                    file_name: target.file_name.clone(),
                    path: target.path.clone(),
                });
                Attempt {
                    result: DownloadResult::success(&item.source_url, target.path.clone()),
                    target: Some(target),
                }
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(url = %item.source_url, error = %reason, "download failed");
                listener.on_status_changed(&StatusUpdate::DownloadFailed {
                    url: item.source_url.clone(),
                    reason: reason.clone(),
                });
                Attempt {
                    result: DownloadResult::failure(item.source_url, reason),
                    target: None,
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn download_with_retry(
        &self,
        source_url: &str,
        file_name: &str,
    ) -> Result<DownloadTarget, DownloadError> {
        let policy = &self.config.retry_policy;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(attempt, "attempting download");

            let error = match self
                .downloader
                .download_named(source_url, file_name, &self.config.subdirectory, &self.base)
                .await
            {
                Ok(target) => return Ok(target),
                Err(e) => e,
            };

            if self.is_interrupted() {
                debug!(url = source_url, attempt, "interrupted, not retrying download");
                return Err(error);
            }

            match policy.should_retry(classify_error(&error), attempt) {
                RetryDecision::Retry {
                    delay,
                    attempt: next_attempt,
                } => {
                    info!(
                        url = source_url,
                        attempt = next_attempt,
                        max_attempts = policy.max_attempts(),
                        delay_ms = delay.as_millis(),
                        error = %error,
                        "retrying download"
                    );
                    tokio::time::sleep(delay).await;
                    if self.is_interrupted() {
                        debug!(url = source_url, "interrupted during backoff");
                        return Err(error);
                    }
                }
                RetryDecision::DoNotRetry { reason } => {
                    debug!(url = source_url, %reason, "not retrying download");
                    return Err(error);
                }
            }
        }
    }
}

fn parse_failed(
    error: &crate::parser::ParseError,
    listener: &dyn StatusListener,
    table: Option<String>,
) -> RunReport {
    let reason = error.to_string();
    warn!(error = %reason, "page could not be parsed");
    listener.on_status_changed(&StatusUpdate::PageUnavailable {
        reason: reason.clone(),
    });
    RunReport::without_results(RunOutcome::ParseFailed { reason }, table)
}
