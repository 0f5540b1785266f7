//! Per-link results and the aggregate outcome of a run.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// The outcome of one attempted download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    source_url: String,
    local_path: Option<PathBuf>,
    succeeded: bool,
    error_reason: Option<String>,
}

impl DownloadResult {
    /// A download that landed at `local_path`.
    #[must_use]
    pub fn success(source_url: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            local_path: Some(local_path.into()),
            succeeded: true,
            error_reason: None,
        }
    }

    /// A download that failed for `reason`.
    #[must_use]
    pub fn failure(source_url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            local_path: None,
            succeeded: false,
            error_reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    #[must_use]
    pub fn error_reason(&self) -> Option<&str> {
        self.error_reason.as_deref()
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The page could not be fetched; nothing was downloaded.
    PageUnavailable { reason: String },
    /// The page could not be parsed.
    ParseFailed { reason: String },
    /// The page had no matching links.
    NoDocumentsFound,
    /// Every started download ran to completion or failure.
    Finished {
        succeeded: usize,
        failed: usize,
        /// Set when the run was interrupted before all links were attempted.
        cancelled: bool,
    },
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// One entry per attempted link, in discovery order.
    pub results: Vec<DownloadResult>,
    /// Outer HTML of the first table, when table extraction was requested.
    pub table: Option<String>,
}

impl RunReport {
    pub(crate) fn without_results(outcome: RunOutcome, table: Option<String>) -> Self {
        Self {
            outcome,
            results: Vec::new(),
            table,
        }
    }

    /// Number of successful downloads.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    /// Number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}
