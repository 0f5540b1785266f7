//! Pipeline defaults and policy switches.
//!
//! [`PipelineConfig`] collects everything a single run needs: where the plan
//! page lives, how links are filtered, where files land and how name
//! collisions are treated. The binary layers its config file and CLI flags on
//! top of [`PipelineConfig::default`].

use std::time::Duration;

use crate::download::RetryPolicy;
use crate::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::parser::LinkFilter;

/// Substitution-plan page fetched when no other URL is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://www.siemens-gymnasium-berlin.de/vertretungsplan";

/// Subdirectory of the downloads folder that receives the PDFs.
pub const DEFAULT_SUBDIRECTORY: &str = "SiemensGymPDFs";

/// Minimum allowed download concurrency.
pub const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed download concurrency.
pub const MAX_CONCURRENCY: usize = 16;

/// What to do when the target file already exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingFilePolicy {
    /// Download again and replace the existing file.
    #[default]
    Overwrite,
    /// Keep the existing file and report it as downloaded.
    Skip,
}

/// How the local file name is derived from the source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilenamePolicy {
    /// Drop `?query` before taking the last path segment.
    #[default]
    StripQuery,
    /// Keep the raw text after the last `/`, query included (sanitized).
    Verbatim,
}

/// Connect and read timeouts shared by the page fetcher and downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read: Duration::from_secs(READ_TIMEOUT_SECS),
        }
    }
}

/// Configuration for one orchestrator run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Page that links to the PDF documents.
    pub source_url: String,
    /// Subdirectory under the base directory for downloaded files.
    pub subdirectory: String,
    /// Which anchors count as documents.
    pub link_filter: LinkFilter,
    /// Behavior when a file with the derived name already exists.
    pub existing_files: ExistingFilePolicy,
    /// Whether query strings survive into file names.
    pub filenames: FilenamePolicy,
    /// Number of downloads allowed in flight at once (1 = sequential).
    pub concurrency: usize,
    /// Retry policy applied to each download.
    pub retry_policy: RetryPolicy,
    /// Also extract the first `<table>` of the page.
    pub extract_table: bool,
    /// HTTP timeouts.
    pub timeouts: HttpTimeouts,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            subdirectory: DEFAULT_SUBDIRECTORY.to_string(),
            link_filter: LinkFilter::default(),
            existing_files: ExistingFilePolicy::default(),
            filenames: FilenamePolicy::default(),
            concurrency: MIN_CONCURRENCY,
            retry_policy: RetryPolicy::default(),
            extract_table: false,
            timeouts: HttpTimeouts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FilterMode;

    #[test]
    fn test_default_config_targets_school_page() {
        let config = PipelineConfig::default();
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.subdirectory, "SiemensGymPDFs");
        assert_eq!(config.concurrency, 1);
        assert!(!config.extract_table);
    }

    #[test]
    fn test_default_filter_matches_plan_pdfs() {
        let filter = PipelineConfig::default().link_filter;
        assert_eq!(filter.mode, FilterMode::AllMatching);
        assert_eq!(filter.must_contain.as_deref(), Some("plan"));
        assert_eq!(filter.must_end_with, ".pdf");
    }

    #[test]
    fn test_default_policies() {
        assert_eq!(ExistingFilePolicy::default(), ExistingFilePolicy::Overwrite);
        assert_eq!(FilenamePolicy::default(), FilenamePolicy::StripQuery);
    }

    #[test]
    fn test_default_timeouts() {
        let timeouts = HttpTimeouts::default();
        assert_eq!(timeouts.connect, Duration::from_secs(30));
        assert_eq!(timeouts.read, Duration::from_secs(300));
    }
}
