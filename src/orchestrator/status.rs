//! Phase-transition events emitted during a run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::download::DownloadTarget;

/// One observable step of a run, in the order the pipeline passes through them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusUpdate {
    Searching { url: String },
    Found { count: usize },
    Downloading { url: String, index: usize, total: usize },
    Downloaded { file_name: String, path: PathBuf },
    DownloadFailed { url: String, reason: String },
    NoneFound,
    PageUnavailable { reason: String },
    Finished { succeeded: usize, failed: usize },
    Cancelled,
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Searching { .. } => write!(f, "Searching PDFs..."),
            Self::Found { .. } => write!(f, "PDFs found, downloading..."),
            Self::Downloading { url, index, total } => {
                write!(f, "Downloading {index}/{total}: {url}")
            }
            Self::Downloaded { file_name, .. } => {
                write!(f, "PDF downloaded successfully: {file_name}")
            }
            Self::DownloadFailed { url, .. } => write!(f, "PDF download failed: {url}"),
            Self::NoneFound => write!(f, "No PDFs found"),
            Self::PageUnavailable { reason } => write!(f, "Could not load page: {reason}"),
            Self::Finished { succeeded, failed } => {
                write!(f, "Finished: {succeeded} downloaded, {failed} failed")
            }
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Receives status updates and finished files from a run.
///
/// Callbacks may arrive from concurrently running downloads, so
/// implementations must be `Sync`.
pub trait StatusListener: Send + Sync {
    fn on_status_changed(&self, update: &StatusUpdate);

    /// Called once per successful download, in discovery order, after all
    /// downloads have finished.
    fn on_file_ready(&self, target: &DownloadTarget) {
        let _ = target;
    }
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl StatusListener for NoopListener {
    fn on_status_changed(&self, _update: &StatusUpdate) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(
            StatusUpdate::Searching {
                url: "https://example.com".to_string()
            }
            .to_string(),
            "Searching PDFs..."
        );
        assert_eq!(
            StatusUpdate::Found { count: 2 }.to_string(),
            "PDFs found, downloading..."
        );
        assert_eq!(
            StatusUpdate::Downloading {
                url: "https://example.com/plan.pdf".to_string(),
                index: 1,
                total: 3
            }
            .to_string(),
            "Downloading 1/3: https://example.com/plan.pdf"
        );
        assert_eq!(
            StatusUpdate::Downloaded {
                file_name: "plan.pdf".to_string(),
                path: PathBuf::from("/tmp/plan.pdf")
            }
            .to_string(),
            "PDF downloaded successfully: plan.pdf"
        );
        assert_eq!(StatusUpdate::NoneFound.to_string(), "No PDFs found");
        assert_eq!(
            StatusUpdate::Finished {
                succeeded: 2,
                failed: 1
            }
            .to_string(),
            "Finished: 2 downloaded, 1 failed"
        );
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let json = serde_json::to_value(StatusUpdate::Found { count: 3 }).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["count"], 3);
    }
}
