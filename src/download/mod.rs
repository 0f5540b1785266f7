//! Streaming file downloads into a subdirectory of a base directory.
//!
//! [`FileDownloader`] is the seam the orchestrator depends on; [`HttpClient`]
//! is the reqwest-backed implementation. Bytes are streamed to a `.part`
//! file and renamed into place once complete, so a failed transfer never
//! leaves a truncated document behind.
//!
//! # Example
//!
//! ```no_run
//! use vplan_core::download::{DirectoryHandle, FileDownloader, HttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let downloads = DirectoryHandle::new("./downloads");
//! let target = client
//!     .download("https://example.com/files/plan_2024.pdf", "SiemensGymPDFs", &downloads)
//!     .await?;
//! println!("Downloaded: {}", target.path.display());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::config::FilenamePolicy;

mod client;
pub(crate) mod constants;
mod error;
mod filename;
mod retry;
mod target;

pub use client::HttpClient;
pub use error::DownloadError;
pub use filename::{NameAllocator, derive_file_name};
pub use retry::{DEFAULT_MAX_RETRIES, FailureType, RetryDecision, RetryPolicy, classify_error};
pub use target::{DirectoryHandle, DownloadTarget};

/// Downloads one remote document to local storage.
#[async_trait]
pub trait FileDownloader: Send + Sync {
    /// Downloads `source_url` to `base/subdirectory/file_name`.
    ///
    /// Creates the subdirectory if needed. On failure no file named
    /// `file_name` is created or truncated by this call.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] for malformed URLs, transport failures,
    /// non-2xx responses and filesystem errors.
    async fn download_named(
        &self,
        source_url: &str,
        file_name: &str,
        subdirectory: &str,
        base: &DirectoryHandle,
    ) -> Result<DownloadTarget, DownloadError>;

    /// Downloads `source_url` under the name derived from its last path segment.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] when no file name can be derived,
    /// plus everything [`FileDownloader::download_named`] can return.
    async fn download(
        &self,
        source_url: &str,
        subdirectory: &str,
        base: &DirectoryHandle,
    ) -> Result<DownloadTarget, DownloadError> {
        let file_name = derive_file_name(source_url, self.filename_policy())?;
        self.download_named(source_url, &file_name, subdirectory, base)
            .await
    }

    /// How file names are derived from URLs for this downloader.
    fn filename_policy(&self) -> FilenamePolicy {
        FilenamePolicy::default()
    }
}
