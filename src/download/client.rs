//! HTTP client wrapper for downloading files.
//!
//! This module provides the `HttpClient` struct which streams a remote
//! document into `<base>/<subdirectory>/<file_name>` without buffering the
//! payload in memory.

use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::error::DownloadError;
use super::filename::partial_path;
use super::target::{DirectoryHandle, DownloadTarget};
use super::FileDownloader;
use crate::config::{ExistingFilePolicy, FilenamePolicy, HttpTimeouts};
use crate::http::build_client;

/// HTTP client for downloading files with streaming support.
///
/// Created once per run and reused for every document, taking advantage of
/// connection pooling.
///
/// # Partial files
///
/// Bytes are written to `<file_name>.part` and renamed into place only after
/// the body has been fully received and flushed. A failed attempt removes
/// its `.part` file and never touches an existing complete file.
///
/// # Example
///
/// ```no_run
/// use vplan_core::download::{DirectoryHandle, FileDownloader, HttpClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let base = DirectoryHandle::new("./downloads");
/// let target = client
///     .download("https://example.com/files/plan.pdf", "SiemensGymPDFs", &base)
///     .await?;
/// println!("Downloaded to: {}", target.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    existing_files: ExistingFilePolicy,
    filenames: FilenamePolicy,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts and policies.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large files)
    /// - Existing files: overwritten
    /// - Query strings: stripped from file names
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the reqwest client cannot be built.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeouts(HttpTimeouts::default())
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the reqwest client cannot be built.
    pub fn with_timeouts(timeouts: HttpTimeouts) -> Result<Self, DownloadError> {
        let client = build_client(timeouts).map_err(|source| DownloadError::Client { source })?;
        Ok(Self {
            client,
            existing_files: ExistingFilePolicy::default(),
            filenames: FilenamePolicy::default(),
        })
    }

    /// Sets what happens when the target file already exists.
    #[must_use]
    pub fn with_existing_file_policy(mut self, policy: ExistingFilePolicy) -> Self {
        self.existing_files = policy;
        self
    }

    /// Sets how file names are derived from URLs.
    #[must_use]
    pub fn with_filename_policy(mut self, policy: FilenamePolicy) -> Self {
        self.filenames = policy;
        self
    }

    async fn send_request(&self, url: Url) -> Result<reqwest::Response, DownloadError> {
        let url_text = url.to_string();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url_text.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url_text, status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl FileDownloader for HttpClient {
    #[instrument(skip(self, base), fields(url = %source_url, file = %file_name))]
    async fn download_named(
        &self,
        source_url: &str,
        file_name: &str,
        subdirectory: &str,
        base: &DirectoryHandle,
    ) -> Result<DownloadTarget, DownloadError> {
        debug!("starting download");

        let parsed_url =
            Url::parse(source_url).map_err(|_| DownloadError::malformed_url(source_url))?;
        if file_name.is_empty() {
            return Err(DownloadError::no_file_name(source_url));
        }

        let dir = base.ensure_subdirectory(subdirectory).await?;
        let target = DownloadTarget {
            subdirectory_name: subdirectory.to_string(),
            file_name: file_name.to_string(),
            path: dir.join(file_name),
        };

        if self.existing_files == ExistingFilePolicy::Skip
            && tokio::fs::metadata(&target.path)
                .await
                .is_ok_and(|meta| meta.is_file())
        {
            info!(path = %target.path.display(), "file already present, skipping download");
            return Ok(target);
        }

        let response = self.send_request(parsed_url).await?;

        let part_path = partial_path(&target.path);
        let mut file = File::create(&part_path)
            .await
            .map_err(|e| DownloadError::io(part_path.clone(), e))?;

        let stream_result = stream_to_file(&mut file, response, source_url, &part_path).await;
        drop(file);

        let bytes_written = match stream_result {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %part_path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&part_path).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&part_path, &target.path).await {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(DownloadError::io(target.path.clone(), e));
        }

        info!(
            path = %target.path.display(),
            bytes = bytes_written,
            "download complete"
        );
        Ok(target)
    }

    fn filename_policy(&self) -> FilenamePolicy {
        self.filenames
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
