//! Retrieval of the substitution-plan page.
//!
//! [`PageFetcher`] is the seam the orchestrator fetches through;
//! [`HttpPageFetcher`] is the reqwest-backed implementation.
//!
//! # Example
//!
//! ```no_run
//! use vplan_core::page::{HttpPageFetcher, PageFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpPageFetcher::new()?;
//! let document = fetcher.fetch("https://example.com/vertretungsplan").await?;
//! println!("{} bytes of HTML from {}", document.html.len(), document.url);
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::FetchError;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::HttpTimeouts;
use crate::http::build_client;

/// A fetched HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    /// Final URL after redirects; the base for resolving relative links.
    pub url: Url,
    /// Decoded response body.
    pub html: String,
}

/// Retrieves raw HTML for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` with a single GET; no retries.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any transport, status or decode failure.
    async fn fetch(&self, url: &str) -> Result<RemoteDocument, FetchError>;
}

/// Reqwest-backed [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeouts(HttpTimeouts::default())
    }

    /// Creates a fetcher with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn with_timeouts(timeouts: HttpTimeouts) -> Result<Self, FetchError> {
        let client = build_client(timeouts).map_err(|source| FetchError::Client { source })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<RemoteDocument, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        debug!("requesting page");
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| FetchError::body(url, e))?;

        info!(final_url = %final_url, bytes = html.len(), "page fetched");
        Ok(RemoteDocument {
            url: final_url,
            html,
        })
    }
}
