//! Error types for page retrieval.

use thiserror::Error;

/// Errors that can occur while fetching the plan page.
///
/// Every variant is terminal for an orchestrator run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured page URL does not parse.
    #[error("invalid page URL: {url}")]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
    },

    /// Transport failure (DNS, connection refused, TLS, reset).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The page URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The page URL.
        url: String,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The page URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be read or decoded as text.
    #[error("could not read page body from {url}: {source}")]
    Body {
        /// The page URL.
        url: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {source}")]
    Client {
        /// The reqwest builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Classifies a transport error into `Timeout` or `Network`.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a body decode error.
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_http_status_display() {
        let msg = FetchError::http_status("https://example.com/plan", 503).to_string();
        assert!(msg.contains("503"), "Expected status in: {msg}");
        assert!(msg.contains("https://example.com/plan"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_fetch_error_invalid_url_display() {
        let msg = FetchError::invalid_url("not a url").to_string();
        assert!(msg.contains("invalid page URL"), "got: {msg}");
        assert!(msg.contains("not a url"), "got: {msg}");
    }
}
