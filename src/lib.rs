//! Substitution Plan Fetcher Core Library
//!
//! This library fetches the school's substitution-plan page, locates the PDF
//! schedules linked from it, downloads them into a named subdirectory of the
//! downloads folder and reports every finished file.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`page`] - HTML retrieval for the configured page
//! - [`parser`] - Link and table extraction from fetched HTML
//! - [`download`] - Streaming file downloads with retry classification
//! - [`notify`] - Completion notifications with an "open file" link
//! - [`orchestrator`] - The fetch → extract → download → report pipeline
//! - [`config`] - Pipeline defaults and policies

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub(crate) mod http;
pub mod notify;
pub mod orchestrator;
pub mod page;
pub mod parser;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use config::{
    DEFAULT_SOURCE_URL, DEFAULT_SUBDIRECTORY, ExistingFilePolicy, FilenamePolicy, HttpTimeouts,
    PipelineConfig,
};
pub use download::{
    DEFAULT_MAX_RETRIES, DirectoryHandle, DownloadError, DownloadTarget, FailureType,
    FileDownloader, HttpClient, RetryDecision, RetryPolicy, classify_error, derive_file_name,
};
pub use notify::{ChannelNotifier, LogNotifier, Notification, NotificationError, NotificationPublisher};
pub use orchestrator::{
    DownloadOrchestrator, DownloadResult, NoopListener, OrchestratorError, RunOutcome, RunReport,
    StatusListener, StatusUpdate,
};
pub use page::{FetchError, HttpPageFetcher, PageFetcher, RemoteDocument};
pub use parser::{
    FilterMode, LinkFilter, LinkMatch, ParseError, TABLE_FETCH_FAILED, TABLE_NOT_FOUND,
    extract_first_table, extract_links,
};
