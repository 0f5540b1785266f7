//! Completion notifications for downloaded documents.
//!
//! The orchestrator publishes one [`Notification`] per successful download.
//! Publishing is best effort: the caller logs a [`NotificationError`] and
//! carries on.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::info;
use url::Url;

use crate::download::DownloadTarget;

/// Title shown for every completed download.
pub const NOTIFICATION_TITLE: &str = "PDF Downloaded";

/// A user-facing "file is ready" message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    /// The downloaded file name.
    pub body: String,
    /// `file://` URL that opens the document, when the path is absolute.
    pub open_url: Option<Url>,
    pub path: PathBuf,
}

impl Notification {
    /// Builds the notification announcing `target`.
    #[must_use]
    pub fn for_target(target: &DownloadTarget) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body: target.file_name.clone(),
            open_url: target.open_url(),
            path: target.path.clone(),
        }
    }
}

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The receiving side of the notification channel has gone away.
    #[error("notification receiver closed")]
    Closed,

    /// The notification channel is at capacity; the notification was dropped.
    #[error("notification channel full, dropped notification for {file}")]
    Full { file: String },
}

/// Announces finished downloads to the user.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publishes a notification for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] when the notification cannot be delivered.
    async fn publish(&self, target: &DownloadTarget) -> Result<(), NotificationError>;
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotificationPublisher for LogNotifier {
    async fn publish(&self, target: &DownloadTarget) -> Result<(), NotificationError> {
        let notification = Notification::for_target(target);
        info!(
            title = %notification.title,
            file = %notification.body,
            open_url = notification.open_url.as_ref().map(Url::as_str),
            "notification"
        );
        Ok(())
    }
}

/// Forwards notifications over an mpsc channel to an embedding front end.
///
/// Publishing never waits for the receiver. When the channel is full the
/// notification is dropped and [`NotificationError::Full`] is returned.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiver that drains it.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationPublisher for ChannelNotifier {
    async fn publish(&self, target: &DownloadTarget) -> Result<(), NotificationError> {
        match self.sender.try_send(Notification::for_target(target)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(dropped)) => {
                Err(NotificationError::Full { file: dropped.body })
            }
            Err(TrySendError::Closed(_)) => Err(NotificationError::Closed),
        }
    }
}
