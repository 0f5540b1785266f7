//! Local download locations.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use url::Url;

use super::DownloadError;

/// A base directory that downloads are written under.
///
/// Usually the platform downloads folder; tests and `--output-dir` point it
/// somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    root: PathBuf,
}

impl DirectoryHandle {
    /// Wraps an existing or to-be-created directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The platform downloads directory, falling back to `~/Downloads`.
    ///
    /// Returns `None` when neither can be determined.
    #[must_use]
    pub fn platform_downloads() -> Option<Self> {
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .map(Self::new)
    }

    /// The wrapped base directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensures `root/subdirectory` exists and returns it.
    ///
    /// Creates missing intermediate directories. A directory created
    /// concurrently by another download is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] if the directory cannot be created.
    pub async fn ensure_subdirectory(&self, subdirectory: &str) -> Result<PathBuf, DownloadError> {
        let dir = self.root.join(subdirectory);
        match tokio::fs::create_dir_all(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => {
                debug!(dir = %dir.display(), "subdirectory created concurrently");
            }
            Err(e) => return Err(DownloadError::io(dir, e)),
        }
        Ok(dir)
    }
}

/// Where a successfully downloaded document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadTarget {
    /// Subdirectory under the base directory.
    pub subdirectory_name: String,
    /// File name derived from the source URL; never empty.
    pub file_name: String,
    /// Full local path.
    pub path: PathBuf,
}

impl DownloadTarget {
    /// A `file://` URL for opening the document, if the path is absolute.
    #[must_use]
    pub fn open_url(&self) -> Option<Url> {
        Url::from_file_path(&self.path).ok()
    }
}
