//! File name derivation, sanitization and in-run collision handling.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::DownloadError;
use super::constants::{MAX_NAME_SUFFIX, PARTIAL_EXTENSION};
use crate::config::FilenamePolicy;

/// Derives the local file name from a source URL.
///
/// The name is the text after the last `/`. The `#fragment` is always
/// dropped; the `?query` is dropped under [`FilenamePolicy::StripQuery`] and
/// kept (sanitized) under [`FilenamePolicy::Verbatim`].
///
/// # Errors
///
/// Returns [`DownloadError::InvalidUrl`] if the URL ends in `/`.
///
/// # Example
///
/// ```
/// use vplan_core::{FilenamePolicy, derive_file_name};
///
/// let name = derive_file_name("https://example.com/files/plan_2024.pdf?v=2", FilenamePolicy::StripQuery).unwrap();
/// assert_eq!(name, "plan_2024.pdf");
/// ```
pub fn derive_file_name(url: &str, policy: FilenamePolicy) -> Result<String, DownloadError> {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let trimmed = match policy {
        FilenamePolicy::StripQuery => without_fragment
            .split_once('?')
            .map_or(without_fragment, |(head, _)| head),
        FilenamePolicy::Verbatim => without_fragment,
    };

    let last_segment = trimmed
        .rsplit_once('/')
        .map_or(trimmed, |(_, tail)| tail);
    if last_segment.is_empty() {
        return Err(DownloadError::no_file_name(url));
    }

    let name = sanitize_filename(last_segment);
    debug!(url, name = %name, ?policy, "derived file name");
    Ok(name)
}

/// Sanitizes a file name for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems
/// (`/ \ : * ? " < > |` and control characters) with `_`, and rewrites
/// dot-only names so the result never escapes its directory.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized.replace('.', "_")
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Path of the in-progress file for `final_path` (`plan.pdf` → `plan.pdf.part`).
pub(crate) fn partial_path(final_path: &Path) -> PathBuf {
    let mut name = final_path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".");
    name.push(PARTIAL_EXTENSION);
    final_path.with_file_name(name)
}

/// Hands out distinct file names within one run.
///
/// The first claim of a name gets it unchanged; later claims of the same name
/// get `stem_2.ext`, `stem_3.ext`, … in claim order, so two links that derive
/// the same name never write to the same file.
#[derive(Debug, Default)]
pub struct NameAllocator {
    claimed: HashSet<String>,
}

impl NameAllocator {
    /// Creates an allocator with no names claimed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name`, or the first free suffixed variant of it.
    pub fn claim(&mut self, name: &str) -> String {
        if self.claimed.insert(name.to_string()) {
            return name.to_string();
        }

        let (stem, ext) = split_extension(name);
        for index in 2..MAX_NAME_SUFFIX {
            let candidate = format!("{stem}_{index}{ext}");
            if self.claimed.insert(candidate.clone()) {
                debug!(original = name, assigned = %candidate, "suffixed duplicate file name");
                return candidate;
            }
        }

        // Unreachable in practice: a page with a thousand identical links.
        let candidate = format!("{stem}_{}{ext}", self.claimed.len() + 1);
        self.claimed.insert(candidate.clone());
        candidate
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    }
}
