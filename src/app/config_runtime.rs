//! Merges CLI flags over file config over library defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use vplan_core::{
    DirectoryHandle, ExistingFilePolicy, FilenamePolicy, FilterMode, HttpTimeouts, PipelineConfig,
    RetryPolicy,
};

use crate::app_config::FileConfig;
use crate::cli::Args;

/// Everything the runtime needs after merging.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub(crate) pipeline: PipelineConfig,
    /// Base directory; the subdirectory is created beneath it.
    pub(crate) base_dir: PathBuf,
}

/// Applies `args` over `file` over [`PipelineConfig::default`].
///
/// `platform_downloads` supplies the base directory when neither the CLI nor
/// the file names one.
pub(crate) fn resolve_config(
    args: &Args,
    file: &FileConfig,
    platform_downloads: impl FnOnce() -> Option<DirectoryHandle>,
) -> Result<ResolvedConfig> {
    let mut pipeline = PipelineConfig::default();

    if let Some(url) = args.url.clone().or_else(|| file.source_url.clone()) {
        pipeline.source_url = url;
    }
    if let Some(subdirectory) = args.subdirectory.clone().or_else(|| file.subdirectory.clone()) {
        if subdirectory.is_empty() || subdirectory.contains(['/', '\\']) {
            bail!("Invalid subdirectory '{subdirectory}': expected a single directory name");
        }
        pipeline.subdirectory = subdirectory;
    }

    if let Some(mode) = args.mode.map(FilterMode::from).or(file.mode) {
        pipeline.link_filter.mode = mode;
    }
    if args.no_contains {
        pipeline.link_filter.must_contain = None;
    } else if let Some(needle) = args.contains.clone().or_else(|| file.must_contain.clone()) {
        pipeline.link_filter.must_contain = (!needle.is_empty()).then_some(needle);
    }
    if let Some(suffix) = args.suffix.clone().or_else(|| file.must_end_with.clone()) {
        pipeline.link_filter.must_end_with = suffix;
    }

    if let Some(concurrency) = args.concurrency.or(file.concurrency) {
        pipeline.concurrency = usize::from(concurrency);
    }
    if let Some(max_retries) = args.max_retries.or(file.max_retries) {
        pipeline.retry_policy = RetryPolicy::with_max_attempts(u32::from(max_retries));
    }

    if args.skip_existing || file.skip_existing == Some(true) {
        pipeline.existing_files = ExistingFilePolicy::Skip;
    }
    if args.keep_query || file.keep_query_in_filename == Some(true) {
        pipeline.filenames = FilenamePolicy::Verbatim;
    }
    pipeline.extract_table = args.table || file.extract_table == Some(true);

    let defaults = HttpTimeouts::default();
    pipeline.timeouts = HttpTimeouts {
        connect: file
            .connect_timeout_secs
            .map_or(defaults.connect, Duration::from_secs),
        read: file
            .read_timeout_secs
            .map_or(defaults.read, Duration::from_secs),
    };

    let base_dir = match args.output_dir.clone().or_else(|| file.output_dir.clone()) {
        Some(dir) => dir,
        None => match platform_downloads() {
            Some(handle) => handle.root().to_path_buf(),
            None => bail!("Could not determine the downloads directory; pass --output-dir"),
        },
    };

    Ok(ResolvedConfig { pipeline, base_dir })
}
