//! Constants for the download module.

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large files).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Extension appended to a file while its bytes are still arriving.
pub const PARTIAL_EXTENSION: &str = "part";

/// Upper bound for in-run duplicate name suffixes before giving up.
pub const MAX_NAME_SUFFIX: usize = 1000;
