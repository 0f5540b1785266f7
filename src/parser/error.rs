//! Error types for HTML extraction.

use thiserror::Error;

/// Errors that can occur while extracting data from HTML.
///
/// The HTML parser itself never fails: malformed markup is repaired the way
/// browsers repair it. Only selector compilation can go wrong.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// A CSS selector failed to compile.
    #[error("invalid selector '{selector}': {reason}")]
    Selector {
        /// The selector source text.
        selector: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl ParseError {
    /// Creates a selector compilation error.
    #[must_use]
    pub fn selector(selector: &str, reason: impl ToString) -> Self {
        Self::Selector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}
