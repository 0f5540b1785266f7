//! HTML extraction for the substitution-plan page.
//!
//! - [`extract_links`] selects anchors whose resolved URL passes a
//!   [`LinkFilter`], in document order.
//! - [`extract_first_table`] returns the markup of the first `<table>`.
//!
//! # Example
//!
//! ```
//! use url::Url;
//! use vplan_core::parser::{LinkFilter, extract_links};
//!
//! let base = Url::parse("https://example.com/plan").unwrap();
//! let html = r#"<a href="/files/planA.pdf">A</a><a href="/files/other.pdf">B</a>"#;
//! let links = extract_links(html, &base, &LinkFilter::default()).unwrap();
//! assert_eq!(links.len(), 1);
//! assert_eq!(links[0].absolute_url.as_str(), "https://example.com/files/planA.pdf");
//! ```

mod error;
mod links;
mod table;

pub use error::ParseError;
pub use links::{FilterMode, LinkFilter, LinkMatch, extract_links};
pub use table::{TABLE_FETCH_FAILED, TABLE_NOT_FOUND, extract_first_table};

use scraper::Selector;

/// Compiles a static selector, mapping failures to [`ParseError`].
fn compile_selector(source: &str) -> Result<Selector, ParseError> {
    Selector::parse(source).map_err(|e| ParseError::selector(source, e))
}
