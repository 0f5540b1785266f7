//! First-table extraction for inline display of the plan.

use scraper::Html;
use tracing::debug;

use super::{ParseError, compile_selector};

/// Returned by [`extract_first_table`] when the page has no `<table>`.
pub const TABLE_NOT_FOUND: &str = "Table not found";

/// Shown in place of the table when the page itself could not be fetched.
pub const TABLE_FETCH_FAILED: &str = "Error fetching table data";

/// Returns the outer HTML of the first `<table>` in document order.
///
/// When the document contains no table the [`TABLE_NOT_FOUND`] sentinel is
/// returned instead; callers render it as-is.
///
/// # Errors
///
/// Returns [`ParseError`] only if the table selector fails to compile.
pub fn extract_first_table(html: &str) -> Result<String, ParseError> {
    let document = Html::parse_document(html);
    let selector = compile_selector("table")?;

    let table = document
        .select(&selector)
        .next()
        .map_or_else(|| TABLE_NOT_FOUND.to_string(), |element| element.html());

    debug!(found = table != TABLE_NOT_FOUND, "extracted first table");
    Ok(table)
}
