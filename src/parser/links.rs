//! Anchor extraction with substring/suffix filtering.

use scraper::Html;
use tracing::{debug, trace};
use url::Url;

use super::{ParseError, compile_selector};

/// How many matching links a filter yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Only the first matching anchor in document order.
    FirstMatch,
    /// Every matching anchor in document order.
    #[default]
    AllMatching,
}

impl FilterMode {
    /// Returns the stable label used in config files and CLI flags.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstMatch => "first-match",
            Self::AllMatching => "all-matching",
        }
    }

    /// Parses a config/CLI label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "first-match" => Some(Self::FirstMatch),
            "all-matching" => Some(Self::AllMatching),
            _ => None,
        }
    }
}

/// Selects which anchors count as documents.
///
/// Both tests run against the resolved absolute URL and are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFilter {
    pub mode: FilterMode,
    /// Substring the URL must contain, if any.
    pub must_contain: Option<String>,
    /// Exact suffix the URL must end with.
    pub must_end_with: String,
}

impl Default for LinkFilter {
    /// All anchors containing `plan` and ending in `.pdf`.
    fn default() -> Self {
        Self {
            mode: FilterMode::AllMatching,
            must_contain: Some("plan".to_string()),
            must_end_with: ".pdf".to_string(),
        }
    }
}

impl LinkFilter {
    /// The first anchor ending in `.pdf`, regardless of its name.
    #[must_use]
    pub fn first_pdf() -> Self {
        Self {
            mode: FilterMode::FirstMatch,
            must_contain: None,
            must_end_with: ".pdf".to_string(),
        }
    }

    /// Returns true if the absolute URL passes both tests.
    #[must_use]
    pub fn matches(&self, absolute_url: &str) -> bool {
        let contains = self
            .must_contain
            .as_deref()
            .is_none_or(|needle| absolute_url.contains(needle));
        contains && absolute_url.ends_with(&self.must_end_with)
    }
}

/// One discovered candidate download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    pub absolute_url: Url,
}

/// Extracts anchors matching `filter`, resolved against `base`.
///
/// A `<base href>` element in the document overrides `base` for resolution.
/// Matches are returned in document order with duplicates preserved; hrefs
/// that cannot be resolved are skipped.
///
/// # Errors
///
/// Returns [`ParseError`] only if a selector fails to compile.
pub fn extract_links(
    html: &str,
    base: &Url,
    filter: &LinkFilter,
) -> Result<Vec<LinkMatch>, ParseError> {
    let document = Html::parse_document(html);
    let anchor_selector = compile_selector("a[href]")?;
    let base = document_base(&document, base)?;

    let mut matches = Vec::new();
    for anchor in document.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        let absolute_url = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "skipping unresolvable href");
                continue;
            }
        };

        if !filter.matches(absolute_url.as_str()) {
            trace!(url = %absolute_url, "anchor does not match filter");
            continue;
        }

        matches.push(LinkMatch { absolute_url });
        if filter.mode == FilterMode::FirstMatch {
            break;
        }
    }

    debug!(
        count = matches.len(),
        mode = filter.mode.as_str(),
        "extracted matching links"
    );
    Ok(matches)
}

/// Resolves the effective base URL, honoring the first `<base href>`.
fn document_base(document: &Html, fallback: &Url) -> Result<Url, ParseError> {
    let selector = compile_selector("base[href]")?;
    let declared = document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| fallback.join(href.trim()).ok());
    Ok(declared.unwrap_or_else(|| fallback.clone()))
}
