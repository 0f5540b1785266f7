//! Integration tests for the parser module.
//!
//! These tests run the link and table extractors against realistic
//! substitution-plan pages.

use url::Url;
use vplan_core::parser::{
    FilterMode, LinkFilter, TABLE_NOT_FOUND, extract_first_table, extract_links,
};

fn base() -> Url {
    Url::parse("https://example.com/plan").expect("valid base url")
}

fn urls(html: &str, filter: &LinkFilter) -> Vec<String> {
    extract_links(html, &base(), filter)
        .expect("extraction should not fail")
        .into_iter()
        .map(|link| link.absolute_url.to_string())
        .collect()
}

/// Only the link containing "plan" survives the default filter.
#[test]
fn test_extract_plan_link_end_to_end() {
    let html = r#"
<html><body>
  <a href="/files/planA.pdf">Plan A</a>
  <a href="/files/other.pdf">Other</a>
</body></html>"#;

    assert_eq!(
        urls(html, &LinkFilter::default()),
        vec!["https://example.com/files/planA.pdf"]
    );
}

/// A page shaped like the school site: navigation, news, and one
/// download box per weekday.
#[test]
fn test_extract_school_page_in_document_order() {
    let html = r#"
<!DOCTYPE html>
<html lang="de">
<head><title>Vertretungsplan</title></head>
<body>
  <nav>
    <a href="/">Start</a>
    <a href="/termine">Termine</a>
    <a href="/downloads/schulordnung.pdf">Schulordnung</a>
  </nav>
  <main>
    <h1>Vertretungsplan</h1>
    <div class="download"><a href="/fileadmin/vplan/vertretungsplan_montag.pdf">Montag</a></div>
    <div class="download"><a href="/fileadmin/vplan/vertretungsplan_dienstag.pdf">Dienstag</a></div>
    <div class="download"><a href="https://cdn.example.org/vplan/plan_mittwoch.pdf?v=3">Mittwoch</a></div>
    <div class="download"><a href="/fileadmin/vplan/vertretungsplan_montag.pdf">Montag (nochmal)</a></div>
    <table class="vplan">
      <tr><th>Klasse</th><th>Stunde</th><th>Fach</th></tr>
      <tr><td>7a</td><td>3</td><td>Mathe</td></tr>
    </table>
  </main>
</body>
</html>"#;

    let found = urls(html, &LinkFilter::default());

    // The query-string link does not end with ".pdf"; the duplicate is kept.
    assert_eq!(
        found,
        vec![
            "https://example.com/fileadmin/vplan/vertretungsplan_montag.pdf",
            "https://example.com/fileadmin/vplan/vertretungsplan_dienstag.pdf",
            "https://example.com/fileadmin/vplan/vertretungsplan_montag.pdf",
        ]
    );

    let first_pdf = urls(html, &LinkFilter::first_pdf());
    assert_eq!(first_pdf, vec!["https://example.com/downloads/schulordnung.pdf"]);

    let table = extract_first_table(html).expect("table extraction should not fail");
    assert!(table.starts_with("<table class=\"vplan\">"));
    assert!(table.contains("<td>Mathe</td>"));
}

#[test]
fn test_extract_first_match_mode_with_custom_substring() {
    let html = r#"
<a href="/a/vertretung_1.pdf">1</a>
<a href="/b/vertretung_2.pdf">2</a>"#;
    let filter = LinkFilter {
        mode: FilterMode::FirstMatch,
        must_contain: Some("vertretung".to_string()),
        must_end_with: ".pdf".to_string(),
    };

    assert_eq!(
        urls(html, &filter),
        vec!["https://example.com/a/vertretung_1.pdf"]
    );
}

#[test]
fn test_extract_is_case_sensitive() {
    let html = r#"<a href="/files/PLAN.PDF">upper</a><a href="/files/plan.pdf">lower</a>"#;

    assert_eq!(
        urls(html, &LinkFilter::default()),
        vec!["https://example.com/files/plan.pdf"]
    );
}

#[test]
fn test_extract_nothing_from_page_without_anchors() {
    let html = "<html><body><p>Heute keine Vertretungen.</p></body></html>";

    assert!(urls(html, &LinkFilter::default()).is_empty());
    assert_eq!(
        extract_first_table(html).expect("table extraction should not fail"),
        TABLE_NOT_FOUND
    );
}
