//! Page metadata extraction.
//!
//! Each indexed page contributes two values to its link entry:
//!
//! - **Name**: the text of the `<title>` element, trimmed. Pages without a
//!   title (or with a blank one) fall back to their file name, e.g.
//!   `demo.html`.
//! - **Description**: the `content` attribute of the first
//!   `<meta name="description">`. Missing → empty string, never absent.
//!
//! Markup is parsed with `scraper` (html5ever), which recovers from the
//! unclosed tags and stray fragments hand-written pages tend to have.
//! Malformed markup therefore never produces an error, only defaults.
//! Pages are read, never written.

use scraper::{Html, Selector};
use std::io;
use std::path::Path;
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("static selector")
});

/// Metadata pulled from a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub name: String,
    pub description: String,
}

/// Read and parse the page at `path`.
///
/// Returns `Ok(None)` if the page does not exist. Invalid UTF-8 is decoded
/// lossily; other read errors are returned.
pub fn extract_page_meta(path: &Path) -> io::Result<Option<PageMeta>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let html = String::from_utf8_lossy(&bytes);
    let fallback = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(parse_page_meta(&html, &fallback)))
}

/// Extract metadata from markup, using `fallback_name` when there is no title.
pub fn parse_page_meta(html: &str, fallback_name: &str) -> PageMeta {
    let doc = Html::parse_document(html);

    let name = doc
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    let description = doc
        .select(&DESCRIPTION)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    PageMeta { name, description }
}
