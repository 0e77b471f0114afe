//! Centralized filename classification for the content tree.
//!
//! Every decision the scanner makes from a name alone lives here:
//!
//! - `demo.html` → a page (extension match is case-insensitive)
//! - `@docs/` → a collection (name starts with the collection marker)
//! - `blog/` → a plain subdirectory, listed only through its entry page
//! - `.git/`, `.draft.html` → hidden, ignored entirely

use std::path::Path;

/// What a directory name means to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    Collection,
    Plain,
}

/// Classify a directory by name.
pub fn classify_dir(name: &str, marker: &str) -> DirKind {
    if !marker.is_empty() && name.starts_with(marker) {
        DirKind::Collection
    } else {
        DirKind::Plain
    }
}

/// Whether a name should be skipped by the scanner.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Whether `path` has the page extension, ignoring case.
///
/// Only the extension is checked; callers decide whether the path is a file.
pub fn has_page_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Join path segments into a forward-slash link, whatever the host separator.
pub fn link_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(|s| s.trim_matches(|c| c == '/' || c == '\\'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
