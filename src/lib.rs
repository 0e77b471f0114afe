//! # menugen
//!
//! Generates index pages for a directory of hand-written HTML pages. Each
//! page's `<title>` and `<meta name="description">` become a link in a
//! small JavaScript link list, which a generated `index.html` loads and
//! renders into a `<ul>`.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      pages/    →  Manifest        (filesystem → classified entries)
//! 2. Generate  Manifest  →  index.html, menu.js, pages/@x/{index.html,sub-menu.js}
//! ```
//!
//! The scan stage only reads. The generate stage first builds the complete
//! artifact set as plain data ([`generate::plan`]) and only then writes it
//! ([`generate::write_artifacts`]), so everything except the final write is
//! testable without touching an output tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the content root, classifies entries, sub-indexes collections |
//! | [`metadata`] | Title and description extraction from page markup |
//! | [`generate`] | Stage 2: renders index pages and link-list scripts, writes them |
//! | [`readme`] | Optional README menu insertion between markers |
//! | [`config`] | `menugen.toml` loading, validation, merging onto stock defaults |
//! | [`types`] | Link entries and the tagged root/collection index model |
//! | [`naming`] | Filename classification: pages, collections, hidden entries |
//! | [`output`] | CLI output formatting for both stages |
//!
//! # Content Conventions
//!
//! - Pages directly in the content root are listed in the root index.
//! - A directory whose name starts with `@` is a **collection**: it gets its
//!   own `index.html` + `sub-menu.js` listing the pages inside it, and
//!   appears in the root index as one link.
//! - Any other directory appears in the root index only if it has an
//!   `index.html`, represented by that page's title and description.
//! - A missing content root is a no-op, not an error.

pub mod config;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod readme;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
