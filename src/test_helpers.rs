//! Shared test utilities for the menugen test suite.
//!
//! Provides fixture setup, page builders, lookup helpers that panic with a
//! clear message on miss, and a decoder for generated link-list scripts.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path(), &MenuConfig::default()).unwrap().unwrap();
//!
//! let docs = find_collection(&manifest, "@docs");
//! assert_eq!(link_names(&docs.entries), vec!["FAQ", "Guide"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{CollectionIndex, LinkEntry};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a minimal page at `site/rel`, creating parent directories.
pub fn write_page(site: &Path, rel: &str, title: Option<&str>, description: Option<&str>) {
    let path = site.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut head = String::new();
    if let Some(title) = title {
        head.push_str(&format!("<title>{title}</title>"));
    }
    if let Some(desc) = description {
        head.push_str(&format!(r#"<meta name="description" content="{desc}">"#));
    }
    let html = format!("<!DOCTYPE html><html><head>{head}</head><body></body></html>");
    std::fs::write(path, html).unwrap();
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a collection by directory name. Panics if not found.
pub fn find_collection<'a>(manifest: &'a Manifest, dir_name: &str) -> &'a CollectionIndex {
    manifest
        .root
        .collections()
        .find(|c| c.dir_name == dir_name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = manifest
                .root
                .collections()
                .map(|c| c.dir_name.as_str())
                .collect();
            panic!("collection '{dir_name}' not found. Available: {names:?}")
        })
}

/// Find a link by display name. Panics if not found.
pub fn find_link<'a>(links: &'a [LinkEntry], name: &str) -> &'a LinkEntry {
    links.iter().find(|l| l.name == name).unwrap_or_else(|| {
        let names = link_names(links);
        panic!("link '{name}' not found. Available: {names:?}")
    })
}

/// All link names in list order.
pub fn link_names(links: &[LinkEntry]) -> Vec<&str> {
    links.iter().map(|l| l.name.as_str()).collect()
}

// =========================================================================
// Generated script decoding
// =========================================================================

/// Decode the link array embedded in a generated link-list script.
///
/// Panics if the script has no `const LINKS = [...];` declaration.
pub fn script_links(script: &str) -> Vec<LinkEntry> {
    let start = script
        .find("const LINKS = ")
        .unwrap_or_else(|| panic!("no LINKS declaration in script:\n{script}"))
        + "const LINKS = ".len();
    let end = start
        + script[start..]
            .find("];")
            .unwrap_or_else(|| panic!("unterminated LINKS array in script:\n{script}"))
        + 1;
    serde_json::from_str(&script[start..end]).unwrap()
}
