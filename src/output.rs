//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Every entity (page, collection, directory, generated index) leads with its
//! positional index and display name. File paths follow as indented
//! `Source:` context lines, so the output reads as a content inventory while
//! still pointing back at specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//!     001 Demo
//!         Source: pages/demo.html
//!         Description: A small demo page
//!
//! Collections
//!     001 Sub-index: @docs (2 pages)
//!         Source: pages/@docs/
//!         001 FAQ
//!             Source: faq.html
//!
//! Directories
//!     001 Blog
//!         Source: pages/blog/index.html
//! ```
//!
//! ## Generate
//!
//! ```text
//! Index → index.html (3 links)
//!     Script: menu.js
//! Sub-index: @docs → pages/@docs/index.html (2 links)
//!     Script: pages/@docs/sub-menu.js
//!
//! Generated 2 index pages, 5 links
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::generate::{ArtifactKind, Plan, ReadmeStatus};
use crate::scan::Manifest;
use crate::types::{CollectionIndex, Entry, LinkEntry};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `2 pages`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Format an entity header: positional index + name, with optional page count.
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({})", format_index(index), name, plural(n, "page")),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Header line plus `Source:` and optional `Description:` context lines.
fn link_lines(depth: usize, index: usize, link: &LinkEntry) -> Vec<String> {
    let base = indent(depth);
    let mut lines = vec![
        format!("{}{}", base, entity_header(index, &link.name, None)),
        format!("{}    Source: {}", base, link.link),
    ];
    let desc = truncate_desc(link.desc.trim(), 60);
    if !desc.is_empty() {
        lines.push(format!("{}    Description: {}", base, desc));
    }
    lines
}

fn collection_lines(index: usize, collection: &CollectionIndex, source: &str) -> Vec<String> {
    let mut lines = vec![
        format!(
            "    {}",
            entity_header(index, &collection.title, Some(collection.entries.len()))
        ),
        format!("        Source: {}", source),
    ];
    for (i, entry) in collection.entries.iter().enumerate() {
        lines.extend(link_lines(2, i + 1, entry));
    }
    lines
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered content structure.
///
/// Entries are grouped by kind; sections with no entries are omitted.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let root_links = manifest.root.links();
    let mut pages = Vec::new();
    let mut collections = Vec::new();
    let mut dirs = Vec::new();

    for (entry, link) in manifest.root.entries.iter().zip(&root_links) {
        match entry {
            Entry::Page(page) => pages.push(page),
            Entry::Collection(collection) => collections.push((collection, &link.link)),
            Entry::Subdir(dir) => dirs.push(dir),
        }
    }

    let mut lines = Vec::new();
    let mut section = |title: &str, body: Vec<String>| {
        if body.is_empty() {
            return;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(title.to_string());
        lines.extend(body);
    };

    section(
        "Pages",
        pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| link_lines(1, i + 1, p))
            .collect(),
    );
    section(
        "Collections",
        collections
            .iter()
            .enumerate()
            .flat_map(|(i, (c, source))| collection_lines(i + 1, c, source))
            .collect(),
    );
    section(
        "Directories",
        dirs.iter()
            .enumerate()
            .flat_map(|(i, d)| link_lines(1, i + 1, d))
            .collect(),
    );

    if lines.is_empty() {
        lines.push("No pages found".to_string());
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

/// Message for a site without a content root.
pub fn format_missing_content_root(content_dir: &Path) -> String {
    format!(
        "[Warn] Content root {} does not exist, nothing to do",
        content_dir.display()
    )
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output listing every written artifact.
pub fn format_generate_output(plan: &Plan) -> Vec<String> {
    let mut lines = Vec::new();
    let mut index_pages = 0;
    let mut total_links = 0;

    for artifact in &plan.artifacts {
        match artifact.kind {
            ArtifactKind::IndexPage => {
                index_pages += 1;
                total_links += artifact.link_count;
                lines.push(format!(
                    "{} \u{2192} {} ({})",
                    artifact.title,
                    artifact.rel_path,
                    plural(artifact.link_count, "link")
                ));
            }
            ArtifactKind::LinkScript => {
                lines.push(format!("    Script: {}", artifact.rel_path));
            }
            // Reported from the README status below
            ArtifactKind::Readme => {}
        }
    }

    if let Some(status) = &plan.readme {
        lines.push(match status {
            ReadmeStatus::Updated(path) => format!("README \u{2192} {}", path),
            ReadmeStatus::MissingFile(path) => {
                format!("README {} not found, skipped", path)
            }
            ReadmeStatus::MissingMarkers(path) => {
                format!("README {} has no menu markers, skipped", path)
            }
        });
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(index_pages, "index page"),
        plural(total_links, "link")
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(plan: &Plan) {
    for line in format_generate_output(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
