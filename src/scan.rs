//! Content scanning.
//!
//! Stage 1 of the pipeline. Reads the content root one level deep, classifies
//! what it finds, extracts page metadata and produces a [`Manifest`] that the
//! generate stage renders. Nothing is written here.
//!
//! ## Directory Structure
//!
//! ```text
//! pages/                    # Content root
//! ├── demo.html             # Page → listed in the root index
//! ├── blog/                 # Plain directory with an entry page
//! │   ├── index.html        #   → listed once, via this page
//! │   └── 2024-recap.html   #   (not enumerated)
//! ├── drafts/               # Plain directory without an entry page
//! │   └── wip.html          #   → skipped entirely
//! └── @docs/                # Collection (marker prefix)
//!     ├── guide.html        #   → listed in @docs' own sub-index
//!     └── index.html        #   (generated sub-index, never self-listed)
//! ```
//!
//! ## Ordering
//!
//! Entries are sorted by file name so repeated runs produce identical output.
//! Top-level pages come first, then one entry per qualifying directory.
//!
//! ## Links
//!
//! Root links are relative to the site root (`pages/demo.html`). Links inside
//! a collection are relative to the collection directory (`guide.html`), since
//! they are displayed by the collection's own index page.
//!
//! ## Missing content root
//!
//! A site without a content root is not an error: [`scan`] returns `Ok(None)`
//! and the caller writes nothing.

use crate::config::MenuConfig;
use crate::metadata::{self, PageMeta};
use crate::naming::{self, DirKind};
use crate::types::{CollectionIndex, Entry, LinkEntry, RootIndex};
use std::path::Path;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Manifest output from the scan stage
#[derive(Debug, Clone)]
pub struct Manifest {
    pub root: RootIndex,
    pub config: MenuConfig,
}

/// Scan the content root under `site_root`.
///
/// Returns `Ok(None)` when the content root does not exist.
pub fn scan(site_root: &Path, config: &MenuConfig) -> Result<Option<Manifest>, ScanError> {
    let content_dir = site_root.join(&config.content_root);
    if !content_dir.is_dir() {
        return Ok(None);
    }

    let content_root = config.content_root_link();
    let entries = collect_entries(&content_dir)?;
    let (dirs, files): (Vec<DirEntry>, Vec<DirEntry>) =
        entries.into_iter().partition(|e| e.file_type().is_dir());

    let mut root_entries = Vec::new();

    for file in &files {
        let file_name = file.file_name().to_string_lossy();
        // When the content root is the site root, the root index lives among the pages.
        if content_root.is_empty() && file_name == config.entry_page {
            continue;
        }
        if !is_page(file, config) {
            continue;
        }
        if let Some(meta) = metadata::extract_page_meta(file.path())? {
            let link = naming::link_path([content_root.as_str(), &*file_name]);
            root_entries.push(Entry::Page(link_entry(meta, link)));
        }
    }

    for dir in &dirs {
        let dir_name = dir.file_name().to_string_lossy().into_owned();
        match naming::classify_dir(&dir_name, &config.collection_marker) {
            DirKind::Collection => {
                let collection = scan_collection(dir.path(), &dir_name, config)?;
                root_entries.push(Entry::Collection(collection));
            }
            DirKind::Plain => {
                let entry_page = dir.path().join(&config.entry_page);
                if let Some(meta) = metadata::extract_page_meta(&entry_page)? {
                    let link = naming::link_path([
                        content_root.as_str(),
                        dir_name.as_str(),
                        config.entry_page.as_str(),
                    ]);
                    root_entries.push(Entry::Subdir(link_entry(meta, link)));
                }
            }
        }
    }

    Ok(Some(Manifest {
        root: RootIndex {
            title: config.root.title.clone(),
            content_root,
            entries: root_entries,
        },
        config: config.clone(),
    }))
}

/// Build the sub-index for one collection directory.
///
/// Members are the pages directly inside `dir`, minus its own entry page.
/// Links are bare file names, relative to `dir`.
pub fn scan_collection(
    dir: &Path,
    dir_name: &str,
    config: &MenuConfig,
) -> Result<CollectionIndex, ScanError> {
    let mut entries = Vec::new();

    for file in collect_entries(dir)? {
        let file_name = file.file_name().to_string_lossy();
        if file_name == config.entry_page || !is_page(&file, config) {
            continue;
        }
        if let Some(meta) = metadata::extract_page_meta(file.path())? {
            entries.push(link_entry(meta, file_name.into_owned()));
        }
    }

    Ok(CollectionIndex {
        dir_name: dir_name.to_string(),
        title: format!("{}{}", config.collections.title_prefix, dir_name),
        description: format!("{}{}", config.collections.description_prefix, dir_name),
        entries,
    })
}

/// Immediate children of `dir`, sorted by name, hidden entries skipped.
///
/// Entries that vanish or whose symlink target is missing are dropped like
/// any other missing page.
fn collect_entries(dir: &Path) -> Result<Vec<DirEntry>, ScanError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) if is_not_found(&e) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    entries.retain(|e| !naming::is_hidden(&e.file_name().to_string_lossy()));
    Ok(entries)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error().is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

fn is_page(entry: &DirEntry, config: &MenuConfig) -> bool {
    entry.file_type().is_file() && naming::has_page_extension(entry.path(), &config.page_extension)
}

fn link_entry(meta: PageMeta, link: String) -> LinkEntry {
    LinkEntry {
        name: meta.name,
        link,
        desc: meta.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn scan_default(site: &Path) -> Manifest {
        scan(site, &MenuConfig::default())
            .unwrap()
            .expect("content root should exist")
    }

    #[test]
    fn missing_content_root_is_none() {
        let tmp = TempDir::new().unwrap();
        let result = scan(tmp.path(), &MenuConfig::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn content_root_that_is_a_file_is_none() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("pages"), "not a dir").unwrap();
        let result = scan(tmp.path(), &MenuConfig::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_content_root_has_no_entries() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("pages")).unwrap();
        let manifest = scan_default(tmp.path());
        assert!(manifest.root.entries.is_empty());
    }

    #[test]
    fn demo_page_and_docs_collection() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/demo.html", Some("Demo"), None);
        write_page(tmp.path(), "pages/@docs/guide.html", Some("Guide"), None);

        let manifest = scan_default(tmp.path());

        assert_eq!(
            manifest.root.links(),
            vec![
                LinkEntry::new("Demo", "pages/demo.html", ""),
                LinkEntry::new(
                    "Sub-index: @docs",
                    "pages/@docs/",
                    "Contains all pages under @docs"
                ),
            ]
        );
        let docs = find_collection(&manifest, "@docs");
        assert_eq!(docs.entries, vec![LinkEntry::new("Guide", "guide.html", "")]);
    }

    #[test]
    fn fixture_root_entries_in_order() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        assert_eq!(
            link_names(&manifest.root.links()),
            vec![
                "about.html",
                "Demo",
                "Sub-index: @docs",
                "Sub-index: @empty",
                "Blog",
            ]
        );
    }

    #[test]
    fn fixture_entry_kinds() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let kinds: Vec<&str> = manifest
            .root
            .entries
            .iter()
            .map(|e| match e {
                Entry::Page(_) => "page",
                Entry::Collection(_) => "collection",
                Entry::Subdir(_) => "subdir",
            })
            .collect();
        assert_eq!(kinds, vec!["page", "page", "collection", "collection", "subdir"]);
    }

    #[test]
    fn root_count_is_pages_plus_collections_plus_subdirs() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/a.html", Some("A"), None);
        write_page(tmp.path(), "pages/b.html", Some("B"), None);
        write_page(tmp.path(), "pages/c.html", Some("C"), None);
        write_page(tmp.path(), "pages/@x/one.html", Some("One"), None);
        write_page(tmp.path(), "pages/@y/two.html", Some("Two"), None);
        write_page(tmp.path(), "pages/nested/other.html", Some("Other"), None);

        let manifest = scan_default(tmp.path());
        assert_eq!(manifest.root.links().len(), 3 + 2);
    }

    #[test]
    fn page_without_title_uses_file_name() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let links = manifest.root.links();
        let about = find_link(&links, "about.html");
        assert_eq!(about.link, "pages/about.html");
        assert_eq!(about.desc, "");
    }

    #[test]
    fn description_carried_into_link() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let links = manifest.root.links();
        let demo = find_link(&links, "Demo");
        assert_eq!(demo.desc, "A small demo page");
    }

    #[test]
    fn subdir_linked_through_entry_page() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let links = manifest.root.links();
        let blog = find_link(&links, "Blog");
        assert_eq!(blog.link, "pages/blog/index.html");
        assert_eq!(blog.desc, "Occasional writing");
    }

    #[test]
    fn subdir_without_entry_page_skipped() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let links = manifest.root.links();
        assert!(links.iter().all(|l| !l.link.contains("drafts")));
    }

    #[test]
    fn subdir_other_pages_not_enumerated() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let links = manifest.root.links();
        assert!(links.iter().all(|l| !l.link.contains("recap")));
    }

    #[test]
    fn hidden_and_non_page_files_ignored() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let links = manifest.root.links();
        assert!(links.iter().all(|l| !l.link.contains(".hidden")));
        assert!(links.iter().all(|l| !l.link.ends_with(".css")));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_dropped() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/demo.html", Some("Demo"), None);
        std::os::unix::fs::symlink(
            tmp.path().join("pages/gone.html"),
            tmp.path().join("pages/stale.html"),
        )
        .unwrap();
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), tmp.path().join("pages/@old"))
            .unwrap();

        let manifest = scan_default(tmp.path());
        assert_eq!(link_names(&manifest.root.links()), vec!["Demo"]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_in_collection_dropped() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/@docs/guide.html", Some("Guide"), None);
        std::os::unix::fs::symlink(
            tmp.path().join("pages/@docs/gone.html"),
            tmp.path().join("pages/@docs/stale.html"),
        )
        .unwrap();

        let manifest = scan_default(tmp.path());
        let docs = find_collection(&manifest, "@docs");
        assert_eq!(link_names(&docs.entries), vec!["Guide"]);
    }

    #[test]
    fn uppercase_extension_is_a_page() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/LOUD.HTML", Some("Loud"), None);
        let manifest = scan_default(tmp.path());
        assert_eq!(link_names(&manifest.root.links()), vec!["Loud"]);
    }

    // =========================================================================
    // Collection tests
    // =========================================================================

    #[test]
    fn collection_excludes_own_entry_page() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let docs = find_collection(&manifest, "@docs");
        assert_eq!(link_names(&docs.entries), vec!["FAQ", "Guide"]);
    }

    #[test]
    fn collection_links_have_no_directory_segment() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        for collection in manifest.root.collections() {
            for entry in &collection.entries {
                assert!(!entry.link.contains(&collection.dir_name));
                assert!(!entry.link.contains('/'));
            }
        }
    }

    #[test]
    fn collection_only_one_level_deep() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/@docs/top.html", Some("Top"), None);
        write_page(tmp.path(), "pages/@docs/deep/inner.html", Some("Inner"), None);

        let manifest = scan_default(tmp.path());
        let docs = find_collection(&manifest, "@docs");
        assert_eq!(link_names(&docs.entries), vec!["Top"]);
    }

    #[test]
    fn empty_collection_still_listed() {
        let tmp = setup_fixtures();
        let manifest = scan_default(tmp.path());

        let empty = find_collection(&manifest, "@empty");
        assert!(empty.entries.is_empty());
        assert_eq!(empty.title, "Sub-index: @empty");
    }

    #[test]
    fn collection_titles_use_configured_prefixes() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/@c/a.html", Some("A"), None);

        let mut config = MenuConfig::default();
        config.collections.title_prefix = "Collection ".into();
        config.collections.description_prefix = "Everything in ".into();

        let manifest = scan(tmp.path(), &config).unwrap().unwrap();
        let c = find_collection(&manifest, "@c");
        assert_eq!(c.title, "Collection @c");
        assert_eq!(c.description, "Everything in @c");
    }

    #[test]
    fn custom_marker() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "pages/_notes/a.html", Some("A"), None);
        write_page(tmp.path(), "pages/@plain/index.html", Some("Plain"), None);

        let config = MenuConfig {
            collection_marker: "_".into(),
            ..MenuConfig::default()
        };
        let manifest = scan(tmp.path(), &config).unwrap().unwrap();
        assert_eq!(
            link_names(&manifest.root.links()),
            vec!["Plain", "Sub-index: _notes"]
        );
    }

    // =========================================================================
    // Content root placement
    // =========================================================================

    #[test]
    fn nested_content_root_prefixes_links() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "site/pages/a.html", Some("A"), None);
        write_page(tmp.path(), "site/pages/@c/b.html", Some("B"), None);

        let config = MenuConfig {
            content_root: "site/pages".into(),
            ..MenuConfig::default()
        };
        let manifest = scan(tmp.path(), &config).unwrap().unwrap();
        let links = manifest.root.links();
        assert_eq!(links[0].link, "site/pages/a.html");
        assert_eq!(links[1].link, "site/pages/@c/");
    }

    #[test]
    fn content_root_at_site_root_skips_generated_index() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "index.html", Some("Old Index"), None);
        write_page(tmp.path(), "a.html", Some("A"), None);

        let config = MenuConfig {
            content_root: ".".into(),
            ..MenuConfig::default()
        };
        let manifest = scan(tmp.path(), &config).unwrap().unwrap();
        assert_eq!(
            manifest.root.links(),
            vec![LinkEntry::new("A", "a.html", "")]
        );
    }
}
