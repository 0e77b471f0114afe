//! Shared types passed from the scan stage to the generate stage.
//!
//! A scan produces a [`RootIndex`] whose entries are tagged by kind, so the
//! renderer handles plain pages, `@` collections and subdirectory entry pages
//! exhaustively instead of re-inspecting directory names.

use crate::naming::link_path;
use serde::{Deserialize, Serialize};

/// One link in a generated link list.
///
/// Serialized with exactly the keys the browser-side script destructures:
/// `name`, `link` and `desc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Visible anchor text (page title or file name fallback)
    pub name: String,
    /// Href, relative to the index page that displays this entry
    pub link: String,
    /// Tooltip text. Empty when the page has no description meta.
    pub desc: String,
}

impl LinkEntry {
    pub fn new(name: impl Into<String>, link: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            desc: desc.into(),
        }
    }
}

/// A namespaced (`@`-prefixed) directory with its own nested index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIndex {
    /// Directory name including the marker, e.g. `@docs`
    pub dir_name: String,
    /// Display title used both for the sub-index page and the root link
    pub title: String,
    pub description: String,
    /// Member pages, linked relative to the collection directory itself
    pub entries: Vec<LinkEntry>,
}

/// A classified entry directly under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A top-level page.
    Page(LinkEntry),
    /// A collection, shown in the root index as a single link to its sub-index.
    Collection(CollectionIndex),
    /// A plain subdirectory represented by its entry page.
    Subdir(LinkEntry),
}

/// The root index: everything the root link list will show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootIndex {
    pub title: String,
    /// Content root relative to the site root, forward-slash separated (`pages`)
    pub content_root: String,
    pub entries: Vec<Entry>,
}

impl RootIndex {
    /// Flatten the tagged entries into the root link list, in scan order.
    ///
    /// Collections become one synthetic link to `<content_root>/<dir>/`.
    pub fn links(&self) -> Vec<LinkEntry> {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Page(link) | Entry::Subdir(link) => link.clone(),
                Entry::Collection(collection) => LinkEntry::new(
                    collection.title.clone(),
                    format!(
                        "{}/",
                        link_path([self.content_root.as_str(), collection.dir_name.as_str()])
                    ),
                    collection.description.clone(),
                ),
            })
            .collect()
    }

    /// All collections in scan order.
    pub fn collections(&self) -> impl Iterator<Item = &CollectionIndex> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Collection(collection) => Some(collection),
            _ => None,
        })
    }
}
