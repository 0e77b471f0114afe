//! Generator configuration.
//!
//! Handles loading, validating, and merging `menugen.toml`. Stock defaults
//! reproduce the conventional layout, so most sites need no config file at
//! all:
//!
//! ```text
//! site/                        # Site root (--root)
//! ├── menugen.toml             # Optional config
//! ├── index.html               # Generated root index
//! ├── menu.js                  # Generated root link list
//! └── pages/                   # Content root
//!     ├── demo.html
//!     ├── blog/index.html      # Plain subdirectory, listed via its entry page
//!     └── @docs/               # Collection
//!         ├── guide.html
//!         ├── index.html       # Generated sub-index
//!         └── sub-menu.js      # Generated sub-index link list
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "pages"          # Relative to the site root
//! page_extension = "html"
//! collection_marker = "@"
//! entry_page = "index.html"       # Also the name of every generated index
//!
//! [root]
//! title = "Index"
//! script = "menu.js"
//!
//! [collections]
//! script = "sub-menu.js"
//! title_prefix = "Sub-index: "
//! description_prefix = "Contains all pages under "
//!
//! [markup]
//! lang = "en"
//! list_id = "fileList"
//!
//! [readme]
//! path = "README.md"              # Unset by default: README untouched
//! start_marker = "<!-- menu:start -->"
//! end_marker = "<!-- menu:end -->"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Config file looked up in the site root when `--config` is not given.
pub const CONFIG_FILENAME: &str = "menugen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `menugen.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Directory scanned for pages, relative to the site root.
    pub content_root: String,
    /// Extension (without dot) that marks a file as a page.
    pub page_extension: String,
    /// Directory name prefix that turns a directory into a collection.
    pub collection_marker: String,
    /// Conventional entry page name; generated indexes use it too.
    pub entry_page: String,
    pub root: RootConfig,
    pub collections: CollectionsConfig,
    pub markup: MarkupConfig,
    pub readme: ReadmeConfig,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            content_root: "pages".to_string(),
            page_extension: "html".to_string(),
            collection_marker: "@".to_string(),
            entry_page: "index.html".to_string(),
            root: RootConfig::default(),
            collections: CollectionsConfig::default(),
            markup: MarkupConfig::default(),
            readme: ReadmeConfig::default(),
        }
    }
}

/// Root index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootConfig {
    /// `<title>` and heading of the root index page.
    pub title: String,
    /// File name of the root link-list script.
    pub script: String,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            title: "Index".to_string(),
            script: "menu.js".to_string(),
        }
    }
}

/// Collection sub-index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionsConfig {
    /// File name of each collection's link-list script.
    pub script: String,
    /// Prepended to the directory name to form the sub-index title.
    pub title_prefix: String,
    /// Prepended to the directory name to form the sub-index description.
    pub description_prefix: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            script: "sub-menu.js".to_string(),
            title_prefix: "Sub-index: ".to_string(),
            description_prefix: "Contains all pages under ".to_string(),
        }
    }
}

/// Generated markup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// `lang` attribute of generated index pages.
    pub lang: String,
    /// Id of the list element the link-list script fills.
    pub list_id: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            list_id: "fileList".to_string(),
        }
    }
}

/// README menu insertion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadmeConfig {
    /// README to update, relative to the site root. `None` disables insertion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub start_marker: String,
    pub end_marker: String,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            path: None,
            start_marker: "<!-- menu:start -->".to_string(),
            end_marker: "<!-- menu:end -->".to_string(),
        }
    }
}

impl MenuConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let root = Path::new(&self.content_root);
        if self.content_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        if root.is_absolute()
            || root
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation(
                "content_root must be a relative path inside the site root".into(),
            ));
        }
        if self.page_extension.is_empty() || self.page_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "page_extension must be non-empty and given without a leading dot".into(),
            ));
        }
        if self.collection_marker.is_empty() {
            return Err(ConfigError::Validation(
                "collection_marker must not be empty".into(),
            ));
        }
        for (key, name) in [
            ("entry_page", &self.entry_page),
            ("root.script", &self.root.script),
            ("collections.script", &self.collections.script),
        ] {
            if !is_plain_file_name(name) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name, got {name:?}"
                )));
            }
        }
        for (key, script) in [
            ("root.script", &self.root.script),
            ("collections.script", &self.collections.script),
        ] {
            if *script == self.entry_page {
                return Err(ConfigError::Validation(format!(
                    "{key} must differ from entry_page, both are {script:?}"
                )));
            }
        }
        if self.markup.list_id.is_empty() || self.markup.list_id.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "markup.list_id must be non-empty and contain no whitespace".into(),
            ));
        }
        if self.readme.start_marker.is_empty()
            || self.readme.end_marker.is_empty()
            || self.readme.start_marker == self.readme.end_marker
        {
            return Err(ConfigError::Validation(
                "readme markers must be non-empty and distinct".into(),
            ));
        }
        Ok(())
    }

    /// Content root as a forward-slash link prefix, without `.` segments.
    ///
    /// Empty when the content root is the site root itself.
    pub fn content_root_link(&self) -> String {
        Path::new(&self.content_root)
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MenuConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<MenuConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MenuConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `menugen.toml` from the site root, falling back to defaults if absent.
pub fn load_config(site_root: &Path) -> Result<MenuConfig, ConfigError> {
    let config_path = site_root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return resolve_config(None);
    }
    load_config_file(&config_path)
}

/// Load an explicitly named config file. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<MenuConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `menugen.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# menugen Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory scanned for pages, relative to the site root.
content_root = "pages"

# Files with this extension (case-insensitive) are pages.
page_extension = "html"

# Directories whose name starts with this marker are collections: they get
# their own sub-index and appear in the root index as a single link.
collection_marker = "@"

# Entry page of a plain subdirectory. Generated index pages use this name
# too, and a collection's own entry page is never listed in its sub-index.
entry_page = "index.html"

# ---------------------------------------------------------------------------
# Root index (written to the site root)
# ---------------------------------------------------------------------------
[root]
title = "Index"
script = "menu.js"

# ---------------------------------------------------------------------------
# Collection sub-indexes (written inside each collection directory)
# ---------------------------------------------------------------------------
[collections]
script = "sub-menu.js"
title_prefix = "Sub-index: "
description_prefix = "Contains all pages under "

# ---------------------------------------------------------------------------
# Generated markup
# ---------------------------------------------------------------------------
[markup]
lang = "en"
# Id of the <ul> the link-list script fills in.
list_id = "fileList"

# ---------------------------------------------------------------------------
# README menu insertion
# ---------------------------------------------------------------------------
[readme]
# Uncomment to rewrite the text between the markers with the root link list.
# path = "README.md"
start_marker = "<!-- menu:start -->"
end_marker = "<!-- menu:end -->"
"##
}
