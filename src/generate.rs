//! Index and link-list generation.
//!
//! Stage 2 of the pipeline. Takes the scan manifest and produces the output
//! artifacts, then writes them.
//!
//! ## Generated Files
//!
//! - **Root index** (`index.html`): page shell with an empty list container
//! - **Root link list** (`menu.js`): the root links plus the routine that
//!   renders them into the container
//! - **Collection index** (`pages/@x/index.html`) and **collection link list**
//!   (`pages/@x/sub-menu.js`): the same pair, scoped to one collection
//! - **README** (optional): the root links spliced between markers
//!
//! ## Plan, then write
//!
//! [`plan`] is a function from manifest (plus a timestamp) to the complete
//! set of [`Artifact`]s; it reads nothing but the optional README and writes
//! nothing. [`write_artifacts`] is the only step that touches the output
//! tree. Every artifact is fully overwritten on each run: there is no merge
//! with previous content.
//!
//! ## Cache busting
//!
//! Index pages load their script as `menu.js?ts=<millis>`, so browsers and
//! CDNs always fetch the freshly generated list. Apart from this value, two
//! runs over unchanged content produce byte-identical output.
//!
//! ## HTML Generation
//!
//! Index pages are rendered with [maud](https://maud.lambda.xyz/), so titles
//! are auto-escaped. The link list is embedded in the script
//! as JSON with `<`, `>` and `&` escaped, so no page title can terminate the
//! script element early.

use crate::config::{MarkupConfig, MenuConfig};
use crate::naming::link_path;
use crate::readme;
use crate::scan::Manifest;
use crate::types::LinkEntry;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What an artifact is, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    IndexPage,
    LinkScript,
    Readme,
}

/// One file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Destination on disk (site root joined with `rel_path`)
    pub path: PathBuf,
    /// Destination relative to the site root, forward-slash separated
    pub rel_path: String,
    /// Title shown on index pages, empty for scripts and README
    pub title: String,
    /// Number of links the artifact lists
    pub link_count: usize,
    pub contents: String,
}

/// Outcome of README menu insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeStatus {
    Updated(String),
    MissingFile(String),
    MissingMarkers(String),
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub artifacts: Vec<Artifact>,
    /// `None` when README insertion is not configured
    pub readme: Option<ReadmeStatus>,
}

/// Milliseconds since the Unix epoch, used as the cache-busting value.
pub fn current_timestamp() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Plan and write every artifact for `manifest`.
pub fn generate(
    manifest: &Manifest,
    site_root: &Path,
    timestamp: u128,
) -> Result<Plan, GenerateError> {
    let plan = plan(manifest, site_root, timestamp)?;
    write_artifacts(&plan.artifacts)?;
    Ok(plan)
}

/// Build the full artifact set without writing anything.
pub fn plan(
    manifest: &Manifest,
    site_root: &Path,
    timestamp: u128,
) -> Result<Plan, GenerateError> {
    let config = &manifest.config;
    let mut artifacts = Vec::new();

    // Root index + link list
    let root_links = manifest.root.links();
    push_index_pair(
        &mut artifacts,
        site_root,
        "",
        &manifest.root.title,
        &config.root.script,
        &root_links,
        timestamp,
        config,
    )?;

    // One index + link list inside every collection
    for collection in manifest.root.collections() {
        let rel_dir = link_path([
            manifest.root.content_root.as_str(),
            collection.dir_name.as_str(),
        ]);
        push_index_pair(
            &mut artifacts,
            site_root,
            &rel_dir,
            &collection.title,
            &config.collections.script,
            &collection.entries,
            timestamp,
            config,
        )?;
    }

    let readme = match &config.readme.path {
        Some(rel) => Some(plan_readme(&mut artifacts, site_root, rel, &root_links, config)?),
        None => None,
    };

    Ok(Plan { artifacts, readme })
}

#[allow(clippy::too_many_arguments)]
fn push_index_pair(
    artifacts: &mut Vec<Artifact>,
    site_root: &Path,
    rel_dir: &str,
    title: &str,
    script: &str,
    links: &[LinkEntry],
    timestamp: u128,
    config: &MenuConfig,
) -> Result<(), GenerateError> {
    let index_rel = link_path([rel_dir, config.entry_page.as_str()]);
    let index_html = render_index_page(title, script, timestamp, &config.markup);
    artifacts.push(Artifact {
        kind: ArtifactKind::IndexPage,
        path: site_root.join(&index_rel),
        rel_path: index_rel,
        title: title.to_string(),
        link_count: links.len(),
        contents: index_html.into_string(),
    });

    let script_rel = link_path([rel_dir, script]);
    artifacts.push(Artifact {
        kind: ArtifactKind::LinkScript,
        path: site_root.join(&script_rel),
        rel_path: script_rel,
        title: String::new(),
        link_count: links.len(),
        contents: render_link_script(links, &config.markup.list_id)?,
    });
    Ok(())
}

fn plan_readme(
    artifacts: &mut Vec<Artifact>,
    site_root: &Path,
    rel: &str,
    links: &[LinkEntry],
    config: &MenuConfig,
) -> Result<ReadmeStatus, GenerateError> {
    let path = site_root.join(rel);
    let current = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ReadmeStatus::MissingFile(rel.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let block = readme::render_menu_block(links);
    let Some(updated) = readme::splice_menu(
        &current,
        &config.readme.start_marker,
        &config.readme.end_marker,
        &block,
    ) else {
        return Ok(ReadmeStatus::MissingMarkers(rel.to_string()));
    };

    artifacts.push(Artifact {
        kind: ArtifactKind::Readme,
        path,
        rel_path: rel.to_string(),
        title: String::new(),
        link_count: links.len(),
        contents: updated,
    });
    Ok(ReadmeStatus::Updated(rel.to_string()))
}

/// Write every artifact, replacing whatever is there.
///
/// Each file is written to a sibling temp file and renamed into place, so a
/// reader never sees a half-written index. The first failure aborts the run.
pub fn write_artifacts(artifacts: &[Artifact]) -> Result<(), GenerateError> {
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = temp_path(&artifact.path);
        let written =
            fs::write(&tmp, &artifact.contents).and_then(|()| fs::rename(&tmp, &artifact.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.menugen-tmp"))
}

// ============================================================================
// Renderers
// ============================================================================

/// Render an index page shell that loads `script` with a cache-busting query.
pub fn render_index_page(
    title: &str,
    script: &str,
    timestamp: u128,
    markup: &MarkupConfig,
) -> Markup {
    let src = format!("{script}?ts={timestamp}");
    html! {
        (DOCTYPE)
        html lang=(markup.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                h1 { (title) }
                ul id=(markup.list_id) {}
                script src=(src) {}
            }
        }
    }
}

/// Render the link-list script for `links`.
///
/// The script appends one `<li><a>` per link to the element with id
/// `list_id`, in order, once the document is ready.
pub fn render_link_script(links: &[LinkEntry], list_id: &str) -> Result<String, GenerateError> {
    let links_json = escape_for_script(&serde_json::to_string_pretty(links)?);
    let id_json = escape_for_script(&serde_json::to_string(list_id)?);

    Ok(format!(
        r#"/**
 * Generated by menugen. Do not edit: rewritten on every run.
 */
(function() {{
  const LINKS = {links_json};
  function render() {{
    const list = document.getElementById({id_json});
    if (!list) return;
    LINKS.forEach(({{ name, link, desc }}) => {{
      const li = document.createElement('li');
      const a = document.createElement('a');
      a.href = link;
      a.textContent = name;
      a.title = desc;
      li.appendChild(a);
      list.appendChild(li);
    }});
  }}
  if (document.readyState === 'loading') {{
    window.addEventListener('DOMContentLoaded', render);
  }} else {{
    render();
  }}
}})();
"#
    ))
}

/// Escape characters that could end a `<script>` element or open a comment.
fn escape_for_script(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

// ============================================================================
// Tests
// ============================================================================
