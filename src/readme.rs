//! README menu insertion.
//!
//! When `[readme] path` is configured, the text between the start and end
//! markers of that file is replaced with a Markdown list of the root links:
//!
//! ```text
//! <!-- menu:start -->
//! - [Demo](pages/demo.html)
//! - [Sub-index: @docs](pages/@docs/) - Contains all pages under @docs
//! <!-- menu:end -->
//! ```
//!
//! Everything outside the markers is preserved byte for byte. A README
//! without both markers, or with them out of order, is left alone.

use crate::types::LinkEntry;

/// Render the Markdown bullet list placed between the markers.
pub fn render_menu_block(links: &[LinkEntry]) -> String {
    let mut block = String::new();
    for link in links {
        let name = escape_link_text(&link.name);
        let href = link.link.replace(' ', "%20");
        if link.desc.is_empty() {
            block.push_str(&format!("- [{name}]({href})\n"));
        } else {
            block.push_str(&format!("- [{name}]({href}) - {}\n", link.desc));
        }
    }
    block
}

/// Replace the text between `start` and `end` with `block`.
///
/// Returns `None` if either marker is missing or `end` precedes `start`.
/// The markers stay on their own lines around the block.
pub fn splice_menu(readme: &str, start: &str, end: &str, block: &str) -> Option<String> {
    let start_at = readme.find(start)?;
    let body_at = start_at + start.len();
    let end_at = body_at + readme[body_at..].find(end)?;

    let mut out = String::with_capacity(readme.len() + block.len());
    out.push_str(&readme[..body_at]);
    out.push('\n');
    out.push_str(block);
    out.push_str(&readme[end_at..]);
    Some(out)
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
