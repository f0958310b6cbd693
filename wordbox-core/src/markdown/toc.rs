//! Table of contents built from the headings collected during a render.

use super::html_escape;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A heading seen during one render pass.
///
/// Ids are `heading-<n>` in document order and are only stable for that
/// pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub title: String,
    pub id: String,
}

impl Heading {
    /// Levels 2 through 4 are listed in the table of contents
    pub fn in_toc(&self) -> bool {
        (2..=4).contains(&self.level)
    }
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

/// Undo [`html_escape`] so a title escaped by an inline pass is not escaped twice
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Render the navigation block, or `None` when no heading qualifies
pub fn render_toc(headings: &[Heading]) -> Option<String> {
    let entries: Vec<&Heading> = headings.iter().filter(|h| h.in_toc()).collect();
    if entries.is_empty() {
        return None;
    }

    let mut html = String::from(r#"<nav class="toc"><div class="toc-title">Contents</div><ul>"#);
    for heading in entries {
        let indent = heading.level - 2;
        let class = if indent > 0 {
            format!(r#" class="toc-indent-{indent}""#)
        } else {
            String::new()
        };
        let title = decode_entities(&tag_regex().replace_all(&heading.title, ""));
        html.push_str(&format!(
            r##"<li{class}><a href="#{}">{}</a></li>"##,
            heading.id,
            html_escape(&title)
        ));
    }
    html.push_str("</ul></nav>");
    Some(html)
}
