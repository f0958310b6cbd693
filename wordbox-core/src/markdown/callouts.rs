//! GitHub-style callouts: `> [!NOTE]` followed by quoted lines.

use super::placeholder::{FragmentKind, Fragments};
use regex::Regex;
use std::sync::OnceLock;

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^> \[!([A-Za-z]+)\]\s*$").expect("valid regex"))
}

/// Admonition flavour of a callout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl CalloutKind {
    /// Unknown names fall back to [`CalloutKind::Note`]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "TIP" => CalloutKind::Tip,
            "IMPORTANT" => CalloutKind::Important,
            "WARNING" => CalloutKind::Warning,
            "CAUTION" => CalloutKind::Caution,
            _ => CalloutKind::Note,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            CalloutKind::Note => "ℹ️",
            CalloutKind::Tip => "💡",
            CalloutKind::Important => "❗",
            CalloutKind::Warning => "⚠️",
            CalloutKind::Caution => "🔴",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CalloutKind::Note => "Note",
            CalloutKind::Tip => "Tip",
            CalloutKind::Important => "Important",
            CalloutKind::Warning => "Warning",
            CalloutKind::Caution => "Caution",
        }
    }

    fn class_name(&self) -> &'static str {
        match self {
            CalloutKind::Note => "callout-note",
            CalloutKind::Tip => "callout-tip",
            CalloutKind::Important => "callout-important",
            CalloutKind::Warning => "callout-warning",
            CalloutKind::Caution => "callout-caution",
        }
    }
}

/// Kind named by a callout header line, if `line` is one
pub fn parse_header(line: &str) -> Option<CalloutKind> {
    header_regex()
        .captures(line)
        .map(|caps| CalloutKind::from_name(&caps[1]))
}

/// Replace each callout with a token.
///
/// `render_body` receives the callout text with its quote markers removed
/// and returns the HTML for the callout content.
pub fn protect_callouts(
    text: &str,
    fragments: &mut Fragments,
    mut render_body: impl FnMut(&str) -> String,
) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let Some(kind) = parse_header(lines[i]) else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };

        i += 1;
        let mut body = Vec::new();
        while i < lines.len() && lines[i].starts_with('>') {
            body.push(strip_quote(lines[i]));
            i += 1;
        }

        let content = render_body(body.join("\n").trim());
        out.push(fragments.protect(FragmentKind::Callout, render_callout(kind, &content)));
    }

    out.join("\n")
}

/// Drop the leading `>` and at most one whitespace character after it
fn strip_quote(line: &str) -> &str {
    let rest = &line[1..];
    match rest.chars().next() {
        Some(c) if c.is_whitespace() => &rest[c.len_utf8()..],
        _ => rest,
    }
}

fn render_callout(kind: CalloutKind, content: &str) -> String {
    format!(
        r#"<div class="callout {class}">
  <div class="callout-header">
    <span class="callout-icon">{icon}</span>
    <span class="callout-label">{label}</span>
  </div>
  <div class="callout-content">{content}</div>
</div>"#,
        class = kind.class_name(),
        icon = kind.icon(),
        label = kind.label(),
    )
}
