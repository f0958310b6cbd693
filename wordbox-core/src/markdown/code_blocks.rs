//! Fenced code blocks.

use super::highlight::Highlighter;
use super::placeholder::{FragmentKind, Fragments};
use regex::Regex;
use std::sync::OnceLock;

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("valid regex"))
}

/// Swap every fenced block for a token holding its highlighted HTML
pub fn protect_code_blocks(
    text: &str,
    fragments: &mut Fragments,
    highlighter: &dyn Highlighter,
) -> String {
    fence_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let language = caps.get(1).map(|m| m.as_str()).unwrap_or("text");
            let code = caps.get(2).map(|m| m.as_str()).unwrap_or("").trim();
            let highlighted = highlighter.highlight(code, language);
            fragments.protect(
                FragmentKind::CodeBlock,
                render_code_block(language, &highlighted),
            )
        })
        .into_owned()
}

fn render_code_block(language: &str, highlighted: &str) -> String {
    format!(
        r#"<div class="code-block">
  <div class="code-header">
    <span class="code-language">{language}</span>
    <button class="copy-button">Copy</button>
  </div>
  <pre><code class="language-{language}">{highlighted}</code></pre>
</div>"#
    )
}
