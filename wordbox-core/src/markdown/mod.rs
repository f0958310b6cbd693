//! Markdown to HTML with the site's custom blocks.
//!
//! Rendering is a fixed sequence of text passes. Constructs that produce
//! finished HTML early (callouts, code blocks, cards, tables) are parked in a
//! [`placeholder::Fragments`] accumulator and restored at the end, so the
//! inline passes that follow never see their contents.

pub mod callouts;
pub mod cards;
pub mod code_blocks;
pub mod highlight;
pub mod inline;
pub mod lists;
pub mod paragraphs;
pub mod placeholder;
pub mod plain_text;
pub mod tables;
pub mod toc;

#[cfg(test)]
mod test_integration;

use placeholder::{FragmentKind, Fragments};
use serde::Serialize;
use wordbox_types::{DictionarySummary, MagazineSummary, PostSummary};

pub use highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};
pub use plain_text::extract_plain_text;
pub use toc::Heading;

/// Escape text for use in HTML content and attribute values
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Lookup lists for `:::article`, `:::magazine` and `:::dictionary` blocks.
///
/// Borrowed for the duration of one render.
#[derive(Debug, Clone, Copy)]
pub struct CrossReferences<'a> {
    pub posts: &'a [PostSummary],
    pub magazines: &'a [MagazineSummary],
    pub dictionary: &'a [DictionarySummary],
}

impl<'a> CrossReferences<'a> {
    pub const fn empty() -> Self {
        Self {
            posts: &[],
            magazines: &[],
            dictionary: &[],
        }
    }
}

impl Default for CrossReferences<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Callouts nested deeper than this are emitted as escaped text
    pub max_callout_depth: usize,
    /// Prepend a table of contents when the document has h2-h4 headings
    pub toc: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_callout_depth: 10,
            toc: true,
        }
    }
}

/// Rendered body plus the pieces a page layout may want separately
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub html: String,
    pub headings: Vec<Heading>,
    pub toc_html: Option<String>,
}

/// Markdown renderer with a pluggable highlighter
pub struct MarkdownRenderer {
    highlighter: Box<dyn Highlighter>,
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_highlighter(Box::new(SyntectHighlighter::new()))
    }

    pub fn with_highlighter(highlighter: Box<dyn Highlighter>) -> Self {
        Self {
            highlighter,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render to a single HTML fragment, table of contents first
    pub fn render(&self, text: &str, refs: &CrossReferences<'_>) -> String {
        let document = self.render_document(text, refs);
        match document.toc_html {
            Some(toc) => format!("{toc}\n{}", document.html),
            None => document.html,
        }
    }

    pub fn render_document(&self, text: &str, refs: &CrossReferences<'_>) -> RenderedDocument {
        let normalized = text.replace("\r\n", "\n");
        let clean = placeholder::sanitize(&normalized);
        let (html, headings) = self.render_at_depth(&clean, refs, 0, &mut 0);

        let toc_html = if self.options.toc {
            toc::render_toc(&headings)
        } else {
            None
        };

        RenderedDocument {
            html,
            headings,
            toc_html,
        }
    }

    fn render_at_depth(
        &self,
        text: &str,
        refs: &CrossReferences<'_>,
        depth: usize,
        next_id: &mut usize,
    ) -> (String, Vec<Heading>) {
        let mut fragments = Fragments::new(format!("r{depth}"));
        let mut bodies = Fragments::new(format!("b{depth}"));
        let mut pending: Vec<String> = Vec::new();

        let text = callouts::protect_callouts(text, &mut fragments, |body| {
            pending.push(body.to_string());
            bodies.reserve(FragmentKind::Callout)
        });
        let text = code_blocks::protect_code_blocks(&text, &mut fragments, self.highlighter.as_ref());
        let text = cards::protect_bookmarks(&text, &mut fragments);
        let text = cards::protect_references(&text, &mut fragments, refs);
        let text = tables::protect_tables(&text, &mut fragments);

        let text = inline::inline_code(&text);
        let text = inline::images(&text);
        let text = inline::links(&text);
        let mut headings = Vec::new();
        let text = inline::headings(&text, next_id, &mut headings);
        let text = inline::horizontal_rules(&text);
        let text = lists::render_lists(&text);
        let text = inline::emphasis(&text);

        let text = paragraphs::wrap_paragraphs(&text);

        // Callout bodies render after this level's headings, so their ids
        // continue the numbering instead of reusing it
        for (index, body) in pending.iter().enumerate() {
            let html = self.render_callout_body(body, refs, depth, next_id);
            bodies.fill(index, html);
        }

        (bodies.restore(&fragments.restore(&text)), headings)
    }

    /// Callout bodies get their code protected first, then a full nested render
    fn render_callout_body(
        &self,
        body: &str,
        refs: &CrossReferences<'_>,
        depth: usize,
        next_id: &mut usize,
    ) -> String {
        if depth >= self.options.max_callout_depth {
            tracing::warn!(
                "Callout nesting exceeds {} levels; emitting body as text",
                self.options.max_callout_depth
            );
            return format!(
                r#"<pre class="callout-too-deep">{}</pre>"#,
                html_escape(body)
            );
        }

        let mut code = Fragments::new(format!("c{depth}"));
        let body = code_blocks::protect_code_blocks(body, &mut code, self.highlighter.as_ref());
        let (html, _) = self.render_at_depth(&body, refs, depth + 1, next_id);
        code.restore(&html)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render with default options and syntect highlighting
pub fn render_markdown(text: &str, refs: &CrossReferences<'_>) -> String {
    MarkdownRenderer::new().render(text, refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_toc_can_be_disabled() {
        let renderer = MarkdownRenderer::with_highlighter(Box::new(PlainHighlighter))
            .with_options(RenderOptions {
                toc: false,
                ..RenderOptions::default()
            });
        let document = renderer.render_document("## Section", &CrossReferences::empty());
        assert!(document.toc_html.is_none());
        assert_eq!(document.headings.len(), 1);
        assert_eq!(document.html, r#"<h2 id="heading-0">Section</h2>"#);
    }
}
