//! Paragraph wrapping on blank-line boundaries.

use super::placeholder::{self, Segment};
use regex::Regex;
use std::sync::OnceLock;

fn blank_lines_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\n+").expect("valid regex"))
}

fn block_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^<(?:h[1-6]|ul|ol|pre|hr|blockquote|div|table|nav|p|figure|details|section)[\s>/]")
            .expect("valid regex")
    })
}

/// Wrap prose blocks in `<p>`.
///
/// Blocks that already open with a block-level tag, and blocks that are a
/// single placeholder token, pass through untouched. A block mixing tokens
/// with prose only has its prose parts wrapped.
pub fn wrap_paragraphs(text: &str) -> String {
    blank_lines_regex()
        .split(text)
        .filter_map(|block| {
            let block = block.trim();
            if block.is_empty() {
                None
            } else if block_tag_regex().is_match(block) || placeholder::is_token(block) {
                Some(block.to_string())
            } else if placeholder::contains_token(block) {
                Some(wrap_mixed(block))
            } else {
                Some(paragraph(block))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_mixed(block: &str) -> String {
    placeholder::split_tokens(block)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Token(token) => Some(token.to_string()),
            Segment::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| paragraph(text))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", text.replace('\n', "<br>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::placeholder::{FragmentKind, Fragments};

    #[test]
    fn test_wraps_prose_blocks() {
        assert_eq!(
            wrap_paragraphs("first line\nsecond line\n\n\n\nnext"),
            "<p>first line<br>second line</p>\n<p>next</p>"
        );
    }

    #[test]
    fn test_block_tags_untouched() {
        let text = "<h2 id=\"heading-0\">Title</h2>\n\n<ul><li>a</li></ul>\n\n<hr>";
        assert_eq!(wrap_paragraphs(text), "<h2 id=\"heading-0\">Title</h2>\n<ul><li>a</li></ul>\n<hr>");
    }

    #[test]
    fn test_inline_tags_are_wrapped() {
        assert_eq!(
            wrap_paragraphs("<a href=\"/x\">x</a> trailing"),
            "<p><a href=\"/x\">x</a> trailing</p>"
        );
    }

    #[test]
    fn test_token_blocks() {
        let mut fragments = Fragments::new("t");
        let token = fragments.protect(FragmentKind::CodeBlock, String::new());
        assert_eq!(wrap_paragraphs(&token), token);

        let mixed = format!("intro\n{token}\noutro");
        assert_eq!(
            wrap_paragraphs(&mixed),
            format!("<p>intro</p>\n{token}\n<p>outro</p>")
        );
    }
}
