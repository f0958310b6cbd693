//! Inline rules: code spans, images, links, headings, rules and emphasis.
//!
//! These run over the whole document after block constructs have been
//! protected. Emphasis must go from the longest delimiter to the shortest so
//! `**` is never eaten as two `*`.

use super::html_escape;
use super::toc::Heading;
use regex::Regex;
use std::sync::OnceLock;

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("valid regex"))
        }
    };
}

cached_regex!(code_regex, r"`([^`]+)`");
cached_regex!(image_regex, r"!\[([^\]]*)\]\(([^)]+)\)");
cached_regex!(link_regex, r"\[([^\]]+)\]\(([^)]+)\)");
cached_regex!(heading_regex, r"^(#{1,5}) (.+)$");
cached_regex!(rule_regex, r"^(?:-{3,}|\*{3,}|_{3,})\s*$");
cached_regex!(strike_regex, r"~~(.+?)~~");
cached_regex!(underline_regex, r"\+\+(.+?)\+\+");
cached_regex!(bold_regex, r"\*\*(.+?)\*\*");
cached_regex!(italic_regex, r"\*(.+?)\*");

pub fn inline_code(text: &str) -> String {
    code_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!("<code>{}</code>", html_escape(&caps[1]))
        })
        .into_owned()
}

/// Images run before links because `![alt](src)` contains a link
pub fn images(text: &str) -> String {
    image_regex()
        .replace_all(text, r#"<img src="$2" alt="$1">"#)
        .into_owned()
}

pub fn links(text: &str) -> String {
    link_regex()
        .replace_all(
            text,
            r#"<a href="$2" target="_blank" rel="noopener noreferrer">$1</a>"#,
        )
        .into_owned()
}

/// Convert `#`..`#####` lines, numbering ids from `next_id` in document order
pub fn headings(text: &str, next_id: &mut usize, collected: &mut Vec<Heading>) -> String {
    map_lines(text, |line| {
        let caps = heading_regex().captures(line)?;
        let level = caps[1].len() as u8;
        let title = caps[2].to_string();
        let id = format!("heading-{next_id}");
        *next_id += 1;
        let html = format!(r#"<h{level} id="{id}">{title}</h{level}>"#);
        collected.push(Heading { level, title, id });
        Some(html)
    })
}

pub fn horizontal_rules(text: &str) -> String {
    map_lines(text, |line| {
        rule_regex()
            .is_match(line)
            .then(|| "<hr>".to_string())
    })
}

/// Strikethrough, underline, bold, italic
pub fn emphasis(text: &str) -> String {
    let text = strike_regex().replace_all(text, "<del>$1</del>");
    let text = underline_regex().replace_all(&text, "<u>$1</u>");
    let text = bold_regex().replace_all(&text, "<strong>$1</strong>");
    italic_regex().replace_all(&text, "<em>$1</em>").into_owned()
}

/// Formatting allowed inside a table cell: emphasis and code spans only
pub fn format_cell(text: &str) -> String {
    inline_code(&emphasis(text))
}

fn map_lines(text: &str, mut f: impl FnMut(&str) -> Option<String>) -> String {
    text.split('\n')
        .map(|line| f(line).unwrap_or_else(|| line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_before_link() {
        let html = links(&images("![logo](/a.png) and [docs](https://docs.rs)"));
        assert_eq!(
            html,
            r#"<img src="/a.png" alt="logo"> and <a href="https://docs.rs" target="_blank" rel="noopener noreferrer">docs</a>"#
        );
    }

    #[test]
    fn test_headings_numbered_in_order() {
        let mut collected = Vec::new();
        let mut next_id = 0;
        let html = headings(
            "# One\ntext\n### Three\n###### too deep\n#nospace",
            &mut next_id,
            &mut collected,
        );
        assert_eq!(
            html,
            "<h1 id=\"heading-0\">One</h1>\ntext\n<h3 id=\"heading-1\">Three</h3>\n###### too deep\n#nospace"
        );
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1].level, 3);
        assert_eq!(collected[1].title, "Three");
        assert_eq!(collected[1].id, "heading-1");
        assert_eq!(next_id, 2);
    }

    #[test]
    fn test_headings_continue_from_counter() {
        let mut collected = Vec::new();
        let mut next_id = 3;
        assert_eq!(
            headings("## Later", &mut next_id, &mut collected),
            r#"<h2 id="heading-3">Later</h2>"#
        );
        assert_eq!(next_id, 4);
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(horizontal_rules("a\n---\nb\n***\n___\n--"), "a\n<hr>\nb\n<hr>\n<hr>\n--");
    }

    #[test]
    fn test_emphasis_order() {
        assert_eq!(
            emphasis("**bold** and *it* ~~gone~~ ++under++"),
            "<strong>bold</strong> and <em>it</em> <del>gone</del> <u>under</u>"
        );
    }

    #[test]
    fn test_inline_code_escaped() {
        assert_eq!(inline_code("use `Vec<T>` here"), "use <code>Vec&lt;T&gt;</code> here");
    }
}
