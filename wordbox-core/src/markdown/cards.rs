//! Card blocks: `:::bookmark`, `:::article`, `:::magazine` and `:::dictionary`.
//!
//! Reference blocks resolve their slug against the lists in
//! [`CrossReferences`]. An unknown slug renders a "not found" card instead
//! of failing the page.

use super::placeholder::{FragmentKind, Fragments};
use super::{html_escape, CrossReferences};
use regex::Regex;
use std::sync::OnceLock;
use wordbox_types::{DictionarySummary, MagazineSummary, PostSummary};

fn bookmark_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s):::bookmark\n(.*?):::").expect("valid regex"))
}

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r":::(article|magazine|dictionary)\n([^\n]+)\n:::").expect("valid regex")
    })
}

const DEFAULT_BOOKMARK_ICON: &str = "🔗";

/// Swap bookmark blocks for tokens
pub fn protect_bookmarks(text: &str, fragments: &mut Fragments) -> String {
    bookmark_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let card = render_bookmark(caps[1].trim());
            fragments.protect(FragmentKind::Bookmark, card)
        })
        .into_owned()
}

/// Swap article, magazine and dictionary blocks for tokens
pub fn protect_references(
    text: &str,
    fragments: &mut Fragments,
    refs: &CrossReferences<'_>,
) -> String {
    reference_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let slug = caps[2].trim();
            match &caps[1] {
                "article" => {
                    let post = refs.posts.iter().find(|p| p.slug == slug);
                    fragments.protect(FragmentKind::Article, render_article(slug, post))
                }
                "magazine" => {
                    let magazine = refs.magazines.iter().find(|m| m.slug == slug);
                    fragments.protect(FragmentKind::Magazine, render_magazine(slug, magazine))
                }
                _ => {
                    let entry = refs.dictionary.iter().find(|d| d.slug == slug);
                    fragments.protect(FragmentKind::Dictionary, render_dictionary(slug, entry))
                }
            }
        })
        .into_owned()
}

/// Fields parsed out of a bookmark block body
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bookmark {
    url: String,
    title: String,
    icon: String,
}

fn parse_bookmark(content: &str) -> Bookmark {
    let mut url = String::new();
    let mut title = String::new();
    let mut icon = DEFAULT_BOOKMARK_ICON.to_string();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            url = trimmed.to_string();
        } else if let Some(rest) = trimmed.strip_prefix("title:") {
            title = rest.trim().to_string();
        } else if let Some(rest) = trimmed.strip_prefix("icon:") {
            icon = rest.trim().to_string();
        }
    }

    if title.is_empty() {
        title = match url::Url::parse(&url) {
            Ok(parsed) => parsed.host_str().unwrap_or(&url).to_string(),
            Err(_) => url.clone(),
        };
    }

    Bookmark { url, title, icon }
}

fn render_bookmark(content: &str) -> String {
    let bookmark = parse_bookmark(content);
    format!(
        r#"<a href="{url}" class="bookmark-card" target="_blank" rel="noopener noreferrer">
  <div class="bookmark-icon">{icon}</div>
  <div class="bookmark-content">
    <div class="bookmark-title">{title}</div>
    <div class="bookmark-url">{url}</div>
  </div>
  <div class="bookmark-arrow">→</div>
</a>"#,
        url = html_escape(&bookmark.url),
        icon = html_escape(&bookmark.icon),
        title = html_escape(&bookmark.title),
    )
}

/// `classes` is the full class list of the outer element, `prefix` the
/// class prefix of its children
fn render_not_found(classes: &str, prefix: &str, message: &str, slug: &str) -> String {
    tracing::debug!("Unresolved {} reference `{}`", prefix, slug);
    format!(
        r#"<div class="{classes}">
  <div class="{prefix}-icon">❌</div>
  <div class="{prefix}-content">
    <div class="{prefix}-title">{message}</div>
    <div class="{prefix}-meta">{slug}</div>
  </div>
</div>"#,
        slug = html_escape(slug),
    )
}

fn render_article(slug: &str, post: Option<&PostSummary>) -> String {
    let Some(post) = post else {
        return render_not_found(
            "article-card article-card-notfound",
            "article",
            "Article not found",
            slug,
        );
    };

    let tags = if post.tags.is_empty() {
        String::new()
    } else {
        let chips: String = post
            .tags
            .iter()
            .map(|tag| format!(r#"<span class="tag">{}</span>"#, html_escape(tag)))
            .collect();
        format!(r#"<div class="tags tags-small">{chips}</div>"#)
    };

    let subtitle = if post.quicklook.is_empty() {
        format!("<time>{}</time>", html_escape(&post.date))
    } else {
        format!(
            r#"<span class="article-quicklook">{}</span>"#,
            html_escape(&post.quicklook)
        )
    };

    format!(
        r#"<a href="/posts/{slug}" class="article-card">
  <div class="article-icon">{emoji}</div>
  <div class="article-content">
    <div class="article-title">{title}</div>
    <div class="article-meta">
      {subtitle}
      {tags}
    </div>
  </div>
  <div class="article-arrow">→</div>
</a>"#,
        slug = html_escape(&post.slug),
        emoji = html_escape(&post.emoji),
        title = html_escape(&post.title),
    )
}

fn render_magazine(slug: &str, magazine: Option<&MagazineSummary>) -> String {
    let Some(magazine) = magazine else {
        return render_not_found(
            "magazine-card-embed magazine-card-notfound",
            "magazine-card",
            "Magazine not found",
            slug,
        );
    };

    let count = magazine.articles.len();
    let noun = if count == 1 { "article" } else { "articles" };

    format!(
        r#"<a href="/magazines/{slug}" class="magazine-card-embed">
  <div class="magazine-card-icon">{emoji}</div>
  <div class="magazine-card-content">
    <div class="magazine-card-title">{title}</div>
    <div class="magazine-card-meta">
      <span class="magazine-card-description">{description}</span>
      <span class="magazine-card-count">{count} {noun}</span>
    </div>
  </div>
  <div class="magazine-card-arrow">→</div>
</a>"#,
        slug = html_escape(&magazine.slug),
        emoji = html_escape(&magazine.emoji),
        title = html_escape(&magazine.title),
        description = html_escape(&magazine.description),
    )
}

fn render_dictionary(slug: &str, entry: Option<&DictionarySummary>) -> String {
    let Some(entry) = entry else {
        return render_not_found(
            "dictionary-card-embed dictionary-card-notfound",
            "dictionary-card",
            "Dictionary entry not found",
            slug,
        );
    };

    let reading = if entry.reading.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="dictionary-card-reading">{}</div>"#,
            html_escape(&entry.reading)
        )
    };

    format!(
        r#"<a href="/dictionary/{slug}" class="dictionary-card-embed">
  <div class="dictionary-card-badge">📖 Dictionary</div>
  <div class="dictionary-card-body">
    <div class="dictionary-card-icon">{emoji}</div>
    <div class="dictionary-card-content">
      <div class="dictionary-card-title">{title}</div>
      {reading}
      <div class="dictionary-card-desc">{description}</div>
    </div>
    <div class="dictionary-card-arrow">→</div>
  </div>
</a>"#,
        slug = html_escape(&entry.slug),
        emoji = html_escape(&entry.emoji),
        title = html_escape(&entry.title),
        description = html_escape(&entry.description),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str) -> PostSummary {
        PostSummary {
            slug: slug.into(),
            title: "Rust <Ownership>".into(),
            emoji: "🦀".into(),
            date: "2025-01-02".into(),
            tags: vec!["rust".into()],
            quicklook: String::new(),
            listed: true,
        }
    }

    #[test]
    fn test_bookmark_with_title_and_icon() {
        let bookmark = parse_bookmark("https://example.com/a?b=c\ntitle: Example\nicon: 🌐");
        assert_eq!(bookmark.url, "https://example.com/a?b=c");
        assert_eq!(bookmark.title, "Example");
        assert_eq!(bookmark.icon, "🌐");
    }

    #[test]
    fn test_bookmark_title_falls_back_to_host() {
        let bookmark = parse_bookmark("https://docs.rs/regex/latest");
        assert_eq!(bookmark.title, "docs.rs");
        assert_eq!(bookmark.icon, DEFAULT_BOOKMARK_ICON);
    }

    #[test]
    fn test_bookmark_without_url() {
        let bookmark = parse_bookmark("title:\nnot a url");
        assert_eq!(bookmark.url, "");
        assert_eq!(bookmark.title, "");
    }

    #[test]
    fn test_protect_bookmark_block() {
        let mut fragments = Fragments::new("t");
        let out = protect_bookmarks(":::bookmark\nhttps://example.com\n:::", &mut fragments);
        let html = fragments.restore(&out);
        assert!(html.contains(r#"<a href="https://example.com" class="bookmark-card""#));
        assert!(html.contains(r#"<div class="bookmark-title">example.com</div>"#));
    }

    #[test]
    fn test_article_card_escapes_fields() {
        let posts = vec![post("ownership")];
        let refs = CrossReferences {
            posts: &posts,
            ..CrossReferences::empty()
        };
        let mut fragments = Fragments::new("t");
        let out = protect_references(":::article\nownership\n:::", &mut fragments, &refs);
        let html = fragments.restore(&out);
        assert!(html.contains(r#"href="/posts/ownership""#));
        assert!(html.contains("Rust &lt;Ownership&gt;"));
        assert!(html.contains("<time>2025-01-02</time>"));
        assert!(html.contains(r#"<span class="tag">rust</span>"#));
    }

    #[test]
    fn test_missing_references_render_not_found() {
        let refs = CrossReferences::empty();
        let mut fragments = Fragments::new("t");
        let out = protect_references(
            ":::article\nnope\n:::\n\n:::magazine\nmissing\n:::\n\n:::dictionary\n<x>\n:::",
            &mut fragments,
            &refs,
        );
        assert_eq!(fragments.len(), 3);
        let html = fragments.restore(&out);
        assert!(html.contains("article-card-notfound"));
        assert!(html.contains("Article not found"));
        assert!(html.contains("magazine-card-notfound"));
        assert!(html.contains("dictionary-card-notfound"));
        assert!(html.contains("&lt;x&gt;"));
    }

    #[test]
    fn test_magazine_and_dictionary_cards() {
        let magazines = vec![MagazineSummary {
            slug: "weekly".into(),
            title: "Weekly".into(),
            emoji: "📚".into(),
            date: String::new(),
            description: "Picks".into(),
            articles: vec!["a".into(), "b".into()],
            listed: true,
        }];
        let dictionary = vec![DictionarySummary {
            slug: "borrow".into(),
            title: "Borrow".into(),
            emoji: "📘".into(),
            reading: String::new(),
            description: "A reference".into(),
            listed: true,
        }];
        let refs = CrossReferences {
            magazines: &magazines,
            dictionary: &dictionary,
            ..CrossReferences::empty()
        };
        let mut fragments = Fragments::new("t");
        let out = protect_references(
            ":::magazine\nweekly\n:::\n:::dictionary\nborrow\n:::",
            &mut fragments,
            &refs,
        );
        let html = fragments.restore(&out);
        assert!(html.contains(r#"<span class="magazine-card-count">2 articles</span>"#));
        assert!(html.contains(r#"href="/dictionary/borrow""#));
        assert!(!html.contains("dictionary-card-reading"));
    }
}
