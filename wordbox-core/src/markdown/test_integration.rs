//! Integration tests for the full rendering pipeline

use super::*;

fn renderer() -> MarkdownRenderer {
    MarkdownRenderer::with_highlighter(Box::new(PlainHighlighter))
}

fn render(markdown: &str) -> String {
    renderer().render(markdown, &CrossReferences::empty())
}

#[test]
fn test_nested_list_exact_output() {
    assert_eq!(
        render("- a\n  - b\n- c"),
        "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"
    );
}

#[test]
fn test_table_alignment() {
    let html = render("|A|B|C|\n|:--|:-:|--:|\n|1|2|3|");
    assert!(html.contains(r#"<th style="text-align: left">A</th>"#));
    assert!(html.contains(r#"<th style="text-align: center">B</th>"#));
    assert!(html.contains(r#"<th style="text-align: right">C</th>"#));
    assert!(html.contains(r#"<td style="text-align: left">1</td>"#));
    assert!(html.contains(r#"<td style="text-align: center">2</td>"#));
    assert!(html.contains(r#"<td style="text-align: right">3</td>"#));
    assert!(!html.contains("<p>"));
}

#[test]
fn test_missing_article_renders_not_found_card() {
    let html = render(":::article\nnon-existent-slug\n:::");
    assert!(html.contains("article-card-notfound"));
    assert!(html.contains("Article not found"));
    assert!(html.contains("non-existent-slug"));
}

#[test]
fn test_resolved_article_card() {
    let posts = vec![PostSummary {
        slug: "ownership".into(),
        title: "Rust Ownership".into(),
        emoji: "🦀".into(),
        date: "2025-03-01".into(),
        tags: vec![],
        quicklook: "Moves and borrows".into(),
        listed: true,
    }];
    let refs = CrossReferences {
        posts: &posts,
        ..CrossReferences::empty()
    };
    let html = renderer().render("See:\n\n:::article\nownership\n:::", &refs);
    assert!(html.starts_with("<p>See:</p>\n"));
    assert!(html.contains(r#"<a href="/posts/ownership" class="article-card">"#));
    assert!(html.contains(r#"<span class="article-quicklook">Moves and borrows</span>"#));
}

#[test]
fn test_toc_lists_levels_two_to_four() {
    let document = renderer().render_document(
        "# Title\n\n## Intro\n\ntext\n\n### Detail\n\n##### Small",
        &CrossReferences::empty(),
    );
    assert_eq!(document.headings.len(), 4);

    let toc = document.toc_html.as_deref().unwrap();
    assert!(toc.contains(r##"<a href="#heading-1">Intro</a>"##));
    assert!(toc.contains(r##"<li class="toc-indent-1"><a href="#heading-2">Detail</a></li>"##));
    assert!(!toc.contains("#heading-0"));
    assert!(!toc.contains("#heading-3"));
    assert!(document.html.contains(r#"<h5 id="heading-3">Small</h5>"#));

    let html = render("# Title\n\n## Intro\n\ntext\n\n### Detail\n\n##### Small");
    assert!(html.starts_with(r#"<nav class="toc">"#));
}

#[test]
fn test_no_toc_without_subheadings() {
    let html = render("# Only a title\n\nbody");
    assert_eq!(html, "<h1 id=\"heading-0\">Only a title</h1>\n<p>body</p>");
}

#[test]
fn test_callout_with_markdown_and_code() {
    let html = render(
        "> [!WARNING]\n> Be **careful**\n>\n> ```rust\n> let x = 1 < 2;\n> ```\n\nafter",
    );
    assert!(html.contains(r#"<div class="callout callout-warning">"#));
    assert!(html.contains("<p>Be <strong>careful</strong></p>"));
    assert!(html.contains(r#"<code class="language-rust">let x = 1 &lt; 2;</code>"#));
    assert!(html.ends_with("<p>after</p>"));
    assert!(!placeholder::contains_token(&html));
}

#[test]
fn test_callout_headings_stay_out_of_toc() {
    let document = renderer().render_document(
        "> [!NOTE]\n> ## Inside\n\n## Outside",
        &CrossReferences::empty(),
    );
    assert_eq!(document.headings.len(), 1);
    assert_eq!(document.headings[0].title, "Outside");
}

#[test]
fn test_heading_ids_unique_across_callouts() {
    let document = renderer().render_document(
        "## Outside\n\n> [!NOTE]\n> ## Inside\n> > [!TIP]\n> > ### Deeper\n\n### After",
        &CrossReferences::empty(),
    );
    let html = &document.html;
    assert!(html.contains(r#"<h2 id="heading-0">Outside</h2>"#));
    assert!(html.contains(r#"<h3 id="heading-1">After</h3>"#));
    assert!(html.contains(r#"<h2 id="heading-2">Inside</h2>"#));
    assert!(html.contains(r#"<h3 id="heading-3">Deeper</h3>"#));

    let ids: Vec<&str> = regex::Regex::new(r#"id="(heading-\d+)""#)
        .unwrap()
        .captures_iter(html)
        .map(|caps| caps.get(1).unwrap().as_str())
        .collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), 4);
    assert_eq!(unique.len(), ids.len());

    let toc = document.toc_html.as_deref().unwrap();
    assert!(toc.contains(r##"<a href="#heading-0">Outside</a>"##));
    assert!(toc.contains(r##"<a href="#heading-1">After</a>"##));
    assert!(!toc.contains("Inside"));
}

#[test]
fn test_toc_title_with_inline_code() {
    let document =
        renderer().render_document("## Use `Vec<T>` & more", &CrossReferences::empty());
    assert!(document
        .html
        .contains(r#"<h2 id="heading-0">Use <code>Vec&lt;T&gt;</code> & more</h2>"#));
    let toc = document.toc_html.as_deref().unwrap();
    assert!(toc.contains(r##"<a href="#heading-0">Use Vec&lt;T&gt; &amp; more</a>"##));
}

#[test]
fn test_nested_callouts_within_cap() {
    let html = render("> [!NOTE]\n> > [!TIP]\n> > inner");
    assert!(html.contains("callout-note"));
    assert!(html.contains("callout-tip"));
    assert!(html.contains("<p>inner</p>"));
    assert!(!html.contains("callout-too-deep"));
}

#[test]
fn test_callout_depth_cap() {
    let capped = renderer().with_options(RenderOptions {
        max_callout_depth: 1,
        ..RenderOptions::default()
    });
    let html = capped.render("> [!NOTE]\n> > [!TIP]\n> > inner", &CrossReferences::empty());
    assert!(html.contains("callout-note"));
    assert!(html.contains("callout-tip"));
    assert!(html.contains(r#"<pre class="callout-too-deep">inner</pre>"#));

    let none = renderer().with_options(RenderOptions {
        max_callout_depth: 0,
        ..RenderOptions::default()
    });
    let html = none.render("> [!NOTE]\n> **x** <b>", &CrossReferences::empty());
    assert!(html.contains(r#"<pre class="callout-too-deep">**x** &lt;b&gt;</pre>"#));
}

#[test]
fn test_legacy_placeholder_text_is_literal() {
    let markdown = "```\ncode\n```\n\n___CODE_BLOCK_0___";
    let first = render(markdown);
    assert_eq!(first, render(markdown));
    assert!(first.contains("<p>___CODE_BLOCK_0___</p>"));
    assert_eq!(first.matches(r#"class="code-block""#).count(), 1);
}

#[test]
fn test_forged_token_is_neutralized() {
    let markdown = "\u{FDD0}r0:TABLE:0\u{FDD1}\n\n|a|\n|-|";
    let html = render(markdown);
    assert_eq!(html.matches("<table>").count(), 1);
    assert!(html.contains("\u{FFFD}r0:TABLE:0\u{FFFD}"));
}

#[test]
fn test_mixed_placeholder_and_prose_block() {
    let html = render("intro line\n:::bookmark\nhttps://example.com\n:::\noutro line");
    assert!(html.starts_with(
        "<p>intro line</p>\n<a href=\"https://example.com\" class=\"bookmark-card\""
    ));
    assert!(html.ends_with("</a>\n<p>outro line</p>"));
}

#[test]
fn test_inline_formatting_in_paragraph() {
    let html = render("Some **bold**, *em*, ~~del~~, ++u++ and [a link](https://x.dev).\nSecond line");
    assert_eq!(
        html,
        r#"<p>Some <strong>bold</strong>, <em>em</em>, <del>del</del>, <u>u</u> and <a href="https://x.dev" target="_blank" rel="noopener noreferrer">a link</a>.<br>Second line</p>"#
    );
}

#[test]
fn test_image_and_rule() {
    assert_eq!(
        render("![logo](/l.png)\n\n---"),
        "<p><img src=\"/l.png\" alt=\"logo\"></p>\n<hr>"
    );
}

#[test]
fn test_code_content_untouched_by_inline_passes() {
    let html = render("```\n**x** - y\n# not a heading\n```");
    assert!(html.contains("**x** - y\n# not a heading"));
    assert!(!html.contains("<strong>"));
    assert!(!html.contains("<h1"));
}

#[test]
fn test_crlf_input() {
    assert_eq!(render("## A\r\n\r\ntext"), render("## A\n\ntext"));
}

#[test]
fn test_syntect_renderer_highlights() {
    let html = MarkdownRenderer::new().render("```rust\nfn main() {}\n```", &CrossReferences::empty());
    assert!(html.contains(r#"<code class="language-rust">"#));
    assert!(html.contains("hl-"));
}
