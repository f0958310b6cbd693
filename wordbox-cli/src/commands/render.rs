//! Render commands.

use super::{open_site, renderer_for};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use wordbox_core::content::parse_kind;
use wordbox_core::{parse_frontmatter, MarkdownRenderer, SiteReferences};

/// Render a stored document by kind and slug
pub fn render_document(config_path: &Path, kind: &str, slug: &str, json: bool) -> Result<()> {
    let (config, store) = open_site(config_path)?;
    let kind = parse_kind(kind)?;
    let renderer = renderer_for(&config);

    let page = store
        .render(kind, slug, &renderer)
        .with_context(|| format!("Failed to render {} {}", kind, slug))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        match &page.document.toc_html {
            Some(toc) => println!("{toc}\n{}", page.document.html),
            None => println!("{}", page.document.html),
        }
    }
    Ok(())
}

/// Render an arbitrary markdown file.
///
/// Cross-references come from the site when the config file exists;
/// otherwise every card block renders as not found.
pub fn render_file(config_path: &Path, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let doc = parse_frontmatter(&text);

    let (renderer, references) = if config_path.exists() {
        let (config, store) = open_site(config_path)?;
        (renderer_for(&config), store.cross_references())
    } else {
        tracing::debug!("No config at {:?}; rendering without cross-references", config_path);
        (MarkdownRenderer::new(), SiteReferences::default())
    };

    println!("{}", renderer.render(&doc.body, &references.refs()));
    Ok(())
}
