//! List command implementation.

use super::open_site;
use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;
use wordbox_core::content::parse_kind;
use wordbox_types::ContentKind;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub tag: Option<String>,
    pub json: bool,
}

/// One listing row as printed with `--json`
#[derive(Debug, Serialize)]
struct ListEntry {
    slug: String,
    title: String,
    emoji: String,
    date: String,
    url: String,
}

/// Print the public listing of a kind, or every document carrying a tag
pub fn list_documents(config_path: &Path, kind: &str, opts: ListOptions) -> Result<()> {
    let (_config, store) = open_site(config_path)?;
    let kind = parse_kind(kind)?;
    let url = |slug: &str| format!("{}/{}", kind.url_prefix(), slug);

    let entries: Vec<ListEntry> = match (kind, opts.tag.as_deref()) {
        (ContentKind::Post | ContentKind::Topic, Some(tag)) => store
            .list_by_tag(kind, tag)
            .into_iter()
            .map(|p| ListEntry {
                url: url(&p.slug),
                slug: p.slug,
                title: p.title,
                emoji: p.emoji,
                date: p.date,
            })
            .collect(),
        (_, Some(_)) => bail!("{} documents have no tags", kind),
        (ContentKind::Post | ContentKind::Topic, None) => store
            .list(kind, true)
            .into_iter()
            .map(|p| ListEntry {
                url: url(&p.slug),
                slug: p.slug,
                title: p.title,
                emoji: p.emoji,
                date: p.date,
            })
            .collect(),
        (ContentKind::Magazine, None) => store
            .list_magazines(true)
            .into_iter()
            .map(|m| ListEntry {
                url: url(&m.slug),
                slug: m.slug,
                title: m.title,
                emoji: m.emoji,
                date: m.date,
            })
            .collect(),
        (ContentKind::Dictionary, None) => store
            .list_dictionary(true)
            .into_iter()
            .map(|d| ListEntry {
                url: url(&d.slug),
                slug: d.slug,
                title: d.title,
                emoji: d.emoji,
                date: String::new(),
            })
            .collect(),
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        match &opts.tag {
            Some(tag) => println!("No {} tagged '{}'", kind, tag),
            None => println!("No {} documents", kind),
        }
        return Ok(());
    }

    for entry in &entries {
        if entry.date.is_empty() {
            println!("{} {}  {}", entry.emoji, entry.title, entry.url);
        } else {
            println!("{} {} ({})  {}", entry.emoji, entry.title, entry.date, entry.url);
        }
    }
    Ok(())
}
