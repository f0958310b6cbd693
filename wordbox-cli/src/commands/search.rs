//! Search command implementation.

use super::open_site;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use wordbox_core::{SearchEngine, SearchHit};
use wordbox_types::ContentKind;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub limit: usize,
    pub json: bool,
    pub types: Vec<String>,
}

/// One result as printed with `--json`
#[derive(Debug, Serialize)]
struct SearchResult<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    doc_type: &'a str,
    url: String,
    score: u32,
    snippet: &'a str,
}

impl<'a> From<&'a SearchHit> for SearchResult<'a> {
    fn from(hit: &'a SearchHit) -> Self {
        let doc = &hit.document;
        Self {
            id: &doc.id,
            title: &doc.title,
            doc_type: &doc.doc_type,
            url: document_url(&doc.doc_type, &doc.id),
            score: hit.score,
            snippet: &hit.snippet,
        }
    }
}

fn document_url(doc_type: &str, id: &str) -> String {
    match ContentKind::from_name(doc_type) {
        Some(kind) => format!("{}/{}", kind.url_prefix(), id),
        None => format!("/{}", id),
    }
}

/// Rebuild the index from disk and search it
pub fn search_site(config_path: &Path, query: &str, opts: SearchOptions) -> Result<()> {
    let (_config, store) = open_site(config_path)?;

    let mut engine = SearchEngine::new();
    engine.rebuild(store.search_documents());

    let results = filter_by_type(engine.search(query), &opts.types);

    if opts.json {
        let json_results: Vec<SearchResult<'_>> =
            results.iter().take(opts.limit).map(SearchResult::from).collect();
        println!("{}", serde_json::to_string_pretty(&json_results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("\n🔍 Found {} results for '{}':\n", results.len(), query);
    for hit in results.iter().take(opts.limit) {
        print_search_result(hit);
    }
    if results.len() > opts.limit {
        println!("\n  ... and {} more results", results.len() - opts.limit);
    }

    Ok(())
}

fn print_search_result(hit: &SearchHit) {
    // [post] Rust Ownership (19)
    //   /posts/ownership
    //   ...the <mark>ownership</mark> model...
    let doc = &hit.document;
    println!("[{}] {} {} ({})", doc.doc_type, doc.emoji, doc.title, hit.score);
    println!("  {}", document_url(&doc.doc_type, &doc.id));
    println!("  {}", hit.snippet);
    println!();
}

/// Keep hits whose document type is in `types` (all hits when empty).
///
/// Names go through [`ContentKind::from_name`], so `posts` and `post` match
/// alike; unknown names match nothing.
fn filter_by_type(hits: Vec<SearchHit>, types: &[String]) -> Vec<SearchHit> {
    if types.is_empty() {
        return hits;
    }
    let wanted: Vec<ContentKind> = types
        .iter()
        .filter_map(|t| {
            let kind = ContentKind::from_name(t.trim());
            if kind.is_none() {
                tracing::warn!("Ignoring unknown document type '{}'", t);
            }
            kind
        })
        .collect();
    hits.into_iter()
        .filter(|hit| {
            ContentKind::from_name(&hit.document.doc_type)
                .is_some_and(|kind| wanted.contains(&kind))
        })
        .collect()
}
