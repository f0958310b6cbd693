//! Full-text search over posts, topics and magazines.
//!
//! The engine is a flat list rescanned on every query. Scores are additive
//! per query term:
//!
//! | match                         | points |
//! |-------------------------------|--------|
//! | title contains term           | 10     |
//! | title equals term             | +5     |
//! | any tag contains term         | 5      |
//! | some tag equals term          | +3     |
//! | each occurrence in body text  | 1      |

use crate::markdown::{extract_plain_text, html_escape};
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SNIPPET_MAX_CHARS: usize = 120;
const SNIPPET_CONTEXT_CHARS: usize = 40;
const SNIPPET_WORD_BACKOFF: usize = 10;

/// A document as handed to the index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub id: String,
    pub title: String,
    /// Raw markdown body
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub date: String,
}

/// An indexed document with its precomputed search fields
#[derive(Debug, Clone, Serialize)]
pub struct SearchDocument {
    pub id: String,
    pub title: String,
    #[serde(skip)]
    pub content: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub emoji: String,
    pub date: String,
    #[serde(skip)]
    pub plain_text: String,
    #[serde(skip)]
    normalized_title: String,
    #[serde(skip)]
    normalized_tags: Vec<String>,
    #[serde(skip)]
    normalized_text: String,
}

impl From<NewDocument> for SearchDocument {
    fn from(doc: NewDocument) -> Self {
        let plain_text = extract_plain_text(&doc.content);
        Self {
            normalized_title: doc.title.to_lowercase(),
            normalized_tags: doc.tags.iter().map(|t| t.to_lowercase()).collect(),
            normalized_text: plain_text.to_lowercase(),
            plain_text,
            id: doc.id,
            title: doc.title,
            content: doc.content,
            tags: doc.tags,
            doc_type: doc.doc_type,
            emoji: doc.emoji,
            date: doc.date,
        }
    }
}

impl SearchDocument {
    fn score(&self, terms: &[&str]) -> u32 {
        terms.iter().map(|term| self.score_term(term)).sum()
    }

    fn score_term(&self, term: &str) -> u32 {
        let mut score = 0;

        if self.normalized_title.contains(term) {
            score += 10;
            if self.normalized_title == term {
                score += 5;
            }
        }

        if self.normalized_tags.iter().any(|tag| tag.contains(term)) {
            score += 5;
            if self.normalized_tags.iter().any(|tag| tag == term) {
                score += 3;
            }
        }

        score + self.normalized_text.matches(term).count() as u32
    }
}

/// One ranked result
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub document: SearchDocument,
    pub score: u32,
    /// HTML-safe excerpt with query terms wrapped in `<mark>`
    pub snippet: String,
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    documents: Vec<SearchDocument>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append without any check on `id`; see [`SearchEngine::rebuild`]
    pub fn add_document(&mut self, doc: NewDocument) {
        self.documents.push(doc.into());
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Replace the whole document set
    pub fn rebuild(&mut self, docs: impl IntoIterator<Item = NewDocument>) {
        self.clear();
        for doc in docs {
            self.add_document(doc);
        }
        tracing::info!("Rebuilt search index with {} documents", self.documents.len());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Ranked hits, best first; equal scores keep insertion order
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let normalized = query.to_lowercase();
        let terms: Vec<&str> = normalized.split_whitespace().collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let highlighter = term_highlighter(&terms);
        let mut hits: Vec<SearchHit> = self
            .documents
            .iter()
            .filter_map(|doc| {
                let score = doc.score(&terms);
                (score > 0).then(|| SearchHit {
                    document: doc.clone(),
                    score,
                    snippet: snippet(&doc.plain_text, terms[0], highlighter.as_ref()),
                })
            })
            .collect();

        // sort_by is stable
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits
    }
}

/// Character offset of the first case-insensitive occurrence of `term`
fn find_term(chars: &[char], term: &str) -> Option<usize> {
    let lowered: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let needle: Vec<char> = term.chars().collect();
    if needle.is_empty() || needle.len() > lowered.len() {
        return None;
    }
    lowered.windows(needle.len()).position(|w| w == needle.as_slice())
}

/// Excerpt of `text` around the first occurrence of `first_term`
fn snippet(text: &str, first_term: &str, highlighter: Option<&Regex>) -> String {
    if text.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let raw = match find_term(&chars, first_term) {
        None if chars.len() > SNIPPET_MAX_CHARS => {
            let head: String = chars[..SNIPPET_MAX_CHARS].iter().collect();
            format!("{head}...")
        }
        None => text.to_string(),
        Some(index) => {
            let mut start = index.saturating_sub(SNIPPET_CONTEXT_CHARS);
            let end = chars.len().min(start + SNIPPET_MAX_CHARS);

            if start > 0 {
                // last space at or before `start`, if close enough
                let prev_space = chars[..=start].iter().rposition(|c| *c == ' ');
                match prev_space {
                    Some(pos) if pos + SNIPPET_WORD_BACKOFF > start => start = pos + 1,
                    None if start < SNIPPET_WORD_BACKOFF - 1 => start = 0,
                    _ => {}
                }
            }

            let window: String = chars[start.min(end)..end].iter().collect();
            let prefix = if start > 0 { "..." } else { "" };
            let suffix = if end < chars.len() { "..." } else { "" };
            format!("{prefix}{window}{suffix}")
        }
    };

    let escaped = html_escape(&raw);
    match highlighter {
        Some(regex) => highlight_terms(&escaped, regex),
        None => escaped,
    }
}

/// One case-insensitive pattern matching any term (longest first) or an
/// entity produced by escaping, so highlights never split an entity
fn term_highlighter(terms: &[&str]) -> Option<Regex> {
    let mut escaped: Vec<String> = terms.iter().map(|t| html_escape(t)).collect();
    escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    escaped.dedup();

    let alternation = escaped
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?P<term>{alternation})|&(?:amp|lt|gt|quot|#39);");

    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::debug!("Skipping snippet highlighting: {}", err);
            None
        }
    }
}

fn highlight_terms(snippet: &str, regex: &Regex) -> String {
    regex
        .replace_all(snippet, |caps: &regex::Captures<'_>| match caps.name("term") {
            Some(term) => format!("<mark>{}</mark>", term.as_str()),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// A search index that can be rebuilt while other threads query it.
///
/// Queries take a snapshot of the current engine and never block a rebuild
/// for longer than the pointer swap.
#[derive(Debug, Default)]
pub struct SharedSearchIndex {
    current: RwLock<Arc<SearchEngine>>,
}

impl SharedSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&self, docs: impl IntoIterator<Item = NewDocument>) {
        let mut engine = SearchEngine::new();
        engine.rebuild(docs);
        *self.current.write() = Arc::new(engine);
    }

    pub fn snapshot(&self) -> Arc<SearchEngine> {
        self.current.read().clone()
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.snapshot().search(query)
    }
}
