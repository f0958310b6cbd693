//! Front matter parsing from markdown files.
//!
//! A document may open with a block of `key: value` lines fenced by `---`
//! lines. Parsing never fails: a missing or malformed block simply yields
//! empty metadata and the full text as the body.

use serde::ser::{Serialize, Serializer};

/// Keys whose values are JSON arrays of strings
const LIST_KEYS: [&str; 2] = ["tags", "articles"];

const DELIMITER: &str = "---\n";
const CLOSING: &str = "\n---\n";

/// A typed front matter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl Serialize for FrontMatterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FrontMatterValue::Text(text) => serializer.serialize_str(text),
            FrontMatterValue::Bool(b) => serializer.serialize_bool(*b),
            FrontMatterValue::List(items) => items.serialize(serializer),
        }
    }
}

/// Insertion-ordered metadata map.
///
/// Unknown keys are kept as-is so a document can be saved back without
/// losing fields. Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, FrontMatterValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FrontMatterValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// String value of `key`, if it is a text field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(FrontMatterValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(FrontMatterValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// List value of `key`; absent or non-list fields read as empty
    pub fn get_list(&self, key: &str) -> &[String] {
        match self.get(key) {
            Some(FrontMatterValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Whether the document shows up in listings (`listed: false` hides it)
    pub fn is_listed(&self) -> bool {
        self.get_bool("listed") != Some(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontMatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

/// Metadata plus the markdown body that follows it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub metadata: FrontMatter,
    pub body: String,
}

/// Parse front matter from markdown content
///
/// Line endings are normalized to `\n` first. If the text does not open with
/// a `---` fenced block, the metadata is empty and the body is the whole
/// (normalized) text.
///
/// # Example
///
/// ```
/// use wordbox_core::frontmatter::parse_frontmatter;
///
/// let doc = parse_frontmatter("---\ntitle: My Post\ntags: [\"rust\"]\n---\n\n# Hello\n");
/// assert_eq!(doc.metadata.get_str("title"), Some("My Post"));
/// assert_eq!(doc.metadata.get_list("tags"), ["rust".to_string()]);
/// assert_eq!(doc.body, "# Hello\n");
/// ```
pub fn parse_frontmatter(text: &str) -> ParsedDocument {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let Some(rest) = normalized.strip_prefix(DELIMITER) else {
        return ParsedDocument {
            metadata: FrontMatter::new(),
            body: normalized,
        };
    };

    let Some(close) = rest.find(CLOSING) else {
        return ParsedDocument {
            metadata: FrontMatter::new(),
            body: normalized,
        };
    };

    let block = &rest[..close];
    let after = &rest[close + CLOSING.len()..];
    // The save path writes one blank line between the block and the body
    let body = after.strip_prefix('\n').unwrap_or(after);

    ParsedDocument {
        metadata: parse_block(block),
        body: body.to_string(),
    }
}

fn parse_block(block: &str) -> FrontMatter {
    let mut metadata = FrontMatter::new();

    for line in block.split('\n') {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }

        let typed = if LIST_KEYS.contains(&key) {
            FrontMatterValue::List(parse_list(key, value))
        } else if value == "true" {
            FrontMatterValue::Bool(true)
        } else if value == "false" {
            FrontMatterValue::Bool(false)
        } else {
            FrontMatterValue::Text(value.to_string())
        };
        metadata.insert(key, typed);
    }

    metadata
}

fn parse_list(key: &str, value: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(value) {
        Ok(items) => items,
        Err(e) => {
            tracing::debug!("Front matter field `{}` is not a string array: {}", key, e);
            Vec::new()
        }
    }
}

/// Serialize metadata and body back into a content file.
///
/// Lists are written as JSON arrays and booleans as `true`/`false`, which is
/// exactly what [`parse_frontmatter`] reads back. Empty metadata writes the
/// body alone.
pub fn serialize_frontmatter(metadata: &FrontMatter, body: &str) -> String {
    if metadata.is_empty() {
        return body.to_string();
    }

    let mut out = String::from(DELIMITER);
    for (key, value) in metadata.iter() {
        let rendered = match value {
            FrontMatterValue::Text(text) => text.clone(),
            FrontMatterValue::Bool(b) => b.to_string(),
            FrontMatterValue::List(items) => {
                serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
            }
        };
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&rendered);
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_frontmatter() {
        let content = r#"---
title: Test Post
date: 2025-01-01
emoji: 🦀
tags: ["rust", "memory"]
listed: true
---

# Hello World

This is the content."#;

        let doc = parse_frontmatter(content);
        assert_eq!(doc.metadata.get_str("title"), Some("Test Post"));
        assert_eq!(doc.metadata.get_str("date"), Some("2025-01-01"));
        assert_eq!(doc.metadata.get_str("emoji"), Some("🦀"));
        assert_eq!(doc.metadata.get_list("tags"), ["rust", "memory"]);
        assert_eq!(doc.metadata.get_bool("listed"), Some(true));
        assert!(doc.body.starts_with("# Hello World"));
        assert!(doc.body.contains("This is the content."));
    }

    #[test]
    fn test_parse_no_frontmatter() {
        let content = "# Just Content\n\nNo frontmatter here.";
        let doc = parse_frontmatter(content);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let content = "---\ntitle: Never closed\n\nBody";
        let doc = parse_frontmatter(content);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_crlf_normalized() {
        let doc = parse_frontmatter("---\r\ntitle: Windows\r\n---\r\n\r\nLine one\r\nLine two");
        assert_eq!(doc.metadata.get_str("title"), Some("Windows"));
        assert_eq!(doc.body, "Line one\nLine two");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let doc = parse_frontmatter("---\nsource: https://example.com/a\n---\nBody");
        assert_eq!(doc.metadata.get_str("source"), Some("https://example.com/a"));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_skips_lines_without_key_or_value() {
        let doc = parse_frontmatter("---\njust text\n: orphan\nempty:\ntitle: Kept\n---\n\nBody");
        assert_eq!(doc.metadata.len(), 1);
        assert_eq!(doc.metadata.get_str("title"), Some("Kept"));
    }

    #[test]
    fn test_invalid_list_becomes_empty() {
        let doc = parse_frontmatter("---\ntags: [unclosed\narticles: \"single\"\n---\n\nBody");
        assert_eq!(doc.metadata.get("tags"), Some(&FrontMatterValue::List(vec![])));
        assert_eq!(
            doc.metadata.get("articles"),
            Some(&FrontMatterValue::List(vec![]))
        );
    }

    #[test]
    fn test_boolean_is_case_sensitive() {
        let doc = parse_frontmatter("---\nlisted: false\ndraft: True\n---\n\nBody");
        assert_eq!(doc.metadata.get_bool("listed"), Some(false));
        assert_eq!(doc.metadata.get_str("draft"), Some("True"));
        assert!(!doc.metadata.is_listed());
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = parse_frontmatter("---\ntitle: First\nemoji: 📄\ntitle: Second\n---\n\nBody");
        assert_eq!(doc.metadata.get_str("title"), Some("Second"));
        let keys: Vec<&str> = doc.metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["title", "emoji"]);
    }

    #[test]
    fn test_round_trip() {
        let mut metadata = FrontMatter::new();
        metadata.insert("title", FrontMatterValue::Text("Round Trip".into()));
        metadata.insert("date", FrontMatterValue::Text("2025-03-04".into()));
        metadata.insert(
            "tags",
            FrontMatterValue::List(vec!["a \"quoted\" tag".into(), "b".into()]),
        );
        metadata.insert("listed", FrontMatterValue::Bool(false));
        metadata.insert("custom_field", FrontMatterValue::Text("kept".into()));
        let body = "# Heading\n\nParagraph with --- dashes.\n";

        let serialized = serialize_frontmatter(&metadata, body);
        let doc = parse_frontmatter(&serialized);
        assert_eq!(doc.metadata, metadata);
        assert_eq!(doc.body, body);
    }

    #[test]
    fn test_round_trip_empty_metadata() {
        let body = "Only a body";
        let doc = parse_frontmatter(&serialize_frontmatter(&FrontMatter::new(), body));
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, body);
    }

    #[test]
    fn test_serializes_as_json_map() {
        let doc = parse_frontmatter("---\ntitle: T\ntags: [\"x\"]\nlisted: true\n---\n\n");
        let json = serde_json::to_string(&doc.metadata).unwrap();
        assert_eq!(json, r#"{"title":"T","tags":["x"],"listed":true}"#);
    }
}
