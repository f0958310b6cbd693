//! Shared types for wordbox
//!
//! This crate provides the content kinds and the summary records that the
//! page-serving layer hands to the renderer so that `:::article`,
//! `:::magazine` and `:::dictionary` blocks can resolve a slug to a card.

use serde::{Deserialize, Serialize};

/// Kind of content file, one directory per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Topic,
    Magazine,
    Dictionary,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Post,
        ContentKind::Topic,
        ContentKind::Magazine,
        ContentKind::Dictionary,
    ];

    /// Parse a kind from its singular or plural name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "post" | "posts" => Some(ContentKind::Post),
            "topic" | "topics" => Some(ContentKind::Topic),
            "magazine" | "magazines" => Some(ContentKind::Magazine),
            "dictionary" | "dict" => Some(ContentKind::Dictionary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Topic => "topic",
            ContentKind::Magazine => "magazine",
            ContentKind::Dictionary => "dictionary",
        }
    }

    /// Default directory name under the content root
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Post => "posts",
            ContentKind::Topic => "topics",
            ContentKind::Magazine => "magazines",
            ContentKind::Dictionary => "dictionary",
        }
    }

    /// URL prefix the page-serving layer mounts this kind under
    pub fn url_prefix(&self) -> &'static str {
        match self {
            ContentKind::Post => "/posts",
            ContentKind::Topic => "/topics",
            ContentKind::Magazine => "/magazines",
            ContentKind::Dictionary => "/dictionary",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a post or topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub emoji: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// One-line teaser shown on cards instead of the date
    #[serde(default)]
    pub quicklook: String,
    #[serde(default = "default_listed")]
    pub listed: bool,
}

/// Summary of a magazine (a curated list of post slugs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagazineSummary {
    pub slug: String,
    pub title: String,
    pub emoji: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub articles: Vec<String>,
    #[serde(default = "default_listed")]
    pub listed: bool,
}

/// Summary of a dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySummary {
    pub slug: String,
    pub title: String,
    pub emoji: String,
    /// Pronunciation hint, omitted from the card when empty
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_listed")]
    pub listed: bool,
}

fn default_listed() -> bool {
    true
}
