//! # wordbox-core
//!
//! Core library for the wordbox blog engine.
//!
//! This crate parses front matter, renders markdown with the site's custom
//! blocks to HTML, extracts plain text for indexing, and ranks documents for
//! search. The content store ties these to the files on disk.

pub mod config;
pub mod content;
pub mod frontmatter;
pub mod markdown;
pub mod search;

pub use config::{Config, ConfigError};
pub use content::{ContentError, ContentStore, RenderedPage, SiteReferences};
pub use frontmatter::{
    parse_frontmatter, serialize_frontmatter, FrontMatter, FrontMatterValue, ParsedDocument,
};
pub use markdown::{
    extract_plain_text, render_markdown, CrossReferences, Heading, Highlighter, MarkdownRenderer,
    PlainHighlighter, RenderOptions, RenderedDocument, SyntectHighlighter,
};
pub use search::{NewDocument, SearchDocument, SearchEngine, SearchHit, SharedSearchIndex};
