//! File-backed content store.
//!
//! One directory per [`ContentKind`], one `<slug>.md` file per document.
//! Nothing is cached: every call re-reads the files it needs.

use crate::config::Config;
use crate::frontmatter::{parse_frontmatter, serialize_frontmatter, FrontMatter, ParsedDocument};
use crate::markdown::{CrossReferences, MarkdownRenderer, RenderedDocument};
use crate::search::NewDocument;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;
use wordbox_types::{ContentKind, DictionarySummary, MagazineSummary, PostSummary};

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_EMOJI: &str = "📄";
const DEFAULT_MAGAZINE_EMOJI: &str = "📚";

fn default_emoji(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Magazine => DEFAULT_MAGAZINE_EMOJI,
        _ => DEFAULT_EMOJI,
    }
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown content kind: {0}")]
    UnknownKind(String),

    #[error("{kind} not found: {slug}")]
    NotFound { kind: ContentKind, slug: String },

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),
}

impl ContentError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        ContentError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Parse a kind name as given on a command line or in a URL
pub fn parse_kind(name: &str) -> Result<ContentKind, ContentError> {
    ContentKind::from_name(name).ok_or_else(|| ContentError::UnknownKind(name.to_string()))
}

/// Owned cross-reference lists, borrowed as [`CrossReferences`] per render
#[derive(Debug, Clone, Default)]
pub struct SiteReferences {
    pub posts: Vec<PostSummary>,
    pub magazines: Vec<MagazineSummary>,
    pub dictionary: Vec<DictionarySummary>,
}

impl SiteReferences {
    pub fn refs(&self) -> CrossReferences<'_> {
        CrossReferences {
            posts: &self.posts,
            magazines: &self.magazines,
            dictionary: &self.dictionary,
        }
    }
}

/// A rendered document together with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub kind: ContentKind,
    pub slug: String,
    pub metadata: FrontMatter,
    #[serde(flatten)]
    pub document: RenderedDocument,
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    dirs: Vec<(ContentKind, PathBuf)>,
}

impl ContentStore {
    pub fn open(config: &Config) -> Self {
        let dirs = ContentKind::ALL
            .iter()
            .map(|kind| (*kind, config.kind_dir(*kind)))
            .collect();
        Self { dirs }
    }

    pub fn dir(&self, kind: ContentKind) -> &Path {
        self.dirs
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, dir)| dir.as_path())
            .unwrap_or_else(|| Path::new(kind.dir_name()))
    }

    fn path_for(&self, kind: ContentKind, slug: &str) -> Result<PathBuf, ContentError> {
        let valid = !slug.is_empty()
            && slug != "."
            && slug != ".."
            && !slug.contains(['/', '\\'])
            && !slug.starts_with('.');
        if !valid {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }
        Ok(self.dir(kind).join(format!("{slug}.md")))
    }

    /// All `(slug, document)` pairs of a kind, in file-name order
    fn read_all(&self, kind: ContentKind) -> Vec<(String, ParsedDocument)> {
        let dir = self.dir(kind);
        if !dir.is_dir() {
            tracing::debug!("No {} directory at {:?}", kind, dir);
            return Vec::new();
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            match fs::read_to_string(path) {
                Ok(text) => documents.push((slug, parse_frontmatter(&text))),
                Err(e) => tracing::warn!("Skipping unreadable file {:?}: {}", path, e),
            }
        }

        tracing::debug!("Read {} {} files from {:?}", documents.len(), kind, dir);
        documents
    }

    /// Post or topic summaries, newest first
    pub fn list(&self, kind: ContentKind, only_listed: bool) -> Vec<PostSummary> {
        let mut posts: Vec<PostSummary> = self
            .read_all(kind)
            .into_iter()
            .filter(|(_, doc)| !only_listed || doc.metadata.is_listed())
            .map(|(slug, doc)| post_summary(slug, &doc.metadata))
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Posts or topics carrying `tag` exactly, newest first.
    ///
    /// Unlisted documents are included, the same as on a tag page.
    pub fn list_by_tag(&self, kind: ContentKind, tag: &str) -> Vec<PostSummary> {
        self.list(kind, false)
            .into_iter()
            .filter(|post| post.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Magazine summaries, newest first
    pub fn list_magazines(&self, only_listed: bool) -> Vec<MagazineSummary> {
        let mut magazines: Vec<MagazineSummary> = self
            .read_all(ContentKind::Magazine)
            .into_iter()
            .filter(|(_, doc)| !only_listed || doc.metadata.is_listed())
            .map(|(slug, doc)| {
                let meta = &doc.metadata;
                MagazineSummary {
                    slug,
                    title: text_or(meta, "title", DEFAULT_TITLE),
                    emoji: text_or(meta, "emoji", DEFAULT_MAGAZINE_EMOJI),
                    date: text_or(meta, "date", ""),
                    description: text_or(meta, "description", ""),
                    articles: meta.get_list("articles").to_vec(),
                    listed: meta.is_listed(),
                }
            })
            .collect();
        magazines.sort_by(|a, b| b.date.cmp(&a.date));
        magazines
    }

    /// Dictionary entries in slug order
    pub fn list_dictionary(&self, only_listed: bool) -> Vec<DictionarySummary> {
        self.read_all(ContentKind::Dictionary)
            .into_iter()
            .filter(|(_, doc)| !only_listed || doc.metadata.is_listed())
            .map(|(slug, doc)| {
                let meta = &doc.metadata;
                DictionarySummary {
                    slug,
                    title: text_or(meta, "title", DEFAULT_TITLE),
                    emoji: text_or(meta, "emoji", DEFAULT_EMOJI),
                    reading: text_or(meta, "reading", ""),
                    description: text_or(meta, "description", ""),
                    listed: meta.is_listed(),
                }
            })
            .collect()
    }

    /// Lookup lists for card blocks; unlisted documents are still resolvable
    pub fn cross_references(&self) -> SiteReferences {
        SiteReferences {
            posts: self.list(ContentKind::Post, false),
            magazines: self.list_magazines(false),
            dictionary: self.list_dictionary(false),
        }
    }

    pub fn load(&self, kind: ContentKind, slug: &str) -> Result<ParsedDocument, ContentError> {
        let path = self.path_for(kind, slug)?;
        if !path.is_file() {
            return Err(ContentError::NotFound {
                kind,
                slug: slug.to_string(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        Ok(parse_frontmatter(&text))
    }

    pub fn render(
        &self,
        kind: ContentKind,
        slug: &str,
        renderer: &MarkdownRenderer,
    ) -> Result<RenderedPage, ContentError> {
        let doc = self.load(kind, slug)?;
        let references = self.cross_references();
        let document = renderer.render_document(&doc.body, &references.refs());
        Ok(RenderedPage {
            kind,
            slug: slug.to_string(),
            metadata: doc.metadata,
            document,
        })
    }

    /// Index inputs for every listed post, topic and magazine
    pub fn search_documents(&self) -> Vec<NewDocument> {
        [ContentKind::Post, ContentKind::Topic, ContentKind::Magazine]
            .into_iter()
            .flat_map(|kind| {
                self.read_all(kind)
                    .into_iter()
                    .filter(|(_, doc)| doc.metadata.is_listed())
                    .map(move |(slug, doc)| NewDocument {
                        title: text_or(&doc.metadata, "title", DEFAULT_TITLE),
                        emoji: text_or(&doc.metadata, "emoji", default_emoji(kind)),
                        date: text_or(&doc.metadata, "date", ""),
                        tags: doc.metadata.get_list("tags").to_vec(),
                        doc_type: kind.as_str().to_string(),
                        content: doc.body,
                        id: slug,
                    })
            })
            .collect()
    }

    /// Write a document; an existing file is replaced
    pub fn save(
        &self,
        kind: ContentKind,
        slug: &str,
        metadata: &FrontMatter,
        body: &str,
    ) -> Result<PathBuf, ContentError> {
        let path = self.path_for(kind, slug)?;
        let dir = self.dir(kind);
        fs::create_dir_all(dir).map_err(|e| ContentError::io(dir, e))?;
        fs::write(&path, serialize_frontmatter(metadata, body))
            .map_err(|e| ContentError::io(&path, e))?;
        tracing::info!("Saved {} {}", kind, slug);
        Ok(path)
    }
}

fn text_or(meta: &FrontMatter, key: &str, default: &str) -> String {
    meta.get_str(key)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn post_summary(slug: String, meta: &FrontMatter) -> PostSummary {
    PostSummary {
        slug,
        title: text_or(meta, "title", DEFAULT_TITLE),
        emoji: text_or(meta, "emoji", DEFAULT_EMOJI),
        date: text_or(meta, "date", ""),
        tags: meta.get_list("tags").to_vec(),
        quicklook: text_or(meta, "quicklook", ""),
        listed: meta.is_listed(),
    }
}
