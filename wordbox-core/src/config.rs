//! Configuration parsing and management.

use crate::markdown::highlight::DEFAULT_THEME;
use crate::markdown::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wordbox_types::ContentKind;

/// Name of the config file looked up by default
pub const CONFIG_FILE_NAME: &str = "wordbox.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the wordbox.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Content root plus one sub-directory per content kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub content: PathBuf,
    pub posts: PathBuf,
    pub topics: PathBuf,
    pub magazines: PathBuf,
    pub dictionary: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            posts: PathBuf::from(ContentKind::Post.dir_name()),
            topics: PathBuf::from(ContentKind::Topic.dir_name()),
            magazines: PathBuf::from(ContentKind::Magazine.dir_name()),
            dictionary: PathBuf::from(ContentKind::Dictionary.dir_name()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub max_callout_depth: usize,
    pub toc: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            max_callout_depth: options.max_callout_depth,
            toc: options.toc,
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            max_callout_depth: self.max_callout_depth,
            toc: self.toc,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme used for the code stylesheet
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// In-memory config with every optional section at its default
    pub fn default_for(title: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                description: None,
            },
            paths: PathsConfig::default(),
            render: RenderConfig::default(),
            highlight: HighlightConfig::default(),
            config_path: None,
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Directory the config was loaded from, if it came from a file
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get the content root, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Directory holding documents of `kind`
    pub fn kind_dir(&self, kind: ContentKind) -> PathBuf {
        let sub = match kind {
            ContentKind::Post => &self.paths.posts,
            ContentKind::Topic => &self.paths.topics,
            ContentKind::Magazine => &self.paths.magazines,
            ContentKind::Dictionary => &self.paths.dictionary,
        };
        if sub.is_absolute() {
            sub.clone()
        } else {
            self.content_dir().join(sub)
        }
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_deref().and_then(Path::parent) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
