//! CLI command implementations.

pub mod css;
pub mod init;
pub mod list;
pub mod plain;
pub mod render;
pub mod search;

pub use css::print_stylesheet;
pub use init::init_project;
pub use list::{list_documents, ListOptions};
pub use plain::plain_text;
pub use render::{render_document, render_file};
pub use search::{search_site, SearchOptions};

use anyhow::{Context, Result};
use std::path::Path;
use wordbox_core::{Config, ContentStore, MarkdownRenderer};

/// Load the config and open the content store it points at
pub(crate) fn open_site(config_path: &Path) -> Result<(Config, ContentStore)> {
    let config = Config::from_file(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    let store = ContentStore::open(&config);
    Ok((config, store))
}

pub(crate) fn renderer_for(config: &Config) -> MarkdownRenderer {
    MarkdownRenderer::new().with_options(config.render.options())
}
