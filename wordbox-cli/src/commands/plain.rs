//! Plain-text extraction command.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use wordbox_core::{extract_plain_text, parse_frontmatter};

/// Print the indexable text of a markdown file (front matter excluded)
pub fn plain_text(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let doc = parse_frontmatter(&text);
    println!("{}", extract_plain_text(&doc.body));
    Ok(())
}
