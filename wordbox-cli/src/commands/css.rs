//! Stylesheet command implementation.

use anyhow::{bail, Result};
use std::path::Path;
use wordbox_core::markdown::highlight::{stylesheet, DEFAULT_THEME};
use wordbox_core::Config;

/// Print CSS for the highlighter's class names
pub fn print_stylesheet(config_path: &Path, theme: Option<&str>) -> Result<()> {
    let configured = if theme.is_none() && config_path.exists() {
        Some(Config::from_file(config_path)?.highlight.theme)
    } else {
        None
    };
    let theme = theme
        .map(str::to_string)
        .or(configured)
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    match stylesheet(&theme) {
        Some(css) => {
            print!("{css}");
            Ok(())
        }
        None => bail!("Failed to build a stylesheet for theme '{}'", theme),
    }
}
