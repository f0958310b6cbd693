//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use wordbox_core::config::CONFIG_FILE_NAME;
use wordbox_core::{Config, ContentStore, FrontMatter, FrontMatterValue};
use wordbox_types::ContentKind;

/// Initialize a new wordbox site
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    let config_path = write_config(root)?;
    let config = Config::from_file(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    scaffold_content(&config)?;

    println!("✓ wordbox initialized in {:?}", root);
    println!("  - Edit {} to customize site metadata", CONFIG_FILE_NAME);
    println!("  - Write posts in content/posts/");
    Ok(())
}

fn write_config(root: &Path) -> Result<std::path::PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!("{} already exists at {:?}", CONFIG_FILE_NAME, config_path);
        return Ok(config_path);
    }

    let yaml = Config::default_for("My wordbox").to_yaml()?;
    fs::write(&config_path, yaml)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(config_path)
}

fn scaffold_content(config: &Config) -> Result<()> {
    for kind in ContentKind::ALL {
        let dir = config.kind_dir(kind);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let store = ContentStore::open(config);
    let sample = store.dir(ContentKind::Post).join("welcome.md");
    if !sample.exists() {
        let (metadata, body) = sample_post();
        let path = store.save(ContentKind::Post, "welcome", &metadata, &body)?;
        println!("Created {:?}", path);
    }

    Ok(())
}

fn sample_post() -> (FrontMatter, String) {
    let mut metadata = FrontMatter::new();
    metadata.insert("title", FrontMatterValue::Text("Welcome to wordbox".into()));
    metadata.insert("date", FrontMatterValue::Text("2025-01-01".into()));
    metadata.insert("emoji", FrontMatterValue::Text("👋".into()));
    metadata.insert("tags", FrontMatterValue::List(vec!["wordbox".into(), "intro".into()]));
    metadata.insert("listed", FrontMatterValue::Bool(true));

    let body = r#"## Getting started

Posts live in `content/posts/`. Render one with:

```bash
wordbox render post welcome
```

> [!TIP]
> Callouts, tables, task lists and `:::bookmark` cards all work here.

- [x] Install wordbox
- [ ] Write the first post
"#;

    (metadata, body.to_string())
}
