use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_site(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(root.join("wordbox.yml"), "site:\n  title: \"Test\"\n")?;

    let posts = root.join("content").join("posts");
    let magazines = root.join("content").join("magazines");
    fs::create_dir_all(&posts)?;
    fs::create_dir_all(&magazines)?;

    fs::write(
        posts.join("ownership.md"),
        "---\ntitle: Rust Ownership\ntags: [\"rust\"]\ndate: 2025-01-02\n---\n\nbody\n",
    )?;
    fs::write(
        posts.join("bread.md"),
        "---\ntitle: Bread\ndate: 2025-02-01\ntags: [\"cooking\"]\n---\n\nbody\n",
    )?;
    fs::write(
        posts.join("draft.md"),
        "---\ntitle: Rust Draft\ndate: 2024-12-01\ntags: [\"rust\"]\nlisted: false\n---\n\nbody\n",
    )?;
    fs::write(
        magazines.join("systems.md"),
        "---\ntitle: Systems Reading\ndate: 2025-03-01\n---\n\nlist\n",
    )?;
    Ok(())
}

fn list_json(root: &Path, args: &[&str]) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    #[allow(deprecated)]
    let assert = Command::cargo_bin("wordbox")?
        .current_dir(root)
        .arg("list")
        .args(args)
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    Ok(value.as_array().cloned().unwrap_or_default())
}

#[test]
fn list_posts_hides_unlisted() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    let posts = list_json(dir.path(), &["posts"])?;
    let slugs: Vec<&str> = posts.iter().filter_map(|p| p["slug"].as_str()).collect();
    assert_eq!(slugs, vec!["bread", "ownership"]);
    assert_eq!(posts[1]["url"], "/posts/ownership");
    Ok(())
}

#[test]
fn list_by_tag_includes_unlisted() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    let tagged = list_json(dir.path(), &["post", "--tag", "rust"])?;
    let slugs: Vec<&str> = tagged.iter().filter_map(|p| p["slug"].as_str()).collect();
    assert_eq!(slugs, vec!["ownership", "draft"]);
    Ok(())
}

#[test]
fn list_magazines_default_emoji() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    let magazines = list_json(dir.path(), &["magazines"])?;
    assert_eq!(magazines.len(), 1);
    assert_eq!(magazines[0]["emoji"], "📚");
    assert_eq!(magazines[0]["url"], "/magazines/systems");
    Ok(())
}

#[test]
fn list_text_output_and_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    Command::cargo_bin("wordbox")?
        .current_dir(dir.path())
        .args(["list", "post", "--tag", "baking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No post tagged 'baking'"));

    #[allow(deprecated)]
    Command::cargo_bin("wordbox")?
        .current_dir(dir.path())
        .args(["list", "magazine", "--tag", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("have no tags"));

    #[allow(deprecated)]
    Command::cargo_bin("wordbox")?
        .current_dir(dir.path())
        .args(["list", "videos"])
        .assert()
        .failure();
    Ok(())
}
