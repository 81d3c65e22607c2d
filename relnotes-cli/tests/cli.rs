use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn relnotes(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("relnotes").unwrap();
    cmd.current_dir(dir).env_remove("RELNOTES_PRODUCTION");
    cmd
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[test]
fn init_then_build_writes_metadata() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    relnotes(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("relnotes.yml").exists());

    relnotes(dir.path())
        .args(["build", "--out", "out"])
        .assert()
        .success();

    let releases = read_json(&dir.path().join("out/releases.json"))?;
    let releases = releases.as_array().expect("releases array");
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0]["permalink"], "/releases/v1.0.0");
    assert_eq!(releases[0]["coverLabel"], "1.0");
    assert_eq!(releases[0]["truncated"], true);
    assert_eq!(releases[0]["source"], "@site/releases/v1.0.0.md");
    assert_eq!(releases[0]["tags"][0]["permalink"], "/releases/tags/stable");

    let highlights = read_json(&dir.path().join("out/highlights.json"))?;
    assert_eq!(highlights[0]["date"], "2025-01-01");
    assert_eq!(
        highlights[0]["permalink"],
        "/releases/highlights/2025-01-01-welcome"
    );

    let routes = read_json(&dir.path().join("out/routes.json"))?;
    let kinds: Vec<&str> = routes
        .as_array()
        .expect("routes array")
        .iter()
        .filter_map(|r| r["kind"].as_str())
        .collect();
    assert_eq!(kinds, vec!["release_list", "release", "highlight"]);

    Ok(())
}

#[test]
fn production_flag_drops_drafts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("releases"))?;
    fs::write(dir.path().join("releases/v1.md"), "---\nsort: 1\n---\nOne\n")?;
    fs::write(
        dir.path().join("releases/v2.md"),
        "---\nsort: 2\ndraft: true\n---\nTwo\n",
    )?;

    let assert = relnotes(dir.path()).args(["list", "--json"]).assert().success();
    let value: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["releases"].as_array().map(Vec::len), Some(2));

    let assert = relnotes(dir.path())
        .args(["--production", "list", "--json"])
        .assert()
        .success();
    let value: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    let releases = value["releases"].as_array().expect("releases array");
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0]["id"], "v1");

    Ok(())
}

#[test]
fn show_content_rewrites_links() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    relnotes(dir.path()).arg("init").assert().success();

    relnotes(dir.path())
        .args(["show", "v1.0.0", "--format", "content"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[welcome highlight](/releases/highlights/2025-01-01-welcome)",
        ));

    relnotes(dir.path())
        .args(["show", "/releases/highlights/2025-01-01-welcome"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prevItem\": null"));

    Ok(())
}

#[test]
fn missing_content_directory_builds_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    relnotes(dir.path())
        .args(["build", "--out", "out"])
        .assert()
        .success();

    let releases = read_json(&dir.path().join("out/releases.json"))?;
    assert_eq!(releases, Value::Array(vec![]));

    Ok(())
}

#[test]
fn malformed_front_matter_fails_with_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("releases"))?;
    fs::write(dir.path().join("releases/bad.md"), "---\ntags: [oops\n---\n")?;

    relnotes(dir.path())
        .args(["build", "--out", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.md"));

    assert!(!dir.path().join("out/releases.json").exists());
    Ok(())
}

#[test]
fn unknown_document_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    relnotes(dir.path())
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    Ok(())
}
