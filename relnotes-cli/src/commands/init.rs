//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# relnotes configuration
base_url: /

releases:
  path: releases
  route_base_path: releases
  include: ["**/*.md", "**/*.mdx"]
  exclude: ["**/_*.{md,mdx}", "**/_*/**"]
  truncate_marker: "<!--\\s*(truncate)\\s*-->"
  order: ascending
  highlights:
    directory: highlights
    list_page: false
"#;

/// Initialize a new release notes directory
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_releases(root)?;

    println!("✓ relnotes initialized in {:?}", root);
    println!("  - Edit relnotes.yml to change routes and ordering");
    println!("  - Write releases in releases/ and highlights in releases/highlights/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("relnotes.yml");
    if config_path.exists() {
        println!("relnotes.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_releases(root: &Path) -> Result<()> {
    let releases = root.join("releases");
    let highlights = releases.join("highlights");

    for dir in [&releases, &highlights] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    write_sample(&releases.join("v1.0.0.md"), SAMPLE_RELEASE)?;
    write_sample(&highlights.join("2025-01-01-welcome.md"), SAMPLE_HIGHLIGHT)?;

    Ok(())
}

fn write_sample(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {:?}", path);
    Ok(())
}

const SAMPLE_RELEASE: &str = r#"---
id: v1.0.0
title: Version 1.0.0
cover_label: "1.0"
sort: 1
tags: [stable]
---

The first stable release.

<!-- truncate -->

See the [welcome highlight](./highlights/2025-01-01-welcome.md) for what changed.
"#;

const SAMPLE_HIGHLIGHT: &str = r#"---
title: Welcome
date: 2025-01-01
---

Highlights of [1.0.0](../v1.0.0.md).
"#;
