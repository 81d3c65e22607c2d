//! Build command implementation.

use super::load_site;
use anyhow::{Context, Result};
use relnotes_core::{build_routes, BuildMode};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load both collections and write their metadata and the route table
pub fn build_content(config_path: &Path, mode: BuildMode, out_dir: &Path) -> Result<()> {
    let (config, content) = load_site(config_path, mode)?;
    let routes = build_routes(&config, &content);

    fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {:?}", out_dir))?;

    write_json(&out_dir.join("releases.json"), &content.releases)?;
    write_json(&out_dir.join("highlights.json"), &content.highlights)?;
    write_json(&out_dir.join("routes.json"), &routes)?;

    tracing::info!(
        "✓ Wrote {} releases, {} highlights and {} routes",
        content.releases.len(),
        content.highlights.len(),
        routes.len()
    );
    tracing::info!("✓ Output written to {:?}", out_dir);

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
