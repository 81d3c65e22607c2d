//! List command implementation.

use super::load_site;
use anyhow::Result;
use relnotes_core::{BuildMode, Document};
use serde_json::json;
use std::path::Path;

/// Print both collections in display order
pub fn list_content(config_path: &Path, mode: BuildMode, json: bool) -> Result<()> {
    let (_config, content) = load_site(config_path, mode)?;

    if json {
        let payload = json!({
            "releases": content.releases.iter().map(|r| summary(&r.document)).collect::<Vec<_>>(),
            "highlights": content.highlights.iter().map(|h| summary(&h.document)).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Releases ({})", content.releases.len());
    for release in &content.releases {
        println!(
            "  {}  {}  [{}]",
            release.document.permalink, release.document.title, release.cover_label
        );
    }

    println!("Highlights ({})", content.highlights.len());
    for highlight in &content.highlights {
        let date = highlight
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!(
            "  {}  {}  {}",
            date, highlight.document.permalink, highlight.document.title
        );
    }

    Ok(())
}

fn summary(doc: &Document) -> serde_json::Value {
    json!({
        "id": doc.id,
        "title": doc.title,
        "permalink": doc.permalink,
        "source": doc.source,
    })
}
