//! Fetch a single document in structured form.

use super::load_site;
use crate::ShowFormat;
use anyhow::{Context, Result};
use relnotes_core::{BuildMode, Document, LoadedContent};
use std::path::Path;

/// Print one document's metadata or its link-rewritten body
pub fn show_document(
    config_path: &Path,
    mode: BuildMode,
    target: &str,
    format: ShowFormat,
) -> Result<()> {
    let (_config, content) = load_site(config_path, mode)?;

    let doc = content
        .find_by_id(target)
        .or_else(|| content.find_by_permalink(target))
        .with_context(|| format!("Document '{}' not found (id or permalink)", target))?;

    match format {
        ShowFormat::Json => {
            println!("{}", record_json(&content, doc)?);
        }
        ShowFormat::Content => {
            let body = content
                .rewritten_content(doc)
                .with_context(|| format!("Failed to rewrite {}", doc.source))?;
            print!("{body}");
        }
    }

    Ok(())
}

/// Serialize the enclosing release or highlight so kind-specific fields show
fn record_json(content: &LoadedContent, doc: &Document) -> Result<String> {
    if let Some(release) = content.releases.iter().find(|r| r.document.permalink == doc.permalink) {
        return Ok(serde_json::to_string_pretty(release)?);
    }
    if let Some(highlight) = content
        .highlights
        .iter()
        .find(|h| h.document.permalink == doc.permalink)
    {
        return Ok(serde_json::to_string_pretty(highlight)?);
    }
    Ok(serde_json::to_string_pretty(doc)?)
}
