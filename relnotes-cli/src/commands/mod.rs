//! CLI command implementations.

pub mod build;
pub mod init;
pub mod list;
pub mod show;

pub use build::build_content;
pub use init::init_project;
pub use list::list_content;
pub use show::show_document;

use anyhow::{Context, Result};
use relnotes_core::{load_content, BuildMode, Config, LoadedContent};
use std::path::Path;

/// Load the config file, falling back to defaults rooted next to it when the
/// file does not exist
pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        tracing::debug!("Loading config from {:?}", config_path);
        return Config::from_file(config_path).context("Failed to load configuration");
    }

    let site_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    tracing::info!(
        "No config at {:?}; using defaults for {:?}",
        config_path,
        site_dir
    );
    Ok(Config::for_site_dir(site_dir))
}

/// Load config and both collections
pub(crate) fn load_site(config_path: &Path, mode: BuildMode) -> Result<(Config, LoadedContent)> {
    let config = load_config(config_path)?;
    let content = load_content(&config, mode).context("Failed to load release notes")?;
    Ok((config, content))
}
