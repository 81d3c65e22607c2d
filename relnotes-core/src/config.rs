//! Configuration parsing and management.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid truncate marker pattern '{pattern}': {source}")]
    InvalidTruncateMarker {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Top-level configuration matching the relnotes.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub releases: ReleasesConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,

    #[serde(skip)]
    site_dir: Option<PathBuf>,
}

/// Options for the release notes content plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleasesConfig {
    /// Content directory, relative to the site directory
    pub path: PathBuf,

    /// URL prefix for every release route
    pub route_base_path: String,

    /// Glob patterns (relative to `path`) selecting content files
    pub include: Vec<String>,

    /// Glob patterns excluded even when included
    pub exclude: Vec<String>,

    /// Regex matching the in-body truncation comment
    pub truncate_marker: String,

    pub order: SortOrder,

    pub highlights: HighlightsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightsConfig {
    /// Subdirectory of the content directory holding highlights
    pub directory: String,

    /// Whether to register the highlights list route
    pub list_page: bool,
}

/// Display order applied to a collection before pagination links are attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Whether drafts are published
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    pub fn from_production_flag(production: bool) -> Self {
        if production {
            BuildMode::Production
        } else {
            BuildMode::Development
        }
    }

    pub fn includes_drafts(self) -> bool {
        self == BuildMode::Development
    }
}

pub const DEFAULT_TRUNCATE_MARKER: &str = r"<!--\s*(truncate)\s*-->";

fn default_base_url() -> String {
    String::from("/")
}

impl Default for ReleasesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("releases"),
            route_base_path: "releases".to_string(),
            include: vec!["**/*.md".to_string(), "**/*.mdx".to_string()],
            exclude: vec!["**/_*.{md,mdx}".to_string(), "**/_*/**".to_string()],
            truncate_marker: DEFAULT_TRUNCATE_MARKER.to_string(),
            order: SortOrder::default(),
            highlights: HighlightsConfig::default(),
        }
    }
}

impl Default for HighlightsConfig {
    fn default() -> Self {
        Self {
            directory: "highlights".to_string(),
            list_page: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            releases: ReleasesConfig::default(),
            config_path: None,
            site_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text and validate it
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        config.truncate_marker()?;
        Ok(config)
    }

    /// Default configuration rooted at a site directory
    pub fn for_site_dir(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_dir: Some(site_dir.into()),
            ..Self::default()
        }
    }

    /// Directory every relative path is resolved against
    pub fn site_dir(&self) -> PathBuf {
        if let Some(dir) = &self.site_dir {
            return dir.clone();
        }
        match self.config_path.as_ref().and_then(|p| p.parent()) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Release content directory, resolved relative to the site directory
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.releases.path)
    }

    /// Highlights directory inside the content directory
    pub fn highlights_dir(&self) -> PathBuf {
        self.content_dir().join(&self.releases.highlights.directory)
    }

    /// Compiled truncation marker
    pub fn truncate_marker(&self) -> Result<Regex, ConfigError> {
        let pattern = &self.releases.truncate_marker;
        Regex::new(pattern).map_err(|source| ConfigError::InvalidTruncateMarker {
            pattern: pattern.clone(),
            source,
        })
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }

    /// Route of the releases list page; every release permalink lives below it
    pub fn release_route(&self) -> String {
        crate::url::normalize_url(&[
            self.normalized_base_url().as_str(),
            &self.releases.route_base_path,
        ])
    }

    /// Prefix of every highlight permalink
    pub fn highlight_route(&self) -> String {
        crate::url::normalize_url(&[
            self.release_route().as_str(),
            &self.releases.highlights.directory,
        ])
    }

    /// Prefix of normalized tag permalinks
    pub fn tags_route(&self) -> String {
        crate::url::normalize_url(&[self.release_route().as_str(), "tags"])
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.site_dir().join(path)
        }
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    let collapsed = crate::url::normalize_url(&[trimmed]);
    format!("/{}/", collapsed.trim_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.base_url, "/");
        assert_eq!(config.releases.route_base_path, "releases");
        assert_eq!(config.releases.include, vec!["**/*.md", "**/*.mdx"]);
        assert_eq!(config.releases.order, SortOrder::Ascending);
        assert!(!config.releases.highlights.list_page);
        assert!(config.truncate_marker().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            r#"
base_url: /docs
releases:
  route_base_path: changelog
  order: descending
  highlights:
    list_page: true
"#,
        )
        .unwrap();

        assert_eq!(config.normalized_base_url(), "/docs/");
        assert_eq!(config.releases.route_base_path, "changelog");
        assert_eq!(config.releases.order, SortOrder::Descending);
        assert_eq!(config.releases.path, PathBuf::from("releases"));
        assert_eq!(config.releases.highlights.directory, "highlights");
        assert!(config.releases.highlights.list_page);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.releases.route_base_path, "releases");
    }

    #[test]
    fn test_invalid_truncate_marker() {
        let err = Config::from_yaml("releases:\n  truncate_marker: \"(unclosed\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTruncateMarker { .. }));
    }

    #[test]
    fn test_paths_resolve_against_site_dir() {
        let config = Config::for_site_dir("/site");
        assert_eq!(config.content_dir(), PathBuf::from("/site/releases"));
        assert_eq!(
            config.highlights_dir(),
            PathBuf::from("/site/releases/highlights")
        );
    }

    #[test]
    fn test_routes() {
        let mut config = Config::default();
        config.base_url = "/docs".into();
        assert_eq!(config.release_route(), "/docs/releases");
        assert_eq!(config.highlight_route(), "/docs/releases/highlights");
        assert_eq!(config.tags_route(), "/docs/releases/tags");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("/"), "/");
        assert_eq!(normalize_base_url("blog"), "/blog/");
        assert_eq!(normalize_base_url("//a//b/"), "/a/b/");
    }
}
