//! Content loading - scans, builds, orders and links both collections.

use crate::{
    config::{BuildMode, Config, ConfigError, SortOrder},
    frontmatter::{parse_markdown, FrontmatterError},
    links::LinkResolver,
    metadata::MetadataBuilder,
    models::{Document, Paginated, Release, ReleaseHighlight},
    paginate::link_sequence,
    scanner::Scanner,
};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse front matter in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("Duplicate permalink {permalink}: {first:?} and {second:?}")]
    DuplicatePermalink {
        permalink: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Both collections, ordered and linked, ready for the rendering layer
#[derive(Debug, Clone, Serialize)]
pub struct LoadedContent {
    pub releases: Vec<Release>,
    pub highlights: Vec<ReleaseHighlight>,

    #[serde(skip)]
    content_dir: PathBuf,
}

impl LoadedContent {
    /// Every document of both collections
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.releases
            .iter()
            .map(|r| &r.document)
            .chain(self.highlights.iter().map(|h| &h.document))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Document> {
        self.documents().find(|d| d.id == id)
    }

    pub fn find_by_permalink(&self, permalink: &str) -> Option<&Document> {
        let wanted = permalink.trim_end_matches('/');
        self.documents()
            .find(|d| d.permalink.trim_end_matches('/') == wanted)
    }

    /// Link resolver over every document of both collections
    pub fn link_resolver(&self) -> LinkResolver<'_> {
        LinkResolver::new(&self.content_dir, self.documents())
    }

    /// Re-read a document and return its body with intra-collection links
    /// replaced by permalinks
    pub fn rewritten_content(&self, doc: &Document) -> Result<String, LoadError> {
        let text = fs::read_to_string(&doc.file_path).map_err(|source| LoadError::Read {
            path: doc.file_path.clone(),
            source,
        })?;
        let parsed = parse_markdown(&text).map_err(|source| LoadError::Parse {
            path: doc.file_path.clone(),
            source,
        })?;
        let doc_dir = doc.file_path.parent().unwrap_or(&self.content_dir);
        Ok(self.link_resolver().rewrite(&parsed.content, doc_dir))
    }
}

/// Load releases and highlights for a site.
///
/// File reads run in parallel; the first failure aborts the whole load.
/// A missing content directory produces empty collections.
pub fn load_content(config: &Config, mode: BuildMode) -> Result<LoadedContent, LoadError> {
    let builder = MetadataBuilder::new(config, mode)?;
    let releases_cfg = &config.releases;
    let content_dir = config.content_dir();
    let highlights_glob = format!("{}/**", releases_cfg.highlights.directory.trim_matches('/'));

    let release_scanner = Scanner::new(&content_dir, &releases_cfg.include)
        .with_exclude(releases_cfg.exclude.iter().cloned())
        .with_exclude([highlights_glob]);
    let highlight_scanner = Scanner::new(config.highlights_dir(), &releases_cfg.include)
        .with_exclude(releases_cfg.exclude.iter().cloned());

    let release_paths = scan_paths(&release_scanner)?;
    let highlight_paths = scan_paths(&highlight_scanner)?;
    tracing::debug!(
        "Found {} release files and {} highlight files",
        release_paths.len(),
        highlight_paths.len()
    );

    let mut releases = gather(&release_paths, |p| builder.build_release(p))?;
    let mut highlights = gather(&highlight_paths, |p| builder.build_highlight(p))?;

    releases.sort_by(compare_releases);
    highlights.sort_by(compare_highlights);
    if releases_cfg.order == SortOrder::Descending {
        releases.reverse();
        highlights.reverse();
    }

    // Both collections share one route space.
    ensure_unique_permalinks(
        releases
            .iter()
            .map(Paginated::document)
            .chain(highlights.iter().map(Paginated::document)),
    )?;

    let releases = link_sequence(releases);
    let highlights = link_sequence(highlights);

    tracing::info!(
        "Loaded {} releases and {} highlights",
        releases.len(),
        highlights.len()
    );

    Ok(LoadedContent {
        releases,
        highlights,
        content_dir,
    })
}

/// Collect scanned paths, failing on the first entry the walk could not read
fn scan_paths(scanner: &Scanner) -> Result<Vec<PathBuf>, LoadError> {
    scanner
        .scan()
        .map(|entry| {
            entry.map_err(|err| LoadError::Read {
                path: err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| scanner.base_dir().to_path_buf()),
                source: err.into(),
            })
        })
        .collect()
}

/// Build every path in parallel, then drop skipped drafts
fn gather<T, F>(paths: &[PathBuf], build: F) -> Result<Vec<T>, LoadError>
where
    T: Send,
    F: Fn(&Path) -> Result<Option<T>, LoadError> + Sync,
{
    let built: Vec<Option<T>> = paths
        .par_iter()
        .map(|p| build(p))
        .collect::<Result<_, _>>()?;
    Ok(built.into_iter().flatten().collect())
}

fn compare_releases(a: &Release, b: &Release) -> Ordering {
    compare_option(&a.document.sort_key, &b.document.sort_key)
        .then_with(|| compare_option(&a.document.series_position, &b.document.series_position))
        .then_with(|| a.document.permalink.cmp(&b.document.permalink))
}

fn compare_highlights(a: &ReleaseHighlight, b: &ReleaseHighlight) -> Ordering {
    compare_option(&a.date, &b.date)
        .then_with(|| compare_option(&a.document.series_position, &b.document.series_position))
        .then_with(|| a.document.permalink.cmp(&b.document.permalink))
}

/// Present values sort before missing ones
fn compare_option<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn ensure_unique_permalinks<'a>(
    documents: impl Iterator<Item = &'a Document>,
) -> Result<(), LoadError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for doc in documents {
        if let Some(first) = seen.insert(&doc.permalink, &doc.file_path) {
            tracing::warn!("Duplicate permalink: {}", doc.permalink);
            return Err(LoadError::DuplicatePermalink {
                permalink: doc.permalink.clone(),
                first: first.to_path_buf(),
                second: doc.file_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_option_puts_missing_last() {
        let mut values = vec![None, Some(3), Some(1), None, Some(2)];
        values.sort_by(compare_option);
        assert_eq!(values, vec![Some(1), Some(2), Some(3), None, None]);
    }
}
