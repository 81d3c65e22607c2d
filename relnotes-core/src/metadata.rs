//! Metadata building: one source file in, one normalized document out.

use crate::{
    config::{BuildMode, Config},
    frontmatter::{parse_markdown, FrontMatter, ParsedMarkdown},
    loader::LoadError,
    models::{Document, ReadingTime, Release, ReleaseHighlight},
    url::{alias_site_path, normalize_url, posix_path},
};
use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static DATE_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn date_prefix_regex() -> &'static Regex {
    DATE_PREFIX_REGEX.get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})-").unwrap())
}

/// Builds release and highlight records from files on disk
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    site_dir: PathBuf,
    content_dir: PathBuf,
    highlights_dir: PathBuf,
    release_route: String,
    highlight_route: String,
    tags_route: String,
    truncate_marker: Regex,
    mode: BuildMode,
}

/// A source file read and split, before any field defaults are applied
struct SourceFile {
    file_path: PathBuf,
    /// Path relative to the collection directory, extension stripped
    stem_path: String,
    file_stem: String,
    parsed: ParsedMarkdown,
}

impl MetadataBuilder {
    pub fn new(config: &Config, mode: BuildMode) -> Result<Self, LoadError> {
        Ok(Self {
            site_dir: config.site_dir(),
            content_dir: config.content_dir(),
            highlights_dir: config.highlights_dir(),
            release_route: config.release_route(),
            highlight_route: config.highlight_route(),
            tags_route: config.tags_route(),
            truncate_marker: config.truncate_marker()?,
            mode,
        })
    }

    /// Build a release from a path relative to the content directory.
    ///
    /// Returns `Ok(None)` for drafts skipped in production mode.
    pub fn build_release(&self, rel_path: &Path) -> Result<Option<Release>, LoadError> {
        let Some(source) = self.read(&self.content_dir, rel_path)? else {
            return Ok(None);
        };
        let cover_label = source.parsed.front_matter.cover_label.clone();
        let document = self.document(source, &self.release_route);
        let cover_label = cover_label.unwrap_or_else(|| document.title.clone());

        Ok(Some(Release {
            document,
            cover_label,
        }))
    }

    /// Build a highlight from a path relative to the highlights directory.
    pub fn build_highlight(&self, rel_path: &Path) -> Result<Option<ReleaseHighlight>, LoadError> {
        let Some(source) = self.read(&self.highlights_dir, rel_path)? else {
            return Ok(None);
        };
        let date = self.highlight_date(&source)?;
        let document = self.document(source, &self.highlight_route);

        Ok(Some(ReleaseHighlight { document, date }))
    }

    fn read(&self, base: &Path, rel_path: &Path) -> Result<Option<SourceFile>, LoadError> {
        let file_path = base.join(rel_path);
        let text = fs::read_to_string(&file_path).map_err(|source| LoadError::Read {
            path: file_path.clone(),
            source,
        })?;
        let parsed = parse_markdown(&text).map_err(|source| LoadError::Parse {
            path: file_path.clone(),
            source,
        })?;

        if parsed.front_matter.draft && !self.mode.includes_drafts() {
            tracing::debug!("Skipping draft: {:?}", file_path);
            return Ok(None);
        }

        let file_stem = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem_path = posix_path(&rel_path.with_extension(""));

        Ok(Some(SourceFile {
            file_path,
            stem_path,
            file_stem,
            parsed,
        }))
    }

    fn document(&self, source: SourceFile, route: &str) -> Document {
        let SourceFile {
            file_path,
            stem_path,
            file_stem,
            parsed,
        } = source;
        let ParsedMarkdown {
            front_matter,
            content,
            excerpt,
        } = parsed;
        let FrontMatter {
            id,
            title,
            description,
            series_position,
            sort,
            tags,
            ..
        } = front_matter;

        let id = id.filter(|s| !s.trim().is_empty()).unwrap_or(stem_path);
        let permalink = normalize_url(&[route, id.as_str()]);
        let title = title
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(file_stem);
        let description = description.or(excerpt).unwrap_or_default();
        let words = content.unicode_words().count();
        let truncated = self.truncate_marker.is_match(&content);
        let tags = tags
            .into_iter()
            .map(|tag| tag.normalize(&self.tags_route))
            .collect();
        let source_path = file_path
            .strip_prefix(&self.site_dir)
            .map(posix_path)
            .unwrap_or_else(|_| file_path.to_string_lossy().into_owned());

        Document {
            id,
            title,
            description,
            permalink,
            reading_time: ReadingTime::from_words(words),
            sort_key: sort,
            series_position,
            source: alias_site_path(&file_path, &self.site_dir),
            source_path,
            truncated,
            tags,
            prev_item: None,
            next_item: None,
            file_path,
        }
    }

    /// Front matter date, else a `YYYY-MM-DD-` filename prefix
    fn highlight_date(&self, source: &SourceFile) -> Result<Option<NaiveDate>, LoadError> {
        let from_front_matter =
            source
                .parsed
                .front_matter
                .parsed_date()
                .map_err(|err| LoadError::Parse {
                    path: source.file_path.clone(),
                    source: err,
                })?;
        if from_front_matter.is_some() {
            return Ok(from_front_matter);
        }

        Ok(date_prefix_regex()
            .captures(&source.file_stem)
            .and_then(|c| NaiveDate::parse_from_str(&c[1], "%Y-%m-%d").ok()))
    }
}
