//! Front matter parsing from markdown files.

use crate::models::Tag;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Front matter fields recognized on release and highlight documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub series_position: Option<i64>,
    pub sort: Option<i64>,
    pub cover_label: Option<String>,
    pub draft: bool,
    pub tags: Vec<Tag>,
}

impl FrontMatter {
    /// Parse the `date` field, accepting a bare date or a timestamp whose
    /// first ten characters are a date
    pub fn parsed_date(&self) -> Result<Option<NaiveDate>, FrontmatterError> {
        let Some(raw) = self.date.as_deref().map(str::trim) else {
            return Ok(None);
        };
        raw.get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(Some)
            .ok_or_else(|| FrontmatterError::InvalidDate(raw.to_string()))
    }
}

/// A markdown file split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMarkdown {
    pub front_matter: FrontMatter,
    /// Body text after the front matter block
    pub content: String,
    /// First prose paragraph with inline markup stripped
    pub excerpt: Option<String>,
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();
static INLINE_LINK_REGEX: OnceLock<Regex> = OnceLock::new();
static INLINE_MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)(.*)\z").unwrap()
    })
}

fn inline_link_regex() -> &'static Regex {
    INLINE_LINK_REGEX.get_or_init(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap())
}

fn inline_markup_regex() -> &'static Regex {
    INLINE_MARKUP_REGEX.get_or_init(|| Regex::new(r"(\*\*|__|\*|`)").unwrap())
}

/// Split markdown text into front matter, content and excerpt
///
/// If no front matter block is present, the default front matter is returned
/// with the full text as content.
///
/// # Example
///
/// ```
/// use relnotes_core::frontmatter::parse_markdown;
///
/// let text = "---\ntitle: v1.0\ndraft: true\n---\nFirst stable release.\n";
///
/// let parsed = parse_markdown(text).unwrap();
/// assert_eq!(parsed.front_matter.title.as_deref(), Some("v1.0"));
/// assert!(parsed.front_matter.draft);
/// assert_eq!(parsed.excerpt.as_deref(), Some("First stable release."));
/// ```
pub fn parse_markdown(text: &str) -> Result<ParsedMarkdown, FrontmatterError> {
    let (front_matter, content) = match frontmatter_regex().captures(text) {
        Some(captures) => {
            let yaml = captures.get(1).map_or("", |m| m.as_str());
            let body = captures.get(2).map_or("", |m| m.as_str());
            let front_matter = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            (front_matter, body.to_string())
        }
        None => (FrontMatter::default(), text.to_string()),
    };

    let excerpt = extract_excerpt(&content);

    Ok(ParsedMarkdown {
        front_matter,
        content,
        excerpt,
    })
}

/// First paragraph of prose, skipping headings, code fences, MDX
/// imports/exports and HTML comments
pub fn extract_excerpt(content: &str) -> Option<String> {
    let mut in_fence = false;
    let mut paragraph: Vec<&str> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            if !paragraph.is_empty() {
                break;
            }
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let skippable = trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("<!--")
            || trimmed.starts_with("import ")
            || trimmed.starts_with("export ");

        if skippable {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }

        paragraph.push(trimmed);
    }

    if paragraph.is_empty() {
        return None;
    }

    let joined = paragraph.join(" ");
    let without_links = inline_link_regex().replace_all(&joined, "$1");
    let plain = inline_markup_regex().replace_all(&without_links, "");
    let plain = plain.trim();

    (!plain.is_empty()).then(|| plain.to_string())
}
