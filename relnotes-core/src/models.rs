//! Content model structs for releases, highlights and pagination.

use crate::{slug::slugify, url::normalize_url};
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::path::PathBuf;

/// A tag as written in front matter: either a bare label or a label with an
/// explicit permalink.
///
/// Numeric and boolean labels (`tags: [1.0, true]`) are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Tag {
    Label(String),
    Linked { label: String, permalink: String },
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Mapping(map) => {
                let field = |name: &'static str| {
                    map.get(name)
                        .and_then(scalar_text)
                        .ok_or_else(|| <D::Error as de::Error>::missing_field(name))
                };
                Ok(Tag::Linked {
                    label: field("label")?,
                    permalink: field("permalink")?,
                })
            }
            other => scalar_text(&other).map(Tag::Label).ok_or_else(|| {
                de::Error::custom("tag must be a scalar or a mapping with label and permalink")
            }),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Tag {
    pub fn label(&self) -> &str {
        match self {
            Tag::Label(label) => label,
            Tag::Linked { label, .. } => label,
        }
    }

    /// Resolve a bare label into a linked tag under `tags_base_path`.
    /// Linked tags keep their explicit permalink.
    pub fn normalize(self, tags_base_path: &str) -> Tag {
        match self {
            Tag::Label(label) => {
                let permalink = normalize_url(&[tags_base_path, &slugify(&label)]);
                Tag::Linked { label, permalink }
            }
            linked @ Tag::Linked { .. } => linked,
        }
    }
}

/// Back reference to a neighbouring document. Always a value copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorRef {
    pub title: String,
    pub permalink: String,
}

/// Reading time estimate derived from the body word count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: f64,
    /// Human-readable form, e.g. "3 min read"
    pub text: String,
}

pub const WORDS_PER_MINUTE: f64 = 200.0;

impl ReadingTime {
    pub fn from_words(words: usize) -> Self {
        let minutes = words as f64 / WORDS_PER_MINUTE;
        let rounded = minutes.ceil().max(1.0) as u64;
        Self {
            words,
            minutes,
            text: format!("{rounded} min read"),
        }
    }
}

/// Metadata common to every document of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: String,
    pub permalink: String,
    pub reading_time: ReadingTime,

    /// Explicit `sort` front matter value
    pub sort_key: Option<i64>,

    pub series_position: Option<i64>,

    /// Aliased source token (`@site/...`) for content injection
    pub source: String,

    /// Source file relative to the site directory
    pub source_path: String,

    /// True when the body contains the truncation marker
    pub truncated: bool,

    pub tags: Vec<Tag>,

    pub prev_item: Option<PaginatorRef>,

    pub next_item: Option<PaginatorRef>,

    /// Absolute path of the source file, used for link resolution
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Document {
    pub fn paginator_ref(&self) -> PaginatorRef {
        PaginatorRef {
            title: self.title.clone(),
            permalink: self.permalink.clone(),
        }
    }
}

/// A release note page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    #[serde(flatten)]
    pub document: Document,

    /// Label shown on the release card; defaults to the title
    pub cover_label: String,
}

/// A dated highlight living under the highlights directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseHighlight {
    #[serde(flatten)]
    pub document: Document,

    pub date: Option<NaiveDate>,
}

/// Anything that can sit in a paginated sequence
pub trait Paginated {
    fn document(&self) -> &Document;
    fn document_mut(&mut self) -> &mut Document;
}

impl Paginated for Document {
    fn document(&self) -> &Document {
        self
    }

    fn document_mut(&mut self) -> &mut Document {
        self
    }
}

impl Paginated for Release {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

impl Paginated for ReleaseHighlight {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}
