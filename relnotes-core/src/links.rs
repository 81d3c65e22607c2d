//! Rewriting of relative markdown links into resolved permalinks.
//!
//! A line-based heuristic, not a markdown parser: fenced code blocks are
//! recognized by lines starting with three backticks, and links split across
//! lines are not handled.

use crate::{models::Document, url::clean_path};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static MD_LINK_REGEX: OnceLock<Regex> = OnceLock::new();

/// Inline `](target)` or reference `]: target` links ending in .md/.mdx
fn md_link_regex() -> &'static Regex {
    MD_LINK_REGEX.get_or_init(|| {
        Regex::new(r#"(\]\(|\]:[ \t]*)([^'")\]\s>#]+\.mdx?)(#[^'")\]\s>]*)?([)\s'"]|$)"#).unwrap()
    })
}

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceState {
    Outside,
    InsideFence,
}

/// Resolves link targets against the source files of a collection
#[derive(Debug, Clone)]
pub struct LinkResolver<'a> {
    content_dir: PathBuf,
    targets: HashMap<PathBuf, &'a str>,
}

impl<'a> LinkResolver<'a> {
    pub fn new<I>(content_dir: &Path, documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let targets = documents
            .into_iter()
            .map(|doc| (clean_path(&doc.file_path), doc.permalink.as_str()))
            .collect();

        Self {
            content_dir: content_dir.to_path_buf(),
            targets,
        }
    }

    /// Rewrite every resolvable link in `content`. `doc_dir` is the directory
    /// of the document being rewritten.
    pub fn rewrite(&self, content: &str, doc_dir: &Path) -> String {
        let mut state = FenceState::Outside;
        let mut out = String::with_capacity(content.len());

        for line in content.split_inclusive('\n') {
            if line.trim().starts_with(FENCE) {
                state = match state {
                    FenceState::Outside => FenceState::InsideFence,
                    FenceState::InsideFence => FenceState::Outside,
                };
                out.push_str(line);
                continue;
            }

            match state {
                FenceState::InsideFence => out.push_str(line),
                FenceState::Outside => out.push_str(&self.rewrite_line(line, doc_dir)),
            }
        }

        out
    }

    fn rewrite_line(&self, line: &str, doc_dir: &Path) -> String {
        md_link_regex()
            .replace_all(line, |caps: &Captures| {
                let target = &caps[2];
                if target.starts_with("http") {
                    return caps[0].to_string();
                }
                match self.resolve(target, doc_dir) {
                    Some(permalink) => format!(
                        "{}{}{}{}",
                        &caps[1],
                        permalink,
                        caps.get(3).map_or("", |m| m.as_str()),
                        &caps[4]
                    ),
                    None => {
                        tracing::trace!("Unresolved markdown link: {}", target);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }

    /// Try the document's own directory first, then the content root
    fn resolve(&self, target: &str, doc_dir: &Path) -> Option<&'a str> {
        let relative = target.trim_start_matches('/');
        [doc_dir, self.content_dir.as_path()]
            .iter()
            .map(|dir| clean_path(&dir.join(relative)))
            .find_map(|candidate| self.targets.get(&candidate).copied())
    }
}

/// Rewrite relative markdown links in `content` to the permalinks of the
/// matching documents. Links without a matching document are left as is.
pub fn rewrite_markdown_links<'a, I>(
    content: &str,
    content_dir: &Path,
    doc_dir: &Path,
    documents: I,
) -> String
where
    I: IntoIterator<Item = &'a Document>,
{
    LinkResolver::new(content_dir, documents).rewrite(content, doc_dir)
}
