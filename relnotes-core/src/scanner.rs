//! Content file discovery by filesystem walking.
//!
//! The scanner only finds candidate files; reading and parsing them is the
//! metadata builder's job.

use crate::url::posix_path;
use glob_match::glob_match;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Finds files under a base directory that match include globs
#[derive(Debug, Clone)]
pub struct Scanner {
    base_dir: PathBuf,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl Scanner {
    pub fn new(base_dir: impl Into<PathBuf>, include: &[String]) -> Self {
        Self {
            base_dir: base_dir.into(),
            include: include.to_vec(),
            exclude: Vec::new(),
        }
    }

    /// Skip files whose relative path matches any of `patterns`
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Lazily yield matching paths relative to the base directory.
    ///
    /// A missing base directory yields nothing. Order is whatever the
    /// filesystem returns. Entries the walk cannot read (broken symlinks,
    /// unreadable directories) come through as errors.
    pub fn scan(&self) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> + '_ {
        let exists = self.base_dir.is_dir();
        if !exists {
            tracing::debug!("Content directory {:?} does not exist", self.base_dir);
        }

        exists
            .then(|| WalkDir::new(&self.base_dir).follow_links(true))
            .into_iter()
            .flat_map(|walk| walk.into_iter().filter_entry(|e| !is_hidden(e)))
            .filter_map(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::warn!("Unreadable entry: {}", err);
                        return Some(Err(err));
                    }
                };
                if !entry.file_type().is_file() {
                    return None;
                }
                let rel = entry.path().strip_prefix(&self.base_dir).ok()?;
                let rel_str = posix_path(rel);
                if self.is_match(&rel_str) {
                    Some(Ok(rel.to_path_buf()))
                } else {
                    tracing::trace!("Not matched: {}", rel_str);
                    None
                }
            })
    }

    fn is_match(&self, rel: &str) -> bool {
        self.include.iter().any(|p| matches_glob(p, rel))
            && !self.exclude.iter().any(|p| matches_glob(p, rel))
    }
}

/// Glob match where a leading `**/` also matches files at the root
fn matches_glob(pattern: &str, path: &str) -> bool {
    glob_match(pattern, path)
        || pattern
            .strip_prefix("**/")
            .is_some_and(|rest| glob_match(rest, path))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn defaults() -> Vec<String> {
        vec!["**/*.md".to_string(), "**/*.mdx".to_string()]
    }

    fn sorted(scanner: &Scanner) -> Vec<String> {
        let mut found: Vec<String> = scanner
            .scan()
            .map(|p| posix_path(&p.unwrap()))
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let scanner = Scanner::new(dir.path().join("nope"), &defaults());
        assert_eq!(scanner.scan().count(), 0);
    }

    #[test]
    fn test_matches_include_patterns() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("v1.md"), "").unwrap();
        fs::write(dir.path().join("v2.mdx"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("nested/v3.md"), "").unwrap();

        let scanner = Scanner::new(dir.path(), &defaults());
        assert_eq!(sorted(&scanner), vec!["nested/v3.md", "v1.md", "v2.mdx"]);
    }

    #[test]
    fn test_exclude_and_hidden() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("highlights")).unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join("v1.md"), "").unwrap();
        fs::write(dir.path().join("_partial.md"), "").unwrap();
        fs::write(dir.path().join("highlights/h1.md"), "").unwrap();
        fs::write(dir.path().join(".cache/old.md"), "").unwrap();

        let scanner = Scanner::new(dir.path(), &defaults())
            .with_exclude(["**/_*.{md,mdx}", "highlights/**"]);
        assert_eq!(sorted(&scanner), vec!["v1.md"]);
    }

    #[test]
    fn test_root_level_double_star() {
        assert!(matches_glob("**/*.md", "v1.md"));
        assert!(matches_glob("**/*.md", "a/b/v1.md"));
        assert!(!matches_glob("**/*.md", "v1.txt"));
        assert!(matches_glob("**/_*/**", "_drafts/x.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("v1.md"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.md"), dir.path().join("v2.md")).unwrap();

        let scanner = Scanner::new(dir.path(), &defaults());
        let results: Vec<_> = scanner.scan().collect();
        assert_eq!(results.len(), 2);
        let err = results.into_iter().find_map(Result::err).unwrap();
        assert!(err.path().unwrap().ends_with("v2.md"));
    }
}
