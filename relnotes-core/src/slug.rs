//! Slugs for tag permalinks.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static DASH_RUN: OnceLock<Regex> = OnceLock::new();

fn dash_run() -> &'static Regex {
    DASH_RUN.get_or_init(|| Regex::new(r"-{2,}").unwrap())
}

/// Turn a tag label into a URL segment.
///
/// Separators (whitespace, `_`, `/`, `.`) become hyphens, other punctuation
/// is dropped and letters are lowercased. Non-ASCII letters survive.
///
/// ```
/// use relnotes_core::slugify;
///
/// assert_eq!(slugify("Breaking Changes"), "breaking-changes");
/// assert_eq!(slugify("v2.0 / LTS"), "v2-0-lts");
/// ```
pub fn slugify(label: &str) -> String {
    let lowered = label.trim().to_lowercase();

    let mapped: String = lowered
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || matches!(c, '_' | '/' | '.') {
                Some("-")
            } else if c.is_alphanumeric() || c == '-' {
                Some(g)
            } else {
                None
            }
        })
        .collect();

    dash_run()
        .replace_all(&mapped, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("New Features"), "new-features");
        assert_eq!(slugify("snake_case_tag"), "snake-case-tag");
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(slugify("Café Räume"), "café-räume");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(slugify("  -security-  "), "security");
        assert_eq!(slugify("!!!"), "");
    }
}
