//! URL and path helpers shared by the metadata builder and route table.

use std::path::{Component, Path};

/// Join URL segments with `/` and collapse redundant separators.
///
/// A `scheme://` prefix is kept intact. An empty join yields `/`.
///
/// ```
/// use relnotes_core::url::normalize_url;
///
/// assert_eq!(normalize_url(&["/", "releases", "v1"]), "/releases/v1");
/// assert_eq!(normalize_url(&["/docs/", "/releases/", "v1"]), "/docs/releases/v1");
/// ```
pub fn normalize_url<S: AsRef<str>>(parts: &[S]) -> String {
    let mut joined = String::new();
    for part in parts.iter().map(AsRef::as_ref).filter(|p| !p.is_empty()) {
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(part);
    }

    let (scheme, rest) = match joined.find("://") {
        Some(idx) => joined.split_at(idx + 3),
        None => ("", joined.as_str()),
    };

    let mut out = String::with_capacity(joined.len());
    out.push_str(scheme);
    let mut prev_slash = false;
    for c in rest.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }

    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Render a relative path with forward slashes regardless of platform.
pub fn posix_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Alias a path under the site directory as `@site/<relative>`.
///
/// Paths outside the site directory are returned unchanged.
pub fn alias_site_path(path: &Path, site_dir: &Path) -> String {
    match path.strip_prefix(site_dir) {
        Ok(rel) => format!("@site/{}", posix_path(rel)),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
pub fn clean_path(path: &Path) -> std::path::PathBuf {
    let mut out = std::path::PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
