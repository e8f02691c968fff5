//! Guide page lookup under the guide root.
//!
//! URL paths come straight from the browser, so every candidate file is
//! resolved lexically and must stay strictly inside the root.

use crate::constants::{fallback_guide_title, SITE_NAME};
use crate::frontmatter::extract_frontmatter;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A guide found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideEntry {
    /// Path as it appears in the URL, without extension
    pub url_path: String,
    pub title: String,
}

/// Resolve `url_path` (percent-encoded, `/`-separated) against `base`.
///
/// Returns `None` when decoding fails or the result escapes `base`.
pub fn resolve_guide_path(base: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;
    resolve_within(base, &decoded)
}

/// Page title for a guide URL; falls back to a generic title on any failure
pub fn guide_title(base: &Path, url_path: &str) -> String {
    let Some(safe_path) = resolve_guide_path(base, url_path) else {
        return fallback_guide_title();
    };
    let Ok(cur_path) = urlencoding::decode(url_path) else {
        return fallback_guide_title();
    };

    let content = if cur_path.contains(".md") {
        fs::read_to_string(&safe_path).ok()
    } else {
        [".md", ".mdx"].iter().find_map(|ext| {
            let candidate = resolve_within(base, &format!("{}{}", cur_path, ext))?;
            candidate
                .is_file()
                .then(|| fs::read_to_string(&candidate).ok())
                .flatten()
        })
    };

    let content = content.or_else(|| {
        let index = safe_path.join("index.md");
        let base = normalize(base);
        if index.starts_with(&base) && index != base {
            fs::read_to_string(index).ok()
        } else {
            None
        }
    });

    content
        .and_then(|c| extract_frontmatter(&c).title)
        .map(|title| format!("{} | {}", title, SITE_NAME))
        .unwrap_or_else(fallback_guide_title)
}

/// Every `.md`/`.mdx` guide under `base`, sorted by URL path
pub fn list_guides(base: &Path) -> Vec<GuideEntry> {
    let mut guides: Vec<GuideEntry> = WalkDir::new(base)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "md" || ext == "mdx")
        })
        .filter_map(|entry| {
            let rel = entry.path().strip_prefix(base).ok()?;
            let url_path = url_path_for(rel)?;
            let title = fs::read_to_string(entry.path())
                .ok()
                .and_then(|c| extract_frontmatter(&c).title)
                .map(|title| format!("{} | {}", title, SITE_NAME))
                .unwrap_or_else(fallback_guide_title);
            Some(GuideEntry { url_path, title })
        })
        .collect();

    guides.sort_by(|a, b| a.url_path.cmp(&b.url_path));
    guides
}

/// `a/b.md` -> `a/b`, `a/index.md` -> `a`
fn url_path_for(rel: &Path) -> Option<String> {
    let stem = rel.file_stem()?.to_str()?;
    let mut parts: Vec<&str> = rel
        .parent()
        .map(|p| p.components().filter_map(|c| c.as_os_str().to_str()).collect())
        .unwrap_or_default();
    if stem != "index" {
        parts.push(stem);
    }
    Some(parts.join("/"))
}

fn resolve_within(base: &Path, rel: &str) -> Option<PathBuf> {
    let base = normalize(base);
    let resolved = normalize(&base.join(rel));
    (resolved.starts_with(&base) && resolved != base).then_some(resolved)
}

/// Lexically apply `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}
