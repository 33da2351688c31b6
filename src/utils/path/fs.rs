//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - resolve relative paths against a base with a fallback directory
//! - `expand_tilde` - `~` expansion for paths from the config file
//! - `relative_to` - `/`-separated relative path strings for node fields

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a path that may be relative to `base` or a fallback directory.
///
/// Tries in order:
/// 1. If absolute, use as-is
/// 2. If exists relative to `base`, use that
/// 3. Otherwise, resolve relative to `fallback_dir`
///
/// # Example
/// ```ignore
/// // Template "Page.jsx" resolves to <root>/src/templates/Page.jsx
/// // unless <root>/Page.jsx exists.
/// let resolved = resolve_path(Path::new("Page.jsx"), root, &root.join("src/templates"));
/// ```
pub fn resolve_path(path: &Path, base: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let candidate = base.join(path);
    if candidate.exists() {
        return candidate;
    }

    fallback_dir.join(path)
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

/// Express `path` relative to `base` as a `/`-separated string.
///
/// Paths outside `base` are returned in full. Only normal components are kept,
/// so the result never starts with a separator.
pub fn relative_to(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_path_absolute() {
        let path = Path::new("/absolute/path");
        let resolved = resolve_path(path, Path::new("/base"), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_resolve_path_base_then_fallback() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("Page.jsx"), "").unwrap();

        let resolved = resolve_path(Path::new("Page.jsx"), temp.path(), Path::new("/fallback"));
        assert_eq!(resolved, temp.path().join("Page.jsx"));

        let resolved = resolve_path(Path::new("Other.jsx"), temp.path(), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/fallback/Other.jsx"));
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/site");
        assert_eq!(relative_to(Path::new("/site/pages/a.md"), base), "pages/a.md");
        assert_eq!(relative_to(Path::new("/site"), base), "");
        assert_eq!(relative_to(Path::new("/other/a.md"), base), "other/a.md");
    }

    #[test]
    fn test_expand_tilde_plain() {
        assert_eq!(expand_tilde(Path::new("pages")), PathBuf::from("pages"));
    }
}
