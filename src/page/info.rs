//! Path classification for page files.
//!
//! A source-relative path such as `blog/My Post.md` is decomposed into
//! its directory segments, base name, extension and slugs. Index files
//! (`index.md`, `README.md`) are then collapsed onto their directory.

use serde::Serialize;
use thiserror::Error;

use crate::utils::path::slugify;

/// Malformed relative path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path `{0}`: empty segment")]
    EmptySegment(String),
    #[error("invalid path `{0}`: `.` and `..` segments are not allowed")]
    RelativeSegment(String),
}

/// Decomposed form of a source-relative file path.
///
/// For a non-empty path `depth == slugs.len() == dirs.len() + 1`,
/// until [`PathInfo::indexify`] folds the base name into the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathInfo {
    pub base: String,
    pub name: String,
    pub extension: String,
    pub dir: String,
    pub dirs: Vec<String>,
    pub slug: String,
    pub slugs: Vec<String>,
    pub depth: usize,
}

/// Classify a relative path. Both `/` and `\` separate segments.
///
/// ```ignore
/// let info = pathinfo("blog/Hello World.md")?;
/// assert_eq!(info.slug, "blog/hello-world");
/// assert_eq!(info.depth, 2);
/// ```
pub fn pathinfo(path: &str) -> Result<PathInfo, PathError> {
    if path.is_empty() {
        return Ok(PathInfo::default());
    }

    let mut segments: Vec<String> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" => return Err(PathError::EmptySegment(path.to_string())),
            "." | ".." => return Err(PathError::RelativeSegment(path.to_string())),
            s => segments.push(s.to_string()),
        }
    }

    // Non-empty input always yields at least one segment
    let base = segments.pop().unwrap_or_default();
    let dirs = segments;

    let (name, extension) = match base.rsplit_once('.') {
        Some((name, ext)) => (name.to_string(), ext.to_string()),
        None => (base.clone(), String::new()),
    };

    let slugs: Vec<String> = dirs
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(name.as_str()))
        .map(slugify)
        .collect();

    Ok(PathInfo {
        dir: dirs.join("/"),
        slug: slugs.join("/"),
        depth: slugs.len(),
        base,
        name,
        extension,
        dirs,
        slugs,
    })
}

impl PathInfo {
    /// Collapse an index file onto its containing directory.
    ///
    /// `a/b/index.md` becomes `a/b` with depth reduced by one. A root
    /// index file collapses to the empty path (depth 0, slug `""`).
    pub fn indexify(&mut self) {
        let parent = self.dirs.pop().unwrap_or_default();
        self.base = parent.clone();
        self.name = parent;
        self.extension.clear();
        self.dir = self.dirs.join("/");
        self.slugs.pop();
        self.slug = self.slugs.join("/");
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        let info = pathinfo("").unwrap();
        assert_eq!(info, PathInfo::default());
        assert_eq!(info.depth, 0);
    }

    #[test]
    fn test_nested_path() {
        let info = pathinfo("a/b/c").unwrap();
        assert_eq!(info.depth, 3);
        assert_eq!(info.slug, "a/b/c");
        assert_eq!(info.dir, "a/b");
        assert_eq!(info.dirs, vec!["a", "b"]);
        assert_eq!(info.base, "c");
        assert_eq!(info.name, "c");
        assert_eq!(info.extension, "");
    }

    #[test]
    fn test_extension_split() {
        let info = pathinfo("docs/My File.test.md").unwrap();
        assert_eq!(info.base, "My File.test.md");
        assert_eq!(info.name, "My File.test");
        assert_eq!(info.extension, "md");
        assert_eq!(info.slugs, vec!["docs", "my-file-test"]);
        assert_eq!(info.slug, "docs/my-file-test");
        assert_eq!(info.depth, 2);
    }

    #[test]
    fn test_backslash_separator() {
        let info = pathinfo("a\\b\\c.md").unwrap();
        assert_eq!(info.dirs, vec!["a", "b"]);
        assert_eq!(info.slug, "a/b/c");
    }

    #[test]
    fn test_invalid_segments() {
        assert!(matches!(
            pathinfo("a/b//c"),
            Err(PathError::EmptySegment(_))
        ));
        assert!(matches!(pathinfo("a/b/"), Err(PathError::EmptySegment(_))));
        assert!(matches!(
            pathinfo("a/./a"),
            Err(PathError::RelativeSegment(_))
        ));
        assert!(matches!(
            pathinfo("a/../a"),
            Err(PathError::RelativeSegment(_))
        ));
    }

    #[test]
    fn test_indexify_nested() {
        let mut info = pathinfo("a/b/index.md").unwrap();
        assert_eq!(info.depth, 3);
        info.indexify();

        assert_eq!(info.depth, 2);
        assert_eq!(info.base, "b");
        assert_eq!(info.name, "b");
        assert_eq!(info.extension, "");
        assert_eq!(info.dirs, vec!["a"]);
        assert_eq!(info.dir, "a");
        assert_eq!(info.slugs, vec!["a", "b"]);
        assert_eq!(info.slug, "a/b");
    }

    #[test]
    fn test_indexify_root() {
        let mut info = pathinfo("README.md").unwrap();
        info.indexify();

        assert_eq!(info.depth, 0);
        assert_eq!(info.slug, "");
        assert_eq!(info.base, "");
        assert!(info.slugs.is_empty());
    }

    #[test]
    fn test_indexify_saturates() {
        let mut info = PathInfo::default();
        info.indexify();
        assert_eq!(info.depth, 0);
    }
}
