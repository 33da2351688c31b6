//! A compiled source directory.

use std::path::{Path, PathBuf};

use crate::pattern::{PlaceholderSyntax, Rules};
use crate::utils::path::relative_to;

/// One watched directory with its template, URL template and rules.
#[derive(Debug, Clone)]
pub struct Source {
    /// Directory as written in the config, for messages.
    pub label: String,
    /// Absolute, normalized source directory.
    pub dir: PathBuf,
    /// Absolute template file.
    pub template: PathBuf,
    /// URL template, always with a leading `/`.
    pub url: String,
    pub syntax: PlaceholderSyntax,
    pub rules: Rules,
    pub debug: bool,
}

impl Source {
    /// Relative `/`-separated path of `path` inside this source.
    pub fn relative(&self, path: &Path) -> Option<String> {
        path.starts_with(&self.dir)
            .then(|| relative_to(path, &self.dir))
    }

    pub fn absolute(&self, rel_path: &str) -> PathBuf {
        rel_path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.dir.clone(), |acc, part| acc.join(part))
    }

    /// Whether a directory (relative to the source) should not be entered.
    pub fn is_ignored_dir(&self, rel_dir: &str) -> bool {
        !rel_dir.is_empty() && self.rules.is_ignored(rel_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(dir: &str) -> Source {
        Source {
            label: "pages".into(),
            dir: PathBuf::from(dir),
            template: PathBuf::from("/site/src/templates/Page.jsx"),
            url: "/:slug".into(),
            syntax: PlaceholderSyntax::Auto,
            rules: Rules::new(&["*.md"], &["drafts"], &["index.*"], PlaceholderSyntax::Auto)
                .unwrap(),
            debug: false,
        }
    }

    #[test]
    fn test_relative_and_absolute() {
        let src = source("/site/pages");
        let abs = Path::new("/site/pages/a/b.md");
        assert_eq!(src.relative(abs).as_deref(), Some("a/b.md"));
        assert_eq!(src.relative(Path::new("/site/other/b.md")), None);
        assert_eq!(src.absolute("a/b.md"), PathBuf::from("/site/pages/a/b.md"));
    }

    #[test]
    fn test_ignored_dirs() {
        let src = source("/site/pages");
        assert!(src.is_ignored_dir("drafts"));
        assert!(src.is_ignored_dir("node_modules"));
        assert!(src.is_ignored_dir(".git"));
        assert!(!src.is_ignored_dir("blog"));
        assert!(!src.is_ignored_dir(""));
    }
}
