//! File matching patterns.
//!
//! A [`Pattern`] is either a glob (`*.md`, `index.*`) or a placeholder
//! template (`{year}-{month}-{day} - {title}.md`). The kind is decided once,
//! when the pattern is built: any placeholder in the configured syntax makes
//! it a template. Both kinds answer the same question, "does this candidate
//! match, and with which parameters?".
//!
//! Patterns without `/` are matched against the file's base name. Patterns
//! containing `/` are *path-scoped* and matched against the whole
//! source-relative path.

pub mod placeholder;
mod render;

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use thiserror::Error;

pub use placeholder::PlaceholderSyntax;
pub use render::{RenderError, render};

use crate::page::Params;
use placeholder::{Segment, segments};

/// Patterns that are always ignored, in addition to configured ones.
pub const BUILTIN_IGNORE: &[&str] = &[
    ".*",
    "yarn.lock",
    "package.json",
    "package-lock.json",
    "node_modules",
];

/// Placeholder always provided when rendering a URL.
pub const SLUG: &str = "slug";

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern must not be empty")]
    Empty,
    #[error("invalid glob `{pattern}`: {source}")]
    Glob {
        pattern: String,
        source: globset::Error,
    },
    #[error("invalid template `{pattern}`: {source}")]
    Template {
        pattern: String,
        source: regex::Error,
    },
}

// ============================================================================
// Pattern
// ============================================================================

/// A compiled include/ignore/index pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    Glob {
        source: String,
        matcher: GlobMatcher,
    },
    Template {
        source: String,
        regex: Regex,
        names: Vec<String>,
    },
}

impl Pattern {
    pub fn new(source: &str, syntax: PlaceholderSyntax) -> Result<Self, PatternError> {
        if source.trim().is_empty() {
            return Err(PatternError::Empty);
        }

        // Path-scoped patterns are relative to the source directory
        let body = if source.contains('/') {
            source.trim_start_matches('/')
        } else {
            source
        };

        if placeholder::has_placeholders(body, syntax) {
            Self::template(source, body, syntax)
        } else {
            let matcher = GlobBuilder::new(body)
                .literal_separator(true)
                .build()
                .map_err(|e| PatternError::Glob {
                    pattern: source.to_string(),
                    source: e,
                })?
                .compile_matcher();
            Ok(Self::Glob {
                source: source.to_string(),
                matcher,
            })
        }
    }

    fn template(source: &str, body: &str, syntax: PlaceholderSyntax) -> Result<Self, PatternError> {
        let mut expr = String::from("^");
        let mut names = Vec::new();

        for segment in segments(body, syntax) {
            match segment {
                Segment::Literal(text) => expr.push_str(&regex::escape(text)),
                Segment::Placeholder(name) => {
                    // Shortest non-empty run that stays within one path segment
                    expr.push_str("([^/]+?)");
                    names.push(name.to_string());
                }
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| PatternError::Template {
            pattern: source.to_string(),
            source: e,
        })?;

        Ok(Self::Template {
            source: source.to_string(),
            regex,
            names,
        })
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Glob { source, .. } | Self::Template { source, .. } => source,
        }
    }

    /// Whether the pattern is matched against the whole relative path.
    pub fn is_scoped(&self) -> bool {
        self.source().contains('/')
    }

    /// Placeholder names, in pattern order (empty for globs).
    pub fn placeholders(&self) -> &[String] {
        match self {
            Self::Glob { .. } => &[],
            Self::Template { names, .. } => names,
        }
    }

    /// Match a candidate string, returning captured parameters.
    pub fn matches(&self, candidate: &str) -> Option<Params> {
        match self {
            Self::Glob { matcher, .. } => matcher.is_match(candidate).then(Params::new),
            Self::Template { regex, names, .. } => {
                let caps = regex.captures(candidate)?;
                let params = names
                    .iter()
                    .zip(caps.iter().skip(1))
                    .filter_map(|(name, m)| m.map(|m| (name.clone(), m.as_str().to_string())))
                    .collect();
                Some(params)
            }
        }
    }

    /// Match a source-relative path (`/`-separated).
    pub fn matches_path(&self, rel_path: &str) -> Option<Params> {
        if self.is_scoped() {
            self.matches(rel_path)
        } else {
            self.matches(base_name(rel_path))
        }
    }

    /// Match the path or any of its ancestor directories.
    fn matches_path_or_ancestor(&self, rel_path: &str) -> bool {
        let mut end = 0;
        for (i, part) in rel_path.split('/').enumerate() {
            end += part.len() + usize::from(i > 0);
            let candidate = if self.is_scoped() {
                &rel_path[..end]
            } else {
                part
            };
            if self.matches(candidate).is_some() {
                return true;
            }
        }
        false
    }
}

fn base_name(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}

// ============================================================================
// PatternSet
// ============================================================================

/// An ordered list of patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(
        sources: &[S],
        syntax: PlaceholderSyntax,
    ) -> Result<Self, PatternError> {
        let patterns = sources
            .iter()
            .map(|s| Pattern::new(s.as_ref(), syntax))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    /// Parameters of the first pattern matching the path.
    pub fn first_match(&self, rel_path: &str) -> Option<Params> {
        self.patterns.iter().find_map(|p| p.matches_path(rel_path))
    }

    pub fn is_match(&self, rel_path: &str) -> bool {
        self.first_match(rel_path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Include/ignore/index decisions for one source directory.
#[derive(Debug, Clone)]
pub struct Rules {
    include: PatternSet,
    ignore: PatternSet,
    indexes: PatternSet,
}

impl Rules {
    /// Build rules; built-in ignores are prepended to `ignore`.
    pub fn new<S: AsRef<str>>(
        include: &[S],
        ignore: &[S],
        indexes: &[S],
        syntax: PlaceholderSyntax,
    ) -> Result<Self, PatternError> {
        let all_ignores: Vec<&str> = BUILTIN_IGNORE
            .iter()
            .copied()
            .chain(ignore.iter().map(AsRef::as_ref))
            .collect();

        Ok(Self {
            include: PatternSet::new(include, syntax)?,
            ignore: PatternSet::new(all_ignores.as_slice(), syntax)?,
            indexes: PatternSet::new(indexes, syntax)?,
        })
    }

    /// Parameters for an included path, `None` if excluded or ignored.
    pub fn included(&self, rel_path: &str) -> Option<Params> {
        if self.is_ignored(rel_path) {
            return None;
        }
        self.include.first_match(rel_path)
    }

    /// Whether the path, or one of its ancestor directories, is ignored.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        self.ignore
            .iter()
            .any(|p| p.matches_path_or_ancestor(rel_path))
    }

    /// Index detection is independent of include/ignore.
    pub fn is_index(&self, rel_path: &str) -> bool {
        self.indexes.is_match(rel_path)
    }

    pub fn include(&self) -> &PatternSet {
        &self.include
    }
}

/// First placeholder of `url` (other than `slug`) missing from `pattern`.
pub fn uncovered_placeholder<'a>(
    url: &'a str,
    pattern: &Pattern,
    syntax: PlaceholderSyntax,
) -> Option<&'a str> {
    placeholder::names(url, syntax)
        .into_iter()
        .filter(|name| *name != SLUG)
        .find(|name| !pattern.placeholders().iter().any(|p| p == name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTO: PlaceholderSyntax = PlaceholderSyntax::Auto;

    fn rules(include: &[&str], ignore: &[&str], indexes: &[&str]) -> Rules {
        Rules::new(include, ignore, indexes, AUTO).unwrap()
    }

    #[test]
    fn test_glob_matches_base_name() {
        let p = Pattern::new("*.md", AUTO).unwrap();
        assert!(matches!(p, Pattern::Glob { .. }));
        assert!(p.matches_path("a/b/c.md").is_some());
        assert!(p.matches_path("c.markdown").is_none());
    }

    #[test]
    fn test_glob_scoped() {
        let p = Pattern::new("drafts/*.md", AUTO).unwrap();
        assert!(p.is_scoped());
        assert!(p.matches_path("drafts/a.md").is_some());
        assert!(p.matches_path("drafts/deep/a.md").is_none());
        assert!(p.matches_path("a.md").is_none());

        let deep = Pattern::new("drafts/**/*.md", AUTO).unwrap();
        assert!(deep.matches_path("drafts/deep/a.md").is_some());
    }

    #[test]
    fn test_glob_alternation() {
        let p = Pattern::new("*.{md,markdown}", AUTO).unwrap();
        assert!(matches!(p, Pattern::Glob { .. }));
        assert!(p.matches("a.markdown").is_some());
    }

    #[test]
    fn test_template_captures_in_order() {
        let p = Pattern::new("{year}-{month}-{day} - {title}.md", AUTO).unwrap();
        let params = p.matches("2004-12-20 - Blog Article 1.md").unwrap();

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("year", "2004"),
                ("month", "12"),
                ("day", "20"),
                ("title", "Blog Article 1"),
            ]
        );
    }

    #[test]
    fn test_template_shortest_first() {
        let p = Pattern::new("{a}-{b}.md", AUTO).unwrap();
        let params = p.matches("x-y-z.md").unwrap();
        assert_eq!(params.get("a"), Some("x"));
        assert_eq!(params.get("b"), Some("y-z"));
    }

    #[test]
    fn test_template_requires_non_empty_capture() {
        let p = Pattern::new("{a}.md", AUTO).unwrap();
        assert!(p.matches(".md").is_none());
        assert!(p.matches("a.txt").is_none());
    }

    #[test]
    fn test_template_scoped_does_not_cross_segments() {
        let p = Pattern::new("posts/{slug}.md", AUTO).unwrap();
        assert!(p.matches_path("posts/hello.md").is_some());
        assert!(p.matches_path("posts/a/hello.md").is_none());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(Pattern::new("", AUTO), Err(PatternError::Empty)));
        assert!(matches!(Pattern::new("  ", AUTO), Err(PatternError::Empty)));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        assert!(matches!(
            Pattern::new("[abc", AUTO),
            Err(PatternError::Glob { .. })
        ));
    }

    #[test]
    fn test_ignore_wins_over_include() {
        let r = rules(&["*.md"], &["draft-*"], &["index.*"]);
        assert!(r.included("post.md").is_some());
        assert!(r.included("draft-post.md").is_none());
    }

    #[test]
    fn test_builtin_ignores() {
        let r = rules(&["*.md", "*.json"], &[], &[]);
        assert!(r.included(".hidden.md").is_none());
        assert!(r.included("package.json").is_none());
        assert!(r.included("node_modules/pkg/readme.md").is_none());
        assert!(r.included(".git/notes.md").is_none());
        assert!(r.included("docs/data.json").is_some());
    }

    #[test]
    fn test_index_independent_of_include() {
        let r = rules(&["*.md"], &[], &["index.*", "README.*"]);
        assert!(r.is_index("index.html"));
        assert!(r.is_index("a/README.md"));
        assert!(!r.is_index("indexes.md"));
        assert!(r.included("index.html").is_none());
    }

    #[test]
    fn test_scoped_ignore_prunes_directory() {
        let r = rules(&["*.md"], &["drafts/old"], &[]);
        assert!(r.is_ignored("drafts/old"));
        assert!(r.included("drafts/old/a.md").is_none());
        assert!(r.included("drafts/new/a.md").is_some());
    }

    #[test]
    fn test_uncovered_placeholder() {
        let include = Pattern::new("{a}-{b}.md", AUTO).unwrap();
        assert_eq!(uncovered_placeholder("/:slug/{a}/{b}", &include, AUTO), None);
        assert_eq!(
            uncovered_placeholder("/{a}/{{b}}/${c}", &include, AUTO),
            Some("c")
        );

        let glob = Pattern::new("*.md", AUTO).unwrap();
        assert_eq!(uncovered_placeholder("/:slug", &glob, AUTO), None);
        assert_eq!(uncovered_placeholder("/:year/:slug", &glob, AUTO), Some("year"));
    }
}
