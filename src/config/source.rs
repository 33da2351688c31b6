//! `[[source]]` table: one watched directory.
//!
//! # Example
//!
//! ```toml
//! [[source]]
//! path = "pages"
//! template = "Page.jsx"
//! url = "/:slug"
//! include = ["*.md", "*.markdown"]
//! ignore = "drafts"
//! indexes = ["index.*", "README.*"]
//! placeholders = "auto"
//! debug = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::{ConfigDiagnostics, FieldPath};
use super::util::one_or_many;
use crate::pattern::{Pattern, PlaceholderSyntax, Rules, uncovered_placeholder};
use crate::sync::Source;
use crate::utils::path::route::slashify;
use crate::utils::path::{expand_tilde, normalize_path, resolve_path};

/// Templates are looked up here when not found relative to the root.
pub const TEMPLATES_DIR: &str = "src/templates";

fn default_include() -> Vec<String> {
    vec!["*.md".into(), "*.markdown".into()]
}

fn default_indexes() -> Vec<String> {
    vec!["index.*".into(), "README.*".into()]
}

/// Raw `[[source]]` options as written in the config file.
///
/// `path` and `template` are optional here so a missing value is reported
/// as a diagnostic alongside every other problem.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub template: Option<String>,
    /// Defaults to `/:slug` in the configured placeholder syntax.
    pub url: Option<String>,
    #[serde(default = "default_include", deserialize_with = "one_or_many")]
    pub include: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub ignore: Vec<String>,
    #[serde(default = "default_indexes", deserialize_with = "one_or_many")]
    pub indexes: Vec<String>,
    #[serde(default)]
    pub placeholders: PlaceholderSyntax,
    #[serde(default)]
    pub debug: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            template: None,
            url: None,
            include: default_include(),
            ignore: Vec::new(),
            indexes: default_indexes(),
            placeholders: PlaceholderSyntax::default(),
            debug: false,
        }
    }
}

impl SourceConfig {
    pub fn url(&self) -> &str {
        self.url
            .as_deref()
            .unwrap_or_else(|| self.placeholders.default_url())
    }

    /// Validate and compile into a [`Source`].
    ///
    /// Every problem is recorded in `diag`; `None` is returned if any
    /// were found for this table.
    pub fn compile(&self, index: usize, root: &Path, diag: &mut ConfigDiagnostics) -> Option<Source> {
        let field = FieldPath::source(index);
        let errors_before = diag.len();

        let dir = self.validate_dir(&field, root, diag);
        let template = self.validate_template(&field, root, diag);

        let url = self.url();
        if url.trim().is_empty() {
            diag.error(field.field("url"), "must not be empty");
        }

        let syntax = self.placeholders;
        let include = compile_patterns(&field.field("include"), &self.include, syntax, diag);
        compile_patterns(&field.field("ignore"), &self.ignore, syntax, diag);
        compile_patterns(&field.field("indexes"), &self.indexes, syntax, diag);

        if self.include.is_empty() {
            diag.error(field.field("include"), "must contain at least one pattern");
        }

        for (i, pattern) in include.iter().enumerate() {
            let Some(pattern) = pattern else { continue };
            if let Some(name) = uncovered_placeholder(url, pattern, syntax) {
                diag.error_with_hint(
                    field.field("include").item(i),
                    format!("must include all placeholders from url (missing {{{name}}})"),
                    format!("url is `{url}`"),
                );
            }
        }

        if diag.len() > errors_before {
            return None;
        }

        let rules = match Rules::new(&self.include, &self.ignore, &self.indexes, syntax) {
            Ok(rules) => rules,
            Err(err) => {
                diag.error(field, err.to_string());
                return None;
            }
        };

        Some(Source {
            label: self.path.clone().unwrap_or_default(),
            dir: dir?,
            template: template?,
            url: slashify(url),
            syntax,
            rules,
            debug: self.debug,
        })
    }

    fn validate_dir(
        &self,
        field: &FieldPath,
        root: &Path,
        diag: &mut ConfigDiagnostics,
    ) -> Option<PathBuf> {
        let field = field.field("path");
        let Some(path) = self.path.as_deref().filter(|p| !p.trim().is_empty()) else {
            diag.error(field, "is required");
            return None;
        };

        let dir = root.join(expand_tilde(Path::new(path)));
        if !dir.exists() {
            diag.error(
                field,
                format!("directory does not exist: {}", dir.display()),
            );
            return None;
        }
        if !dir.is_dir() {
            diag.error(
                field,
                format!("must be a directory: {}", dir.display()),
            );
            return None;
        }
        Some(normalize_path(&dir))
    }

    fn validate_template(
        &self,
        field: &FieldPath,
        root: &Path,
        diag: &mut ConfigDiagnostics,
    ) -> Option<PathBuf> {
        let field = field.field("template");
        let Some(template) = self.template.as_deref().filter(|t| !t.trim().is_empty()) else {
            diag.error(field, "is required");
            return None;
        };

        let path = resolve_path(
            &expand_tilde(Path::new(template)),
            root,
            &root.join(TEMPLATES_DIR),
        );
        if !path.exists() {
            diag.error_with_hint(
                field,
                format!("template file does not exist: {}", path.display()),
                format!("relative templates are resolved against the project root, then {TEMPLATES_DIR}/"),
            );
            return None;
        }
        if !path.is_file() {
            diag.error(
                field,
                format!("template must be a file: {}", path.display()),
            );
            return None;
        }
        Some(normalize_path(&path))
    }
}

/// Compile each pattern, recording failures. Failed entries are `None`.
fn compile_patterns(
    field: &FieldPath,
    patterns: &[String],
    syntax: PlaceholderSyntax,
    diag: &mut ConfigDiagnostics,
) -> Vec<Option<Pattern>> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, source)| match Pattern::new(source, syntax) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                diag.error(field.item(i), err.to_string());
                None
            }
        })
        .collect()
}
