//! Project configuration management for `templated.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── source.rs      # [[source]] tables
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! ├── util.rs        # Config file lookup, string-or-list fields
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! The project root is the directory containing the config file. Source
//! paths and templates are resolved against it.

mod source;
pub mod types;
mod util;

pub use source::SourceConfig;
#[cfg(test)]
pub use source::TEMPLATES_DIR;
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use util::find_config_file;

use crate::sync::Source;
use crate::utils::path::normalize_path;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "templated.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `templated.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// One entry per `[[source]]` table
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,
}

impl ProjectConfig {
    /// Find and load the config file, searching upward from cwd.
    ///
    /// Unknown fields are reported as warnings and ignored.
    pub fn load(config_name: &Path) -> Result<Self> {
        let Some(config_path) = find_config_file(config_name) else {
            bail!(
                "config file `{}` not found in the current directory or any parent",
                config_name.display()
            );
        };
        let config_path = normalize_path(&config_path);

        let (mut config, diag) = Self::from_path(&config_path)?;
        let display_path = config_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config_path.display().to_string());
        diag.print_warnings(&display_path);

        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::parse_with_ignored(content)?.0)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<(Self, ConfigDiagnostics)> {
        if !path.is_file() {
            return Err(ConfigError::Validation(format!("`{}` is not a file", path.display())).into());
        }
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            diag.unknown_field(path.to_string());
        })?;
        Ok((config, diag))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Whether any source asks for debug tracing.
    pub fn is_debug(&self) -> bool {
        self.sources.iter().any(|s| s.debug)
    }

    /// Validate every source and compile them.
    ///
    /// All problems are collected before failing, so one run reports
    /// every error in the file.
    pub fn compile(&self) -> Result<Vec<Source>, ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.sources.is_empty() {
            diag.error_with_hint(
                FieldPath::new("source"),
                "at least one source is required",
                "add a [[source]] table with `path` and `template`",
            );
        }

        let compiled: Vec<Option<Source>> = self
            .sources
            .iter()
            .enumerate()
            .map(|(i, source)| source.compile(i, &self.root, &mut diag))
            .collect();

        diag.into_result()?;
        Ok(compiled.into_iter().flatten().collect())
    }
}

// ============================================================================
// tests
// ============================================================================
