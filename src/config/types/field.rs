//! Config field paths used in diagnostics.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted/indexed path to a config field, e.g. `source[0].include[1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path of the `index`-th `[[source]]` table.
    pub fn source(index: usize) -> Self {
        Self(format!("source[{index}]"))
    }

    /// Child field, e.g. `source[0]` + `url` -> `source[0].url`.
    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    /// List element, e.g. `source[0].include` + 1 -> `source[0].include[1]`.
    pub fn item(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_building() {
        let src = FieldPath::source(2);
        assert_eq!(src.as_str(), "source[2]");
        assert_eq!(src.field("url").as_str(), "source[2].url");
        assert_eq!(src.field("include").item(0).as_str(), "source[2].include[0]");
    }
}
