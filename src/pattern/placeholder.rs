//! Placeholder syntax detection.
//!
//! A placeholder is a named span inside a pattern or URL template, written
//! in one of four syntaxes:
//!
//! | Syntax          | Example   |
//! |-----------------|-----------|
//! | `braces`        | `{title}` |
//! | `double-braces` | `{{title}}` |
//! | `dollar`        | `${title}` |
//! | `colon`         | `:title`  |
//!
//! `auto` recognizes all of them. Names match `[A-Za-z_][A-Za-z0-9_]*`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

macro_rules! name {
    () => {
        "([A-Za-z_][A-Za-z0-9_]*)"
    };
}

static BRACES: LazyLock<Regex> = LazyLock::new(|| compile(concat!(r"\{", name!(), r"\}")));
static DOUBLE_BRACES: LazyLock<Regex> =
    LazyLock::new(|| compile(concat!(r"\{\{", name!(), r"\}\}")));
static DOLLAR: LazyLock<Regex> = LazyLock::new(|| compile(concat!(r"\$\{", name!(), r"\}")));
static COLON: LazyLock<Regex> = LazyLock::new(|| compile(concat!(":", name!())));
static AUTO: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"\$\{",
        name!(),
        r"\}|\{\{",
        name!(),
        r"\}\}|\{",
        name!(),
        r"\}|:",
        name!()
    ))
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("placeholder regex is valid")
}

/// Placeholder syntax accepted in patterns and URL templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderSyntax {
    #[default]
    Auto,
    Braces,
    DoubleBraces,
    Dollar,
    Colon,
}

impl PlaceholderSyntax {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Auto => &AUTO,
            Self::Braces => &BRACES,
            Self::DoubleBraces => &DOUBLE_BRACES,
            Self::Dollar => &DOLLAR,
            Self::Colon => &COLON,
        }
    }

    /// Default URL template (`/:slug` in the matching syntax).
    pub fn default_url(self) -> &'static str {
        match self {
            Self::Auto | Self::Colon => "/:slug",
            Self::Braces => "/{slug}",
            Self::DoubleBraces => "/{{slug}}",
            Self::Dollar => "/${slug}",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Braces => "braces",
            Self::DoubleBraces => "double-braces",
            Self::Dollar => "dollar",
            Self::Colon => "colon",
        }
    }
}

/// A piece of a parsed pattern or template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Split text into literal runs and placeholders.
pub fn segments(text: &str, syntax: PlaceholderSyntax) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in syntax.regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        // Exactly one alternative participates in an `auto` match
        let Some(name) = caps.iter().skip(1).flatten().next() else {
            continue;
        };
        if whole.start() > last {
            out.push(Segment::Literal(&text[last..whole.start()]));
        }
        out.push(Segment::Placeholder(name.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        out.push(Segment::Literal(&text[last..]));
    }
    out
}

/// Placeholder names in order of appearance (duplicates kept).
pub fn names(text: &str, syntax: PlaceholderSyntax) -> Vec<&str> {
    segments(text, syntax)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

pub fn has_placeholders(text: &str, syntax: PlaceholderSyntax) -> bool {
    syntax.regex().is_match(text)
}
