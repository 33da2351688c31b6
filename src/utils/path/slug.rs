//! URL slugification.
//!
//! A slug is the lowercase, hyphen-delimited form of a path segment or title.
//! Every input produces a slug (possibly empty), and slugifying a slug is a no-op.

/// Turn arbitrary text into a URL-safe slug segment.
///
/// # Examples
///
/// - `"This Should Be Slugged"` -> `"this-should-be-slugged"`
/// - `"--- This Should Be --- Slugged ---"` -> `"this-should-be-slugged"`
/// - `"__My_Other_File__.test"` -> `"my-other-file-test"`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        let ch = if ch.is_whitespace() || ch == '.' || ch == '_' {
            '-'
        } else {
            ch
        };

        match ch {
            '-' => pending_hyphen = true,
            'a'..='z' | '0'..='9' => {
                // Hyphens are only written between kept characters, which trims
                // both ends and collapses runs in one pass.
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(ch);
            }
            // Disallowed characters vanish without breaking a hyphen run.
            _ => {}
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_words() {
        assert_eq!(slugify("This Should Be Slugged"), "this-should-be-slugged");
        assert_eq!(
            slugify("--- This Should Be --- Slugged ---"),
            "this-should-be-slugged"
        );
    }

    #[test]
    fn test_slugify_separators() {
        assert_eq!(slugify("My File"), "my-file");
        assert_eq!(slugify(".__c_two.md"), "c-two-md");
        assert_eq!(slugify("__My_Other_File__.test"), "my-other-file-test");
        assert_eq!(slugify("a \t\n b"), "a-b");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("  My Dir !!!??  "), "my-dir");
        assert_eq!(slugify("My File!!!??"), "my-file");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("café"), "caf");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in [
            "This Should Be Slugged",
            "  My Dir !!!??  ",
            ".__c_two.md",
            "2004-12-20 - Blog Article 1",
            "UPPER_snake.Case",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }
}
