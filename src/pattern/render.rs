//! URL rendering from placeholder templates.

use thiserror::Error;

use super::placeholder::{PlaceholderSyntax, Segment, segments};
use crate::page::Params;
use crate::utils::path::route::normalize_url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("unresolved placeholder `{name}` in url `{template}`")]
    Unresolved { template: String, name: String },
}

/// Render a URL template, substituting placeholder values verbatim.
///
/// The result is normalized to a single leading `/`, with repeated
/// slashes collapsed and no trailing `/` (except for the root URL).
///
/// ```ignore
/// let mut values = Params::new();
/// values.insert("slug", "child2/subchild1");
/// assert_eq!(render("/:slug", &values, PlaceholderSyntax::Auto)?, "/child2/subchild1");
/// ```
pub fn render(
    template: &str,
    values: &Params,
    syntax: PlaceholderSyntax,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());

    for segment in segments(template, syntax) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                let value = values.get(name).ok_or_else(|| RenderError::Unresolved {
                    template: template.to_string(),
                    name: name.to_string(),
                })?;
                out.push_str(value);
            }
        }
    }

    Ok(normalize_url(&out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_render_slug() {
        let v = values(&[("slug", "child2/subchild1")]);
        assert_eq!(
            render("/:slug", &v, PlaceholderSyntax::Auto).unwrap(),
            "/child2/subchild1"
        );
    }

    #[test]
    fn test_render_root() {
        let v = values(&[("slug", "")]);
        assert_eq!(render("/:slug", &v, PlaceholderSyntax::Auto).unwrap(), "/");
        assert_eq!(render(":slug", &v, PlaceholderSyntax::Colon).unwrap(), "/");
    }

    #[test]
    fn test_render_normalizes() {
        let v = values(&[("slug", "")]);
        assert_eq!(
            render("pages//{slug}/", &v, PlaceholderSyntax::Braces).unwrap(),
            "/pages"
        );
    }

    #[test]
    fn test_render_blog() {
        let v = values(&[
            ("slug", "2004-12-20-blog-article-1"),
            ("year", "2004"),
            ("month", "12"),
            ("day", "20"),
            ("title", "blog-article-1"),
        ]);
        assert_eq!(
            render(
                "/blog/{year}/{month}/{day}/{title}",
                &v,
                PlaceholderSyntax::Auto
            )
            .unwrap(),
            "/blog/2004/12/20/blog-article-1"
        );
    }

    #[test]
    fn test_render_unresolved() {
        let v = values(&[("slug", "a")]);
        let err = render("/{section}/:slug", &v, PlaceholderSyntax::Auto).unwrap_err();
        assert_eq!(
            err,
            RenderError::Unresolved {
                template: "/{section}/:slug".into(),
                name: "section".into(),
            }
        );
    }
}
