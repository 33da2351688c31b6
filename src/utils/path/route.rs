//! URL path utilities.
//!
//! Provides consistent URL handling across the codebase:
//! - Leading slash handling
//! - Normalization of rendered URLs
//! - Path-prefix checks used for parent/child adjacency

/// Prepend a leading slash to a URL path if it doesn't have one
///
/// # Examples
/// ```ignore
/// assert_eq!(slashify("index.js"), "/index.js");
/// assert_eq!(slashify("/index.js"), "/index.js");
/// ```
#[inline]
pub fn slashify(url: &str) -> String {
    if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{url}")
    }
}

/// Normalize a rendered URL path
///
/// - Exactly one leading slash
/// - Runs of slashes collapsed into one
/// - No trailing slash (except the root URL `/`)
///
/// # Examples
/// ```ignore
/// assert_eq!(normalize_url(""), "/");
/// assert_eq!(normalize_url("pages/"), "/pages");
/// assert_eq!(normalize_url("//blog//2004/"), "/blog/2004");
/// ```
pub fn normalize_url(url: &str) -> String {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Check whether `parent` is a strict path-prefix of `child`
///
/// The prefix boundary must fall on a `/`, so `/a` is a prefix of `/a/b`
/// but not of `/ab`. The root URL `/` is a prefix of every other URL.
///
/// # Examples
/// ```ignore
/// assert!(is_path_prefix("/a", "/a/b"));
/// assert!(!is_path_prefix("/a", "/ab"));
/// assert!(!is_path_prefix("/a", "/a"));
/// ```
pub fn is_path_prefix(parent: &str, child: &str) -> bool {
    if parent == "/" {
        return child.len() > 1 && child.starts_with('/');
    }
    child
        .strip_prefix(parent)
        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slashify() {
        assert_eq!(slashify("index.js"), "/index.js");
        assert_eq!(slashify("/index.js"), "/index.js");
        assert_eq!(slashify(""), "/");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(""), "/");
        assert_eq!(normalize_url("/"), "/");
        assert_eq!(normalize_url("//"), "/");
        assert_eq!(normalize_url("child1"), "/child1");
        assert_eq!(normalize_url("/pages/"), "/pages");
        assert_eq!(normalize_url("//blog//2004/12/"), "/blog/2004/12");
    }

    #[test]
    fn test_is_path_prefix() {
        assert!(is_path_prefix("/a", "/a/b"));
        assert!(is_path_prefix("/a/b", "/a/b/c"));
        assert!(is_path_prefix("/", "/a"));
        assert!(!is_path_prefix("/", "/"));
        assert!(!is_path_prefix("/a", "/a"));
        assert!(!is_path_prefix("/a", "/ab"));
        assert!(!is_path_prefix("/a", "/a/"));
        assert!(!is_path_prefix("/a/b", "/a"));
    }
}
