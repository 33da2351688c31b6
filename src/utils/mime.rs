//! MIME type detection utilities.
//!
//! Maps a file extension to the media type recorded on page nodes.
//! Unknown extensions have no media type (serialized as `null`).

/// Common MIME type constants.
pub mod types {
    // Text
    pub const HTML: &str = "text/html";
    pub const PLAIN: &str = "text/plain";
    pub const CSS: &str = "text/css";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const JSX: &str = "text/jsx";
    pub const TYPESCRIPT: &str = "application/typescript";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const MARKDOWN: &str = "text/markdown";
    pub const MDX: &str = "text/mdx";
    pub const YAML: &str = "text/yaml";
    pub const TOML: &str = "application/toml";
    pub const CSV: &str = "text/csv";
    pub const TYPST: &str = "text/vnd.typst";

    // Documents
    pub const PDF: &str = "application/pdf";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
}

/// Guess the media type from a file extension (case-insensitive).
pub fn from_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    let media = match ext.as_str() {
        "html" | "htm" => types::HTML,
        "txt" | "text" => types::PLAIN,
        "css" => types::CSS,
        "js" | "mjs" | "cjs" => types::JAVASCRIPT,
        "jsx" => types::JSX,
        "ts" | "tsx" | "mts" | "cts" => types::TYPESCRIPT,
        "json" => types::JSON,
        "xml" => types::XML,
        "md" | "markdown" => types::MARKDOWN,
        "mdx" => types::MDX,
        "yaml" | "yml" => types::YAML,
        "toml" => types::TOML,
        "csv" => types::CSV,
        "typ" => types::TYPST,
        "pdf" => types::PDF,
        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "avif" => types::AVIF,
        "svg" => types::SVG,
        _ => return None,
    };
    Some(media)
}
