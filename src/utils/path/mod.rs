//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`, `expand_tilde`)
//! - [`route`]: URL utilities (`slashify`, `normalize_url`, `is_path_prefix`)
//! - [`slug`]: URL slugification (`slugify`)

pub mod fs;
pub mod route;
pub mod slug;

// Re-export commonly used functions from fs (used in many places)
pub use fs::{expand_tilde, normalize_path, relative_to, resolve_path};
pub use slug::slugify;
