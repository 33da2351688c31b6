//! Utility modules shared across the codebase.

pub mod date;
pub mod hash;
pub mod mime;
pub mod path;
pub mod plural;

pub use plural::{plural_count, pretty_size};
