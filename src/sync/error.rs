//! Errors raised while applying file events to the graph.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::page::PathError;
use crate::pattern::RenderError;

/// Fatal error for a single add/unlink event.
///
/// Duplicate URLs are not errors: they are reported as warnings and the
/// second file is skipped.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to read `{}`: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("unknown source #{0}")]
    UnknownSource(usize),
}
