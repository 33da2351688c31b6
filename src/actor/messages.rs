//! Actor Message Definitions
//!
//! ```text
//! FsActor --SyncMsg--> SyncActor
//! ```

use std::path::PathBuf;

/// Messages to the Sync Actor
///
/// Paths are absolute and normalized. Within one debounce window the
/// watcher sends `Removed` first, so a rename frees the old URL before
/// the new file claims it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncMsg {
    /// Files (or directories) that disappeared
    Removed(Vec<PathBuf>),
    /// New files
    Created(Vec<PathBuf>),
    /// Files whose content changed
    Modified(Vec<PathBuf>),
    /// Stop after the current message
    Shutdown,
}

impl SyncMsg {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Removed(_) => "removed",
            Self::Created(_) => "created",
            Self::Modified(_) => "modified",
            Self::Shutdown => "shutdown",
        }
    }
}
