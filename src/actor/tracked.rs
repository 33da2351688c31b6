//! Tracked source files, shared between the sync actor and the watcher.
//!
//! The sync actor is the only writer. The watcher reads it to decide
//! whether a `Modified` file is new and whether a `Removed` path matters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use crate::sync::NodeGraph;

#[derive(Debug, Clone, Default)]
pub struct TrackedFiles(Arc<RwLock<FxHashSet<PathBuf>>>);

impl TrackedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.0.read().contains(path)
    }

    /// Whether any tracked file lives under `dir`.
    pub fn any_under(&self, dir: &Path) -> bool {
        self.0.read().iter().any(|p| p.starts_with(dir) && p != dir)
    }

    /// Tracked files directly inside `dir`.
    pub fn children_of(&self, dir: &Path) -> Vec<PathBuf> {
        self.0
            .read()
            .iter()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Replace the set with the files currently in `graph`.
    pub fn sync_from(&self, graph: &NodeGraph) {
        let paths = graph.iter().map(|node| node.absolute_path.clone()).collect();
        *self.0.write() = paths;
    }

    #[cfg(test)]
    pub fn insert(&self, path: impl Into<PathBuf>) {
        self.0.write().insert(path.into());
    }
}
