use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rustc_hash::FxHashMap;

use super::types::{ChangeKind, DebouncedEvents};
use crate::actor::tracked::TrackedFiles;
use crate::utils::path::normalize_path;

/// Turns one window of raw changes into actionable events.
///
/// Pipeline: correct_by_existence → recover_from_dir_events →
/// expand_created_dirs → promote_untracked → filter_actionable
pub(super) struct EventClassifier;

impl EventClassifier {
    pub(super) fn classify(
        raw: FxHashMap<PathBuf, ChangeKind>,
        roots: &[PathBuf],
        tracked: &TrackedFiles,
    ) -> Option<DebouncedEvents> {
        let mut changes = raw;

        Self::correct_by_existence(&mut changes);
        Self::recover_from_dir_events(&mut changes, tracked);
        Self::expand_created_dirs(&mut changes, tracked);
        Self::promote_untracked(&mut changes, tracked);
        Self::filter_actionable(&mut changes, roots, tracked);

        if changes.is_empty() {
            return None;
        }
        Some(DebouncedEvents(changes.into_iter().collect()))
    }

    /// Reconcile event kinds with what is on disk now.
    ///
    /// Atomic saves often report Removed for a file that exists again, and
    /// short-lived files report Created after they are gone.
    pub(super) fn correct_by_existence(changes: &mut FxHashMap<PathBuf, ChangeKind>) {
        for (path, kind) in changes.iter_mut() {
            let exists = path.exists();
            match *kind {
                ChangeKind::Created | ChangeKind::Modified if !exists => {
                    crate::debug!("watch"; "{} but gone: {}", kind.label(), path.display());
                    *kind = ChangeKind::Removed;
                }
                ChangeKind::Removed if exists => {
                    crate::debug!("watch"; "removed but present: {}", path.display());
                    *kind = ChangeKind::Modified;
                }
                _ => {}
            }
        }
    }

    /// Recover file events from directory-level Modify events.
    ///
    /// kqueue and FSEvents may only report the directory when a file inside
    /// is deleted and recreated. Scan those directories for tracked files
    /// that vanished and untracked files that appeared.
    fn recover_from_dir_events(
        changes: &mut FxHashMap<PathBuf, ChangeKind>,
        tracked: &TrackedFiles,
    ) {
        let modified_dirs: Vec<PathBuf> = changes
            .iter()
            .filter(|(p, k)| **k == ChangeKind::Modified && p.is_dir())
            .map(|(p, _)| p.clone())
            .collect();

        for dir in &modified_dirs {
            for path in tracked.children_of(dir) {
                if !path.exists() && !changes.contains_key(&path) {
                    crate::debug!("watch"; "dir-scan found missing: {}", path.display());
                    changes.insert(path, ChangeKind::Removed);
                }
            }

            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = normalize_path(&entry.path());
                if path.is_file() && !changes.contains_key(&path) && !tracked.contains(&path) {
                    crate::debug!("watch"; "dir-scan found untracked: {}", path.display());
                    changes.insert(path, ChangeKind::Created);
                }
            }
        }
    }

    /// A directory moved into a source only reports itself; add its files.
    fn expand_created_dirs(changes: &mut FxHashMap<PathBuf, ChangeKind>, tracked: &TrackedFiles) {
        let created_dirs: Vec<PathBuf> = changes
            .iter()
            .filter(|(p, k)| **k == ChangeKind::Created && p.is_dir())
            .map(|(p, _)| p.clone())
            .collect();

        for dir in created_dirs {
            let files = WalkDir::new(&dir)
                .sort(true)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| normalize_path(&e.path()));

            for path in files {
                if !tracked.contains(&path) {
                    changes.entry(path).or_insert(ChangeKind::Created);
                }
            }
        }
    }

    /// A modified file that is not tracked is new to us (write-then-rename
    /// editors, or a file that was previously skipped).
    fn promote_untracked(changes: &mut FxHashMap<PathBuf, ChangeKind>, tracked: &TrackedFiles) {
        for (path, kind) in changes.iter_mut() {
            if *kind == ChangeKind::Modified && path.is_file() && !tracked.contains(path) {
                *kind = ChangeKind::Created;
            }
        }
    }

    /// Keep only events the sync actor can act on.
    ///
    /// - outside every watched root: dropped
    /// - Created/Modified: must be a file
    /// - Removed: must be tracked, or a directory holding tracked files
    pub(super) fn filter_actionable(
        changes: &mut FxHashMap<PathBuf, ChangeKind>,
        roots: &[PathBuf],
        tracked: &TrackedFiles,
    ) {
        changes.retain(|path, kind| {
            if !is_under_roots(path, roots) {
                return false;
            }
            match kind {
                ChangeKind::Created | ChangeKind::Modified => path.is_file(),
                ChangeKind::Removed => {
                    let relevant = tracked.contains(path) || tracked.any_under(path);
                    if !relevant {
                        crate::debug!("watch"; "filter removed (not tracked): {}", path.display());
                    }
                    relevant
                }
            }
        });
    }
}

fn is_under_roots(path: &Path, roots: &[PathBuf]) -> bool {
    roots.iter().any(|root| path.starts_with(root))
}
