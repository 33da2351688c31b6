use std::path::PathBuf;

use crate::sync::Source;

/// Source directories to watch, without directories nested in another.
///
/// Watches are recursive, so a nested source is already covered by its
/// enclosing one.
pub(super) fn collect_watch_paths(sources: &[Source]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = sources.iter().map(|s| s.dir.clone()).collect();
    dedupe_nested(&mut paths);
    paths
}

fn dedupe_nested(paths: &mut Vec<PathBuf>) {
    paths.sort();
    paths.dedup();
    let all = paths.clone();
    paths.retain(|path| !all.iter().any(|other| other != path && path.starts_with(other)));
}
