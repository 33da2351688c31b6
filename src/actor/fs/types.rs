use std::path::PathBuf;

/// What happened to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Classified events of one debounce window
pub(super) struct DebouncedEvents(pub(super) Vec<(PathBuf, ChangeKind)>);

/// Paths grouped by kind, each group sorted
pub(super) struct SplitEvents {
    pub(super) created: Vec<PathBuf>,
    pub(super) modified: Vec<PathBuf>,
    pub(super) removed: Vec<PathBuf>,
}

impl DebouncedEvents {
    pub(super) fn split(self) -> SplitEvents {
        let mut split = SplitEvents {
            created: Vec::new(),
            modified: Vec::new(),
            removed: Vec::new(),
        };

        for (path, kind) in self.0 {
            match kind {
                ChangeKind::Created => split.created.push(path),
                ChangeKind::Modified => split.modified.push(path),
                ChangeKind::Removed => split.removed.push(path),
            }
        }

        // Parents before children, so adoption happens on creation
        split.created.sort();
        split.modified.sort();
        split.removed.sort();
        split
    }
}
