//! Sync Actor
//!
//! Sole owner of the [`Synchronizer`] in watch mode. Messages are applied
//! one at a time, in arrival order. The first sync error is reported on
//! the status line and stops the actor.

use std::path::Path;

use tokio::sync::mpsc;

use super::messages::SyncMsg;
use super::tracked::TrackedFiles;
use crate::logger::{status_success, status_unchanged};
use crate::page::FileStat;
use crate::sync::{Added, LogSink, Sink, SyncError, Synchronizer};
use crate::utils::plural_count;

pub struct SyncActor {
    rx: mpsc::Receiver<SyncMsg>,
    sync: Synchronizer,
    sink: LogSink,
    tracked: TrackedFiles,
}

/// What one message did to the graph.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

impl Outcome {
    fn is_empty(&self) -> bool {
        self.added + self.updated + self.removed == 0
    }

    fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.added > 0 {
            parts.push(format!("added {}", plural_count(self.added, "page")));
        }
        if self.updated > 0 {
            parts.push(format!("updated {}", plural_count(self.updated, "page")));
        }
        if self.removed > 0 {
            parts.push(format!("removed {}", plural_count(self.removed, "page")));
        }
        parts.join(", ")
    }
}

impl SyncActor {
    pub fn new(rx: mpsc::Receiver<SyncMsg>, sync: Synchronizer, tracked: TrackedFiles) -> Self {
        tracked.sync_from(sync.graph());
        Self {
            rx,
            sync,
            sink: LogSink::for_watch(),
            tracked,
        }
    }

    /// Process messages until shutdown, channel close, or a sync error.
    pub async fn run(mut self) -> Result<(), SyncError> {
        while let Some(msg) = self.rx.recv().await {
            if msg == SyncMsg::Shutdown {
                crate::debug!("sync"; "shutdown");
                break;
            }

            let label = msg.label();
            let outcome = apply(&mut self.sync, &mut self.sink, msg)?;
            self.tracked.sync_from(self.sync.graph());

            if outcome.is_empty() {
                status_unchanged(&format!("{label}: no pages affected"));
            } else {
                status_success(&format!(
                    "{} ({} total)",
                    outcome.summary(),
                    plural_count(self.sync.graph().len(), "page")
                ));
            }
        }
        Ok(())
    }
}

/// Apply one message to the synchronizer.
pub(crate) fn apply(
    sync: &mut Synchronizer,
    sink: &mut LogSink,
    msg: SyncMsg,
) -> Result<Outcome, SyncError> {
    let mut outcome = Outcome::default();

    match msg {
        SyncMsg::Removed(paths) => {
            for path in paths {
                outcome.removed += remove(sync, sink, &path)?;
            }
        }
        // A Created event for a tracked file is a buffered event from
        // before the initial scan finished; treat it as a change.
        SyncMsg::Created(paths) | SyncMsg::Modified(paths) => {
            for path in paths {
                let was_tracked = sync.is_tracked(&path);
                if upsert(sync, sink, &path)? {
                    if was_tracked {
                        outcome.updated += 1;
                    } else {
                        outcome.added += 1;
                    }
                }
            }
        }
        SyncMsg::Shutdown => {}
    }

    Ok(outcome)
}

fn remove(sync: &mut Synchronizer, sink: &mut LogSink, path: &Path) -> Result<usize, SyncError> {
    if !sync.is_tracked(path) {
        return sync.unlink_dir(path, sink);
    }
    let Some((source, rel)) = sync.locate(path) else {
        return Ok(0);
    };
    Ok(usize::from(sync.unlink(source, &rel, sink)?))
}

/// Add or refresh a file. Returns whether a node now exists for it.
fn upsert(sync: &mut Synchronizer, sink: &mut LogSink, path: &Path) -> Result<bool, SyncError> {
    let Some((source, rel)) = sync.locate(path) else {
        crate::debug!("sync"; "outside every source: {}", path.display());
        return Ok(false);
    };

    let stat = FileStat::read(path).map_err(|source| {
        let err = SyncError::Io {
            path: path.to_path_buf(),
            source,
        };
        sink.fatal(&err);
        err
    })?;

    let added = if sync.is_tracked(path) {
        sync.refresh(source, &rel, &stat, sink)?
    } else {
        sync.add(source, &rel, &stat, sink)?
    };
    Ok(matches!(added, Added::Created(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{PlaceholderSyntax, Rules};
    use crate::sync::Source;
    use crate::utils::path::normalize_path;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, Synchronizer) {
        setup_with("/:slug", &["*.md"])
    }

    fn setup_with(url: &str, include: &[&str]) -> (TempDir, PathBuf, Synchronizer) {
        let temp = TempDir::new().unwrap();
        let root = normalize_path(temp.path());
        let pages = root.join("pages");
        fs::create_dir_all(&pages).unwrap();
        let template = root.join("Page.jsx");
        fs::write(&template, "").unwrap();

        let source = Source {
            label: "pages".into(),
            dir: pages.clone(),
            template,
            url: url.into(),
            syntax: PlaceholderSyntax::Auto,
            rules: Rules::new(include, &[] as &[&str], &["index.*"], PlaceholderSyntax::Auto)
                .unwrap(),
            debug: false,
        };
        (temp, pages, Synchronizer::new(root, vec![source]))
    }

    #[test]
    fn test_created_then_modified_then_removed() {
        let (_temp, pages, mut sync) = setup();
        let mut sink = LogSink::new();
        let file = pages.join("hello.md");
        fs::write(&file, "one").unwrap();

        let outcome = apply(&mut sync, &mut sink, SyncMsg::Created(vec![file.clone()])).unwrap();
        assert_eq!(outcome, Outcome { added: 1, ..Outcome::default() });
        let digest = sync.graph().by_url("/hello").unwrap().internal.content_digest.clone();

        fs::write(&file, "two").unwrap();
        let outcome = apply(&mut sync, &mut sink, SyncMsg::Modified(vec![file.clone()])).unwrap();
        assert_eq!(outcome, Outcome { updated: 1, ..Outcome::default() });
        assert_ne!(sync.graph().by_url("/hello").unwrap().internal.content_digest, digest);

        fs::remove_file(&file).unwrap();
        let outcome = apply(&mut sync, &mut sink, SyncMsg::Removed(vec![file])).unwrap();
        assert_eq!(outcome, Outcome { removed: 1, ..Outcome::default() });
        assert!(sync.graph().is_empty());
    }

    #[test]
    fn test_created_for_tracked_file_refreshes() {
        let (_temp, pages, mut sync) = setup();
        let mut sink = LogSink::new();
        let file = pages.join("a.md");
        fs::write(&file, "x").unwrap();

        apply(&mut sync, &mut sink, SyncMsg::Created(vec![file.clone()])).unwrap();
        let outcome = apply(&mut sync, &mut sink, SyncMsg::Created(vec![file])).unwrap();
        assert_eq!(outcome, Outcome { updated: 1, ..Outcome::default() });
        assert_eq!(sync.graph().len(), 1);
    }

    #[test]
    fn test_removed_directory_unlinks_contents() {
        let (_temp, pages, mut sync) = setup();
        let mut sink = LogSink::new();
        let blog = pages.join("blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join("index.md"), "x").unwrap();
        fs::write(blog.join("post.md"), "x").unwrap();

        apply(
            &mut sync,
            &mut sink,
            SyncMsg::Created(vec![blog.join("index.md"), blog.join("post.md")]),
        )
        .unwrap();
        assert_eq!(sync.graph().len(), 2);

        fs::remove_dir_all(&blog).unwrap();
        let outcome = apply(&mut sync, &mut sink, SyncMsg::Removed(vec![blog])).unwrap();
        assert_eq!(outcome.removed, 2);
        assert!(sync.graph().is_empty());
    }

    #[test]
    fn test_excluded_file_is_skipped() {
        let (_temp, pages, mut sync) = setup();
        let mut sink = LogSink::new();
        let text = pages.join("notes.txt");
        fs::write(&text, "x").unwrap();

        let outcome = apply(&mut sync, &mut sink, SyncMsg::Created(vec![text])).unwrap();
        assert_eq!(outcome, Outcome::default());
        assert!(sync.graph().is_empty());
    }

    #[test]
    fn test_unreadable_file_is_fatal() {
        let (_temp, pages, mut sync) = setup();
        let mut sink = LogSink::new();
        let gone = pages.join("gone.md");

        let result = apply(&mut sync, &mut sink, SyncMsg::Created(vec![gone]));
        assert!(matches!(result, Err(SyncError::Io { .. })));
        assert!(sync.graph().is_empty());
    }

    #[test]
    fn test_outcome_summary() {
        let outcome = Outcome {
            added: 2,
            updated: 0,
            removed: 1,
        };
        assert_eq!(outcome.summary(), "added 2 pages, removed 1 page");
    }

    #[tokio::test]
    async fn test_actor_updates_tracked_and_stops() {
        let (_temp, pages, sync) = setup();
        let file = pages.join("a.md");
        fs::write(&file, "x").unwrap();

        let (tx, rx) = mpsc::channel(8);
        let tracked = TrackedFiles::new();
        let actor = SyncActor::new(rx, sync, tracked.clone());

        tx.send(SyncMsg::Created(vec![file.clone()])).await.unwrap();
        tx.send(SyncMsg::Shutdown).await.unwrap();
        actor.run().await.unwrap();

        assert!(tracked.contains(&file));
    }

    #[tokio::test]
    async fn test_actor_stops_at_first_error() {
        let (_temp, pages, sync) =
            setup_with("/:section/:slug", &["{section}--{title}.md", "*.md"]);
        let plain = pages.join("plain.md");
        let news = pages.join("news--hello.md");
        fs::write(&plain, "x").unwrap();
        fs::write(&news, "x").unwrap();

        let (tx, rx) = mpsc::channel(8);
        let tracked = TrackedFiles::new();
        let actor = SyncActor::new(rx, sync, tracked.clone());

        // `plain.md` captures no `section`, so its url cannot be rendered
        tx.send(SyncMsg::Created(vec![plain])).await.unwrap();
        tx.send(SyncMsg::Created(vec![news.clone()])).await.unwrap();
        drop(tx);

        let result = actor.run().await;
        assert!(matches!(result, Err(SyncError::Render(_))));
        assert!(!tracked.contains(&news));
        assert!(tracked.is_empty());
    }
}
