//! FileSystem Actor
//!
//! Watches the source directories and sends debounced events to the
//! SyncActor. The watcher is started before the initial scan, so changes
//! made while scanning are buffered instead of lost.
//!
//! Architecture:
//! ```text
//! Watcher → Debouncer (pure timing) → Classifier (tracked-state rules) → SyncMsg
//! ```

use std::path::PathBuf;

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use super::messages::SyncMsg;
use super::tracked::TrackedFiles;

// Raw changes -> actionable events.
mod classifier;
// Pure timing and deduplication.
mod debouncer;
// Actionable events -> SyncMsg.
mod router;
// Shared fs event types.
mod types;
// Watch root attach/re-attach lifecycle.
mod watch_roots;


use classifier::EventClassifier;
use debouncer::Debouncer;
use router::{events_to_messages, log_events};
use watch_roots::WatchRoots;

/// FileSystem Actor - watches for file changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    watch_roots: WatchRoots,
    sync_tx: mpsc::Sender<SyncMsg>,
    debouncer: Debouncer,
    tracked: TrackedFiles,
}

impl FsActor {
    /// Start watching `paths` immediately.
    ///
    /// Events buffer in the notify channel until [`run`](Self::run) is called.
    pub fn new(
        paths: Vec<PathBuf>,
        sync_tx: mpsc::Sender<SyncMsg>,
        tracked: TrackedFiles,
    ) -> notify::Result<Self> {
        // notify has no async API
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let mut watch_roots = WatchRoots::new(paths);
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            sync_tx,
            debouncer: Debouncer::new(),
            tracked,
        })
    }

    /// Run the actor event loop until the sync actor goes away.
    pub async fn run(self) {
        let Self {
            notify_rx,
            mut watcher,
            mut watch_roots,
            sync_tx,
            mut debouncer,
            tracked,
        } = self;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                Some(event) = async_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    watch_roots.maintain(&mut watcher);
                    if process_changes(&mut debouncer, &sync_tx, watch_roots.paths(), &tracked)
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
            }
        }
    }
}

/// Classify a ready batch and forward it.
///
/// Returns `Err(())` if the SyncActor has stopped.
async fn process_changes(
    debouncer: &mut Debouncer,
    sync_tx: &mpsc::Sender<SyncMsg>,
    roots: &[PathBuf],
    tracked: &TrackedFiles,
) -> Result<(), ()> {
    if sync_tx.is_closed() {
        return Err(());
    }

    let Some(raw_events) = debouncer.take_if_ready() else {
        return Ok(());
    };

    let Some(events) = EventClassifier::classify(raw_events, roots, tracked) else {
        return Ok(());
    };

    log_events(&events);

    for msg in events_to_messages(events) {
        sync_tx.send(msg).await.map_err(|_| ())?;
    }
    Ok(())
}
