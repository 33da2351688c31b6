//! Actor Coordinator - Wires up the Watch Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Starts the watcher before the initial scan
//! - Runs the initial scan
//! - Runs the actors until Ctrl+C or a sync error

mod runtime;
mod watch_paths;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::SyncMsg;
use super::sync::SyncActor;
use super::tracked::TrackedFiles;
use crate::sync::{LogSink, ScanReport, Synchronizer};
use crate::utils::plural_count;

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    sync: Synchronizer,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(sync: Synchronizer) -> Self {
        Self {
            sync,
            shutdown_rx: None,
        }
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (sync_tx, sync_rx) = mpsc::channel::<SyncMsg>(CHANNEL_BUFFER);
        let tracked = TrackedFiles::new();

        let watch_paths = watch_paths::collect_watch_paths(self.sync.sources());
        let fs_actor = FsActor::new(watch_paths, sync_tx.clone(), tracked.clone())
            .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;

        let report = self.sync.scan(&mut LogSink::new())?;
        if report.interrupted {
            return Ok(());
        }
        log_scan(&report, self.sync.graph().len());

        let shutdown_rx = self.shutdown_rx.take();
        let sync_actor = SyncActor::new(sync_rx, self.sync, tracked);

        crate::debug!("actor"; "start");
        let result = runtime::run_actors(fs_actor, sync_actor, sync_tx, shutdown_rx).await;
        crate::debug!("actor"; "stopped");
        result
    }
}

fn log_scan(report: &ScanReport, pages: usize) {
    crate::log!("scan"; "{} from {}", plural_count(pages, "page"), plural_count(report.files, "file"));
    if report.duplicates > 0 {
        crate::log!("warn"; "skipped {}", plural_count(report.duplicates, "duplicate"));
    }
    crate::log!("watch"; "watching for changes, press Ctrl+C to stop");
}
