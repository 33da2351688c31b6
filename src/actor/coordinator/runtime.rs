use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::fs::FsActor;
use crate::actor::messages::SyncMsg;
use crate::actor::sync::SyncActor;

/// Run both actors until shutdown is requested or one of them stops.
///
/// A sync error is returned after it has been shown on the status line.
pub(super) async fn run_actors(
    fs: FsActor,
    sync: SyncActor,
    sync_tx: mpsc::Sender<SyncMsg>,
    shutdown_rx: Option<Receiver<()>>,
) -> Result<()> {
    let mut sync_handle = tokio::spawn(async move { sync.run().await });
    let fs_handle = tokio::spawn(async move { fs.run().await });

    let shutdown = async move {
        match shutdown_rx {
            Some(rx) => loop {
                if rx.try_recv().is_ok() {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            },
            None => std::future::pending::<()>().await,
        }
    };

    let result = tokio::select! {
        joined = &mut sync_handle => Some(joined),
        _ = shutdown => None,
    };

    fs_handle.abort();

    match result {
        Some(joined) => Ok(joined??),
        None => {
            let _ = sync_tx.send(SyncMsg::Shutdown).await;
            let _ = tokio::time::timeout(Duration::from_millis(500), sync_handle).await;
            Ok(())
        }
    }
}
