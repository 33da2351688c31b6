//! `watch` command: scan, then keep the page tree in sync.

use anyhow::Result;

use crate::actor::Coordinator;
use crate::config::ProjectConfig;
use crate::sync::{Source, Synchronizer};

/// Run the actor system on a dedicated runtime until Ctrl+C.
pub fn run_watch(config: &ProjectConfig, sources: Vec<Source>) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = crossbeam::channel::unbounded();
    crate::core::register_shutdown(shutdown_tx);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let sync = Synchronizer::new(config.root.clone(), sources);
    rt.block_on(async {
        Coordinator::new(sync)
            .with_shutdown_signal(shutdown_rx)
            .run()
            .await
    })
}
