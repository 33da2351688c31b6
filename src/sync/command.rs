//! Commands emitted by the synchronizer and the sinks consuming them.

use std::path::PathBuf;

use super::SyncError;
use crate::logger::{status_error, status_warning};
use crate::page::{NodeId, PageNode};
use crate::{debug, log};

/// A change the host should apply, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateNode(PageNode),
    CreateParentChildLink { parent: NodeId, child: NodeId },
    CreatePage {
        url: String,
        template_path: PathBuf,
        context: PageNode,
    },
    CreatePageDependency { url: String, node_id: NodeId },
    TouchNode(NodeId),
    DeleteNode(PageNode),
    DeletePage { url: String, template_path: PathBuf },
}

impl Command {
    /// Short human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::CreateNode(node) => format!("create node {}", node.url),
            Self::CreateParentChildLink { parent, child } => {
                format!("link {parent} -> {child}")
            }
            Self::CreatePage { url, .. } => format!("create page {url}"),
            Self::CreatePageDependency { url, node_id } => {
                format!("page {url} depends on {node_id}")
            }
            Self::TouchNode(id) => format!("touch node {id}"),
            Self::DeleteNode(node) => format!("delete node {}", node.url),
            Self::DeletePage { url, .. } => format!("delete page {url}"),
        }
    }
}

/// Consumer of synchronizer output.
pub trait Sink {
    fn command(&mut self, command: Command);

    /// Recoverable problem, e.g. a duplicate URL.
    fn warn(&mut self, message: &str);

    /// Debug tracing for sources with `debug = true`.
    fn log(&mut self, message: &str);

    /// Called before a fatal error is returned to the caller.
    fn fatal(&mut self, error: &SyncError);
}

/// Sink that reports everything through the logger.
///
/// Commands are only shown in verbose mode. In watch mode, warnings and
/// fatal errors go to the status line instead.
#[derive(Debug, Default)]
pub struct LogSink {
    watch: bool,
    commands: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_watch() -> Self {
        Self {
            watch: true,
            commands: 0,
        }
    }

    /// Number of commands received so far.
    pub fn commands(&self) -> usize {
        self.commands
    }
}

impl Sink for LogSink {
    fn command(&mut self, command: Command) {
        self.commands += 1;
        debug!("sync"; "{}", command.describe());
    }

    fn warn(&mut self, message: &str) {
        if self.watch {
            status_warning(message);
        } else {
            log!("warn"; "{}", message);
        }
    }

    fn log(&mut self, message: &str) {
        log!("sync"; "{}", message);
    }

    fn fatal(&mut self, error: &SyncError) {
        if self.watch {
            status_error("sync stopped", &error.to_string());
        } else {
            log!("error"; "{}", error);
        }
    }
}

/// Sink that records everything, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<Command>,
    pub warnings: Vec<String>,
    pub logs: Vec<String>,
    pub fatals: Vec<String>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take and clear the recorded commands.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
impl Sink for RecordingSink {
    fn command(&mut self, command: Command) {
        self.commands.push(command);
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn log(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn fatal(&mut self, error: &SyncError) {
        self.fatals.push(error.to_string());
    }
}
