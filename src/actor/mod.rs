//! Actor System for Watch Mode
//!
//! Message-passing pipeline that keeps the page graph in sync:
//!
//! ```text
//! FsActor --SyncMsg--> SyncActor --Command--> LogSink
//! (notify)              (graph)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with debouncing
//! - `sync` - Owner of the `Synchronizer`
//! - `tracked` - Set of tracked files shared with the watcher
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod sync;
pub mod tracked;

pub use coordinator::Coordinator;
