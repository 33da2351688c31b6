//! Page types: path classification and graph nodes.

mod info;
mod node;

pub use info::{PathError, PathInfo, pathinfo};
pub use node::{FileStat, NodeId, NodeSpec, PageNode, Params};
