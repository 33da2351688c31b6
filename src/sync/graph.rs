//! The live node graph.
//!
//! Nodes are keyed by id with secondary indexes on URL and absolute path.
//! Iteration follows insertion order so output is deterministic.
//!
//! Outside of `sync` the graph is read-only. Relationship changes go through
//! [`NodeGraph::link`] and [`NodeGraph::detach`], which keep `parent` and
//! `children` consistent on both ends.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::page::{NodeId, PageNode};
use crate::utils::path::route::is_path_prefix;

#[derive(Debug, Default)]
pub struct NodeGraph {
    nodes: FxHashMap<NodeId, PageNode>,
    by_url: FxHashMap<String, NodeId>,
    by_path: FxHashMap<PathBuf, NodeId>,
    order: Vec<NodeId>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&PageNode> {
        self.nodes.get(id)
    }

    pub fn by_url(&self, url: &str) -> Option<&PageNode> {
        self.by_url.get(url).and_then(|id| self.nodes.get(id))
    }

    pub fn by_path(&self, path: &Path) -> Option<&PageNode> {
        self.by_path.get(path).and_then(|id| self.nodes.get(id))
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PageNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &PageNode> {
        self.iter().filter(|n| n.parent().is_none())
    }

    pub fn children_of(&self, id: &NodeId) -> impl Iterator<Item = &PageNode> {
        self.nodes
            .get(id)
            .map(|n| n.children())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.nodes.get(child))
    }

    /// Absolute paths of nodes located under `dir`.
    pub fn paths_under(&self, dir: &Path) -> Vec<PathBuf> {
        self.iter()
            .filter(|n| n.absolute_path.starts_with(dir))
            .map(|n| n.absolute_path.clone())
            .collect()
    }

    // ========================================================================
    // Linking rules
    // ========================================================================

    /// Parent for a node at `depth` with `url`.
    ///
    /// Depth-1 nodes attach to a depth-0 node, preferring the one whose URL
    /// is the longest path-prefix. Deeper nodes attach to the depth−1 node whose URL is the
    /// longest strict path-prefix.
    pub(super) fn parent_for(&self, depth: usize, url: &str) -> Option<NodeId> {
        match depth {
            0 => None,
            1 => {
                let roots = || self.iter().filter(|n| n.depth() == 0 && n.url != url);
                roots()
                    .filter(|n| is_path_prefix(&n.url, url))
                    .max_by_key(|n| n.url.len())
                    .or_else(|| roots().next())
                    .map(|n| n.id.clone())
            }
            _ => self
                .iter()
                .filter(|n| n.depth() == depth - 1 && is_path_prefix(&n.url, url))
                .max_by_key(|n| n.url.len())
                .map(|n| n.id.clone()),
        }
    }

    /// Parentless nodes that a new node at `depth` with `url` should adopt.
    pub(super) fn orphans_for(&self, depth: usize, url: &str) -> Vec<NodeId> {
        self.iter()
            .filter(|n| n.parent().is_none() && n.depth() == depth + 1 && n.url != url)
            .filter(|n| depth == 0 || is_path_prefix(url, &n.url))
            .map(|n| n.id.clone())
            .collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    pub(super) fn insert(&mut self, node: PageNode) {
        let id = node.id.clone();
        self.by_url.insert(node.url.clone(), id.clone());
        self.by_path.insert(node.absolute_path.clone(), id.clone());
        if self.nodes.insert(id.clone(), node).is_none() {
            self.order.push(id);
        }
    }

    /// Remove a node. Relationships must already be detached.
    pub(super) fn remove(&mut self, id: &NodeId) -> Option<PageNode> {
        let node = self.nodes.remove(id)?;
        self.by_url.remove(&node.url);
        self.by_path.remove(&node.absolute_path);
        self.order.retain(|other| other != id);
        Some(node)
    }

    /// Link `child` under `parent`. Returns false if either is missing or
    /// the child already has a parent.
    pub(super) fn link(&mut self, parent: &NodeId, child: &NodeId) -> bool {
        if parent == child || !self.nodes.contains_key(parent) {
            return false;
        }
        match self.nodes.get_mut(child) {
            Some(node) if node.parent.is_none() => node.parent = Some(parent.clone()),
            _ => return false,
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child.clone());
        }
        true
    }

    /// Break the link between `parent` and `child` on both ends.
    pub(super) fn detach(&mut self, parent: &NodeId, child: &NodeId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(child)
            && node.parent.as_ref() == Some(parent)
        {
            node.parent = None;
        }
    }
}
