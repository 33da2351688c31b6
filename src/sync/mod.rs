//! Incremental page graph synchronization.
//!
//! The [`Synchronizer`] owns the node graph and applies file events to it one
//! at a time:
//!
//! ```text
//! add(path) ──► include/ignore ──► pathinfo ──► indexify? ──► render url
//!                                                                 │
//!        sink ◄── commands ◄── link parent/children ◄── insert ◄──┘
//! ```
//!
//! Every change is reported to a [`Sink`] as [`Command`]s. A fatal error is
//! passed to [`Sink::fatal`] and then returned; callers stop processing
//! events after one.

mod command;
mod error;
mod graph;
mod scan;
mod source;


use std::path::{Path, PathBuf};

pub use command::{Command, LogSink, Sink};
pub use error::SyncError;
pub use graph::NodeGraph;
pub use scan::ScanReport;
pub use source::Source;

#[cfg(test)]
pub use command::RecordingSink;

use crate::page::{FileStat, NodeId, NodeSpec, PageNode, Params, pathinfo};
use crate::pattern::{SLUG, render};
use crate::utils::path::{relative_to, slugify};

/// Outcome of an `add` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Added {
    Created(NodeId),
    /// The URL was already taken by this node; the new file was skipped.
    Duplicate(NodeId),
    /// Not included, ignored, or the file already has a node.
    Skipped,
}

pub struct Synchronizer {
    root: PathBuf,
    sources: Vec<Source>,
    graph: NodeGraph,
}

impl Synchronizer {
    /// `root` is the project root that `rootPath` fields are relative to.
    pub fn new(root: PathBuf, sources: Vec<Source>) -> Self {
        Self {
            root,
            sources,
            graph: NodeGraph::new(),
        }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Source containing `path`, with the path relative to it.
    ///
    /// Nested source directories resolve to the innermost one.
    pub fn locate(&self, path: &Path) -> Option<(usize, String)> {
        self.sources
            .iter()
            .enumerate()
            .filter(|(_, src)| path.starts_with(&src.dir))
            .max_by_key(|(_, src)| src.dir.components().count())
            .and_then(|(idx, src)| src.relative(path).map(|rel| (idx, rel)))
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.graph.by_path(path).is_some()
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Apply an `add` event for a file inside `source`.
    pub fn add(
        &mut self,
        source: usize,
        rel_path: &str,
        stat: &FileStat,
        sink: &mut dyn Sink,
    ) -> Result<Added, SyncError> {
        let result = self.try_add(source, rel_path, stat, sink);
        if let Err(err) = &result {
            sink.fatal(err);
        }
        result
    }

    /// Apply an `unlink` event. Returns whether a node was removed.
    pub fn unlink(
        &mut self,
        source: usize,
        rel_path: &str,
        sink: &mut dyn Sink,
    ) -> Result<bool, SyncError> {
        let result = self.try_unlink(source, rel_path, sink);
        if let Err(err) = &result {
            sink.fatal(err);
        }
        result
    }

    /// Re-read a changed file: unlink then add.
    ///
    /// The id is a function of the path, so identity is kept; the digest,
    /// size and timestamps follow the new content and links are rebuilt.
    pub fn refresh(
        &mut self,
        source: usize,
        rel_path: &str,
        stat: &FileStat,
        sink: &mut dyn Sink,
    ) -> Result<Added, SyncError> {
        self.unlink(source, rel_path, sink)?;
        self.add(source, rel_path, stat, sink)
    }

    /// Unlink every tracked file under a removed directory.
    pub fn unlink_dir(&mut self, dir: &Path, sink: &mut dyn Sink) -> Result<usize, SyncError> {
        let mut removed = 0;
        for path in self.graph.paths_under(dir) {
            if let Some((source, rel)) = self.locate(&path)
                && self.unlink(source, &rel, sink)?
            {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn try_add(
        &mut self,
        source: usize,
        rel_path: &str,
        stat: &FileStat,
        sink: &mut dyn Sink,
    ) -> Result<Added, SyncError> {
        let src = self
            .sources
            .get(source)
            .ok_or(SyncError::UnknownSource(source))?;
        let rel = rel_path.replace('\\', "/");
        if src.debug {
            sink.log(&format!("add {}/{rel}", src.label));
        }

        let Some(params) = src.rules.included(&rel) else {
            return Ok(Added::Skipped);
        };
        let mut info = pathinfo(&rel)?;

        // A file belongs to one node. Changes to it go through `refresh`.
        let absolute_path = src.absolute(&rel);
        if let Some(existing) = self.graph.by_path(&absolute_path) {
            crate::debug!(
                "sync"; "already tracked as {}: {}", existing.url, absolute_path.display()
            );
            return Ok(Added::Skipped);
        }

        let extension = info.extension.clone();
        let index = src.rules.is_index(&rel);
        if index {
            info.indexify();
        }

        let values = render_values(&info.slug, &params);
        let url = render(&src.url, &values, src.syntax)?;

        let root_path = relative_to(&absolute_path, &self.root);

        if let Some(existing) = self.graph.by_url(&url) {
            sink.warn(&format!(
                "Attempted to create two pages with the same path (second page was skipped):\n  {}\n  {}",
                existing.root_path, root_path
            ));
            return Ok(Added::Duplicate(existing.id.clone()));
        }

        let spec = NodeSpec {
            info,
            extension,
            absolute_path: absolute_path.clone(),
            relative_path: rel,
            root_path,
            template_path: src.template.clone(),
            index,
            url,
            params,
        };
        let node = PageNode::build(spec, stat).map_err(|source| SyncError::Io {
            path: absolute_path,
            source,
        })?;
        let debug = src.debug;

        let id = node.id.clone();
        let depth = node.depth();
        let url = node.url.clone();
        let template_path = node.template_path.clone();

        sink.command(Command::CreateNode(node.clone()));
        self.graph.insert(node);
        if debug {
            sink.log(&format!("create node {url}"));
        }

        let mut links = Vec::new();
        if let Some(parent) = self.graph.parent_for(depth, &url) {
            links.push((parent, id.clone()));
        }
        for child in self.graph.orphans_for(depth, &url) {
            links.push((id.clone(), child));
        }
        for (parent, child) in links {
            if self.graph.link(&parent, &child) {
                if debug {
                    sink.log(&format!("link {parent} -> {child}"));
                }
                sink.command(Command::CreateParentChildLink { parent, child });
            }
        }

        if let Some(context) = self.graph.get(&id).cloned() {
            sink.command(Command::CreatePage {
                url: url.clone(),
                template_path,
                context,
            });
        }
        sink.command(Command::CreatePageDependency {
            url,
            node_id: id.clone(),
        });

        Ok(Added::Created(id))
    }

    fn try_unlink(
        &mut self,
        source: usize,
        rel_path: &str,
        sink: &mut dyn Sink,
    ) -> Result<bool, SyncError> {
        let src = self
            .sources
            .get(source)
            .ok_or(SyncError::UnknownSource(source))?;
        let rel = rel_path.replace('\\', "/");
        let debug = src.debug;
        if debug {
            sink.log(&format!("unlink {}/{rel}", src.label));
        }

        let absolute_path = src.absolute(&rel);
        let Some(node) = self.graph.by_path(&absolute_path) else {
            return Ok(false);
        };
        let id = node.id.clone();
        let children = node.children().to_vec();
        let parent = node.parent().cloned();

        // Children stay live, just parentless
        for child in &children {
            self.graph.detach(&id, child);
        }

        if let Some(parent) = parent {
            self.graph.detach(&parent, &id);
            if debug {
                sink.log(&format!("delete child from {parent}"));
            }
            sink.command(Command::TouchNode(parent));
        }

        let Some(node) = self.graph.remove(&id) else {
            return Ok(false);
        };
        let url = node.url.clone();
        let template_path = node.template_path.clone();
        sink.command(Command::DeleteNode(node));
        sink.command(Command::DeletePage { url, template_path });

        Ok(true)
    }
}

/// Values available to the URL template: the path slug plus every captured
/// placeholder, slugified. A captured `slug` replaces the path slug.
fn render_values(slug: &str, params: &Params) -> Params {
    let mut values = Params::new();
    values.insert(SLUG, slug);
    for (name, value) in params.iter() {
        values.insert(name, slugify(value));
    }
    values
}
