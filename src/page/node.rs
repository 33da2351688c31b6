//! Page nodes: one live graph entry per qualifying source file.

use std::fmt;
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::PathInfo;
use crate::utils::{date::format_time, hash, mime, pretty_size};

/// Node type shared by every page node.
pub const NODE_TYPE: &str = "Templated";

// ============================================================================
// Identity
// ============================================================================

/// Stable node identifier.
///
/// A pure function of the node type and the root-relative path, so the
/// same file always gets the same id across events and restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn for_path(node_type: &str, root_path: &str) -> Self {
        Self(hash::stable_id(node_type, root_path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Params
// ============================================================================

/// Placeholder values captured from a filename, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// File metadata
// ============================================================================

/// Size and timestamps delivered with an `add` event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub changed: Option<SystemTime>,
    pub created: Option<SystemTime>,
}

impl FileStat {
    pub fn from_metadata(meta: &Metadata) -> Self {
        Self {
            size: meta.len(),
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
            changed: changed_time(meta),
            created: meta.created().ok(),
        }
    }

    pub fn read(path: &Path) -> io::Result<Self> {
        std::fs::metadata(path).map(|meta| Self::from_metadata(&meta))
    }
}

#[cfg(unix)]
#[allow(clippy::cast_sign_loss)]
fn changed_time(meta: &Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::{Duration, UNIX_EPOCH};

    let secs = meta.ctime();
    let nanos = meta.ctime_nsec();
    if secs < 0 || nanos < 0 {
        return None;
    }
    Some(UNIX_EPOCH + Duration::new(secs as u64, nanos as u32))
}

#[cfg(not(unix))]
fn changed_time(meta: &Metadata) -> Option<SystemTime> {
    meta.modified().ok()
}

// ============================================================================
// Node
// ============================================================================

/// Host-facing bookkeeping about a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Internal {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub media_type: Option<String>,
    pub content_digest: String,
}

/// One page entry, bound to a URL and a rendering template.
///
/// Everything except `children` (and the graph-internal parent reference)
/// is fixed at creation. Relationship fields are only changed through
/// the graph owned by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNode {
    #[serde(flatten)]
    pub info: PathInfo,
    pub id: NodeId,
    pub absolute_path: PathBuf,
    pub relative_path: String,
    pub root_path: String,
    pub template_path: PathBuf,
    pub index: bool,
    pub url: String,
    pub params: Params,
    pub size: u64,
    pub pretty_size: String,
    pub modified_time: String,
    pub accessed_time: String,
    pub changed_time: String,
    pub birthtime: String,
    pub internal: Internal,
    pub(crate) children: Vec<NodeId>,
    #[serde(skip)]
    pub(crate) parent: Option<NodeId>,
}

/// Inputs for [`PageNode::build`], gathered by the synchronizer.
pub struct NodeSpec {
    pub info: PathInfo,
    pub extension: String,
    pub absolute_path: PathBuf,
    pub relative_path: String,
    pub root_path: String,
    pub template_path: PathBuf,
    pub index: bool,
    pub url: String,
    pub params: Params,
}

impl PageNode {
    /// Build a node, reading the file to compute its content digest.
    ///
    /// `extension` is the file's own extension, before index collapsing.
    pub fn build(spec: NodeSpec, stat: &FileStat) -> io::Result<Self> {
        let content_digest = hash::file_digest(&spec.absolute_path)?;

        Ok(Self {
            id: NodeId::for_path(NODE_TYPE, &spec.root_path),
            internal: Internal {
                kind: NODE_TYPE.to_string(),
                description: format!("{NODE_TYPE}: {}", spec.root_path),
                media_type: mime::from_extension(&spec.extension).map(str::to_string),
                content_digest,
            },
            info: spec.info,
            absolute_path: spec.absolute_path,
            relative_path: spec.relative_path,
            root_path: spec.root_path,
            template_path: spec.template_path,
            index: spec.index,
            url: spec.url,
            params: spec.params,
            size: stat.size,
            pretty_size: pretty_size(stat.size),
            modified_time: format_time(stat.modified),
            accessed_time: format_time(stat.accessed),
            changed_time: format_time(stat.changed),
            birthtime: format_time(stat.created),
            children: Vec::new(),
            parent: None,
        })
    }

    pub fn depth(&self) -> usize {
        self.info.depth
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Read the file's entire contents.
    ///
    /// Loaded on demand, never stored on the node.
    pub fn content(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.absolute_path)
    }

    /// Serialize to JSON, optionally with the file contents as `content`.
    pub fn to_json(&self, with_content: bool) -> io::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self).map_err(io::Error::other)?;
        if with_content && let serde_json::Value::Object(map) = &mut value {
            map.insert("content".into(), serde_json::Value::String(self.content()?));
        }
        Ok(value)
    }
}
