//! Embedded filesystem runtime.
//!
//! The generated artifact builds an [`EmbeddedFs`] through [`FsBuilder`] at
//! load time. The registry maps absolute path strings to nodes and is
//! immutable after `build()`, so it can be shared across threads freely; the
//! only mutable state lives inside per-open handles.

pub mod handle;
pub mod path;

pub use handle::{DirHandle, FileHandle, Handle};

use crate::error::FsError;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Mode bits reported for files: read-only, no execute.
pub const FILE_MODE: u32 = 0o444;

/// Mode bits reported for directories: read + traverse, plus the
/// directory type bit.
pub const DIR_MODE: u32 = 0o040555;

/// A static file definition inside the registry.
#[derive(Debug, Clone)]
pub struct FileNode {
    pub(crate) name: String,
    pub(crate) mod_time: DateTime<Utc>,
    pub(crate) content: Cow<'static, [u8]>,
}

impl FileNode {
    pub(crate) fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name.clone(),
            size: self.content.len() as u64,
            mode: FILE_MODE,
            mod_time: self.mod_time,
            is_dir: false,
        }
    }
}

/// A static directory definition inside the registry.
///
/// Children are held as absolute path strings and resolved through the
/// registry at access time, so directories never own their entries.
#[derive(Debug, Clone)]
pub struct DirNode {
    pub(crate) name: String,
    pub(crate) mod_time: DateTime<Utc>,
    pub(crate) entries: Vec<String>,
}

impl DirNode {
    pub(crate) fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name.clone(),
            size: 0,
            mode: DIR_MODE,
            mod_time: self.mod_time,
            is_dir: true,
        }
    }
}

/// A registry node: exactly two kinds, checked explicitly at every
/// operation boundary.
#[derive(Debug, Clone)]
pub enum Node {
    File(FileNode),
    Dir(DirNode),
}

impl Node {
    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir(_))
    }

    pub(crate) fn metadata(&self) -> Metadata {
        match self {
            Node::File(f) => f.metadata(),
            Node::Dir(d) => d.metadata(),
        }
    }
}

/// Stat result for a node.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub name: String,
    pub size: u64,
    pub mode: u32,
    pub mod_time: DateTime<Utc>,
    pub is_dir: bool,
}

/// An immutable, in-memory filesystem reconstructed from a generated
/// artifact.
#[derive(Debug, Clone)]
pub struct EmbeddedFs {
    nodes: BTreeMap<String, Node>,
}

impl EmbeddedFs {
    pub fn builder() -> FsBuilder {
        FsBuilder {
            nodes: BTreeMap::new(),
        }
    }

    /// Open the node at `path`, normalizing it first.
    ///
    /// File handles start at offset 0; directory handles start with their
    /// listing cursor at 0. Each call yields an independent handle.
    pub fn open(&self, path: &str) -> Result<Handle<'_>, FsError> {
        let clean = path::normalize(path);
        match self.nodes.get(&clean) {
            Some(Node::File(file)) => Ok(Handle::File(FileHandle::new(file, clean))),
            Some(Node::Dir(dir)) => Ok(Handle::Dir(DirHandle::new(self, dir, clean))),
            None => Err(FsError::NotFound(clean)),
        }
    }

    /// Number of nodes in the registry, the root directory included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All registered paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub(crate) fn lookup(&self, path: &str) -> Option<&Node> {
        self.nodes.get(path)
    }
}

fn timestamp((secs, nanos): (i64, u32)) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, nanos)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Builder consumed by generated artifacts.
///
/// Files and directories are registered first; directory entry lists are
/// wired afterwards, once the whole tree is known. The assembler guarantees
/// that every wired entry path names a registered node; a violation shows up
/// at access time as [`FsError::UnexpectedState`].
#[derive(Debug, Default)]
pub struct FsBuilder {
    nodes: BTreeMap<String, Node>,
}

impl FsBuilder {
    /// Register a file node. Modification time is a `(secs, nanos)` UTC
    /// unix timestamp pair.
    pub fn file(
        &mut self,
        path: &str,
        name: &str,
        mod_time: (i64, u32),
        content: impl Into<Cow<'static, [u8]>>,
    ) -> &mut Self {
        self.nodes.insert(
            path.to_string(),
            Node::File(FileNode {
                name: name.to_string(),
                mod_time: timestamp(mod_time),
                content: content.into(),
            }),
        );
        self
    }

    /// Register a directory node with an empty entry list.
    pub fn dir(&mut self, path: &str, name: &str, mod_time: (i64, u32)) -> &mut Self {
        self.nodes.insert(
            path.to_string(),
            Node::Dir(DirNode {
                name: name.to_string(),
                mod_time: timestamp(mod_time),
                entries: Vec::new(),
            }),
        );
        self
    }

    /// Wire the ordered entry-path list of a previously registered
    /// directory. Ignored for paths that do not name a directory.
    pub fn entries(&mut self, path: &str, entries: &[&str]) -> &mut Self {
        if let Some(Node::Dir(dir)) = self.nodes.get_mut(path) {
            dir.entries = entries.iter().map(|e| e.to_string()).collect();
        }
        self
    }

    /// Freeze the registry.
    pub fn build(&mut self) -> EmbeddedFs {
        EmbeddedFs {
            nodes: std::mem::take(&mut self.nodes),
        }
    }
}
