//! Input boundary: the source filesystem abstraction.
//!
//! Generation depends only on this capability set, never on concrete
//! storage. [`OsFs`] roots the abstraction at a directory on disk;
//! [`MemFs`] serves fixtures straight from memory.

pub mod mem;
pub mod os;

pub use mem::MemFs;
pub use os::OsFs;

use chrono::{DateTime, Utc};
use std::io::Read;

/// Stat result for a source node.
#[derive(Debug, Clone)]
pub struct SourceMeta {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub mod_time: DateTime<Utc>,
}

/// Read-only view of a hierarchical file tree.
///
/// Paths are absolute and slash-separated; `/` is the root directory.
pub trait SourceFs {
    /// Stat the node at `path`.
    fn stat(&self, path: &str) -> std::io::Result<SourceMeta>;

    /// Immediate child names of the directory at `path`, in no
    /// particular order.
    fn read_dir(&self, path: &str) -> std::io::Result<Vec<String>>;

    /// Open the file at `path` for sequential content reads.
    fn open(&self, path: &str) -> std::io::Result<Box<dyn Read + '_>>;
}

/// Basename of an abstract absolute path; the root keeps its own name.
pub(crate) fn base_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, "")) | None => "/",
        Some((_, name)) => name,
    }
}

/// Join a child name onto an abstract absolute path.
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}
