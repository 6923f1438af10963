//! Open handles over registry nodes.
//!
//! Handles carry the only mutable state in the runtime: a read offset for
//! files, a listing cursor for directories. Handles opened on the same path
//! never observe each other's cursor movement.

use crate::error::FsError;
use crate::runtime::{DirNode, EmbeddedFs, FileNode, Metadata};
use std::io::SeekFrom;

/// An open node: exactly one of the two recognized kinds.
#[derive(Debug)]
pub enum Handle<'fs> {
    File(FileHandle<'fs>),
    Dir(DirHandle<'fs>),
}

impl<'fs> Handle<'fs> {
    /// Sequential byte read. Invalid on directory handles.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        match self {
            Handle::File(f) => Ok(f.read_bytes(buf)),
            Handle::Dir(d) => Err(FsError::InvalidOperation {
                op: "read from directory",
                path: d.path.clone(),
            }),
        }
    }

    /// Paginated directory listing. Invalid on file handles.
    ///
    /// See [`DirHandle::read_dir`] for the pagination contract.
    pub fn read_dir(&mut self, count: isize) -> Result<Option<Vec<Metadata>>, FsError> {
        match self {
            Handle::File(f) => Err(FsError::InvalidOperation {
                op: "read directory entries from file",
                path: f.path.clone(),
            }),
            Handle::Dir(d) => d.read_dir(count),
        }
    }

    /// Reposition the handle.
    ///
    /// File handles support arbitrary seeks; directory handles only
    /// `SeekFrom::Start(0)`, which resets the listing cursor.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        match self {
            Handle::File(f) => f.seek(pos),
            Handle::Dir(d) => d.seek(pos),
        }
    }

    /// Stat the underlying node.
    pub fn stat(&self) -> Result<Metadata, FsError> {
        match self {
            Handle::File(f) => Ok(f.node.metadata()),
            Handle::Dir(d) => Ok(d.node.metadata()),
        }
    }

    /// Release the handle. No external resources are held, so this always
    /// succeeds and is safe to call from cleanup paths.
    pub fn close(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}

/// An open file: immutable content plus a private read offset.
#[derive(Debug)]
pub struct FileHandle<'fs> {
    node: &'fs FileNode,
    path: String,
    offset: usize,
}

impl<'fs> FileHandle<'fs> {
    pub(crate) fn new(node: &'fs FileNode, path: String) -> Self {
        FileHandle {
            node,
            path,
            offset: 0,
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let content = &self.node.content;
        if self.offset >= content.len() {
            // Natural end of stream, not an error.
            return 0;
        }
        let n = buf.len().min(content.len() - self.offset);
        buf[..n].copy_from_slice(&content[self.offset..self.offset + n]);
        self.offset += n;
        n
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        let len = self.node.content.len() as i64;
        let target = match pos {
            SeekFrom::Start(n) => n as i64,
            SeekFrom::Current(n) => self.offset as i64 + n,
            SeekFrom::End(n) => len + n,
        };
        if target < 0 {
            return Err(FsError::InvalidOperation {
                op: "seek before start of file",
                path: self.path.clone(),
            });
        }
        self.offset = target as usize;
        Ok(self.offset as u64)
    }
}

impl std::io::Read for FileHandle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(self.read_bytes(buf))
    }
}

impl std::io::Seek for FileHandle<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        FileHandle::seek(self, pos)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))
    }
}

/// An open directory: entry-path list plus a listing cursor.
#[derive(Debug)]
pub struct DirHandle<'fs> {
    fs: &'fs EmbeddedFs,
    node: &'fs DirNode,
    path: String,
    position: usize,
}

impl<'fs> DirHandle<'fs> {
    pub(crate) fn new(fs: &'fs EmbeddedFs, node: &'fs DirNode, path: String) -> Self {
        DirHandle {
            fs,
            node,
            path,
            position: 0,
        }
    }

    /// Return up to `count` entries starting at the cursor, advancing it by
    /// the number returned.
    ///
    /// `Ok(None)` is the end-of-stream signal: it is produced only when
    /// `count > 0` and the cursor is already exhausted. A non-positive
    /// `count` returns all remaining entries, which at exhaustion is an
    /// empty list rather than end-of-stream; callers key loop termination
    /// on that distinction.
    pub fn read_dir(&mut self, count: isize) -> Result<Option<Vec<Metadata>>, FsError> {
        let remaining = self.node.entries.len() - self.position;
        if count > 0 && remaining == 0 {
            return Ok(None);
        }
        let take = if count <= 0 || count as usize > remaining {
            remaining
        } else {
            count as usize
        };
        let mut out = Vec::with_capacity(take);
        for entry_path in &self.node.entries[self.position..self.position + take] {
            match self.fs.lookup(entry_path) {
                Some(node) => out.push(node.metadata()),
                None => {
                    return Err(FsError::UnexpectedState(format!(
                        "directory {} references missing entry {}",
                        self.path, entry_path
                    )))
                }
            }
        }
        self.position += take;
        Ok(Some(out))
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        if pos == SeekFrom::Start(0) {
            self.position = 0;
            return Ok(0);
        }
        Err(FsError::InvalidOperation {
            op: "seek in directory",
            path: self.path.clone(),
        })
    }
}
