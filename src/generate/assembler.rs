//! Artifact assembly.
//!
//! Accumulates the manifest into an in-memory buffer as three segments:
//! a header establishing the artifact's identity, one record per node in
//! visitation order, and a finalization segment that wires directory entry
//! lists once the whole tree is known. Directory wiring has to trail the
//! walk: a directory's authoritative child list is only final after its
//! entire subtree has been visited, while file content must stream out
//! incrementally to keep memory bounded.

use crate::error::GenerateError;
use crate::generate::bytes::ByteWriter;
use chrono::{DateTime, Utc};
use std::io::{self, Read, Write};

const RECORD_INDENT: usize = 4;
const CONTENT_INDENT: usize = 12;

/// A directory awaiting entry wiring in the finalization segment.
#[derive(Debug)]
struct DirRecord {
    path: String,
    entries: Vec<String>,
}

/// Counters reported after assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyStats {
    pub files: usize,
    pub dirs: usize,
    pub content_bytes: u64,
}

/// Builds the generated source artifact.
pub struct Assembler {
    buf: Vec<u8>,
    dirs: Vec<DirRecord>,
    stats: AssemblyStats,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            buf: Vec::new(),
            dirs: Vec::new(),
            stats: AssemblyStats::default(),
        }
    }

    /// Emit the header segment: generated-code marker, optional cfg
    /// attribute, doc comment, and the constructor opening.
    pub fn header(
        &mut self,
        name: &str,
        cfg: Option<&str>,
        comment: &str,
    ) -> io::Result<()> {
        writeln!(self.buf, "// Code generated by embedfs. DO NOT EDIT.")?;
        writeln!(self.buf)?;
        if let Some(cfg) = cfg {
            writeln!(self.buf, "#[cfg({})]", cfg)?;
        }
        for line in comment.lines() {
            if line.is_empty() {
                writeln!(self.buf, "///")?;
            } else {
                writeln!(self.buf, "/// {}", line)?;
            }
        }
        writeln!(
            self.buf,
            "pub fn {}() -> embedfs::runtime::EmbeddedFs {{",
            name
        )?;
        writeln!(
            self.buf,
            "{:indent$}let mut fs = embedfs::runtime::EmbeddedFs::builder();",
            "",
            indent = RECORD_INDENT
        )?;
        Ok(())
    }

    /// Emit a file record, streaming `content` through the byte encoder.
    pub fn file(
        &mut self,
        path: &str,
        name: &str,
        mod_time: DateTime<Utc>,
        content: &mut dyn Read,
        expected_size: u64,
    ) -> Result<(), GenerateError> {
        self.file_inner(path, name, mod_time, content, expected_size)
            .map_err(|source| GenerateError::Encode {
                path: path.to_string(),
                source,
            })
    }

    fn file_inner(
        &mut self,
        path: &str,
        name: &str,
        mod_time: DateTime<Utc>,
        content: &mut dyn Read,
        expected_size: u64,
    ) -> io::Result<()> {
        writeln!(self.buf, "{:i$}fs.file(", "", i = RECORD_INDENT)?;
        writeln!(self.buf, "{:i$}{:?},", "", path, i = RECORD_INDENT * 2)?;
        writeln!(self.buf, "{:i$}{:?},", "", name, i = RECORD_INDENT * 2)?;
        writeln!(
            self.buf,
            "{:i$}({}, {}),",
            "",
            mod_time.timestamp(),
            mod_time.timestamp_subsec_nanos(),
            i = RECORD_INDENT * 2
        )?;
        writeln!(self.buf, "{:i$}&[", "", i = RECORD_INDENT * 2)?;

        let mut encoder = ByteWriter::new(&mut self.buf, CONTENT_INDENT);
        let written = io::copy(content, &mut encoder)?;
        let partial_row = encoder.row_offset() != 0;
        if written != expected_size {
            tracing::warn!(
                path,
                expected = expected_size,
                encoded = written,
                "encoded size differs from source stat size"
            );
        }
        if partial_row {
            writeln!(self.buf)?;
        }
        writeln!(self.buf, "{:i$}][..],", "", i = RECORD_INDENT * 2)?;
        writeln!(self.buf, "{:i$});", "", i = RECORD_INDENT)?;

        self.stats.files += 1;
        self.stats.content_bytes += written;
        Ok(())
    }

    /// Emit a directory placeholder record and queue its entry list for
    /// the finalization segment.
    pub fn dir(
        &mut self,
        path: &str,
        name: &str,
        mod_time: DateTime<Utc>,
        entries: Vec<String>,
    ) -> io::Result<()> {
        writeln!(
            self.buf,
            "{:i$}fs.dir({:?}, {:?}, ({}, {}));",
            "",
            path,
            name,
            mod_time.timestamp(),
            mod_time.timestamp_subsec_nanos(),
            i = RECORD_INDENT
        )?;
        self.dirs.push(DirRecord {
            path: path.to_string(),
            entries,
        });
        self.stats.dirs += 1;
        Ok(())
    }

    /// Emit the finalization segment (directory wiring + constructor
    /// close) and hand back the completed buffer.
    pub fn finish(mut self) -> io::Result<(Vec<u8>, AssemblyStats)> {
        for dir in &self.dirs {
            if dir.entries.is_empty() {
                continue;
            }
            writeln!(
                self.buf,
                "{:i$}fs.entries({:?}, &[",
                "",
                dir.path,
                i = RECORD_INDENT
            )?;
            for entry in &dir.entries {
                writeln!(self.buf, "{:i$}{:?},", "", entry, i = RECORD_INDENT * 2)?;
            }
            writeln!(self.buf, "{:i$}]);", "", i = RECORD_INDENT)?;
        }
        writeln!(self.buf, "{:i$}fs.build()", "", i = RECORD_INDENT)?;
        writeln!(self.buf, "}}")?;
        Ok((self.buf, self.stats))
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
