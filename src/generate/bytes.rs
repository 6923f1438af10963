//! Byte-literal encoder for embedded file content.
//!
//! Turns an arbitrary byte stream into the body of a Rust slice literal:
//! rows of 16 two-hex-digit tokens, one row per line, matching what rustfmt
//! would produce so generated artifacts stay diff-friendly.

use std::io::{self, Write};

const BYTES_PER_ROW: usize = 16;

/// Encodes bytes written through it as `0x!!,` tokens, rows of 16.
///
/// Indentation is applied per row. Write failures on the underlying sink
/// surface immediately; nothing further is emitted after an error. The
/// writer also tracks total content bytes encoded, for cross-checks
/// against the source size.
pub struct ByteWriter<W: Write> {
    sink: W,
    indent: String,
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    /// Wrap `sink`, indenting every row by `indent` spaces.
    pub fn new(sink: W, indent: usize) -> Self {
        ByteWriter {
            sink,
            indent: " ".repeat(indent),
            written: 0,
        }
    }

    /// Total content bytes encoded so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Column position inside the current row, 0 after a completed row.
    pub fn row_offset(&self) -> usize {
        (self.written % BYTES_PER_ROW as u64) as usize
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Write for ByteWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            let column = self.row_offset();
            if column == 0 {
                self.sink.write_all(self.indent.as_bytes())?;
                write!(self.sink, "0x{:02x},", byte)?;
            } else {
                write!(self.sink, " 0x{:02x},", byte)?;
            }
            self.written += 1;
            if self.row_offset() == 0 {
                self.sink.write_all(b"\n")?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
