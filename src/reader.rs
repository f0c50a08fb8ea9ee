use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Result, TokenizeError};
use crate::location::{BytePos, CharPos, LineLocation};

/// Statistics for line reading operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub lines_read: u64,
    pub bytes_read: u64,
}

/// A physical line (terminator included) and where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    pub location: LineLocation,
}

/// Buffered line reader that keeps running byte and char offsets
pub struct LineReader<R> {
    inner: BufReader<R>,
    source: Arc<Path>,
    line_number: usize,
    byte_offset: BytePos,
    char_offset: CharPos,
    buffer: Vec<u8>,
    stats: ReadStats,
}

impl<R: Read + Seek> LineReader<R> {
    pub fn new(inner: R, source: Arc<Path>, buffer_size: usize) -> Self {
        Self {
            // WHY: BufReader with custom buffer size reduces syscalls on large files
            inner: BufReader::with_capacity(buffer_size.max(1), inner),
            source,
            line_number: 1,
            byte_offset: BytePos(0),
            char_offset: CharPos(0),
            buffer: Vec::new(),
            stats: ReadStats::default(),
        }
    }

    /// Position the reader at the start of `line`; later lines are numbered from there
    pub fn seek_to(&mut self, line: &LineLocation) -> Result<()> {
        debug!(
            "Seeking {} to line {} (byte {})",
            self.source.display(),
            line.line_number,
            line.byte_offset.0
        );

        self.inner
            .seek(SeekFrom::Start(line.byte_offset.0 as u64))
            .map_err(|source| TokenizeError::Io {
                path: self.source.to_path_buf(),
                line: line.line_number,
                source,
            })?;

        self.line_number = line.line_number;
        self.byte_offset = line.byte_offset;
        self.char_offset = line.char_offset;
        Ok(())
    }

    /// Read the next line, or `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<RawLine>> {
        self.buffer.clear();
        let bytes = self
            .inner
            .read_until(b'\n', &mut self.buffer)
            .map_err(|source| TokenizeError::Io {
                path: self.source.to_path_buf(),
                line: self.line_number,
                source,
            })?;

        if bytes == 0 {
            return Ok(None);
        }

        // WHY: decode strictly; lossy replacement would shift every later offset
        let text = match String::from_utf8(std::mem::take(&mut self.buffer)) {
            Ok(text) => text,
            Err(e) => {
                let valid_up_to = e.utf8_error().valid_up_to();
                warn!(
                    "UTF-8 decoding error in {} at line {}, byte {}",
                    self.source.display(),
                    self.line_number,
                    valid_up_to
                );
                return Err(TokenizeError::Encoding {
                    path: self.source.to_path_buf(),
                    line: self.line_number,
                    valid_up_to,
                });
            }
        };

        let location = LineLocation::new(
            Arc::clone(&self.source),
            self.line_number,
            self.byte_offset,
            self.char_offset,
        );

        self.line_number += 1;
        self.byte_offset = self.byte_offset.advance(bytes);
        self.char_offset = self.char_offset.advance(text.chars().count());
        self.stats.lines_read += 1;
        self.stats.bytes_read += bytes as u64;

        Ok(Some(RawLine { text, location }))
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}
