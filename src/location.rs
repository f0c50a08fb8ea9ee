// Source coordinates for emitted terms.
// Type-safe position wrappers keep byte and char offsets from being mixed up.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// 0-based byte position
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct BytePos(pub usize);

/// 0-based character position
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct CharPos(pub usize);

impl From<BytePos> for usize {
    fn from(pos: BytePos) -> Self {
        pos.0
    }
}

impl From<CharPos> for usize {
    fn from(pos: CharPos) -> Self {
        pos.0
    }
}

impl BytePos {
    pub fn new(pos: usize) -> Self {
        BytePos(pos)
    }

    pub fn advance(&self, offset: usize) -> Self {
        BytePos(self.0 + offset)
    }
}

impl CharPos {
    pub fn new(pos: usize) -> Self {
        CharPos(pos)
    }

    pub fn advance(&self, offset: usize) -> Self {
        CharPos(self.0 + offset)
    }
}

/// Start of one physical line within a source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineLocation {
    pub source: Arc<Path>,
    /// 1-based
    pub line_number: usize,
    pub byte_offset: BytePos,
    pub char_offset: CharPos,
}

impl LineLocation {
    pub fn new(
        source: Arc<Path>,
        line_number: usize,
        byte_offset: BytePos,
        char_offset: CharPos,
    ) -> Self {
        Self {
            source,
            line_number,
            byte_offset,
            char_offset,
        }
    }

    /// First line of a source
    pub fn first(source: Arc<Path>) -> Self {
        Self::new(source, 1, BytePos(0), CharPos(0))
    }
}

impl Ord for LineLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line_number
            .cmp(&other.line_number)
            .then(self.byte_offset.cmp(&other.byte_offset))
            .then_with(|| self.source.cmp(&other.source))
            .then(self.char_offset.cmp(&other.char_offset))
    }
}

impl PartialOrd for LineLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LineLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.display(), self.line_number)
    }
}

/// A position inside a line: where a term starts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnLocation {
    pub line: LineLocation,
    /// Byte offset from the start of the line
    pub column_byte: BytePos,
    /// Character offset from the start of the line
    pub column_char: CharPos,
}

impl ColumnLocation {
    pub fn new(line: LineLocation, column_byte: BytePos, column_char: CharPos) -> Self {
        Self {
            line,
            column_byte,
            column_char,
        }
    }

    /// Column zero of `line`
    pub fn start_of(line: LineLocation) -> Self {
        Self::new(line, BytePos(0), CharPos(0))
    }

    /// Very beginning of a source
    pub fn at_start(source: Arc<Path>) -> Self {
        Self::start_of(LineLocation::first(source))
    }

    pub fn source(&self) -> &Path {
        &self.line.source
    }

    pub fn line_number(&self) -> usize {
        self.line.line_number
    }

    /// 1-based column, counted in characters
    pub fn column(&self) -> usize {
        self.column_char.0 + 1
    }

    /// Byte position from the start of the source
    pub fn absolute_byte(&self) -> BytePos {
        self.line.byte_offset.advance(self.column_byte.0)
    }

    /// Character position from the start of the source
    pub fn absolute_char(&self) -> CharPos {
        self.line.char_offset.advance(self.column_char.0)
    }
}

impl Ord for ColumnLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .line_number
            .cmp(&other.line.line_number)
            .then(self.absolute_byte().cmp(&other.absolute_byte()))
            .then_with(|| self.line.cmp(&other.line))
            .then(self.column_byte.cmp(&other.column_byte))
            .then(self.column_char.cmp(&other.column_char))
    }
}

impl PartialOrd for ColumnLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders as `path:line:column`
impl fmt::Display for ColumnLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.line.source.display(),
            self.line.line_number,
            self.column()
        )
    }
}
