// WHY: Library callers need to tell I/O failures from undecodable input,
// so errors are a closed enum rather than anyhow's opaque type

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a tokenizer scan
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// The input could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or seeking failed partway through the input
    #[error("read error in {} at line {line}: {source}", .path.display())]
    Io {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A line is not valid UTF-8; `valid_up_to` is the byte offset within that line
    #[error("invalid UTF-8 in {} at line {line}, byte {valid_up_to}", .path.display())]
    Encoding {
        path: PathBuf,
        line: usize,
        valid_up_to: usize,
    },

    /// A JSON config file could not be parsed
    #[error("invalid tokenizer config: {0}")]
    Config(#[from] serde_json::Error),

    /// The URI grammar failed to compile
    #[error("failed to build URI matcher: {0}")]
    Pattern(#[from] regex_automata::meta::BuildError),
}

impl TokenizeError {
    /// True for open, read and seek failures
    pub fn is_io(&self) -> bool {
        matches!(self, TokenizeError::Open { .. } | TokenizeError::Io { .. })
    }

    /// True when the input contained bytes that are not UTF-8
    pub fn is_encoding(&self) -> bool {
        matches!(self, TokenizeError::Encoding { .. })
    }
}

pub type Result<T> = std::result::Result<T, TokenizeError>;
