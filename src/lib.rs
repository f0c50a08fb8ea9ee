pub mod config;
pub mod error;
pub mod location;
pub mod normalization;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod term;
pub mod tokenizer;

// Re-export main types for convenient access
pub use config::{KeyHeuristic, TokenizerConfig};
pub use error::TokenizeError;
pub use location::{BytePos, CharPos, ColumnLocation, LineLocation};
pub use normalization::{normalize_term, normalize_term_into};
pub use report::Annotation;
pub use scanner::{Directive, LineScanner};
pub use term::{Term, Token, TokenKind};
pub use tokenizer::{Terms, Tokenizer, Tokens};
