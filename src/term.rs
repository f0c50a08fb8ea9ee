use std::fmt;
use std::path::Path;

use crate::location::ColumnLocation;
use crate::normalization::normalize_term;
use crate::scanner::Directive;

/// Classification of a run within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Separator,
    Uri,
    Key,
    Directive(Directive),
}

/// Any run of a line (separators included) with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: ColumnLocation,
}

impl Token {
    pub fn into_term(self) -> Term {
        Term {
            text: self.text,
            location: self.location,
        }
    }
}

/// A candidate spelling term and where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub text: String,
    pub location: ColumnLocation,
}

impl Term {
    pub fn new(text: impl Into<String>, location: ColumnLocation) -> Self {
        Self {
            text: text.into(),
            location,
        }
    }

    /// Case-folded text with punctuation stripped; used as the dedup key
    pub fn normalize(&self) -> String {
        normalize_term(&self.text)
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn path(&self) -> &Path {
        self.location.source()
    }

    pub fn line_number(&self) -> usize {
        self.location.line_number()
    }

    /// 1-based column of the first character
    pub fn start_column(&self) -> usize {
        self.location.column()
    }

    /// 1-based column just past the last character
    pub fn end_column(&self) -> usize {
        self.start_column() + self.char_len()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.location, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{BytePos, CharPos, LineLocation};
    use std::sync::Arc;

    fn term_at(text: &str, line: usize, column_char: usize) -> Term {
        let line = LineLocation::new(Arc::from(Path::new("a.md")), line, BytePos(0), CharPos(0));
        Term::new(text, ColumnLocation::new(line, BytePos(column_char), CharPos(column_char)))
    }

    #[test]
    fn test_term_columns() {
        let term = term_at("world", 1, 6);
        assert_eq!(term.start_column(), 7);
        assert_eq!(term.end_column(), 12);
        assert_eq!(term.line_number(), 1);
        assert_eq!(term.path(), Path::new("a.md"));
        assert_eq!(term.to_string(), "a.md:1:7 world");
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(term_at("café", 1, 0).char_len(), 4);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(term_at("Don't", 1, 0).normalize(), "don't");
    }

    #[test]
    fn test_token_into_term() {
        let term = term_at("cat", 2, 3);
        let token = Token {
            kind: TokenKind::Word,
            text: "cat".to_string(),
            location: term.location.clone(),
        };
        assert_eq!(token.into_term(), term);
    }
}
