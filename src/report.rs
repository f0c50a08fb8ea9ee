// Output boundary: how terms look to the reporting consumers downstream

use serde::{Deserialize, Serialize};

use crate::term::Term;

/// `path:line:column` as understood by editors and terminals
pub fn format_location(term: &Term) -> String {
    term.location.to_string()
}

/// `path:line:column: text`
pub fn format_term(term: &Term) -> String {
    format!("{}: {}", term.location, term.text)
}

/// Structured annotation for review systems, one per term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub message: String,
}

impl Annotation {
    pub fn from_term(term: &Term, message: impl Into<String>) -> Self {
        Self {
            path: term.path().display().to_string(),
            start_line: term.line_number(),
            // Terms never span lines
            end_line: term.line_number(),
            start_column: term.start_column(),
            end_column: term.end_column(),
            message: message.into(),
        }
    }
}
