// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use spellr::{Term, TokenizerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories with text files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a text file with given content
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        self.create_file_bytes(relative_path, content.as_bytes())
    }

    /// Create a file with raw bytes, for encoding tests
    pub fn create_file_bytes<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

/// Config that reports every word regardless of length
pub fn all_words_config() -> TokenizerConfig {
    TokenizerConfig {
        min_term_length: 1,
        ..TokenizerConfig::default()
    }
}

/// (text, line, column) triples for compact assertions
pub fn positions(terms: &[Term]) -> Vec<(String, usize, usize)> {
    terms
        .iter()
        .map(|t| (t.text.clone(), t.line_number(), t.start_column()))
        .collect()
}

/// A small document touching every run class
pub const MIXED_DOCUMENT: &str = "# Release notes\n\
\n\
See https://example.com/changelog for details.\n\
Commit 3f2a9c8e1b7d fixed the camelCase parser.\n\
Contact maintainers@example.org, don't email directly.\n\
token: dGhpcyBpcyBhIHRlc3Q+/w== expires\n\
Ünïcödé wörds stay intact.\r\n\
last line without newline";
