// Driver: reads lines, hands each one to a fresh LineScanner and exposes the
// resulting tokens and terms as pull-based iterators.

use std::collections::{BTreeSet, VecDeque};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::config::TokenizerConfig;
use crate::error::{Result, TokenizeError};
use crate::location::{BytePos, ColumnLocation};
use crate::reader::LineReader;
use crate::scanner::{self, Classifier, Directive, LineScanner};
use crate::term::{Term, Token, TokenKind};

/// Label used for in-memory inputs
pub const STDIN_SOURCE: &str = "-";

/// Streaming tokenizer over one input
///
/// Every consuming operation takes `self`: a scan cannot be restarted, build a
/// new tokenizer (optionally with [`Tokenizer::start_at`]) to scan again. The
/// input is released as soon as the scan ends, fails or the iterator is dropped.
pub struct Tokenizer<R> {
    reader: Option<LineReader<R>>,
    classifier: Classifier,
    start_at: ColumnLocation,
    disabled: bool,
    started: bool,
    pending: VecDeque<(Token, bool)>,
}

impl Tokenizer<File> {
    /// Open a file for tokenization
    pub fn open<P: AsRef<Path>>(path: P, config: &TokenizerConfig) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening {} for tokenization", path.display());

        let file = File::open(path).map_err(|source| TokenizeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file, path, config)
    }
}

impl Tokenizer<Cursor<String>> {
    /// Tokenize an in-memory buffer, reported under the `-` source label
    pub fn from_text(text: impl Into<String>, config: &TokenizerConfig) -> Result<Self> {
        Self::new(Cursor::new(text.into()), STDIN_SOURCE, config)
    }
}

impl<R: Read + Seek> Tokenizer<R> {
    pub fn new<P: AsRef<Path>>(input: R, source: P, config: &TokenizerConfig) -> Result<Self> {
        let source: Arc<Path> = Arc::from(source.as_ref());
        let classifier = Classifier::new(config)?;

        Ok(Self {
            start_at: ColumnLocation::at_start(Arc::clone(&source)),
            reader: Some(LineReader::new(input, source, config.buffer_size)),
            classifier,
            disabled: false,
            started: false,
            pending: VecDeque::new(),
        })
    }

    /// Resume scanning at `location` instead of the start of the input
    ///
    /// The line containing `location` is read whole; runs on it that start
    /// before the column are skipped entirely.
    pub fn start_at(mut self, location: ColumnLocation) -> Self {
        self.start_at = location;
        self
    }

    /// Begin in the disabled state, as after a `spellr:disable` marker
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Pull-based sequence of every run, separators included
    pub fn into_tokens(self) -> Tokens<R> {
        Tokens { tokenizer: self }
    }

    /// Pull-based sequence of emitted terms
    pub fn into_terms(self) -> Terms<R> {
        Terms { tokenizer: self }
    }

    /// Collect every emitted term
    pub fn terms(self) -> Result<Vec<Term>> {
        self.into_terms().collect()
    }

    /// Visit emitted terms in source order
    pub fn each_term<F: FnMut(Term)>(self, mut visitor: F) -> Result<()> {
        for term in self.into_terms() {
            visitor(term?);
        }
        Ok(())
    }

    /// Visit every run, including separators, URIs, keys and directives
    pub fn each_token<F: FnMut(Token)>(self, mut visitor: F) -> Result<()> {
        for token in self.into_tokens() {
            visitor(token?);
        }
        Ok(())
    }

    /// Apply `f` to every raw token, preserving order
    pub fn map<T, F: FnMut(Token) -> T>(self, mut f: F) -> Result<Vec<T>> {
        self.into_tokens().map(|token| token.map(&mut f)).collect()
    }

    /// Normalized terms, deduplicated and sorted ascending
    ///
    /// Terms that normalize to the empty string (all-digit keys, for example) are dropped.
    pub fn normalized_terms(self) -> Result<Vec<String>> {
        let mut unique = BTreeSet::new();
        for term in self.into_terms() {
            let normalized = term?.normalize();
            if !normalized.is_empty() {
                unique.insert(normalized);
            }
        }
        Ok(unique.into_iter().collect())
    }

    fn next_token(&mut self) -> Option<Result<(Token, bool)>> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(Ok(entry));
            }

            match self.scan_next_line() {
                Ok(true) => continue,
                Ok(false) => {
                    self.release();
                    return None;
                }
                Err(e) => {
                    self.release();
                    return Some(Err(e));
                }
            }
        }
    }

    /// Scan one more line into `pending`; false once the input is exhausted
    fn scan_next_line(&mut self) -> Result<bool> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(false);
        };

        let first_line = !self.started;
        if first_line {
            self.started = true;
            reader.seek_to(&self.start_at.line)?;
        }

        let Some(line) = reader.next_line()? else {
            return Ok(false);
        };

        let resume_at = if first_line {
            self.start_at.column_byte
        } else {
            BytePos(0)
        };

        for run in LineScanner::new(&line.text, &self.classifier, resume_at) {
            let emit = !self.disabled && scanner::is_term(&self.classifier, &run);

            if let TokenKind::Directive(directive) = run.kind {
                self.disabled = directive == Directive::Disable;
                debug!(
                    "{} at {}:{}",
                    directive.marker(),
                    line.location,
                    run.start_char.0 + 1
                );
            }

            let location = ColumnLocation::new(line.location.clone(), run.start_byte, run.start_char);
            self.pending.push_back((
                Token {
                    kind: run.kind,
                    text: run.text.to_string(),
                    location,
                },
                emit,
            ));
        }

        Ok(true)
    }

    /// Drop the input handle; later pulls see end of input
    fn release(&mut self) {
        if let Some(reader) = self.reader.take() {
            let stats = reader.stats();
            debug!(
                "Finished tokenizing {}: {} lines, {} bytes",
                reader.source().display(),
                stats.lines_read,
                stats.bytes_read
            );
        }
    }
}

/// Iterator over every token of a scan
pub struct Tokens<R> {
    tokenizer: Tokenizer<R>,
}

impl<R: Read + Seek> Iterator for Tokens<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokenizer
            .next_token()
            .map(|entry| entry.map(|(token, _)| token))
    }
}

impl<R: Read + Seek> FusedIterator for Tokens<R> {}

/// Iterator over the emitted terms of a scan
pub struct Terms<R> {
    tokenizer: Tokenizer<R>,
}

impl<R: Read + Seek> Iterator for Terms<R> {
    type Item = Result<Term>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.tokenizer.next_token()? {
                Ok((token, true)) => return Some(Ok(token.into_term())),
                Ok((_, false)) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<R: Read + Seek> FusedIterator for Terms<R> {}
