// Single-line lexer: splits one line into classified runs that cover it exactly once.
// A scanner is built fresh for every line and holds no state across lines.

pub mod classify;

use tracing::trace;

use crate::location::{BytePos, CharPos};
use crate::term::TokenKind;

use classify::{char_class, CharClass};

pub use classify::{Classifier, Directive};

/// States of the run state machine; `Separator` is the initial state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Separator,
    Word,
    Uri,
    Key,
    Directive(Directive),
}

/// One classified run, borrowed from the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRun<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Offsets from the start of the line
    pub start_byte: BytePos,
    pub start_char: CharPos,
}

/// Streaming classifier over a single line
pub struct LineScanner<'a> {
    line: &'a str,
    classifier: &'a Classifier,
    cursor: usize,
    cursor_char: usize,
    resume_at: usize,
}

impl<'a> LineScanner<'a> {
    /// Scan `line`, skipping every run that starts before byte `resume_at`
    pub fn new(line: &'a str, classifier: &'a Classifier, resume_at: BytePos) -> Self {
        Self {
            line,
            classifier,
            cursor: 0,
            cursor_char: 0,
            resume_at: resume_at.0,
        }
    }

    /// Runs that count as terms under the classifier's suppression rules
    pub fn terms(self) -> impl Iterator<Item = ScannedRun<'a>> {
        let classifier = self.classifier;
        self.filter(move |run| is_term(classifier, run))
    }

    /// Pick the state for the run at byte `start`, whose first char is `first`, and find its end
    fn scan_run(&self, start: usize, first: char) -> (ScanState, usize) {
        let line = self.line;

        if classify::is_boundary(line, start) {
            if let Some(len) = self.classifier.uri_len_at(line, start) {
                return (ScanState::Uri, start + len);
            }
            if let Some((directive, len)) = classify::directive_at(line, start) {
                return (ScanState::Directive(directive), start + len);
            }
            if let Some(len) = self.classifier.key_len_at(line, start) {
                return (ScanState::Key, start + len);
            }
        }

        if is_letter(first) {
            (ScanState::Word, self.word_end(start))
        } else {
            (ScanState::Separator, self.separator_end(start))
        }
    }

    /// End of a word run: letters, inner apostrophes, split at camel-case humps
    fn word_end(&self, start: usize) -> usize {
        let rest = &self.line[start..];
        let mut chars = rest.char_indices().peekable();
        let mut prev: Option<char> = None;

        while let Some((i, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);

            let continues = match prev {
                None => true,
                Some(p) if is_letter(c) => !is_camel_hump(p, c, next),
                Some(p) if classify::is_apostrophe(c) => is_letter(p) && next.is_some_and(is_letter),
                Some(_) => false,
            };

            if !continues {
                return start + i;
            }
            prev = Some(c);
        }

        self.line.len()
    }

    /// End of a separator run: stops at a letter or where a URI, directive or key begins
    fn separator_end(&self, start: usize) -> usize {
        let line = self.line;

        for (i, c) in line[start..].char_indices().skip(1) {
            let pos = start + i;
            if is_letter(c) {
                return pos;
            }
            if classify::is_boundary(line, pos)
                && (self.classifier.key_len_at(line, pos).is_some()
                    || self.classifier.uri_len_at(line, pos).is_some())
            {
                return pos;
            }
        }

        line.len()
    }
}

fn is_letter(c: char) -> bool {
    char_class(c) == CharClass::Letter
}

/// Lower-to-upper transitions and the last capital of an acronym start a new word
fn is_camel_hump(prev: char, c: char, next: Option<char>) -> bool {
    if prev.is_lowercase() && c.is_uppercase() {
        return true;
    }
    prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase)
}

/// Whether a run is emitted as a term (ignoring the tokenizer's disabled state)
pub fn is_term(classifier: &Classifier, run: &ScannedRun<'_>) -> bool {
    match run.kind {
        TokenKind::Word => run.text.chars().count() >= classifier.min_term_length,
        TokenKind::Uri => !classifier.skip_uri,
        TokenKind::Key => !classifier.skip_key,
        TokenKind::Separator | TokenKind::Directive(_) => false,
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = ScannedRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(first) = self.line[self.cursor..].chars().next() {
            let start = self.cursor;
            let start_char = self.cursor_char;
            let (state, end) = self.scan_run(start, first);
            let text = &self.line[start..end];

            // WHY: offsets advance for every run, suppressed or skipped, or columns drift
            self.cursor = end;
            self.cursor_char += text.chars().count();

            if start < self.resume_at {
                trace!(start, "Skipping run before resume column");
                continue;
            }

            let kind = match state {
                ScanState::Separator => TokenKind::Separator,
                ScanState::Word => TokenKind::Word,
                ScanState::Uri => TokenKind::Uri,
                ScanState::Key => TokenKind::Key,
                ScanState::Directive(directive) => TokenKind::Directive(directive),
            };

            return Some(ScannedRun {
                kind,
                text,
                start_byte: BytePos(start),
                start_char: CharPos(start_char),
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenizerConfig;

    fn classifier() -> Classifier {
        Classifier::new(&TokenizerConfig::default()).unwrap()
    }

    fn runs(line: &str) -> Vec<(TokenKind, String, usize)> {
        let classifier = classifier();
        LineScanner::new(line, &classifier, BytePos(0))
            .map(|run| (run.kind, run.text.to_string(), run.start_char.0))
            .collect()
    }

    fn words(line: &str) -> Vec<String> {
        let classifier = classifier();
        LineScanner::new(line, &classifier, BytePos(0))
            .filter(|run| run.kind == TokenKind::Word)
            .map(|run| run.text.to_string())
            .collect()
    }

    #[test]
    fn test_simple_line() {
        assert_eq!(
            runs("hello world\n"),
            vec![
                (TokenKind::Word, "hello".to_string(), 0),
                (TokenKind::Separator, " ".to_string(), 5),
                (TokenKind::Word, "world".to_string(), 6),
                (TokenKind::Separator, "\n".to_string(), 11),
            ]
        );
    }

    #[test]
    fn test_empty_line_yields_nothing() {
        assert!(runs("").is_empty());
    }

    #[test]
    fn test_runs_reconstruct_line() {
        let lines = [
            "see http://example.com here\n",
            "  don't   stop: CamelCase123, 0xdeadbeef42!\r\n",
            "naïve café — «quoted» résumé",
            "mail someone@example.com or visit www.example.org.",
            "# spellr:disable\n",
            "a_b+c/d=e",
        ];
        for line in lines {
            let rebuilt: String = runs(line).into_iter().map(|(_, text, _)| text).collect();
            assert_eq!(rebuilt, line);
        }
    }

    #[test]
    fn test_uri_run() {
        let runs = runs("see http://example.com here\n");
        assert_eq!(runs[2], (TokenKind::Uri, "http://example.com".to_string(), 4));
        assert_eq!(runs[4], (TokenKind::Word, "here".to_string(), 23));
    }

    #[test]
    fn test_key_run() {
        let runs = runs("x9Kq2Zt7Wm\n");
        assert_eq!(runs[0], (TokenKind::Key, "x9Kq2Zt7Wm".to_string(), 0));
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn test_words_next_to_numbers_stay_words() {
        assert_eq!(words("set width=100 now"), vec!["set", "width", "now"]);
        assert_eq!(words("read chapter/12 now"), vec!["read", "chapter", "now"]);
        assert_eq!(words("misspeled=1"), vec!["misspeled"]);
        assert_eq!(words("Windows10 rocks"), vec!["Windows", "rocks"]);
    }

    #[test]
    fn test_short_alphanumerics_are_not_keys() {
        assert_eq!(words("mp3 player"), vec!["mp", "player"]);
    }

    #[test]
    fn test_apostrophes_inside_words() {
        assert_eq!(words("don't 'quote' rock'n'roll"), vec!["don't", "quote", "rock'n'roll"]);
        assert_eq!(words("it\u{2019}s"), vec!["it\u{2019}s"]);
    }

    #[test]
    fn test_camel_case_split() {
        assert_eq!(words("camelCase"), vec!["camel", "Case"]);
        assert_eq!(words("HTMLParser"), vec!["HTML", "Parser"]);
        assert_eq!(words("Hello"), vec!["Hello"]);
        assert_eq!(words("NASA"), vec!["NASA"]);
    }

    #[test]
    fn test_directive_runs() {
        let runs = runs("# spellr:disable\n");
        assert_eq!(
            runs[1],
            (TokenKind::Directive(Directive::Disable), "spellr:disable".to_string(), 2)
        );
    }

    #[test]
    fn test_multibyte_offsets() {
        let classifier = classifier();
        let scanned: Vec<_> = LineScanner::new("héllo wörld", &classifier, BytePos(0)).collect();
        assert_eq!(scanned[2].text, "wörld");
        assert_eq!(scanned[2].start_byte, BytePos(7));
        assert_eq!(scanned[2].start_char, CharPos(6));
    }

    #[test]
    fn test_resume_skips_runs_starting_before_column() {
        let classifier = classifier();
        let scanned: Vec<_> = LineScanner::new("abcdef ghij\n", &classifier, BytePos(4))
            .terms()
            .collect();
        assert_eq!(scanned.len(), 1);
        assert_eq!(scanned[0].text, "ghij");
        assert_eq!(scanned[0].start_char, CharPos(7));
    }

    #[test]
    fn test_terms_respect_suppression() {
        let line = "see http://example.com deadbeef42 here";
        let skipping = classifier();
        let terms: Vec<_> = LineScanner::new(line, &skipping, BytePos(0))
            .terms()
            .map(|run| run.text)
            .collect();
        assert_eq!(terms, vec!["see", "here"]);

        let config = TokenizerConfig {
            skip_uri: false,
            skip_key: false,
            ..TokenizerConfig::default()
        };
        let keeping = Classifier::new(&config).unwrap();
        let terms: Vec<_> = LineScanner::new(line, &keeping, BytePos(0))
            .terms()
            .map(|run| run.text)
            .collect();
        assert_eq!(terms, vec!["see", "http://example.com", "deadbeef42", "here"]);
    }

    #[test]
    fn test_min_term_length() {
        let classifier = classifier();
        let terms: Vec<_> = LineScanner::new("I am a big cat", &classifier, BytePos(0))
            .terms()
            .map(|run| run.text)
            .collect();
        assert_eq!(terms, vec!["big", "cat"]);
    }
}
