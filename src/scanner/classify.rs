// Named classification predicates for the line scanner.
// Each rule is testable on a plain &str without any I/O.

use regex_automata::{meta::Regex, Anchored, Input};

use crate::config::{KeyHeuristic, TokenizerConfig};
use crate::error::Result;

/// Coarse class of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Letter,
    Digit,
    Whitespace,
    Punctuation,
}

pub fn char_class(c: char) -> CharClass {
    if c.is_alphabetic() {
        CharClass::Letter
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_whitespace() {
        CharClass::Whitespace
    } else {
        CharClass::Punctuation
    }
}

/// ASCII apostrophe or its typographic form
pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Characters of a hex, mixed or vowelless key candidate
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters of a base64 key candidate
pub fn is_base64_char(c: char) -> bool {
    is_key_char(c) || matches!(c, '+' | '/' | '=')
}

/// Whether a URI, directive or key may start at byte `pos`
///
/// Only the start of the line or a position after a non-alphanumeric character
/// qualifies, so `xhttp://` or the tail of `abc123` never start a new run.
pub fn is_boundary(line: &str, pos: usize) -> bool {
    match line[..pos].chars().next_back() {
        None => true,
        Some(prev) => {
            !(matches!(char_class(prev), CharClass::Letter | CharClass::Digit) || prev == '_')
        }
    }
}

/// In-band markers that switch term emission off and on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Disable,
    Enable,
}

impl Directive {
    pub const DISABLE_MARKER: &'static str = "spellr:disable";
    pub const ENABLE_MARKER: &'static str = "spellr:enable";

    pub fn marker(&self) -> &'static str {
        match self {
            Directive::Disable => Self::DISABLE_MARKER,
            Directive::Enable => Self::ENABLE_MARKER,
        }
    }
}

/// Length in bytes of a directive marker starting at `pos`
pub fn directive_at(line: &str, pos: usize) -> Option<(Directive, usize)> {
    let rest = &line[pos..];
    [Directive::Disable, Directive::Enable]
        .into_iter()
        .find_map(|directive| {
            let marker = directive.marker();
            let follows = rest.strip_prefix(marker)?.chars().next();
            if follows.is_some_and(|c| c.is_alphanumeric()) {
                None
            } else {
                Some((directive, marker.len()))
            }
        })
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// All hex digits, at least one decimal digit
pub fn is_hex_key(candidate: &str, heuristic: &KeyHeuristic) -> bool {
    candidate.len() >= heuristic.min_hex_length
        && candidate.chars().all(|c| c.is_ascii_hexdigit())
        && candidate.chars().any(|c| c.is_ascii_digit())
}

/// Whether some run of three or more letters carries a vowel, as words do
///
/// `Windows10` and `misspeled1` have word structure, `x9Kq2Zt7` does not.
pub fn has_word_structure(candidate: &str) -> bool {
    candidate
        .split(|c: char| !c.is_ascii_alphabetic())
        .any(|letters| letters.len() >= 3 && letters.chars().any(is_vowel))
}

/// ASCII letters and digits interleaved without word structure, e.g. `x9Kq2Zt7Wm`
pub fn is_mixed_key(candidate: &str, heuristic: &KeyHeuristic) -> bool {
    candidate.len() >= heuristic.min_mixed_length
        && candidate.chars().any(|c| c.is_ascii_alphabetic())
        && candidate.chars().any(|c| c.is_ascii_digit())
        && !has_word_structure(candidate)
}

/// Long runs shaped like base64: both cases plus a digit or `+ / =`
pub fn is_base64_key(candidate: &str, heuristic: &KeyHeuristic) -> bool {
    candidate.len() >= heuristic.min_base64_length
        && candidate.chars().any(|c| c.is_ascii_uppercase())
        && candidate.chars().any(|c| c.is_ascii_lowercase())
        && candidate
            .chars()
            .any(|c| c.is_ascii_digit() || matches!(c, '+' | '/' | '='))
}

/// Letters only, with no vowel anywhere: no word structure
pub fn is_vowelless_key(candidate: &str, heuristic: &KeyHeuristic) -> bool {
    candidate.len() >= heuristic.min_vowelless_length
        && candidate.chars().all(|c| c.is_ascii_alphabetic())
        && !candidate.chars().any(is_vowel)
}

/// Predicates over an `[A-Za-z0-9_]` candidate
pub fn is_key(candidate: &str, heuristic: &KeyHeuristic) -> bool {
    is_hex_key(candidate, heuristic)
        || is_mixed_key(candidate, heuristic)
        || is_vowelless_key(candidate, heuristic)
}

fn span_len(rest: &str, accept: impl Fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|&(_, c)| !accept(c))
        .map_or(rest.len(), |(i, _)| i)
}

/// Length in bytes of a key-like run starting at `pos`
///
/// Only base64 candidates reach across `+ / =`; the other predicates see the
/// plain identifier span, so `width=100` is never one candidate.
pub fn key_len_at(line: &str, pos: usize, heuristic: &KeyHeuristic) -> Option<usize> {
    let rest = &line[pos..];

    let wide = span_len(rest, is_base64_char);
    if wide > 0 && is_base64_key(&rest[..wide], heuristic) {
        return Some(wide);
    }

    let narrow = span_len(rest, is_key_char);
    (narrow > 0 && is_key(&rest[..narrow], heuristic)).then_some(narrow)
}

/// Anchored matcher for the URI grammar
#[derive(Debug, Clone)]
pub struct UriMatcher {
    regex: Regex,
}

impl UriMatcher {
    pub fn new() -> Result<Self> {
        // Compositional pattern components
        let scheme = r"[A-Za-z][A-Za-z0-9+.\-]*://";
        let www = r"www\.";
        let mailto = r"mailto:";
        // WHY: a URI never ends on sentence punctuation or a closing bracket
        let body = r#"[^\s]*[^\s.,;:!?'")\]>]"#;
        let email = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+";

        let pattern = format!("(?:(?:{scheme}|{www}|{mailto}){body})|(?:{email})");
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Length in bytes of the URI starting exactly at `pos`
    pub fn match_len(&self, line: &str, pos: usize) -> Option<usize> {
        let input = Input::new(line).range(pos..).anchored(Anchored::Yes);
        self.regex.search(&input).map(|m| m.end() - pos)
    }

    pub fn is_uri(&self, text: &str) -> bool {
        self.match_len(text, 0) == Some(text.len())
    }
}

/// Compiled classification rules shared by every line of one scan
#[derive(Debug, Clone)]
pub struct Classifier {
    uri: UriMatcher,
    key_heuristic: KeyHeuristic,
    pub skip_uri: bool,
    pub skip_key: bool,
    pub min_term_length: usize,
}

impl Classifier {
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        Ok(Self {
            uri: UriMatcher::new()?,
            key_heuristic: config.key_heuristic.clone(),
            skip_uri: config.skip_uri,
            skip_key: config.skip_key,
            min_term_length: config.min_term_length,
        })
    }

    pub fn uri_len_at(&self, line: &str, pos: usize) -> Option<usize> {
        self.uri.match_len(line, pos)
    }

    pub fn key_len_at(&self, line: &str, pos: usize) -> Option<usize> {
        key_len_at(line, pos, &self.key_heuristic)
    }

    pub fn is_uri(&self, text: &str) -> bool {
        self.uri.is_uri(text)
    }
}
