// WHY: standalone normalization so dedup and dictionary batching share one definition
// of "the same word" regardless of casing or stray punctuation

/// Characters that survive normalization: letters and the apostrophe
pub fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '\''
}

/// Fold the typographic apostrophe onto the ASCII one
fn fold_apostrophe(c: char) -> char {
    if c == '\u{2019}' {
        '\''
    } else {
        c
    }
}

/// Lowercase a term and drop everything outside the word alphabet
pub fn normalize_term(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_term_into(text, &mut result);
    result
}

/// Normalize into a supplied buffer to avoid allocation
pub fn normalize_term_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    // WHY: filter after lowercasing; some capitals lowercase to a letter plus a
    // combining mark, and filtering first would keep the mark and break idempotence
    for lowered in text.chars().map(fold_apostrophe).flat_map(char::to_lowercase) {
        if is_word_char(lowered) {
            buffer.push(lowered);
        }
    }
}
