//! Skill Tokenizer: turns free text into unigram, bigram and trigram candidates.

use std::sync::LazyLock;

use regex::Regex;

/// A word starts with a letter and continues with letters, `+`, `#` or `.`,
/// so `c++`, `c#` and `node.js` survive as single tokens.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z][a-z+#.]+").expect("word pattern is a valid regex"));

/// Splits already-lowercased text into word tokens.
///
/// Trailing periods are sentence punctuation, not part of the word
/// (`java.` → `java`, `node.js.` → `node.js`). Tokens left with fewer than
/// two characters are dropped.
pub fn words(lowered: &str) -> Vec<&str> {
    WORD_PATTERN
        .find_iter(lowered)
        .map(|m| m.as_str().trim_end_matches('.'))
        .filter(|word| word.len() >= 2)
        .collect()
}

/// Lowercases `text` and returns every unigram, then every adjacent pair,
/// then every adjacent triple, each joined by a single space.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let words = words(&lowered);

    let mut candidates = Vec::with_capacity(words.len() * 3);
    candidates.extend(words.iter().map(|word| word.to_string()));
    candidates.extend(words.windows(2).map(|pair| pair.join(" ")));
    candidates.extend(words.windows(3).map(|triple| triple.join(" ")));
    candidates
}
