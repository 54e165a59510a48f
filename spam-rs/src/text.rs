//! Message text normalization
//!
//! Turns a raw message into the set of distinct lowercase words used as
//! features. Training and prediction must both go through [`message_words`]
//! so that a word seen at fit time is recognised at predict time.

use std::collections::HashSet;

/// Replace every non-alphabetic character with a single space.
///
/// The result has the same number of characters as the input.
pub fn clean(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect()
}

/// Split a cleaned message into its distinct lowercase words
pub fn tokenize(cleaned: &str) -> HashSet<String> {
    cleaned
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}

/// Feature set of a raw message: `tokenize(clean(text))`
pub fn message_words(text: &str) -> HashSet<String> {
    tokenize(&clean(text))
}
