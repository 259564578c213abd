//! Closed word classes: copulas, prepositions, digit words.

use crate::base::Token;

/// Copular forms. A verb phrase containing one of these inflects by
/// replacing the copula rather than the head word.
pub const COPULAS: &[&str] = &["is", "are", "be", "being", "been", "was", "were"];

/// The small closed list of prepositions that may end a verb phrase
/// ("work for", "married to").
pub const PREPOSITIONS: &[&str] = &[
    "of", "to", "for", "with", "by", "at", "on", "in", "from", "about", "as", "into", "over",
    "under", "around", "through",
];

const DIGIT_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

pub fn is_copula(t: &Token) -> bool {
    COPULAS.contains(&t.as_str())
}

pub fn is_preposition(t: &Token) -> bool {
    PREPOSITIONS.contains(&t.as_str())
}

/// The value of a digit word ("one" through "ten"), if `t` is one.
pub fn digit_word_value(t: &Token) -> Option<usize> {
    DIGIT_WORDS
        .iter()
        .position(|w| t.eq_word(w))
        .map(|i| i + 1)
}
