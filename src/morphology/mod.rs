//! English inflection for the restricted authoring grammar.
//!
//! Morphology is rule tables plus irregular dictionaries: nouns inflect on
//! their final word, verb phrases on their head (first) word unless they
//! contain a copula. Gerund generation deliberately over-produces - every
//! plausible surface form is registered in the verb trie so authors never
//! have to pick the "right" spelling.

mod nouns;
mod verbs;
mod words;

pub use nouns::{noun_appears_plural, plural_of_noun, plural_of_noun_phrase, singular_of_noun, singular_of_noun_phrase};
pub use verbs::{
    base_form_of_gerund, base_form_of_participle, gerund_of_verb, gerunds_of_verb,
    passive_participle, plural_of_verb, singular_of_verb,
};
pub use words::{digit_word_value, is_copula, is_preposition};

/// Grammatical number, as inferred from determiners, morphology, or trie
/// plural annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    Singular,
    Plural,
}

impl Number {
    pub fn other(self) -> Number {
        match self {
            Number::Singular => Number::Plural,
            Number::Plural => Number::Singular,
        }
    }
}
