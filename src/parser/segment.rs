//! Typed segments: noun phrases, adjective phrases, verb phrases,
//! quantifiers, and their list forms.
//!
//! Scanning is greedy against the ontology's tries; a run of tokens the
//! tries do not know becomes a *new-name* segment, materialized by the
//! pattern's action (and subject to lock mode there).

use crate::base::{Token, TokenString};
use crate::error::Error;
use crate::morphology::{self, Number};
use crate::ontology::{AdjectiveId, Literal, MonadicId, NounId, Ontology, VerbForm, VerbId};

use super::matcher::{MatchResult, Matcher};

/// Words that end a noun phrase or an unknown verb run.
const BOUNDARY_WORDS: &[&str] = &[
    "a", "an", "the", "all", "is", "are", "can", "must", "cannot", "should", "have", "has", "and",
    "or", "of", "called", "between", "from", "exist", "by", "kind", "kinds", "means", "themselves",
    "each", "other", "another", "many", "some", "up", "at", "most", "least", "always", "way",
    "implies",
];

fn is_boundary(t: &Token) -> bool {
    !t.is_word() || BOUNDARY_WORDS.contains(&t.as_str())
}

/// The head of a noun phrase: an existing monadic concept (with the
/// polarity its negation prefix gave it) or a new name.
#[derive(Debug, Clone)]
pub enum NpHead {
    Known(MonadicId, bool),
    New(TokenString),
}

/// A scanned noun phrase.
#[derive(Debug, Clone)]
pub struct Np {
    pub head: NpHead,
    /// Known concepts preceding the head.
    pub modifiers: Vec<Literal>,
    pub number: Option<Number>,
    pub explicit_count: Option<usize>,
    pub begins_with_determiner: bool,
    pub relative_frequency: Option<f32>,
    pub text: TokenString,
}

impl Np {
    pub fn is_modified(&self) -> bool {
        !self.modifiers.is_empty()
    }

    pub fn is_singular(&self) -> bool {
        self.number == Some(Number::Singular)
    }

    pub fn is_plural(&self) -> bool {
        self.number == Some(Number::Plural)
    }

    /// Resolve the head as a common noun, creating it when new. Newly
    /// created nouns are reported to `created` so the driver can look for
    /// their definition files.
    pub fn noun(
        &self,
        ont: &mut Ontology,
        created: &mut Vec<TokenString>,
    ) -> crate::error::Result<NounId> {
        match &self.head {
            NpHead::Known(MonadicId::Noun(id), true) => Ok(*id),
            NpHead::Known(MonadicId::Noun(id), false) => Err(Error::Grammatical {
                sentence: self.text.to_string(),
                pattern: None,
                expected: format!(
                    "'{}' cannot be negated here",
                    ont.noun(*id).singular
                ),
            }),
            NpHead::Known(MonadicId::Adjective(id), _) => Err(Error::Grammatical {
                sentence: self.text.to_string(),
                pattern: None,
                expected: format!(
                    "a noun, but '{}' is an adjective",
                    ont.adjective(*id).name
                ),
            }),
            NpHead::New(name) => {
                let number = self.number.unwrap_or_else(|| {
                    if morphology::noun_appears_plural(name) {
                        Number::Plural
                    } else {
                        Number::Singular
                    }
                });
                let (id, is_new) = ont.intern_common_noun(name, number)?;
                if is_new {
                    created.push(ont.noun(id).singular.clone());
                }
                Ok(id)
            }
        }
    }

    /// The head as a signed literal over an existing or new noun.
    pub fn literal(
        &self,
        ont: &mut Ontology,
        created: &mut Vec<TokenString>,
    ) -> crate::error::Result<Literal> {
        match &self.head {
            NpHead::Known(id, positive) => Ok(Literal {
                concept: *id,
                positive: *positive,
            }),
            NpHead::New(_) => Ok(Literal::positive(MonadicId::Noun(
                self.noun(ont, created)?,
            ))),
        }
    }
}

/// The head of an adjective phrase.
#[derive(Debug, Clone)]
pub enum ApHead {
    Known(AdjectiveId),
    New(TokenString),
}

/// A scanned adjective phrase.
#[derive(Debug, Clone)]
pub struct Ap {
    pub head: ApHead,
    pub positive: bool,
    pub frequency: Option<f32>,
    pub text: TokenString,
}

impl Ap {
    /// Resolve the adjective, creating it when new.
    pub fn adjective(&self, ont: &mut Ontology) -> crate::error::Result<AdjectiveId> {
        match &self.head {
            ApHead::Known(id) => Ok(*id),
            ApHead::New(name) => Ok(ont.intern_adjective(name)?.0),
        }
    }

    pub fn literal(&self, ont: &mut Ontology) -> crate::error::Result<Literal> {
        Ok(Literal {
            concept: MonadicId::Adjective(self.adjective(ont)?),
            positive: self.positive,
        })
    }
}

/// How the items of a list segment were joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

/// A scanned verb segment: a known verb under some inflection, or the
/// token run that will become a new verb.
#[derive(Debug, Clone)]
pub struct VerbPhrase {
    pub known: Option<(VerbId, VerbForm)>,
    pub text: TokenString,
}

impl VerbPhrase {
    /// Resolve as an existing verb or create one, treating the surface
    /// text as the given conjugation.
    pub fn verb(&self, ont: &mut Ontology, assumed: VerbForm) -> crate::error::Result<VerbId> {
        if let Some((id, _)) = self.known {
            return Ok(id);
        }
        let base = match assumed {
            VerbForm::Base => self.text.clone(),
            VerbForm::ThirdPerson => morphology::plural_of_verb(&self.text),
            VerbForm::Gerund => morphology::base_form_of_gerund(&self.text),
            VerbForm::Passive => morphology::base_form_of_participle(&self.text),
        };
        Ok(ont.intern_verb(&base)?.0)
    }

    /// The form this phrase was found in, or a morphology guess for new
    /// verbs.
    pub fn form(&self) -> VerbForm {
        if let Some((_, form)) = self.known {
            return form;
        }
        match self.text.head_word() {
            Some(w) if w.as_str().ends_with("ing") => VerbForm::Gerund,
            Some(w) if w.as_str().ends_with("ed") => VerbForm::Passive,
            _ => VerbForm::Base,
        }
    }
}

/// A closed-class quantifying determiner. `is_other` is the sole signal
/// distinguishing "can love *other* cats" (anti-reflexive) from
/// "can love *many* cats".
#[derive(Debug, Clone, Copy)]
pub struct Quantifier {
    pub word: &'static str,
    pub is_other: bool,
    pub plural: bool,
    pub count: Option<usize>,
}

const QUANTIFIERS: &[Quantifier] = &[
    Quantifier {
        word: "other",
        is_other: true,
        plural: true,
        count: None,
    },
    Quantifier {
        word: "another",
        is_other: true,
        plural: false,
        count: Some(1),
    },
    Quantifier {
        word: "many",
        is_other: false,
        plural: true,
        count: None,
    },
    Quantifier {
        word: "some",
        is_other: false,
        plural: true,
        count: None,
    },
    Quantifier {
        word: "one",
        is_other: false,
        plural: false,
        count: Some(1),
    },
];

impl<'a> Matcher<'a> {
    /// Scan a noun phrase. `in_list` suppresses comma consumption between
    /// the phrase's own modifiers, since the comma then separates list
    /// items instead.
    pub fn np(&mut self, ont: &Ontology, in_list: bool) -> MatchResult<Np> {
        let start = self.save();
        let mut number = None;
        let mut explicit_count = None;
        let mut begins_with_determiner = false;

        if self.opt_word("a") || self.opt_word("an") {
            number = Some(Number::Singular);
            begins_with_determiner = true;
        } else if self.opt_word("all") {
            number = Some(Number::Plural);
        } else if let Some(t) = self.peek() {
            if let Some(n) = morphology::digit_word_value(t) {
                explicit_count = Some(n);
                number = Some(if n == 1 { Number::Singular } else { Number::Plural });
                self.advance();
            } else if t.is_integer() {
                explicit_count = t.as_str().parse().ok();
                number = Some(Number::Plural);
                self.advance();
            }
        }

        // Greedily consume known monadic concepts; the last becomes the
        // head, the earlier ones modifiers.
        let mut items: Vec<(MonadicId, bool, bool)> = Vec::new();
        loop {
            let before_item = self.save();
            let mut positive = true;
            if self.opt_word("not") || self.opt_word("non") {
                let _ = self.opt_word("-");
                positive = false;
            }
            let Some(m) = ont.monadic_trie().longest_prefix(self.tokens(), self.pos()) else {
                self.restore(before_item);
                break;
            };
            let (value, len, plural) = (*m.value, m.len, m.plural);
            for _ in 0..len {
                self.advance();
            }
            items.push((value, positive, plural));

            // A comma may separate stacked modifiers, but only when this
            // NP is not itself a list element.
            if !in_list && self.next_is(",") {
                let before_comma = self.save();
                self.advance();
                if ont
                    .monadic_trie()
                    .longest_prefix(self.tokens(), self.pos())
                    .is_none()
                {
                    self.restore(before_comma);
                    break;
                }
            }
        }

        // Remaining unknown words become a new-name head.
        let mut new_name: Vec<Token> = Vec::new();
        while let Some(t) = self.peek() {
            if is_boundary(t) {
                break;
            }
            new_name.push(t.clone());
            self.advance();
        }

        let head;
        let mut modifiers = Vec::new();
        if !new_name.is_empty() {
            head = NpHead::New(TokenString::new(new_name));
            for (id, positive, _) in &items {
                modifiers.push(Literal {
                    concept: *id,
                    positive: *positive,
                });
            }
        } else if let Some((id, positive, plural)) = items.last().copied() {
            head = NpHead::Known(id, positive);
            if number.is_none() {
                number = Some(if plural { Number::Plural } else { Number::Singular });
            }
            for (id, positive, _) in &items[..items.len() - 1] {
                modifiers.push(Literal {
                    concept: *id,
                    positive: *positive,
                });
            }
        } else {
            return self.fail("a noun phrase");
        }

        if number.is_none() {
            if let NpHead::New(name) = &head {
                number = Some(if morphology::noun_appears_plural(name) {
                    Number::Plural
                } else {
                    Number::Singular
                });
            }
        }

        let relative_frequency = self.opt_frequency();
        let text = self.slice(start, self.pos());
        Ok(Np {
            head,
            modifiers,
            number,
            explicit_count,
            begins_with_determiner,
            relative_frequency,
            text,
        })
    }

    /// A parenthesized relative frequency: `( 10 )`.
    fn opt_frequency(&mut self) -> Option<f32> {
        if !self.next_is("(") {
            return None;
        }
        let saved = self.save();
        self.advance();
        let Ok(value) = self.number() else {
            self.restore(saved);
            return None;
        };
        if !self.opt_word(")") {
            self.restore(saved);
            return None;
        }
        Some(value as f32)
    }

    /// Scan an adjective phrase: optional negation, one adjective (known
    /// or new), optional frequency.
    pub fn ap(&mut self, ont: &Ontology) -> MatchResult<Ap> {
        let start = self.save();
        let mut positive = true;
        if self.opt_word("not") || self.opt_word("non") {
            let _ = self.opt_word("-");
            positive = false;
        }
        let head = match ont.monadic_trie().longest_prefix(self.tokens(), self.pos()) {
            Some(m) => match *m.value {
                MonadicId::Adjective(id) => {
                    for _ in 0..m.len {
                        self.advance();
                    }
                    ApHead::Known(id)
                }
                MonadicId::Noun(_) => {
                    self.restore(start);
                    return self.fail("an adjective");
                }
            },
            None => {
                let mut words: Vec<Token> = Vec::new();
                while let Some(t) = self.peek() {
                    if is_boundary(t) {
                        break;
                    }
                    words.push(t.clone());
                    self.advance();
                }
                if words.is_empty() {
                    self.restore(start);
                    return self.fail("an adjective");
                }
                ApHead::New(TokenString::new(words))
            }
        };
        let frequency = self.opt_frequency();
        let text = self.slice(start, self.pos());
        Ok(Ap {
            head,
            positive,
            frequency,
            text,
        })
    }

    /// A comma/conjunction-separated list of noun phrases:
    /// `persian, tabby (10), and siamese`.
    pub fn np_list(&mut self, ont: &Ontology) -> MatchResult<(Vec<Np>, Conjunction)> {
        self.list(|m| m.np(ont, true))
    }

    /// A comma/conjunction-separated list of adjective phrases.
    pub fn ap_list(&mut self, ont: &Ontology) -> MatchResult<(Vec<Ap>, Conjunction)> {
        self.list(|m| m.ap(ont))
    }

    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> MatchResult<T>,
    ) -> MatchResult<(Vec<T>, Conjunction)> {
        let mut items = vec![item(self)?];
        let mut conjunction = Conjunction::And;
        loop {
            let before = self.save();
            let had_comma = self.opt_word(",");
            if self.opt_word("and") {
                conjunction = Conjunction::And;
            } else if self.opt_word("or") {
                conjunction = Conjunction::Or;
            } else if !had_comma {
                break;
            }
            match item(self) {
                Ok(next) => items.push(next),
                Err(_) => {
                    self.restore(before);
                    break;
                }
            }
        }
        Ok((items, conjunction))
    }

    /// Scan a verb segment. Known verbs resolve through the verb trie
    /// under any inflection; unknown runs stop at boundary words and at
    /// anything the monadic trie knows (the object is starting).
    pub fn verb(&mut self, ont: &Ontology) -> MatchResult<VerbPhrase> {
        let start = self.save();
        if let Some(m) = ont.verb_trie().longest_prefix(self.tokens(), self.pos()) {
            let known = Some(*m.value);
            for _ in 0..m.len {
                self.advance();
            }
            let text = self.slice(start, self.pos());
            return Ok(VerbPhrase { known, text });
        }
        let mut words: Vec<Token> = Vec::new();
        while let Some(t) = self.peek() {
            if !t.is_word() || is_boundary(t) {
                break;
            }
            if morphology::is_copula(t) || morphology::digit_word_value(t).is_some() {
                break;
            }
            if ont
                .monadic_trie()
                .longest_prefix(self.tokens(), self.pos())
                .is_some()
            {
                break;
            }
            words.push(t.clone());
            self.advance();
        }
        if words.is_empty() {
            return self.fail("a verb");
        }
        Ok(VerbPhrase {
            known: None,
            text: TokenString::new(words),
        })
    }

    /// A closed-class quantifying determiner.
    pub fn quantifier(&mut self) -> MatchResult<Quantifier> {
        if let Some(t) = self.peek() {
            for q in QUANTIFIERS {
                if t.eq_word(q.word) {
                    self.advance();
                    return Ok(*q);
                }
            }
            if let Some(n) = morphology::digit_word_value(t) {
                self.advance();
                return Ok(Quantifier {
                    word: "",
                    is_other: false,
                    plural: n != 1,
                    count: Some(n),
                });
            }
            if t.is_integer() {
                if let Ok(n) = t.as_str().parse::<usize>() {
                    self.advance();
                    return Ok(Quantifier {
                        word: "",
                        is_other: false,
                        plural: n != 1,
                        count: Some(n),
                    });
                }
            }
        }
        self.fail("a quantifier")
    }
}
