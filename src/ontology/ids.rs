//! Typed arena indices and the signed monadic literal.

use std::fmt;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

arena_id!(
    /// Index of a [`CommonNoun`](super::CommonNoun) in the ontology arena.
    NounId
);
arena_id!(
    /// Index of an [`Adjective`](super::Adjective) in the ontology arena.
    AdjectiveId
);
arena_id!(
    /// Index of a [`Verb`](super::Verb) in the ontology arena.
    VerbId
);
arena_id!(
    /// Index of a [`ProperNoun`](super::ProperNoun) in the ontology arena.
    ProperId
);
arena_id!(
    /// Index of an [`Individual`](super::Individual). Permanent individuals
    /// index the ontology's arena; during generation the same type indexes
    /// the generation arena, which appends the permanent ones. The index
    /// doubles as the monotonic id giving individuals their total order.
    IndividualId
);

/// A unary predicate: either a kind or an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonadicId {
    Noun(NounId),
    Adjective(AdjectiveId),
}

impl MonadicId {
    pub fn as_noun(self) -> Option<NounId> {
        match self {
            MonadicId::Noun(id) => Some(id),
            MonadicId::Adjective(_) => None,
        }
    }

    pub fn as_adjective(self) -> Option<AdjectiveId> {
        match self {
            MonadicId::Adjective(id) => Some(id),
            MonadicId::Noun(_) => None,
        }
    }
}

/// A signed monadic concept - the only thing constraints ever store for
/// monadic facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub concept: MonadicId,
    pub positive: bool,
}

impl Literal {
    pub fn positive(concept: MonadicId) -> Self {
        Literal {
            concept,
            positive: true,
        }
    }

    pub fn negative(concept: MonadicId) -> Self {
        Literal {
            concept,
            positive: false,
        }
    }

    pub fn negated(self) -> Self {
        Literal {
            concept: self.concept,
            positive: !self.positive,
        }
    }
}
