//! Individuals: the runtime objects an invention is made of.

use crate::base::TokenString;

use super::ids::{IndividualId, Literal, NounId};

/// Identifies a part slot: the kind that declares it plus its index in
/// that kind's part list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartRef {
    pub owner: NounId,
    pub index: usize,
}

/// A runtime object participating in an invention. Permanent individuals
/// (from proper nouns) live in the ontology arena and are reused across
/// generations; ephemeral ones live only within one generation pass.
#[derive(Debug, Clone)]
pub struct Individual {
    pub name: TokenString,
    /// Kinds asserted of this individual. Invariant: never contains a kind
    /// strictly dominated by another kind in the list.
    pub kinds: Vec<NounId>,
    pub modifiers: Vec<Literal>,
    /// True only for individuals created within one generation.
    pub ephemeral: bool,
    /// For a part-individual, the individual that owns it.
    pub container: Option<IndividualId>,
    /// For a part-individual, which part slot of the container it fills.
    pub container_part: Option<PartRef>,
    /// Part slot → the individuals satisfying it, filled during expansion.
    pub parts: Vec<(PartRef, Vec<IndividualId>)>,
}

impl Individual {
    pub fn new(name: TokenString, kinds: Vec<NounId>, modifiers: Vec<Literal>, ephemeral: bool) -> Self {
        Individual {
            name,
            kinds,
            modifiers,
            ephemeral,
            container: None,
            container_part: None,
            parts: Vec::new(),
        }
    }

    pub fn is_named(&self, tokens: &[crate::base::Token]) -> bool {
        self.name.tokens() == tokens
    }

    /// The individuals filling a given part slot, if expanded.
    pub fn part_individuals(&self, part: PartRef) -> Option<&[IndividualId]> {
        self.parts
            .iter()
            .find(|(p, _)| *p == part)
            .map(|(_, v)| v.as_slice())
    }
}
