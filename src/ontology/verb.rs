//! Verbs: binary relations with admissible shapes, cardinality bounds, and
//! algebraic flags.

use crate::base::TokenString;

use super::ids::{Literal, NounId, VerbId};

/// Sentinel for "no upper bound". Large, but far enough below `usize::MAX`
/// that cardinality arithmetic cannot overflow.
pub const UNBOUNDED: usize = 1_000_000;

/// Which conjugation of a verb a trie key stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbForm {
    /// Plural / infinitive form: "love", "work for".
    Base,
    /// Third-person singular: "loves", "works for".
    ThirdPerson,
    /// "loving", "working for".
    Gerund,
    /// "loved", "worked for".
    Passive,
}

/// One admissible (subject, object) typing for a verb.
#[derive(Debug, Clone, PartialEq)]
pub struct VerbShape {
    pub subject_kind: NounId,
    pub subject_modifiers: Vec<Literal>,
    pub object_kind: NounId,
    pub object_modifiers: Vec<Literal>,
}

/// A binary relation.
#[derive(Debug, Clone)]
pub struct Verb {
    /// Base (plural) surface form; setting it installs every inflection in
    /// the verb trie.
    pub base: TokenString,
    pub third_person: TokenString,
    pub gerund: TokenString,
    pub passive: TokenString,
    /// Admissible subject/object shapes.
    pub shapes: Vec<VerbShape>,
    pub is_reflexive: bool,
    pub is_anti_reflexive: bool,
    pub is_symmetric: bool,
    pub is_anti_symmetric: bool,
    /// How many subjects each object relates to.
    pub subject_lower: usize,
    pub subject_upper: usize,
    /// How many objects each subject relates to.
    pub object_lower: usize,
    pub object_upper: usize,
    /// Initial Boolean bias for the solver, in (0, 1).
    pub density: f32,
    /// Verbs implied by this one.
    pub generalizations: Vec<VerbId>,
    pub mutual_exclusions: Vec<VerbId>,
    /// "X is a way of Y": Y is a superspecies of X.
    pub superspecies: Vec<VerbId>,
    pub subspecies: Vec<VerbId>,
}

pub const DEFAULT_DENSITY: f32 = 0.5;
pub const RARE_DENSITY: f32 = 0.05;
pub const COMMON_DENSITY: f32 = 0.8;

impl Verb {
    pub fn new(
        base: TokenString,
        third_person: TokenString,
        gerund: TokenString,
        passive: TokenString,
    ) -> Self {
        Verb {
            base,
            third_person,
            gerund,
            passive,
            shapes: Vec::new(),
            is_reflexive: false,
            is_anti_reflexive: false,
            is_symmetric: false,
            is_anti_symmetric: false,
            subject_lower: 0,
            subject_upper: UNBOUNDED,
            object_lower: 0,
            object_upper: UNBOUNDED,
            density: DEFAULT_DENSITY,
            generalizations: Vec::new(),
            mutual_exclusions: Vec::new(),
            superspecies: Vec::new(),
            subspecies: Vec::new(),
        }
    }

    /// True when any cardinality statement has been made on the object side.
    pub fn has_object_bounds(&self) -> bool {
        self.object_lower > 0 || self.object_upper < UNBOUNDED
    }

    pub fn has_subject_bounds(&self) -> bool {
        self.subject_lower > 0 || self.subject_upper < UNBOUNDED
    }
}
