//! The ontology: everything the author has named, stored in arenas.
//!
//! All cross-references between entities are typed ids into `Vec` arenas
//! owned by the [`Ontology`] container; lookup is a function on the
//! container, never a method on a detached reference. Two tries index the
//! arenas: one over monadic concept names (nouns and adjectives, every
//! inflection) and one over verbs (every conjugation).

mod container;
mod ids;
mod individual;
mod noun;
mod verb;

pub use container::{ExistenceTest, Ontology, Referent};
pub use ids::{AdjectiveId, IndividualId, Literal, MonadicId, NounId, ProperId, VerbId};
pub use individual::{Individual, PartRef};
pub use noun::{
    Adjective, AlternativeSet, CommonNoun, ConditionalModifier, IntervalRule, MenuRule, Part,
    ProperNoun, Property, PropertyType, TemplatePiece, parse_template,
};
pub use verb::{COMMON_DENSITY, DEFAULT_DENSITY, RARE_DENSITY, UNBOUNDED, Verb, VerbForm, VerbShape};
