//! # imaginarium
//!
//! Constraint-based procedural content generation from English-authored
//! ontologies.
//!
//! A designer writes statements in a restricted subset of English
//! (`a persian is a kind of cat.`, `cats can love other cats.`). The parser
//! matches each statement against an ordered list of sentence patterns and
//! mutates an [`Ontology`](ontology::Ontology). On demand, the generator
//! expands a requested number of individuals, compiles every ontology rule
//! into a constraint problem, solves it, and wraps the result in an
//! [`Invention`](generator::Invention) that answers queries and renders
//! English descriptions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! generator  → instance expansion, constraint compilation, Invention
//!   ↓
//! parser     → token cursor, typed segments, sentence patterns, driver
//!   ↓
//! solve      → constraint problem builder and reference solver
//!   ↓
//! ontology   → arena container: nouns, adjectives, verbs, individuals
//!   ↓
//! morphology → singular/plural and verb-form inflection
//!   ↓
//! base       → Token, tokenize, TokenString, TokenTrie
//! ```

/// Foundation types: tokens, token strings, the token-sequence trie
pub mod base;

/// Crate-wide error taxonomy
pub mod error;

/// English inflection: noun number, verb forms, closed word classes
pub mod morphology;

/// The ontology arena: referent families, tries, lattice operations
pub mod ontology;

/// Constraint problem builder and the reference solver
pub mod solve;

/// Pattern-directed statement parser and definition-file driver
pub mod parser;

/// Instance expansion, constraint compilation, and the Invention query layer
pub mod generator;

pub use base::{Token, TokenString, tokenize};
pub use error::{Error, Result};
pub use generator::{Invention, SolveOptions, invent};
pub use ontology::Ontology;
pub use parser::ParseDriver;
