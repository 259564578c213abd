//! The pattern-directed statement parser.
//!
//! Each statement is tried against an ordered list of sentence patterns;
//! the first pattern that matches runs its action against the ontology.
//! Matching is predicate-driven over a token cursor with explicit
//! save/restore, and failure is a value, not an exception: a pattern
//! backtracks silently until it crosses its cut, after which any mismatch
//! becomes a [`GrammaticalError`](crate::Error::Grammatical) carrying the
//! pattern name and the segment that could not be scanned.

mod driver;
mod matcher;
mod patterns;
mod segment;

pub use driver::ParseDriver;
pub use matcher::{MatchFail, MatchResult, Matcher};
pub use segment::{Ap, ApHead, Conjunction, Np, NpHead, Quantifier, VerbPhrase};
