//! Generation: expand individuals, compile the ontology's rules into a
//! constraint problem, solve, and wrap the model in an [`Invention`].

mod compile;
mod describe;
mod expand;
mod invention;

use std::time::Duration;

use crate::error::Result;
use crate::ontology::{Literal, NounId, Ontology};

pub use invention::Invention;

use compile::Compiler;

/// Solver knobs for one generation.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub retries: usize,
    pub timeout: Duration,
    /// Fix the random seed for reproducible inventions.
    pub seed: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            retries: 8,
            timeout: Duration::from_secs(5),
            seed: None,
        }
    }
}

/// Propositions the generator models. Only these ever become solver
/// variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Prop {
    /// Individual is of a kind.
    IsA(crate::ontology::IndividualId, NounId),
    /// Individual carries an adjective.
    Is(crate::ontology::IndividualId, crate::ontology::AdjectiveId),
    /// Verb relates subject to object.
    Holds(crate::ontology::VerbId, crate::ontology::IndividualId, crate::ontology::IndividualId),
}

/// Generate `count` individuals of `kind` (plus parts and permanent
/// individuals), satisfying every rule in the ontology.
///
/// Returns `Ok(None)` when the solver finds no model within its retry
/// budget; [`Error::Contradiction`](crate::Error::Contradiction) when the
/// rules are statically impossible.
pub fn invent<'o>(
    ontology: &'o Ontology,
    kind: NounId,
    modifiers: &[Literal],
    count: usize,
    options: &SolveOptions,
) -> Result<Option<Invention<'o>>> {
    let individuals = expand::expand(ontology, kind, modifiers, count)?;
    let mut compiler = Compiler::new(ontology, individuals);
    compiler.compile()?;
    Ok(compiler.solve(options))
}
