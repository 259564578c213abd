//! Shared helpers: build ontologies from statement lists, resolve names,
//! and run seeded generations.

#![allow(dead_code)]

use std::time::Duration;

use imaginarium::ontology::{AdjectiveId, NounId, Referent, VerbId};
use imaginarium::{Invention, Ontology, ParseDriver, SolveOptions, invent, tokenize};
use once_cell::sync::Lazy;

/// The cat lattice several generation tests share, built once.
pub static CAT_WORLD: Lazy<Ontology> = Lazy::new(|| {
    ontology_from(&[
        "a cat is a kind of person.",
        "a persian is a kind of cat.",
        "a tabby is a kind of cat.",
        "a siamese is a kind of cat.",
    ])
});

/// Build an ontology by executing each statement, panicking with the
/// offending statement on failure.
pub fn ontology_from(statements: &[&str]) -> Ontology {
    let mut ontology = Ontology::new();
    let mut driver = ParseDriver::new();
    for statement in statements {
        driver
            .parse_and_execute(&mut ontology, statement)
            .unwrap_or_else(|e| panic!("statement {statement:?} failed: {e}"));
    }
    ontology
}

pub fn noun(ontology: &Ontology, name: &str) -> NounId {
    match ontology.concept(&tokenize(name)) {
        Some(Referent::CommonNoun(id)) => id,
        other => panic!("expected common noun {name:?}, found {other:?}"),
    }
}

pub fn adjective(ontology: &Ontology, name: &str) -> AdjectiveId {
    match ontology.concept(&tokenize(name)) {
        Some(Referent::Adjective(id)) => id,
        other => panic!("expected adjective {name:?}, found {other:?}"),
    }
}

pub fn verb(ontology: &Ontology, name: &str) -> VerbId {
    match ontology.concept(&tokenize(name)) {
        Some(Referent::Verb(id)) => id,
        other => panic!("expected verb {name:?}, found {other:?}"),
    }
}

pub fn options_with_seed(seed: u64) -> SolveOptions {
    SolveOptions {
        retries: 20,
        timeout: Duration::from_secs(30),
        seed: Some(seed),
    }
}

/// Generate `count` individuals of the named kind with a fixed seed.
pub fn generate<'o>(ontology: &'o Ontology, kind: &str, count: usize, seed: u64) -> Invention<'o> {
    let root = noun(ontology, kind);
    invent(ontology, root, &[], count, &options_with_seed(seed))
        .expect("generation should not contradict")
        .expect("a model should exist")
}
