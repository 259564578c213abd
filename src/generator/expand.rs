//! Instance expansion: from (root kind, modifiers, count) to the full
//! list of individuals, parts included, permanent individuals appended.

use crate::base::{Token, TokenString};
use crate::error::{Error, Result};
use crate::ontology::{Individual, IndividualId, Literal, NounId, Ontology, PartRef};

/// Parts nest; deeper than this means the part graph is cyclic.
const MAX_PART_DEPTH: usize = 32;

pub(super) fn expand(
    ontology: &Ontology,
    root: NounId,
    modifiers: &[Literal],
    count: usize,
) -> Result<Vec<Individual>> {
    let mut individuals = Vec::new();
    let singular = ontology.noun(root).singular.clone();
    for index in 0..count {
        let name = if count == 1 {
            let mut tokens = vec![Token::new("the")];
            tokens.extend(singular.tokens().iter().cloned());
            TokenString::new(tokens)
        } else {
            let mut tokens: Vec<Token> = singular.tokens().to_vec();
            tokens.push(Token::new(&index.to_string()));
            TokenString::new(tokens)
        };
        let individual = ontology.ephemeral_individual(name, vec![root], modifiers.to_vec());
        let id = IndividualId::new(individuals.len());
        individuals.push(individual);
        expand_parts(ontology, &mut individuals, id, 0)?;
    }
    for permanent in ontology.permanent_individuals() {
        let id = IndividualId::new(individuals.len());
        individuals.push(permanent.clone());
        expand_parts(ontology, &mut individuals, id, 0)?;
    }
    Ok(individuals)
}

/// Instantiate every part of every kind (including super-kinds) of the
/// individual, recursively.
fn expand_parts(
    ontology: &Ontology,
    individuals: &mut Vec<Individual>,
    id: IndividualId,
    depth: usize,
) -> Result<()> {
    if depth > MAX_PART_DEPTH {
        let kind = individuals[id.index()].kinds.first().copied();
        return Err(Error::Contradiction {
            verb: "has".into(),
            subject_kind: kind
                .map(|k| ontology.noun(k).singular.to_string())
                .unwrap_or_default(),
            object_kind: String::new(),
            detail: "parts nest endlessly; a kind contains itself".into(),
        });
    }
    let mut kinds = individuals[id.index()].kinds.clone();
    for kind in individuals[id.index()].kinds.clone() {
        kinds.extend(ontology.superkind_closure(kind));
    }
    for kind in kinds {
        for (index, part) in ontology.noun(kind).parts.iter().enumerate() {
            let part_ref = PartRef { owner: kind, index };
            if individuals[id.index()].part_individuals(part_ref).is_some() {
                continue;
            }
            let mut children = Vec::new();
            for child_index in 0..part.count {
                let name = if part.count == 1 {
                    part.name.clone()
                } else {
                    let mut tokens: Vec<Token> = part.name.tokens().to_vec();
                    tokens.push(Token::new(&child_index.to_string()));
                    TokenString::new(tokens)
                };
                let mut child = ontology.ephemeral_individual(
                    name,
                    vec![part.kind],
                    part.modifiers.clone(),
                );
                child.container = Some(id);
                child.container_part = Some(part_ref);
                let child_id = IndividualId::new(individuals.len());
                individuals.push(child);
                children.push(child_id);
                expand_parts(ontology, individuals, child_id, depth + 1)?;
            }
            individuals[id.index()].parts.push((part_ref, children));
        }
    }
    Ok(())
}
