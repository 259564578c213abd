//! The post-solve query layer.

use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ontology::{
    AdjectiveId, Individual, IndividualId, MonadicId, NounId, Ontology, VerbId,
};
use crate::solve::{BoolVar, Solution};

use super::Prop;
use super::compile::PropVar;

/// A solved model: individuals plus truth assignments, queryable and
/// renderable. Description and name caches live here, never on the
/// individuals, so two inventions over the same ontology cannot lie to
/// each other.
#[derive(Debug)]
pub struct Invention<'o> {
    pub(super) ontology: &'o Ontology,
    pub(super) individuals: Vec<Individual>,
    pub(super) vars: FxHashMap<Prop, BoolVar>,
    pub(super) property_vars: FxHashMap<(IndividualId, NounId, usize), PropVar>,
    pub(super) solution: Solution,
    pub(super) name_cache: RefCell<FxHashMap<IndividualId, String>>,
}

impl<'o> Invention<'o> {
    pub(super) fn new(
        ontology: &'o Ontology,
        individuals: Vec<Individual>,
        vars: FxHashMap<Prop, BoolVar>,
        property_vars: FxHashMap<(IndividualId, NounId, usize), PropVar>,
        solution: Solution,
    ) -> Self {
        Invention {
            ontology,
            individuals,
            vars,
            property_vars,
            solution,
            name_cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn ontology(&self) -> &'o Ontology {
        self.ontology
    }

    /// Every individual in the invention, ephemeral ones first, in
    /// creation order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individual_ids(&self) -> impl Iterator<Item = IndividualId> + '_ {
        (0..self.individuals.len()).map(IndividualId::new)
    }

    pub fn individual(&self, id: IndividualId) -> &Individual {
        &self.individuals[id.index()]
    }

    pub fn individual_named(&self, name: &str) -> Option<IndividualId> {
        self.individual_ids()
            .find(|&id| self.individuals[id.index()].name.to_string() == name)
    }

    /// Whether the individual is of the kind in this model. Kinds the
    /// individual could never be (no lattice path from a declared kind)
    /// are false without consulting the solver.
    pub fn is_a(&self, id: IndividualId, kind: NounId) -> bool {
        let declared = &self.individuals[id.index()].kinds;
        if !self.ontology.can_be_a(declared, kind) {
            return false;
        }
        match self.vars.get(&Prop::IsA(id, kind)) {
            Some(&var) => self.solution.truth(var),
            None => declared
                .iter()
                .any(|&d| self.ontology.is_subkind_of(d, kind)),
        }
    }

    /// Whether the adjective holds of the individual in this model.
    pub fn has_adjective(&self, id: IndividualId, adjective: AdjectiveId) -> bool {
        self.vars
            .get(&Prop::Is(id, adjective))
            .is_some_and(|&var| self.solution.truth(var))
    }

    /// Whether the verb relates subject to object in this model.
    pub fn holds(&self, verb: VerbId, subject: IndividualId, object: IndividualId) -> bool {
        self.vars
            .get(&Prop::Holds(verb, subject, object))
            .is_some_and(|&var| self.solution.truth(var))
    }

    /// Every `(verb, subject, object)` true in the solution, symmetric
    /// pairs deduplicated by the individuals' total order.
    pub fn relationships(&self) -> Vec<(VerbId, IndividualId, IndividualId)> {
        let mut out = Vec::new();
        for (&prop, &var) in &self.vars {
            let Prop::Holds(verb, subject, object) = prop else {
                continue;
            };
            if !self.solution.truth(var) {
                continue;
            }
            if self.ontology.verb(verb).is_symmetric
                && subject > object
                && self.holds(verb, object, subject)
            {
                continue;
            }
            out.push((verb, subject, object));
        }
        out.sort_by_key(|&(v, s, o)| (v.0, s.0, o.0));
        out
    }

    /// All kinds true of the individual that no other true kind
    /// specializes; these decide which description template applies.
    pub fn most_specific_nouns(&self, id: IndividualId) -> Vec<NounId> {
        let true_kinds: Vec<NounId> = self
            .ontology
            .noun_ids()
            .filter(|&k| self.is_a(id, k))
            .collect();
        true_kinds
            .iter()
            .copied()
            .filter(|&k| {
                !true_kinds
                    .iter()
                    .any(|&other| other != k && self.ontology.is_subkind_of(other, k))
            })
            .collect()
    }

    /// The relevant adjectives (and alternative-set members) true of the
    /// individual and not marked silent, in ontology order.
    pub fn adjectives_describing(&self, id: IndividualId) -> Vec<AdjectiveId> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for kind in self.ontology.noun_ids() {
            if !self.is_a(id, kind) {
                continue;
            }
            for &adjective in &self.ontology.noun(kind).relevant_adjectives {
                if self.ontology.adjective(adjective).is_silent {
                    continue;
                }
                if self.has_adjective(id, adjective) && seen.insert(adjective) {
                    out.push(adjective);
                }
            }
        }
        out
    }

    /// The value of a named property of the individual, if one was bound
    /// in this model.
    pub fn property_value(&self, id: IndividualId, name: &str) -> Option<String> {
        for (&(owner_id, kind, index), var) in &self.property_vars {
            if owner_id != id {
                continue;
            }
            let property = &self.ontology.noun(kind).properties[index];
            if property.name.to_string() != name {
                continue;
            }
            if let Some(value) = self.domain_value(*var) {
                return Some(value);
            }
        }
        None
    }

    pub(super) fn domain_value(&self, var: PropVar) -> Option<String> {
        match var {
            PropVar::Fd(fd) => self.solution.fd_value(fd).map(String::from),
            PropVar::Real(real) => self.solution.real_value(real).map(super::describe::format_number),
        }
    }

    /// Whether descriptions of this individual are suppressed
    /// (`Do not print X.`).
    pub fn suppressed(&self, id: IndividualId) -> bool {
        self.individuals[id.index()]
            .kinds
            .iter()
            .any(|&k| self.ontology.noun(k).suppress_description)
    }

    /// Run every registered existence test against this model, returning
    /// (passed, message) per test.
    pub fn test_results(&self) -> Vec<(bool, String)> {
        self.ontology
            .tests()
            .iter()
            .map(|test| {
                let exists = self.individual_ids().any(|id| {
                    self.is_a(id, test.noun)
                        && test.modifiers.iter().all(|m| match m.concept {
                            MonadicId::Noun(n) => self.is_a(id, n) == m.positive,
                            MonadicId::Adjective(a) => self.has_adjective(id, a) == m.positive,
                        })
                });
                let passed = exists == test.should_exist;
                let message = if passed {
                    test.success_message.clone()
                } else {
                    test.failure_message.clone()
                };
                (passed, message)
            })
            .collect()
    }
}
