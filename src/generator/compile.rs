//! Constraint compilation: every ontology rule becomes clauses and
//! cardinality constraints over [`Prop`] variables.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::error::{Error, Result};
use crate::ontology::{
    Individual, IndividualId, Literal, MonadicId, NounId, Ontology, PropertyType, VerbId,
};
use crate::solve::{BoolVar, FdSpec, FdVarId, Lit, Problem, RealSpec, RealVarId};

use super::invention::Invention;
use super::{Prop, SolveOptions};

/// A domain variable bound to one (individual, property) instance.
#[derive(Debug, Clone, Copy)]
pub(super) enum PropVar {
    Fd(FdVarId),
    Real(RealVarId),
}

pub(super) struct Compiler<'o> {
    ontology: &'o Ontology,
    individuals: Vec<Individual>,
    problem: Problem,
    vars: FxHashMap<Prop, BoolVar>,
    /// Unit clauses already emitted this rebuild.
    asserted: FxHashSet<(Prop, bool)>,
    /// Per-(individual, kind) rule blocks already emitted this rebuild.
    kinds_formalized: FxHashSet<(IndividualId, NounId)>,
    /// (individual, owning kind, property index) → domain variable.
    property_vars: FxHashMap<(IndividualId, NounId, usize), PropVar>,
}

impl<'o> Compiler<'o> {
    pub(super) fn new(ontology: &'o Ontology, individuals: Vec<Individual>) -> Self {
        Compiler {
            ontology,
            individuals,
            problem: Problem::new(),
            vars: FxHashMap::default(),
            asserted: FxHashSet::default(),
            kinds_formalized: FxHashSet::default(),
            property_vars: FxHashMap::default(),
        }
    }

    fn var(&mut self, prop: Prop) -> BoolVar {
        if let Some(&v) = self.vars.get(&prop) {
            return v;
        }
        let v = self.problem.new_var();
        self.vars.insert(prop, v);
        v
    }

    fn monadic_lit(&mut self, individual: IndividualId, literal: Literal) -> Lit {
        let var = match literal.concept {
            MonadicId::Noun(n) => self.var(Prop::IsA(individual, n)),
            MonadicId::Adjective(a) => self.var(Prop::Is(individual, a)),
        };
        Lit {
            var,
            positive: literal.positive,
        }
    }

    fn assert_unit(&mut self, prop: Prop, positive: bool) {
        if self.asserted.insert((prop, positive)) {
            let var = self.var(prop);
            self.problem.assert_lit(Lit { var, positive });
        }
    }

    fn eligible(&self, individual: usize, kind: NounId) -> bool {
        self.ontology
            .can_be_a(&self.individuals[individual].kinds, kind)
    }

    pub(super) fn compile(&mut self) -> Result<()> {
        for index in 0..self.individuals.len() {
            let id = IndividualId::new(index);
            for modifier in self.individuals[index].modifiers.clone() {
                let lit = self.monadic_lit(id, modifier);
                match modifier.concept {
                    MonadicId::Noun(n) => self.assert_unit(Prop::IsA(id, n), lit.positive),
                    MonadicId::Adjective(a) => self.assert_unit(Prop::Is(id, a), lit.positive),
                }
            }
            for kind in self.individuals[index].kinds.clone() {
                self.assert_unit(Prop::IsA(id, kind), true);
                self.formalize_kind(id, kind);
            }
        }
        for verb in self.ontology.verb_ids() {
            self.compile_verb(verb)?;
        }
        trace!(
            vars = self.problem.num_vars(),
            individuals = self.individuals.len(),
            "compiled generation problem"
        );
        Ok(())
    }

    /// Emit the per-(individual, kind) rule block: kind closure, implied
    /// adjectives, alternative sets, properties, and the subkind
    /// partition. Each block is emitted at most once per rebuild.
    fn formalize_kind(&mut self, id: IndividualId, kind: NounId) {
        if !self.kinds_formalized.insert((id, kind)) {
            return;
        }
        let kind_lit = Lit::pos(self.var(Prop::IsA(id, kind)));

        for superkind in self.ontology.noun(kind).superkinds.clone() {
            let sup = self.var(Prop::IsA(id, superkind));
            self.problem.implies(&[kind_lit], Lit::pos(sup));
            self.formalize_kind(id, superkind);
        }

        for implied in self.ontology.noun(kind).implied_adjectives.clone() {
            let mut antecedents = vec![kind_lit];
            for condition in &implied.conditions {
                antecedents.push(self.monadic_lit(id, *condition));
            }
            let consequent = self.monadic_lit(id, implied.modifier);
            self.problem.implies(&antecedents, consequent);
        }

        for set in self.ontology.noun(kind).alternative_sets.clone() {
            let lits: Vec<Lit> = set
                .alternatives
                .iter()
                .map(|&a| self.monadic_lit(id, a))
                .collect();
            self.problem
                .quantify_if(vec![kind_lit], set.min_count, set.max_count, lits.clone());
            if lits.len() <= 2 {
                // Small sets: bias members false so the solver only has
                // to turn one on.
                for lit in &lits {
                    self.problem.initialize(lit.var, 0.05);
                }
            } else if set.allow_pre_initialization && set.min_count >= 1 {
                let total: f32 = set.frequencies.iter().sum();
                for (lit, freq) in lits.iter().zip(&set.frequencies) {
                    self.problem.initialize(lit.var, freq / total.max(f32::MIN_POSITIVE));
                }
            }
        }

        for (index, property) in self.ontology.noun(kind).properties.iter().enumerate() {
            if self.property_vars.contains_key(&(id, kind, index)) {
                continue;
            }
            let property = property.clone();
            let guards = vec![kind_lit];
            let var = match &property.ty {
                PropertyType::Menu(menu) => {
                    let rules = property
                        .menu_rules
                        .iter()
                        .map(|rule| {
                            let conditions = rule
                                .conditions
                                .iter()
                                .map(|&c| self.monadic_lit(id, c))
                                .collect();
                            (conditions, rule.menu.clone())
                        })
                        .collect();
                    PropVar::Fd(self.problem.add_fd_var(FdSpec {
                        guards,
                        base_menu: menu.clone(),
                        rules,
                    }))
                }
                PropertyType::Interval(low, high) => {
                    let rules = property
                        .interval_rules
                        .iter()
                        .map(|rule| {
                            let conditions = rule
                                .conditions
                                .iter()
                                .map(|&c| self.monadic_lit(id, c))
                                .collect();
                            (conditions, rule.low, rule.high)
                        })
                        .collect();
                    PropVar::Real(self.problem.add_real_var(RealSpec {
                        guards,
                        low: *low,
                        high: *high,
                        rules,
                    }))
                }
            };
            self.property_vars.insert((id, kind, index), var);
        }

        let subkinds = self.ontology.noun(kind).subkinds.clone();
        if !subkinds.is_empty() {
            let frequencies = self.ontology.noun(kind).subkind_frequencies.clone();
            let total: f32 = frequencies.iter().sum();
            let mut lits = Vec::new();
            for (&sub, &freq) in subkinds.iter().zip(&frequencies) {
                let var = self.var(Prop::IsA(id, sub));
                let bias = match self.ontology.noun(sub).initial_probability {
                    Some(p) => p,
                    None => freq / total.max(f32::MIN_POSITIVE),
                };
                self.problem.initialize(var, bias);
                lits.push(Lit::pos(var));
            }
            self.problem.unique_if(vec![kind_lit], lits);
            for sub in subkinds {
                self.formalize_kind(id, sub);
            }
        }
    }

    fn compile_verb(&mut self, verb_id: VerbId) -> Result<()> {
        let shapes = self.ontology.verb_shapes(verb_id);
        if shapes.is_empty() {
            return Ok(());
        }
        let verb = self.ontology.verb(verb_id).clone();
        let count = self.individuals.len();

        // Shape implications and density biases for every eligible pair.
        let mut pairs: Vec<(IndividualId, IndividualId)> = Vec::new();
        let mut pair_set: FxHashSet<(IndividualId, IndividualId)> = FxHashSet::default();
        for shape in &shapes {
            for s in 0..count {
                if !self.eligible(s, shape.subject_kind) {
                    continue;
                }
                let i1 = IndividualId::new(s);
                for o in 0..count {
                    if !self.eligible(o, shape.object_kind) {
                        continue;
                    }
                    let i2 = IndividualId::new(o);
                    let h = Lit::pos(self.var(Prop::Holds(verb_id, i1, i2)));
                    self.problem.initialize(h.var, verb.density);
                    if pair_set.insert((i1, i2)) {
                        pairs.push((i1, i2));
                    }
                    self.formalize_kind(i1, shape.subject_kind);
                    self.formalize_kind(i2, shape.object_kind);
                    let s_kind = Lit::pos(self.var(Prop::IsA(i1, shape.subject_kind)));
                    self.problem.implies(&[h], s_kind);
                    for &m in &shape.subject_modifiers {
                        let lit = self.monadic_lit(i1, m);
                        self.problem.implies(&[h], lit);
                    }
                    let o_kind = Lit::pos(self.var(Prop::IsA(i2, shape.object_kind)));
                    self.problem.implies(&[h], o_kind);
                    for &m in &shape.object_modifiers {
                        let lit = self.monadic_lit(i2, m);
                        self.problem.implies(&[h], lit);
                    }
                }
            }
        }

        // Cardinality bounds, guarded by the subject's (or object's) kind
        // and modifiers.
        for shape in &shapes {
            let subjects: Vec<usize> =
                (0..count).filter(|&i| self.eligible(i, shape.subject_kind)).collect();
            let objects: Vec<usize> =
                (0..count).filter(|&i| self.eligible(i, shape.object_kind)).collect();

            if verb.object_lower > 0 && !subjects.is_empty() && objects.len() < verb.object_lower {
                return Err(self.cardinality_contradiction(&verb, shape, objects.len(), true));
            }
            if verb.subject_lower > 0 && !objects.is_empty() && subjects.len() < verb.subject_lower
            {
                return Err(self.cardinality_contradiction(&verb, shape, subjects.len(), false));
            }

            if verb.has_object_bounds() {
                for &s in &subjects {
                    let i1 = IndividualId::new(s);
                    let mut guards = vec![Lit::pos(self.var(Prop::IsA(i1, shape.subject_kind)))];
                    for &m in &shape.subject_modifiers {
                        guards.push(self.monadic_lit(i1, m));
                    }
                    let lits: Vec<Lit> = objects
                        .iter()
                        .map(|&o| {
                            Lit::pos(self.var(Prop::Holds(verb_id, i1, IndividualId::new(o))))
                        })
                        .collect();
                    self.problem
                        .quantify_if(guards, verb.object_lower, verb.object_upper, lits);
                }
            }
            if verb.has_subject_bounds() {
                for &o in &objects {
                    let i2 = IndividualId::new(o);
                    let mut guards = vec![Lit::pos(self.var(Prop::IsA(i2, shape.object_kind)))];
                    for &m in &shape.object_modifiers {
                        guards.push(self.monadic_lit(i2, m));
                    }
                    let lits: Vec<Lit> = subjects
                        .iter()
                        .map(|&s| {
                            Lit::pos(self.var(Prop::Holds(verb_id, IndividualId::new(s), i2)))
                        })
                        .collect();
                    self.problem
                        .quantify_if(guards, verb.subject_lower, verb.subject_upper, lits);
                }
            }
        }

        // Reflexivity follows the superspecies chain.
        let anti_reflexive = self.ontology.verb_ancestor_anti_reflexive(verb_id);
        let reflexive = self.ontology.verb_ancestor_reflexive(verb_id);
        if anti_reflexive || reflexive {
            for shape in &shapes {
                for i in 0..count {
                    if !self.eligible(i, shape.subject_kind) || !self.eligible(i, shape.object_kind)
                    {
                        continue;
                    }
                    let id = IndividualId::new(i);
                    if anti_reflexive {
                        self.assert_unit(Prop::Holds(verb_id, id, id), false);
                    }
                    if reflexive {
                        let mut antecedents =
                            vec![Lit::pos(self.var(Prop::IsA(id, shape.subject_kind)))];
                        if shape.object_kind != shape.subject_kind {
                            antecedents
                                .push(Lit::pos(self.var(Prop::IsA(id, shape.object_kind))));
                        }
                        for &m in shape
                            .subject_modifiers
                            .iter()
                            .chain(&shape.object_modifiers)
                        {
                            antecedents.push(self.monadic_lit(id, m));
                        }
                        let h = Lit::pos(self.var(Prop::Holds(verb_id, id, id)));
                        self.problem.implies(&antecedents, h);
                    }
                }
            }
        }

        if verb.is_anti_symmetric {
            for &(i1, i2) in &pairs {
                if i1 < i2 && pair_set.contains(&(i2, i1)) {
                    let a = Lit::neg(self.var(Prop::Holds(verb_id, i1, i2)));
                    let b = Lit::neg(self.var(Prop::Holds(verb_id, i2, i1)));
                    self.problem.or(vec![a, b]);
                }
            }
        }
        if verb.is_symmetric {
            for &(i1, i2) in &pairs {
                if i1 != i2 && pair_set.contains(&(i2, i1)) {
                    let forward = Lit::pos(self.var(Prop::Holds(verb_id, i1, i2)));
                    let backward = Lit::pos(self.var(Prop::Holds(verb_id, i2, i1)));
                    self.problem.implies(&[forward], backward);
                }
            }
        }

        for &general in &verb.generalizations {
            for &(i1, i2) in &pairs {
                let h = Lit::pos(self.var(Prop::Holds(verb_id, i1, i2)));
                let g = Lit::pos(self.var(Prop::Holds(general, i1, i2)));
                self.problem.implies(&[h], g);
            }
        }
        for &excluded in &verb.mutual_exclusions {
            // Each unordered verb pair is emitted once.
            if verb_id < excluded {
                for &(i1, i2) in &pairs {
                    let h = Lit::pos(self.var(Prop::Holds(verb_id, i1, i2)));
                    let e = Lit::pos(self.var(Prop::Holds(excluded, i1, i2)));
                    self.problem.at_most(1, vec![h, e]);
                }
            }
        }
        for &superspecies in &verb.superspecies {
            for &(i1, i2) in &pairs {
                let h = Lit::pos(self.var(Prop::Holds(verb_id, i1, i2)));
                let s = Lit::pos(self.var(Prop::Holds(superspecies, i1, i2)));
                self.problem.implies(&[h], s);
            }
        }
        if !verb.subspecies.is_empty() {
            for &(i1, i2) in &pairs {
                let guard = Lit::pos(self.var(Prop::Holds(verb_id, i1, i2)));
                let mut alternatives = Vec::new();
                for &sub in &verb.subspecies {
                    alternatives.push(Lit::pos(self.var(Prop::Holds(sub, i1, i2))));
                    if self.ontology.verb(sub).is_symmetric && i1 != i2 {
                        alternatives.push(Lit::pos(self.var(Prop::Holds(sub, i2, i1))));
                    }
                }
                self.problem.unique_if(vec![guard], alternatives);
            }
        }
        Ok(())
    }

    fn cardinality_contradiction(
        &self,
        verb: &crate::ontology::Verb,
        shape: &crate::ontology::VerbShape,
        available: usize,
        object_side: bool,
    ) -> Error {
        let (needed, side) = if object_side {
            (verb.object_lower, "objects")
        } else {
            (verb.subject_lower, "subjects")
        };
        Error::Contradiction {
            verb: verb.base.to_string(),
            subject_kind: self.ontology.noun(shape.subject_kind).singular.to_string(),
            object_kind: self.ontology.noun(shape.object_kind).singular.to_string(),
            detail: format!("needs at least {needed} {side}, but only {available} exist"),
        }
    }

    pub(super) fn solve(self, options: &SolveOptions) -> Option<Invention<'o>> {
        let solution = self
            .problem
            .solve(options.retries, options.timeout, options.seed)?;
        Some(Invention::new(
            self.ontology,
            self.individuals,
            self.vars,
            self.property_vars,
            solution,
        ))
    }
}
