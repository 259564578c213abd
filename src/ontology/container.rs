//! The ontology container: arenas, name tables, tries, and lattice
//! operations.

use std::path::PathBuf;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::base::{Token, TokenString, TokenTrie};
use crate::error::{Error, Result};
use crate::morphology::{
    self, Number, gerund_of_verb, gerunds_of_verb, passive_participle, singular_of_verb,
};

use super::ids::{AdjectiveId, IndividualId, Literal, MonadicId, NounId, ProperId, VerbId};
use super::individual::Individual;
use super::noun::{Adjective, CommonNoun, ProperNoun};
use super::verb::{Verb, VerbForm, VerbShape};

/// What a name resolves to. The part-of-speech tag is used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Referent {
    CommonNoun(NounId),
    Adjective(AdjectiveId),
    Verb(VerbId),
    Proper(ProperId),
}

impl Referent {
    pub fn part_of_speech(self) -> &'static str {
        match self {
            Referent::CommonNoun(_) => "common noun",
            Referent::Adjective(_) => "adjective",
            Referent::Verb(_) => "verb",
            Referent::Proper(_) => "proper noun",
        }
    }
}

/// "NP should (not) exist" - checked against each invention.
#[derive(Debug, Clone)]
pub struct ExistenceTest {
    pub noun: NounId,
    pub modifiers: Vec<Literal>,
    pub should_exist: bool,
    pub success_message: String,
    pub failure_message: String,
}

/// The set of all concepts, individuals, and rules authored so far.
///
/// Owns a `Vec` arena per referent family; every cross-reference is a
/// typed id into one of these arenas. Name tables keep insertion order so
/// enumeration is deterministic.
#[derive(Debug, Default)]
pub struct Ontology {
    nouns: Vec<CommonNoun>,
    adjectives: Vec<Adjective>,
    verbs: Vec<Verb>,
    proper_nouns: Vec<ProperNoun>,
    permanent_individuals: Vec<Individual>,
    tests: Vec<ExistenceTest>,

    monadic_trie: TokenTrie<MonadicId>,
    verb_trie: TokenTrie<(VerbId, VerbForm)>,

    noun_names: IndexMap<TokenString, NounId>,
    adjective_names: IndexMap<TokenString, AdjectiveId>,
    verb_names: IndexMap<TokenString, VerbId>,
    proper_names: IndexMap<TokenString, ProperId>,

    locked: bool,

    /// Directory holding `.gen` definition files and `.txt` list files.
    pub definitions_dir: Option<PathBuf>,

    pub author: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    /// Button label → command text, registered for the REPL collaborator.
    pub buttons: Vec<(String, String)>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions(dir: impl Into<PathBuf>) -> Self {
        Ontology {
            definitions_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Lock mode
    // ------------------------------------------------------------------

    /// When locked, statements may attach facts to existing referents but
    /// may not introduce new ones.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn check_unlocked(&self, name: &TokenString, kind: &'static str) -> Result<()> {
        if self.locked {
            Err(Error::UnknownReferent {
                name: name.to_string(),
                kind,
            })
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn noun(&self, id: NounId) -> &CommonNoun {
        &self.nouns[id.index()]
    }

    pub fn noun_mut(&mut self, id: NounId) -> &mut CommonNoun {
        &mut self.nouns[id.index()]
    }

    pub fn adjective(&self, id: AdjectiveId) -> &Adjective {
        &self.adjectives[id.index()]
    }

    pub fn adjective_mut(&mut self, id: AdjectiveId) -> &mut Adjective {
        &mut self.adjectives[id.index()]
    }

    pub fn verb(&self, id: VerbId) -> &Verb {
        &self.verbs[id.index()]
    }

    pub fn verb_mut(&mut self, id: VerbId) -> &mut Verb {
        &mut self.verbs[id.index()]
    }

    pub fn proper(&self, id: ProperId) -> &ProperNoun {
        &self.proper_nouns[id.index()]
    }

    pub fn permanent_individuals(&self) -> &[Individual] {
        &self.permanent_individuals
    }

    pub fn tests(&self) -> &[ExistenceTest] {
        &self.tests
    }

    pub fn add_test(&mut self, test: ExistenceTest) {
        self.tests.push(test);
    }

    pub fn noun_ids(&self) -> impl Iterator<Item = NounId> + '_ {
        (0..self.nouns.len()).map(NounId::new)
    }

    pub fn adjective_ids(&self) -> impl Iterator<Item = AdjectiveId> + '_ {
        (0..self.adjectives.len()).map(AdjectiveId::new)
    }

    pub fn verb_ids(&self) -> impl Iterator<Item = VerbId> + '_ {
        (0..self.verbs.len()).map(VerbId::new)
    }

    pub fn monadic_trie(&self) -> &TokenTrie<MonadicId> {
        &self.monadic_trie
    }

    pub fn verb_trie(&self) -> &TokenTrie<(VerbId, VerbForm)> {
        &self.verb_trie
    }

    /// The display name of a monadic concept (singular form for nouns).
    pub fn monadic_name(&self, id: MonadicId) -> &TokenString {
        match id {
            MonadicId::Noun(n) => &self.noun(n).singular,
            MonadicId::Adjective(a) => &self.adjective(a).name,
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Resolve a name, probing each referent table in a fixed order:
    /// proper nouns, common nouns, adjectives, verbs, then the tries.
    pub fn concept(&self, tokens: &[Token]) -> Option<Referent> {
        let key = TokenString::from(tokens);
        if let Some(&id) = self.proper_names.get(&key) {
            return Some(Referent::Proper(id));
        }
        if let Some(&id) = self.noun_names.get(&key) {
            return Some(Referent::CommonNoun(id));
        }
        if let Some(&id) = self.adjective_names.get(&key) {
            return Some(Referent::Adjective(id));
        }
        if let Some(&id) = self.verb_names.get(&key) {
            return Some(Referent::Verb(id));
        }
        if let Some(m) = self.monadic_trie.get(tokens) {
            return Some(match *m {
                MonadicId::Noun(n) => Referent::CommonNoun(n),
                MonadicId::Adjective(a) => Referent::Adjective(a),
            });
        }
        if let Some(&(v, _)) = self.verb_trie.get(tokens) {
            return Some(Referent::Verb(v));
        }
        None
    }

    /// Collision enforcement: every inflection of a new referent must be
    /// free, or already owned by a referent of the same family.
    fn check_name_free(
        &self,
        forms: &[&TokenString],
        attempted: &'static str,
        allow: Option<Referent>,
    ) -> Result<()> {
        for form in forms {
            if let Some(existing) = self.concept(form) {
                if Some(existing) == allow {
                    continue;
                }
                return Err(Error::NameCollision {
                    name: form.to_string(),
                    existing: existing.part_of_speech(),
                    attempted,
                });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Common nouns
    // ------------------------------------------------------------------

    /// Look up or create a common noun from one of its forms. Returns the
    /// id and whether the noun was newly created.
    pub fn intern_common_noun(
        &mut self,
        form: &TokenString,
        number: Number,
    ) -> Result<(NounId, bool)> {
        if let Some(m) = self.monadic_trie.get(form) {
            return match *m {
                MonadicId::Noun(id) => Ok((id, false)),
                MonadicId::Adjective(_) => Err(Error::NameCollision {
                    name: form.to_string(),
                    existing: "adjective",
                    attempted: "common noun",
                }),
            };
        }
        self.check_unlocked(form, "common noun")?;

        let (singular, plural) = match number {
            Number::Singular => {
                let plural = morphology::plural_of_noun_phrase(form)?;
                (form.clone(), plural)
            }
            Number::Plural => {
                let singular = morphology::singular_of_noun_phrase(form)?;
                (singular, form.clone())
            }
        };
        self.check_name_free(&[&singular, &plural], "common noun", None)?;

        let id = NounId::new(self.nouns.len());
        self.nouns.push(CommonNoun::new(singular.clone(), plural.clone()));
        self.noun_names.insert(singular.clone(), id);
        self.monadic_trie.insert(&singular, MonadicId::Noun(id));
        if plural != singular {
            self.noun_names.insert(plural.clone(), id);
            self.monadic_trie
                .insert_marked(&plural, MonadicId::Noun(id), true);
        }
        Ok((id, true))
    }

    /// Look up or create a common noun with both forms given explicitly,
    /// bypassing morphology (from `the plural of X is Y` and its inverse).
    pub fn intern_common_noun_with_forms(
        &mut self,
        singular: &TokenString,
        plural: &TokenString,
    ) -> Result<(NounId, bool)> {
        for form in [singular, plural] {
            if let Some(m) = self.monadic_trie.get(form) {
                return match *m {
                    MonadicId::Noun(id) => {
                        if self.nouns[id.index()].singular != *singular {
                            self.set_singular_form(id, singular.clone());
                        }
                        if self.nouns[id.index()].plural != *plural {
                            self.set_plural_form(id, plural.clone());
                        }
                        Ok((id, false))
                    }
                    MonadicId::Adjective(_) => Err(Error::NameCollision {
                        name: form.to_string(),
                        existing: "adjective",
                        attempted: "common noun",
                    }),
                };
            }
        }
        self.check_unlocked(singular, "common noun")?;
        self.check_name_free(&[singular, plural], "common noun", None)?;

        let id = NounId::new(self.nouns.len());
        self.nouns
            .push(CommonNoun::new(singular.clone(), plural.clone()));
        self.noun_names.insert(singular.clone(), id);
        self.monadic_trie.insert(singular, MonadicId::Noun(id));
        if plural != singular {
            self.noun_names.insert(plural.clone(), id);
            self.monadic_trie
                .insert_marked(plural, MonadicId::Noun(id), true);
        }
        Ok((id, true))
    }

    /// Replace a noun's plural form (from `the plural of X is Y`).
    pub fn set_plural_form(&mut self, id: NounId, plural: TokenString) {
        let old = self.nouns[id.index()].plural.clone();
        if old != self.nouns[id.index()].singular {
            self.monadic_trie.remove(&old);
            self.noun_names.shift_remove(&old);
        }
        self.noun_names.insert(plural.clone(), id);
        self.monadic_trie
            .insert_marked(&plural, MonadicId::Noun(id), true);
        self.nouns[id.index()].plural = plural;
    }

    /// Replace a noun's singular form (from `the singular of X is Y`).
    pub fn set_singular_form(&mut self, id: NounId, singular: TokenString) {
        let old = self.nouns[id.index()].singular.clone();
        if old != self.nouns[id.index()].plural {
            self.monadic_trie.remove(&old);
            self.noun_names.shift_remove(&old);
        }
        self.noun_names.insert(singular.clone(), id);
        self.monadic_trie.insert(&singular, MonadicId::Noun(id));
        self.nouns[id.index()].singular = singular;
    }

    // ------------------------------------------------------------------
    // Adjectives
    // ------------------------------------------------------------------

    pub fn intern_adjective(&mut self, name: &TokenString) -> Result<(AdjectiveId, bool)> {
        if let Some(m) = self.monadic_trie.get(name) {
            return match *m {
                MonadicId::Adjective(id) => Ok((id, false)),
                MonadicId::Noun(_) => Err(Error::NameCollision {
                    name: name.to_string(),
                    existing: "common noun",
                    attempted: "adjective",
                }),
            };
        }
        self.check_unlocked(name, "adjective")?;
        self.check_name_free(&[name], "adjective", None)?;

        let id = AdjectiveId::new(self.adjectives.len());
        self.adjectives.push(Adjective::new(name.clone()));
        self.adjective_names.insert(name.clone(), id);
        self.monadic_trie.insert(name, MonadicId::Adjective(id));
        Ok((id, true))
    }

    /// Record that a kind's descriptions should mention this adjective.
    pub fn add_relevant_adjective(&mut self, noun: NounId, adjective: AdjectiveId) {
        let list = &mut self.nouns[noun.index()].relevant_adjectives;
        if !list.contains(&adjective) {
            list.push(adjective);
        }
    }

    // ------------------------------------------------------------------
    // Verbs
    // ------------------------------------------------------------------

    /// Look up or create a verb from its base (plural) form. Creation
    /// computes and installs every inflection into the verb trie.
    pub fn intern_verb(&mut self, base: &TokenString) -> Result<(VerbId, bool)> {
        if let Some(&(id, _)) = self.verb_trie.get(base) {
            return Ok((id, false));
        }
        self.check_unlocked(base, "verb")?;

        let third = singular_of_verb(base);
        let gerund = gerund_of_verb(base);
        let passive = passive_participle(base);
        self.check_name_free(&[base, &third, &gerund, &passive], "verb", None)?;

        let id = VerbId::new(self.verbs.len());
        self.verbs
            .push(Verb::new(base.clone(), third.clone(), gerund.clone(), passive.clone()));
        self.verb_names.insert(base.clone(), id);
        self.verb_trie.insert(base, (id, VerbForm::Base));
        self.verb_trie.insert(&third, (id, VerbForm::ThirdPerson));
        self.verb_trie.insert(&passive, (id, VerbForm::Passive));
        for g in gerunds_of_verb(base) {
            self.verb_trie.insert(&g, (id, VerbForm::Gerund));
        }
        Ok((id, true))
    }

    /// Resolve a surface verb phrase under any inflection.
    pub fn find_verb(&self, phrase: &[Token]) -> Option<(VerbId, VerbForm)> {
        self.verb_trie.get(phrase).copied()
    }

    /// Add an admissible shape to a verb. A shape whose kinds are
    /// super-kinds of an existing shape's on both sides, with no
    /// modifiers, replaces it; a shape subsumed the same way by an
    /// existing one is dropped; anything else accumulates.
    pub fn add_verb_shape(&mut self, verb: VerbId, shape: VerbShape) {
        let subsumes = |outer: &VerbShape, inner: &VerbShape| {
            outer.subject_modifiers.is_empty()
                && outer.object_modifiers.is_empty()
                && self.is_subkind_of(inner.subject_kind, outer.subject_kind)
                && self.is_subkind_of(inner.object_kind, outer.object_kind)
        };
        let shapes = &self.verbs[verb.index()].shapes;
        if shapes.iter().any(|old| *old == shape || subsumes(old, &shape)) {
            return;
        }
        let keep: Vec<bool> = shapes.iter().map(|old| !subsumes(&shape, old)).collect();
        let verb = &mut self.verbs[verb.index()];
        let mut keep_iter = keep.into_iter();
        verb.shapes.retain(|_| keep_iter.next().unwrap());
        verb.shapes.push(shape);
    }

    /// The shapes a verb admits, inheriting from its superspecies when it
    /// declares none of its own.
    pub fn verb_shapes(&self, id: VerbId) -> Vec<VerbShape> {
        for v in self.verb_ancestry(id) {
            if !self.verb(v).shapes.is_empty() {
                return self.verb(v).shapes.clone();
            }
        }
        Vec::new()
    }

    // ------------------------------------------------------------------
    // Proper nouns and individuals
    // ------------------------------------------------------------------

    pub fn intern_proper_noun(
        &mut self,
        name: &TokenString,
        kinds: Vec<NounId>,
    ) -> Result<(ProperId, bool)> {
        if let Some(&id) = self.proper_names.get(name) {
            let individual = self.proper_nouns[id.index()].individual;
            let mut all = self.permanent_individuals[individual.index()].kinds.clone();
            all.extend(kinds);
            self.normalize_kinds(&mut all);
            self.permanent_individuals[individual.index()].kinds = all.clone();
            self.proper_nouns[id.index()].kinds = all;
            return Ok((id, false));
        }
        self.check_unlocked(name, "proper noun")?;
        self.check_name_free(&[name], "proper noun", None)?;

        let mut kinds = kinds;
        self.normalize_kinds(&mut kinds);
        let individual = self.permanent_individual(name.clone(), kinds.clone());
        let id = ProperId::new(self.proper_nouns.len());
        self.proper_nouns.push(ProperNoun {
            name: name.clone(),
            kinds,
            individual,
        });
        self.proper_names.insert(name.clone(), id);
        Ok((id, true))
    }

    /// Register a permanent individual, reused across generations.
    pub fn permanent_individual(&mut self, name: TokenString, kinds: Vec<NounId>) -> IndividualId {
        let id = IndividualId::new(self.permanent_individuals.len());
        self.permanent_individuals
            .push(Individual::new(name, kinds, Vec::new(), false));
        id
    }

    /// Build a transient individual without registering it.
    pub fn ephemeral_individual(
        &self,
        name: TokenString,
        kinds: Vec<NounId>,
        modifiers: Vec<Literal>,
    ) -> Individual {
        let mut kinds = kinds;
        self.normalize_kinds(&mut kinds);
        Individual::new(name, kinds, modifiers, true)
    }

    // ------------------------------------------------------------------
    // The kind lattice
    // ------------------------------------------------------------------

    /// Add a subkind edge. Idempotent; rejects cycles. A frequency, when
    /// given, annotates the edge.
    pub fn declare_superkind(
        &mut self,
        sub: NounId,
        superkind: NounId,
        frequency: Option<f32>,
    ) -> Result<()> {
        if sub == superkind || self.is_subkind_of(superkind, sub) {
            return Err(Error::Contradiction {
                verb: "is a kind of".into(),
                subject_kind: self.noun(sub).singular.to_string(),
                object_kind: self.noun(superkind).singular.to_string(),
                detail: "this would make the kind lattice cyclic".into(),
            });
        }
        if let Some(pos) = self.nouns[superkind.index()]
            .subkinds
            .iter()
            .position(|&k| k == sub)
        {
            if let Some(f) = frequency {
                self.nouns[superkind.index()].subkind_frequencies[pos] = f;
            }
            return Ok(());
        }
        self.nouns[superkind.index()].subkinds.push(sub);
        self.nouns[superkind.index()]
            .subkind_frequencies
            .push(frequency.unwrap_or(1.0));
        self.nouns[sub.index()].superkinds.push(superkind);
        Ok(())
    }

    /// Reflexive-transitive subkind test.
    pub fn is_subkind_of(&self, sub: NounId, superkind: NounId) -> bool {
        if sub == superkind {
            return true;
        }
        let mut seen = FxHashSet::default();
        let mut stack = vec![sub];
        while let Some(k) = stack.pop() {
            if !seen.insert(k) {
                continue;
            }
            for &parent in &self.noun(k).superkinds {
                if parent == superkind {
                    return true;
                }
                stack.push(parent);
            }
        }
        false
    }

    /// Every strict ancestor of a kind, nearest first.
    pub fn superkind_closure(&self, id: NounId) -> Vec<NounId> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        let mut queue = std::collections::VecDeque::from([id]);
        while let Some(k) = queue.pop_front() {
            for &parent in &self.noun(k).superkinds {
                if seen.insert(parent) {
                    out.push(parent);
                    queue.push_back(parent);
                }
            }
        }
        out
    }

    /// The nearest common ancestor of two kinds, if any.
    pub fn least_upper_bound(&self, a: NounId, b: NounId) -> Option<NounId> {
        let mut a_ancestors = FxHashSet::default();
        a_ancestors.insert(a);
        for k in self.superkind_closure(a) {
            a_ancestors.insert(k);
        }
        if a_ancestors.contains(&b) {
            return Some(b);
        }
        for k in self.superkind_closure(b) {
            if a_ancestors.contains(&k) {
                return Some(k);
            }
        }
        None
    }

    /// Drop any kind strictly dominated by another kind in the list.
    pub fn normalize_kinds(&self, kinds: &mut Vec<NounId>) {
        let snapshot = kinds.clone();
        kinds.retain(|&k| {
            !snapshot
                .iter()
                .any(|&other| other != k && self.is_subkind_of(other, k))
        });
        kinds.dedup();
    }

    /// Whether an individual declared with `declared` kinds could satisfy
    /// kind `k` in some model: `k` is an ancestor or descendant of one.
    pub fn can_be_a(&self, declared: &[NounId], k: NounId) -> bool {
        declared
            .iter()
            .any(|&d| self.is_subkind_of(d, k) || self.is_subkind_of(k, d))
    }

    // ------------------------------------------------------------------
    // Verb ancestry
    // ------------------------------------------------------------------

    /// A verb's superspecies chain, including the verb itself.
    pub fn verb_ancestry(&self, id: VerbId) -> Vec<VerbId> {
        let mut out = vec![id];
        let mut seen = FxHashSet::default();
        seen.insert(id);
        let mut i = 0;
        while i < out.len() {
            for &parent in &self.verb(out[i]).superspecies {
                if seen.insert(parent) {
                    out.push(parent);
                }
            }
            i += 1;
        }
        out
    }

    /// True iff the verb or any ancestor is reflexive.
    pub fn verb_ancestor_reflexive(&self, id: VerbId) -> bool {
        self.verb_ancestry(id).iter().any(|&v| self.verb(v).is_reflexive)
    }

    /// True iff the verb or any ancestor is anti-reflexive.
    pub fn verb_ancestor_anti_reflexive(&self, id: VerbId) -> bool {
        self.verb_ancestry(id)
            .iter()
            .any(|&v| self.verb(v).is_anti_reflexive)
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Tear down every referent, keeping only the definitions directory.
    pub fn erase_concepts(&mut self) {
        let dir = self.definitions_dir.take();
        *self = Ontology {
            definitions_dir: dir,
            ..Ontology::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::tokenize;

    fn ts(s: &str) -> TokenString {
        TokenString::from(s)
    }

    fn noun(ont: &mut Ontology, s: &str) -> NounId {
        ont.intern_common_noun(&ts(s), Number::Singular).unwrap().0
    }

    #[test]
    fn interning_is_idempotent_under_inflection() {
        let mut ont = Ontology::new();
        let (cat, created) = ont.intern_common_noun(&ts("cat"), Number::Singular).unwrap();
        assert!(created);
        let (cat2, created2) = ont.intern_common_noun(&ts("cats"), Number::Plural).unwrap();
        assert!(!created2);
        assert_eq!(cat, cat2);
        assert_eq!(ont.noun(cat).plural.to_string(), "cats");
    }

    #[test]
    fn collisions_are_rejected_across_families() {
        let mut ont = Ontology::new();
        noun(&mut ont, "cat");
        let err = ont.intern_adjective(&ts("cat")).unwrap_err();
        assert!(matches!(err, Error::NameCollision { .. }));
        let err = ont.intern_adjective(&ts("cats")).unwrap_err();
        assert!(matches!(err, Error::NameCollision { .. }));
    }

    #[test]
    fn locked_ontology_rejects_new_referents() {
        let mut ont = Ontology::new();
        let cat = noun(&mut ont, "cat");
        ont.lock();
        let err = ont.intern_common_noun(&ts("dog"), Number::Singular).unwrap_err();
        assert!(matches!(err, Error::UnknownReferent { .. }));
        // Existing referents still resolve.
        assert_eq!(
            ont.intern_common_noun(&ts("cat"), Number::Singular).unwrap(),
            (cat, false)
        );
    }

    #[test]
    fn superkind_cycles_are_rejected() {
        let mut ont = Ontology::new();
        let cat = noun(&mut ont, "cat");
        let animal = noun(&mut ont, "animal");
        ont.declare_superkind(cat, animal, None).unwrap();
        assert!(ont.declare_superkind(animal, cat, None).is_err());
        assert!(ont.declare_superkind(cat, cat, None).is_err());
        // Idempotent.
        ont.declare_superkind(cat, animal, Some(3.0)).unwrap();
        assert_eq!(ont.noun(animal).subkinds.len(), 1);
        assert_eq!(ont.noun(animal).subkind_frequencies[0], 3.0);
    }

    #[test]
    fn least_upper_bound_finds_nearest_ancestor() {
        let mut ont = Ontology::new();
        let animal = noun(&mut ont, "animal");
        let cat = noun(&mut ont, "cat");
        let dog = noun(&mut ont, "dog");
        let persian = noun(&mut ont, "persian");
        ont.declare_superkind(cat, animal, None).unwrap();
        ont.declare_superkind(dog, animal, None).unwrap();
        ont.declare_superkind(persian, cat, None).unwrap();
        assert_eq!(ont.least_upper_bound(persian, dog), Some(animal));
        assert_eq!(ont.least_upper_bound(persian, cat), Some(cat));
        let rock = noun(&mut ont, "rock");
        assert_eq!(ont.least_upper_bound(rock, cat), None);
    }

    #[test]
    fn kind_lists_are_normalized() {
        let mut ont = Ontology::new();
        let animal = noun(&mut ont, "animal");
        let cat = noun(&mut ont, "cat");
        ont.declare_superkind(cat, animal, None).unwrap();
        let mut kinds = vec![animal, cat];
        ont.normalize_kinds(&mut kinds);
        assert_eq!(kinds, vec![cat]);
    }

    #[test]
    fn verbs_install_every_inflection() {
        let mut ont = Ontology::new();
        let (love, _) = ont.intern_verb(&ts("love")).unwrap();
        assert_eq!(ont.find_verb(&tokenize("loves")), Some((love, VerbForm::ThirdPerson)));
        assert_eq!(ont.find_verb(&tokenize("loving")), Some((love, VerbForm::Gerund)));
        assert_eq!(ont.find_verb(&tokenize("loved")), Some((love, VerbForm::Passive)));
        let (work, _) = ont.intern_verb(&ts("work for")).unwrap();
        assert_eq!(
            ont.find_verb(&tokenize("works for")),
            Some((work, VerbForm::ThirdPerson))
        );
    }

    #[test]
    fn proper_nouns_bind_permanent_individuals() {
        let mut ont = Ontology::new();
        let cat = noun(&mut ont, "cat");
        let (id, created) = ont.intern_proper_noun(&ts("garfield"), vec![cat]).unwrap();
        assert!(created);
        let individual = ont.proper(id).individual;
        assert!(!ont.permanent_individuals()[individual.index()].ephemeral);
        assert!(ont.permanent_individuals()[individual.index()].is_named(&tokenize("garfield")));
    }

    #[test]
    fn erase_concepts_tears_everything_down() {
        let mut ont = Ontology::new();
        noun(&mut ont, "cat");
        ont.erase_concepts();
        assert!(ont.concept(&tokenize("cat")).is_none());
        assert_eq!(ont.noun_ids().count(), 0);
    }
}
