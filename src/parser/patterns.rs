//! The standard sentence patterns.
//!
//! Patterns are tried in declaration order; the first to match runs its
//! action and parsing stops. Each pattern places its cut (`m.cut()`) right
//! after the constituent that makes the sentence unambiguous, so later
//! mismatches report a precise diagnostic instead of backtracking.

use crate::base::TokenString;
use crate::error::Error;
use crate::morphology::Number;
use crate::ontology::{
    AlternativeSet, COMMON_DENSITY, ConditionalModifier, ExistenceTest, IntervalRule, MenuRule,
    MonadicId, NounId, Ontology, Part, Property, PropertyType, RARE_DENSITY, VerbForm, VerbId,
    VerbShape, parse_template,
};

use super::matcher::{MatchResult, Matcher};
use super::segment::{Ap, Conjunction, Np, NpHead, VerbPhrase};

/// Per-statement action context: names of referents created while the
/// statement executed, reported to the driver for definition-file loading.
#[derive(Debug, Default)]
pub(super) struct PatternCtx {
    pub created: Vec<TokenString>,
}

pub(super) type PatternFn = fn(&mut Matcher, &mut Ontology, &mut PatternCtx) -> MatchResult<()>;

pub(super) struct Pattern {
    pub name: &'static str,
    pub run: PatternFn,
}

/// The pattern repertoire, in match order.
pub(super) const PATTERNS: &[Pattern] = &[
    Pattern { name: "metadata", run: p_metadata },
    Pattern { name: "button", run: p_pressing },
    Pattern { name: "do-not-mention", run: p_do_not_mention },
    Pattern { name: "do-not-print", run: p_do_not_print },
    Pattern { name: "plural-override", run: p_plural_of },
    Pattern { name: "singular-override", run: p_singular_of },
    Pattern { name: "every-kind-should-exist", run: p_every_kind_test },
    Pattern { name: "verb-density", run: p_verb_density },
    Pattern { name: "verb-mutual-exclusion", run: p_verb_mutex },
    Pattern { name: "verb-implication", run: p_verb_implies },
    Pattern { name: "verb-way-of", run: p_verb_way_of },
    Pattern { name: "kind-of", run: p_kind_of },
    Pattern { name: "kinds-of", run: p_kinds_of },
    Pattern { name: "bounded-alternatives", run: p_alt_bounds },
    Pattern { name: "identified-described-as", run: p_identified },
    Pattern { name: "proper-noun", run: p_proper },
    Pattern { name: "should-exist", run: p_should_exist },
    Pattern { name: "interval-property", run: p_property_interval },
    Pattern { name: "menu-property", run: p_property_menu },
    Pattern { name: "has-part", run: p_has_part },
    Pattern { name: "verb-cardinality", run: p_v_bounds },
    Pattern { name: "passive-cardinality", run: p_be_vpp },
    Pattern { name: "verb-reflexivity", run: p_reflexive },
    Pattern { name: "quantified-verb", run: p_v_quant },
    Pattern { name: "optional-adjectives", run: p_can_be },
    Pattern { name: "adjective-statement", run: p_ap_list },
];

// ----------------------------------------------------------------------
// Feature checks
// ----------------------------------------------------------------------

/// Subject number must agree with the verb's; an unknown subject number
/// inherits the verb's.
fn agree(m: &Matcher, np: &Np, plural_verb: bool) -> MatchResult<()> {
    match np.number {
        Some(Number::Singular) if plural_verb => {
            m.fail("the subject and verb to agree in number")
        }
        Some(Number::Plural) if !plural_verb => {
            m.fail("the subject and verb to agree in number")
        }
        _ => Ok(()),
    }
}

fn require_unmodified(m: &Matcher, np: &Np, role: &str) -> MatchResult<()> {
    if np.is_modified() {
        m.fail(format!("{role} without adjectives"))
    } else {
        Ok(())
    }
}

fn require_singular(m: &Matcher, np: &Np, role: &str) -> MatchResult<()> {
    if np.is_singular() {
        Ok(())
    } else {
        m.fail(format!("{role} in the singular"))
    }
}

// ----------------------------------------------------------------------
// Metadata, buttons, output control
// ----------------------------------------------------------------------

fn p_metadata(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    let which = m.one_of(&["author", "description", "instructions"])?;
    m.word(":")?;
    m.cut();
    let text = m.rest_text()?;
    match which {
        "author" => ont.author = Some(text),
        "description" => ont.description = Some(text),
        _ => ont.instructions = Some(text),
    }
    Ok(())
}

fn p_pressing(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    m.word("pressing")?;
    m.cut();
    let label = m.quoted()?;
    m.word("means")?;
    let command = m.quoted()?;
    m.end()?;
    ont.buttons.push((label, command));
    Ok(())
}

fn p_do_not_mention(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    m.words(&["do", "not", "mention", "being"])?;
    m.cut();
    let ap = m.ap(ont)?;
    m.end()?;
    let adjective = m.act(ap.adjective(ont))?;
    ont.adjective_mut(adjective).is_silent = true;
    Ok(())
}

fn p_do_not_print(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    m.words(&["do", "not", "print"])?;
    m.cut();
    let np = m.np(ont, false)?;
    m.end()?;
    let noun = m.act(np.noun(ont, &mut cx.created))?;
    ont.noun_mut(noun).suppress_description = true;
    Ok(())
}

// ----------------------------------------------------------------------
// Morphology overrides
// ----------------------------------------------------------------------

fn p_plural_of(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    m.words(&["the", "plural", "of"])?;
    m.cut();
    let singular = m.words_until(&["is"])?;
    m.word("is")?;
    let plural = m.words_until(&[])?;
    m.end()?;
    m.act(ont.intern_common_noun_with_forms(&singular, &plural))?;
    Ok(())
}

fn p_singular_of(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    m.words(&["the", "singular", "of"])?;
    m.cut();
    let plural = m.words_until(&["is"])?;
    m.word("is")?;
    let singular = m.words_until(&[])?;
    m.end()?;
    m.act(ont.intern_common_noun_with_forms(&singular, &plural))?;
    Ok(())
}

// ----------------------------------------------------------------------
// Verb algebra
// ----------------------------------------------------------------------

/// Verb segments at sentence-start only commit to being verbs when the
/// trie knows them or the surface is a gerund; anything else is left for
/// the noun-phrase patterns.
fn algebra_verb(m: &mut Matcher, ont: &Ontology) -> MatchResult<VerbPhrase> {
    let vp = m.verb(ont)?;
    if vp.known.is_none() && vp.form() != VerbForm::Gerund {
        return m.fail("a verb");
    }
    Ok(vp)
}

fn p_verb_density(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    let vp = algebra_verb(m, ont)?;
    m.word("is")?;
    let which = m.one_of(&["rare", "common"])?;
    m.cut();
    m.end()?;
    let verb = m.act(vp.verb(ont, VerbForm::Base))?;
    ont.verb_mut(verb).density = if which == "rare" {
        RARE_DENSITY
    } else {
        COMMON_DENSITY
    };
    Ok(())
}

fn p_verb_mutex(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    let first = algebra_verb(m, ont)?;
    m.word("and")?;
    let second = algebra_verb(m, ont)?;
    m.words(&["are", "mutually", "exclusive"])?;
    m.cut();
    m.end()?;
    let a = m.act(first.verb(ont, VerbForm::Base))?;
    let b = m.act(second.verb(ont, VerbForm::Base))?;
    if !ont.verb(a).mutual_exclusions.contains(&b) {
        ont.verb_mut(a).mutual_exclusions.push(b);
    }
    if !ont.verb(b).mutual_exclusions.contains(&a) {
        ont.verb_mut(b).mutual_exclusions.push(a);
    }
    Ok(())
}

fn p_verb_implies(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    let first = algebra_verb(m, ont)?;
    m.word("implies")?;
    m.cut();
    let second = algebra_verb(m, ont)?;
    m.end()?;
    let sub = m.act(first.verb(ont, VerbForm::Base))?;
    let general = m.act(second.verb(ont, VerbForm::Base))?;
    if !ont.verb(sub).generalizations.contains(&general) {
        ont.verb_mut(sub).generalizations.push(general);
    }
    Ok(())
}

fn p_verb_way_of(m: &mut Matcher, ont: &mut Ontology, _cx: &mut PatternCtx) -> MatchResult<()> {
    let first = algebra_verb(m, ont)?;
    m.words(&["is", "a", "way", "of"])?;
    m.cut();
    let second = algebra_verb(m, ont)?;
    m.end()?;
    let sub = m.act(first.verb(ont, VerbForm::Base))?;
    let superspecies = m.act(second.verb(ont, VerbForm::Base))?;
    if !ont.verb(sub).superspecies.contains(&superspecies) {
        ont.verb_mut(sub).superspecies.push(superspecies);
        ont.verb_mut(superspecies).subspecies.push(sub);
    }
    Ok(())
}

// ----------------------------------------------------------------------
// The kind lattice
// ----------------------------------------------------------------------

fn p_kind_of(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    m.words(&["is", "a", "kind", "of"])?;
    m.cut();
    agree(m, &subject, false)?;
    require_unmodified(m, &subject, "the subject of 'is a kind of'")?;
    let object = m.np(ont, false)?;
    require_singular(m, &object, "the object of 'is a kind of'")?;
    require_unmodified(m, &object, "the object of 'is a kind of'")?;
    m.end()?;

    let sub = m.act(subject.noun(ont, &mut cx.created))?;
    let superkind = m.act(object.noun(ont, &mut cx.created))?;
    m.act(ont.declare_superkind(sub, superkind, subject.relative_frequency))?;
    Ok(())
}

fn p_kinds_of(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let (subjects, _) = m.np_list(ont)?;
    m.words(&["are", "kinds", "of"])?;
    m.cut();
    if subjects.len() == 1 {
        agree(m, &subjects[0], true)?;
    }
    let object = m.np(ont, false)?;
    require_singular(m, &object, "the object of 'are kinds of'")?;
    require_unmodified(m, &object, "the object of 'are kinds of'")?;
    m.end()?;

    let superkind = m.act(object.noun(ont, &mut cx.created))?;
    for subject in &subjects {
        require_unmodified(m, subject, "a subject of 'are kinds of'")?;
        let sub = m.act(subject.noun(ont, &mut cx.created))?;
        m.act(ont.declare_superkind(sub, superkind, subject.relative_frequency))?;
    }
    Ok(())
}

// ----------------------------------------------------------------------
// Adjectives: alternative sets and implied modifiers
// ----------------------------------------------------------------------

fn add_alternative_set(
    m: &Matcher,
    ont: &mut Ontology,
    cx: &mut PatternCtx,
    subject: &Np,
    aps: &[Ap],
    min_count: usize,
    max_count: usize,
) -> MatchResult<()> {
    let noun = m.act(subject.noun(ont, &mut cx.created))?;
    let mut alternatives = Vec::new();
    let mut frequencies = Vec::new();
    for ap in aps {
        let literal = m.act(ap.literal(ont))?;
        if let MonadicId::Adjective(adjective) = literal.concept {
            ont.adjective_mut(adjective).reference_count += 1;
            ont.add_relevant_adjective(noun, adjective);
        }
        alternatives.push(literal);
        frequencies.push(ap.frequency.unwrap_or(1.0));
    }
    let allow_pre_initialization = alternatives.iter().all(|l| {
        l.positive
            && match l.concept {
                MonadicId::Adjective(a) => ont.adjective(a).reference_count == 1,
                MonadicId::Noun(_) => false,
            }
    });
    ont.noun_mut(noun).alternative_sets.push(AlternativeSet {
        alternatives,
        frequencies,
        min_count,
        max_count,
        allow_pre_initialization,
    });
    Ok(())
}

/// `NP is any N of ...` / `NP is between L and U of ...` /
/// `NP can be at most N of ...` and the `are` variants.
fn p_alt_bounds(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    if m.opt_word("can") {
        m.word("be")?;
    } else {
        let verb = m.one_of(&["is", "are"])?;
        agree(m, &subject, verb == "are")?;
    }
    let (min_count, max_count) = if m.opt_word("any") {
        let n = m.integer()?;
        (n, n)
    } else if m.opt_word("between") {
        let low = m.integer()?;
        m.word("and")?;
        let high = m.integer()?;
        (low, high)
    } else if m.next_is("at") && m.peek_at(1).is_some_and(|t| t.eq_word("most")) {
        m.words(&["at", "most"])?;
        (0, m.integer()?)
    } else if m.next_is("up") {
        m.words(&["up", "to"])?;
        (0, m.integer()?)
    } else {
        return m.fail("a cardinality bound");
    };
    m.word("of")?;
    m.cut();
    let (aps, _) = m.ap_list(ont)?;
    m.end()?;
    add_alternative_set(m, ont, cx, &subject, &aps, min_count, max_count)
}

/// `NP can be AP, AP, or AP` - optional alternatives.
fn p_can_be(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    m.word("can")?;
    m.word("be")?;
    let (aps, conjunction) = m.ap_list(ont)?;
    m.end()?;
    let max_count = match conjunction {
        Conjunction::Or => 1,
        Conjunction::And => aps.len(),
    };
    add_alternative_set(m, ont, cx, &subject, &aps, 0, max_count)
}

/// `NP is/are [always] AP, ...` - an or-list makes required alternatives,
/// anything else implied adjectives conditioned on the subject's
/// modifiers.
fn p_ap_list(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let verb = m.one_of(&["is", "are"])?;
    agree(m, &subject, verb == "are")?;
    let _ = m.opt_word("always");
    let (aps, conjunction) = m.ap_list(ont)?;
    m.end()?;

    if aps.len() >= 2 && conjunction == Conjunction::Or {
        return add_alternative_set(m, ont, cx, &subject, &aps, 1, 1);
    }
    let noun = m.act(subject.noun(ont, &mut cx.created))?;
    for ap in &aps {
        let modifier = m.act(ap.literal(ont))?;
        if let MonadicId::Adjective(adjective) = modifier.concept {
            ont.add_relevant_adjective(noun, adjective);
        }
        ont.noun_mut(noun)
            .implied_adjectives
            .push(ConditionalModifier {
                conditions: subject.modifiers.clone(),
                modifier,
            });
    }
    Ok(())
}

// ----------------------------------------------------------------------
// Templates and output control
// ----------------------------------------------------------------------

fn p_identified(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let verb = m.one_of(&["is", "are"])?;
    agree(m, &subject, verb == "are")?;
    let which = m.one_of(&["identified", "described"])?;
    m.word("as")?;
    m.cut();
    let text = m.quoted()?;
    m.end()?;
    let noun = m.act(subject.noun(ont, &mut cx.created))?;
    let template = parse_template(&text);
    if which == "identified" {
        ont.noun_mut(noun).name_template = Some(template);
    } else {
        ont.noun_mut(noun).description_template = Some(template);
    }
    Ok(())
}

// ----------------------------------------------------------------------
// Proper nouns
// ----------------------------------------------------------------------

/// `Garfield is a cat.` - binds a new name to a permanent individual.
fn p_proper(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let NpHead::New(name) = &subject.head else {
        return m.fail("a proper name");
    };
    if subject.begins_with_determiner || subject.is_modified() {
        return m.fail("a proper name");
    }
    m.word("is")?;
    let object = m.np(ont, false)?;
    if !object.begins_with_determiner {
        return m.fail("a kind with a determiner");
    }
    require_singular(m, &object, "the kind of a proper noun")?;
    m.end()?;
    let kind = m.act(object.noun(ont, &mut cx.created))?;
    m.act(ont.intern_proper_noun(name, vec![kind]))?;
    Ok(())
}

// ----------------------------------------------------------------------
// Existence tests
// ----------------------------------------------------------------------

fn p_every_kind_test(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    m.words(&["every", "kind", "of"])?;
    m.cut();
    let np = m.np(ont, false)?;
    m.words(&["should", "exist"])?;
    m.end()?;
    let noun = m.act(np.noun(ont, &mut cx.created))?;
    for subkind in ont.noun(noun).subkinds.clone() {
        let name = ont.noun(subkind).singular.to_string();
        ont.add_test(ExistenceTest {
            noun: subkind,
            modifiers: Vec::new(),
            should_exist: true,
            success_message: format!("a {name} exists"),
            failure_message: format!("no {name} exists"),
        });
    }
    Ok(())
}

fn p_should_exist(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let np = m.np(ont, false)?;
    m.word("should")?;
    let should_exist = !m.opt_word("not");
    m.word("exist")?;
    m.cut();
    m.end()?;
    let noun = m.act(np.noun(ont, &mut cx.created))?;
    let text = np.text.to_string();
    ont.add_test(ExistenceTest {
        noun,
        modifiers: np.modifiers.clone(),
        should_exist,
        success_message: format!("found {text}"),
        failure_message: if should_exist {
            format!("no {text} exists")
        } else {
            format!("{text} exists, but should not")
        },
    });
    Ok(())
}

// ----------------------------------------------------------------------
// Parts and properties
// ----------------------------------------------------------------------

fn find_property(ont: &Ontology, noun: NounId, name: &TokenString) -> Option<(NounId, usize)> {
    let mut kinds = vec![noun];
    kinds.extend(ont.superkind_closure(noun));
    for kind in kinds {
        if let Some(index) = ont
            .noun(kind)
            .properties
            .iter()
            .position(|p| p.name == *name)
        {
            return Some((kind, index));
        }
    }
    None
}

/// `NP has/have NP between Float and Float.`
fn p_property_interval(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let verb = m.one_of(&["has", "have"])?;
    agree(m, &subject, verb == "have")?;
    let name = m.words_until(&["between", "from"])?;
    m.word("between")?;
    m.cut();
    let low = m.number()?;
    m.word("and")?;
    let high = m.number()?;
    m.end()?;

    let noun = m.act(subject.noun(ont, &mut cx.created))?;
    match find_property(ont, noun, &name) {
        Some((owner, index)) if !subject.modifiers.is_empty() => {
            ont.noun_mut(owner).properties[index]
                .interval_rules
                .push(IntervalRule {
                    conditions: subject.modifiers.clone(),
                    low,
                    high,
                });
        }
        Some((owner, index)) => {
            ont.noun_mut(owner).properties[index].ty = PropertyType::Interval(low, high);
        }
        None => {
            let mut property = Property {
                name,
                ty: PropertyType::Interval(low, high),
                menu_rules: Vec::new(),
                interval_rules: Vec::new(),
            };
            if !subject.modifiers.is_empty() {
                property.interval_rules.push(IntervalRule {
                    conditions: subject.modifiers.clone(),
                    low,
                    high,
                });
            }
            ont.noun_mut(noun).properties.push(property);
        }
    }
    Ok(())
}

/// `NP has/have NP from ListName.` - menu values come from
/// `<ListName>.txt` in the definitions directory, one per line.
fn p_property_menu(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let verb = m.one_of(&["has", "have"])?;
    agree(m, &subject, verb == "have")?;
    let name = m.words_until(&["between", "from"])?;
    m.word("from")?;
    m.cut();
    let list_name = m.rest_text()?;

    let menu = m.act(load_list(ont, &list_name))?;
    let noun = m.act(subject.noun(ont, &mut cx.created))?;
    match find_property(ont, noun, &name) {
        Some((owner, index)) if !subject.modifiers.is_empty() => {
            ont.noun_mut(owner).properties[index].menu_rules.push(MenuRule {
                conditions: subject.modifiers.clone(),
                menu,
            });
        }
        Some((owner, index)) => {
            ont.noun_mut(owner).properties[index].ty = PropertyType::Menu(menu);
        }
        None => {
            ont.noun_mut(noun).properties.push(Property {
                name,
                ty: PropertyType::Menu(menu),
                menu_rules: Vec::new(),
                interval_rules: Vec::new(),
            });
        }
    }
    Ok(())
}

fn load_list(ont: &Ontology, list_name: &str) -> crate::error::Result<Vec<String>> {
    let Some(dir) = &ont.definitions_dir else {
        return Err(Error::Grammatical {
            sentence: list_name.to_string(),
            pattern: None,
            expected: "a definitions directory to read the list from".into(),
        });
    };
    let path = dir.join(format!("{list_name}.txt"));
    let text = std::fs::read_to_string(&path).map_err(|_| Error::Grammatical {
        sentence: list_name.to_string(),
        pattern: None,
        expected: format!("a readable list file at {}", path.display()),
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// `NP has/have [Int] NP [called their Text].`
fn p_has_part(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let verb = m.one_of(&["has", "have"])?;
    agree(m, &subject, verb == "have")?;
    let object = m.np(ont, false)?;
    let part_name = if m.opt_word("called") {
        if !m.opt_word("their") {
            let _ = m.opt_word("its");
        }
        Some(m.words_until(&[])?)
    } else {
        None
    };
    m.end()?;

    let owner = m.act(subject.noun(ont, &mut cx.created))?;
    let kind = m.act(object.noun(ont, &mut cx.created))?;
    let name = part_name.unwrap_or_else(|| ont.noun(kind).singular.clone());
    if ont.noun(owner).parts.iter().any(|p| p.name == name) {
        return Ok(());
    }
    ont.noun_mut(owner).parts.push(Part {
        name,
        count: object.explicit_count.unwrap_or(1),
        kind,
        modifiers: object.modifiers.clone(),
    });
    Ok(())
}

// ----------------------------------------------------------------------
// Verbs: shapes, cardinality, algebraic statements
// ----------------------------------------------------------------------

struct ShapeNps<'n> {
    subject: &'n Np,
    object: &'n Np,
}

/// Register the verb shape a statement describes, creating nouns and the
/// verb as needed.
fn register_shape(
    m: &Matcher,
    ont: &mut Ontology,
    cx: &mut PatternCtx,
    verb: VerbId,
    nps: ShapeNps<'_>,
) -> MatchResult<()> {
    let subject_kind = m.act(nps.subject.noun(ont, &mut cx.created))?;
    let object_kind = m.act(nps.object.noun(ont, &mut cx.created))?;
    ont.add_verb_shape(
        verb,
        VerbShape {
            subject_kind,
            subject_modifiers: nps.subject.modifiers.clone(),
            object_kind,
            object_modifiers: nps.object.modifiers.clone(),
        },
    );
    Ok(())
}

/// `NP can V up to N NP` / `at most` / `must V at least N NP` /
/// `must V between L and U NP` / `must V exactly N NP`.
fn p_v_bounds(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let modal = m.one_of(&["can", "must"])?;
    let vp = m.verb(ont)?;

    let (lower, upper) = if m.next_is("up") {
        m.words(&["up", "to"])?;
        m.cut();
        (None, Some(m.integer()?))
    } else if m.next_is("at") && m.peek_at(1).is_some_and(|t| t.eq_word("most")) {
        m.words(&["at", "most"])?;
        m.cut();
        (None, Some(m.integer()?))
    } else if m.next_is("at") {
        m.words(&["at", "least"])?;
        m.cut();
        (Some(m.integer()?), None)
    } else if m.next_is("between") {
        m.word("between")?;
        m.cut();
        let low = m.integer()?;
        m.word("and")?;
        let high = m.integer()?;
        (Some(low), Some(high))
    } else if m.next_is("exactly") {
        m.word("exactly")?;
        m.cut();
        let n = m.integer()?;
        (Some(n), Some(n))
    } else {
        return m.fail("a cardinality bound");
    };
    if modal == "can" && lower.is_some() {
        return m.fail("'must' with a lower bound (use 'must ... at least')");
    }
    let object = m.np(ont, false)?;
    m.end()?;

    let verb = m.act(vp.verb(ont, VerbForm::Base))?;
    register_shape(m, ont, cx, verb, ShapeNps { subject: &subject, object: &object })?;
    let v = ont.verb_mut(verb);
    if let Some(low) = lower {
        v.object_lower = low;
    }
    if let Some(high) = upper {
        v.object_upper = high;
    }
    Ok(())
}

/// `NP must be Vpp by at least N NP` and friends - bounds on the subject
/// side, with subject and object roles swapped.
fn p_be_vpp(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let passive_subject = m.np(ont, false)?;
    let modal = m.one_of(&["must", "can"])?;
    m.word("be")?;
    let vp = m.verb(ont)?;
    m.word("by")?;
    m.cut();

    let mut lower = None;
    let mut upper = None;
    if m.next_is("at") && m.peek_at(1).is_some_and(|t| t.eq_word("least")) {
        m.words(&["at", "least"])?;
        lower = Some(m.integer()?);
    } else if m.next_is("at") {
        m.words(&["at", "most"])?;
        upper = Some(m.integer()?);
    } else if m.next_is("up") {
        m.words(&["up", "to"])?;
        upper = Some(m.integer()?);
    } else if m.next_is("between") {
        m.word("between")?;
        lower = Some(m.integer()?);
        m.word("and")?;
        upper = Some(m.integer()?);
    } else if modal == "must" {
        lower = Some(1);
    }
    let active_subject = m.np(ont, false)?;
    m.end()?;

    let verb = m.act(vp.verb(ont, VerbForm::Passive))?;
    register_shape(
        m,
        ont,
        cx,
        verb,
        ShapeNps {
            subject: &active_subject,
            object: &passive_subject,
        },
    )?;
    let v = ont.verb_mut(verb);
    if modal == "must" {
        if let Some(low) = lower {
            v.subject_lower = low;
        }
    }
    if let Some(high) = upper {
        v.subject_upper = high;
    }
    Ok(())
}

/// `NP cannot V themselves` / `must V themselves` / `cannot V each other`
/// / `can V each other`.
fn p_reflexive(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let modal = m.one_of(&["cannot", "must", "can"])?;
    let vp = m.verb(ont)?;

    enum Target {
        Themselves,
        EachOther,
    }
    let target = if m.opt_word("themselves") {
        Target::Themselves
    } else if m.next_is("each") {
        m.words(&["each", "other"])?;
        Target::EachOther
    } else {
        return m.fail("'themselves' or 'each other'");
    };
    m.cut();
    m.end()?;

    let verb = m.act(vp.verb(ont, VerbForm::Base))?;
    register_shape(m, ont, cx, verb, ShapeNps { subject: &subject, object: &subject })?;
    let v = ont.verb_mut(verb);
    match (modal, target) {
        ("must", Target::Themselves) => v.is_reflexive = true,
        ("cannot", Target::Themselves) => v.is_anti_reflexive = true,
        ("can", Target::EachOther) | ("must", Target::EachOther) => v.is_symmetric = true,
        ("cannot", Target::EachOther) => v.is_anti_symmetric = true,
        _ => return m.fail("'must' with 'themselves', or 'can'/'cannot' with 'each other'"),
    }
    Ok(())
}

/// `NP can/must V [Quantifier] NP` - shape declarations, with the
/// quantifier's `is_other` flag and count carried into the verb.
fn p_v_quant(m: &mut Matcher, ont: &mut Ontology, cx: &mut PatternCtx) -> MatchResult<()> {
    let subject = m.np(ont, false)?;
    let modal = m.one_of(&["can", "must"])?;
    let vp = m.verb(ont)?;
    let quantifier = m.quantifier().ok();
    let object = m.np(ont, true)?;
    m.end()?;

    // Quantifier agreement with the object's number.
    if let Some(q) = &quantifier {
        match object.number {
            Some(Number::Singular) if q.plural => {
                return m.fail("the quantifier and object to agree in number");
            }
            Some(Number::Plural) if !q.plural => {
                return m.fail("the quantifier and object to agree in number");
            }
            _ => {}
        }
    }

    let verb = m.act(vp.verb(ont, VerbForm::Base))?;
    register_shape(m, ont, cx, verb, ShapeNps { subject: &subject, object: &object })?;
    let v = ont.verb_mut(verb);
    if let Some(q) = &quantifier {
        if q.is_other {
            v.is_anti_reflexive = true;
        }
        match (modal, q.count) {
            ("must", Some(n)) => {
                v.object_lower = n;
                v.object_upper = n;
            }
            ("must", None) => v.object_lower = v.object_lower.max(1),
            ("can", Some(n)) => v.object_upper = v.object_upper.min(n),
            ("can", None) => {}
            _ => {}
        }
    } else if modal == "must" {
        v.object_lower = v.object_lower.max(1);
    }
    Ok(())
}
