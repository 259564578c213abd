//! Statement-level tests: each accepted surface form mutates the
//! ontology the way its pattern promises.

use imaginarium::ontology::{PropertyType, Referent, UNBOUNDED};
use imaginarium::tokenize;

use crate::helpers::{adjective, noun, ontology_from, verb};

#[test]
fn kind_of_builds_the_lattice() {
    let ont = ontology_from(&[
        "a cat is a kind of animal.",
        "a persian is a kind of cat.",
    ]);
    let animal = noun(&ont, "animal");
    let cat = noun(&ont, "cat");
    let persian = noun(&ont, "persian");
    assert!(ont.is_subkind_of(cat, animal));
    assert!(ont.is_subkind_of(persian, animal));
    assert_eq!(ont.noun(animal).subkinds, vec![cat]);
}

#[test]
fn kinds_of_accepts_lists_with_frequencies() {
    let ont = ontology_from(&["persian, tabby (10), and siamese are kinds of cat."]);
    let cat = noun(&ont, "cat");
    assert_eq!(ont.noun(cat).subkinds.len(), 3);
    assert_eq!(ont.noun(cat).subkind_frequencies, vec![1.0, 10.0, 1.0]);
}

#[test]
fn plural_forms_resolve_to_the_same_noun() {
    let ont = ontology_from(&["a cat is a kind of animal."]);
    assert_eq!(
        ont.concept(&tokenize("cat")),
        ont.concept(&tokenize("cats"))
    );
}

#[test]
fn plural_override_replaces_the_computed_form() {
    let ont = ontology_from(&[
        "the plural of person is people.",
        "a person is a kind of animal.",
    ]);
    let person = noun(&ont, "person");
    assert_eq!(ont.noun(person).plural.to_string(), "people");
    assert_eq!(
        ont.concept(&tokenize("people")),
        Some(Referent::CommonNoun(person))
    );
}

#[test]
fn required_alternatives_build_a_one_of_set() {
    let ont = ontology_from(&["cats are big, small, or medium."]);
    let cat = noun(&ont, "cat");
    let sets = &ont.noun(cat).alternative_sets;
    assert_eq!(sets.len(), 1);
    assert_eq!((sets[0].min_count, sets[0].max_count), (1, 1));
    assert_eq!(sets[0].alternatives.len(), 3);
}

#[test]
fn optional_alternatives_allow_zero() {
    let ont = ontology_from(&["cats can be fluffy or sleek."]);
    let cat = noun(&ont, "cat");
    let set = &ont.noun(cat).alternative_sets[0];
    assert_eq!((set.min_count, set.max_count), (0, 1));
}

#[test]
fn bounded_alternatives_carry_their_counts() {
    let ont = ontology_from(&[
        "x, y, and z are kinds of thing.",
        "a x is between 4 and 5 of b, c, d, e, f, or g.",
        "a y is any 3 of b, c, d, e, f, or g.",
        "a z can be at most 2 of b, c, d, e, f, or g.",
    ]);
    let x = noun(&ont, "x");
    let y = noun(&ont, "y");
    let z = noun(&ont, "z");
    assert_eq!(
        (
            ont.noun(x).alternative_sets[0].min_count,
            ont.noun(x).alternative_sets[0].max_count
        ),
        (4, 5)
    );
    assert_eq!(
        (
            ont.noun(y).alternative_sets[0].min_count,
            ont.noun(y).alternative_sets[0].max_count
        ),
        (3, 3)
    );
    assert_eq!(
        (
            ont.noun(z).alternative_sets[0].min_count,
            ont.noun(z).alternative_sets[0].max_count
        ),
        (0, 2)
    );
}

#[test]
fn implied_adjectives_condition_on_modifiers() {
    let ont = ontology_from(&["things can be big or small.", "big things are scary."]);
    let thing = noun(&ont, "thing");
    let implied = &ont.noun(thing).implied_adjectives;
    assert_eq!(implied.len(), 1);
    assert_eq!(implied[0].conditions.len(), 1);
    let scary = adjective(&ont, "scary");
    assert_eq!(
        implied[0].modifier.concept,
        imaginarium::ontology::MonadicId::Adjective(scary)
    );
}

#[test]
fn negated_adjectives_flip_polarity() {
    let ont = ontology_from(&["things can be big or small.", "things are not big."]);
    let thing = noun(&ont, "thing");
    let implied = ont.noun(thing).implied_adjectives.last().unwrap();
    assert!(!implied.modifier.positive);
}

#[test]
fn parts_record_count_kind_and_name() {
    let ont = ontology_from(&[
        "a face has 2 eyes.",
        "a face has a mouth.",
        "a face has hair.",
    ]);
    let face = noun(&ont, "face");
    let parts = &ont.noun(face).parts;
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0].name.to_string(), "eye");
    assert_eq!(parts[0].count, 2);
    assert_eq!(parts[1].name.to_string(), "mouth");
    assert_eq!(parts[1].count, 1);
    assert_eq!(parts[2].name.to_string(), "hair");
}

#[test]
fn part_called_their_overrides_the_name() {
    let ont = ontology_from(&["a dragon has 4 legs called their limbs."]);
    let dragon = noun(&ont, "dragon");
    let part = &ont.noun(dragon).parts[0];
    assert_eq!(part.name.to_string(), "limbs");
    assert_eq!(part.count, 4);
}

#[test]
fn interval_properties_attach_to_the_kind() {
    let ont = ontology_from(&["cats have weight between 2.5 and 7.5."]);
    let cat = noun(&ont, "cat");
    let property = &ont.noun(cat).properties[0];
    assert_eq!(property.name.to_string(), "weight");
    match property.ty {
        PropertyType::Interval(low, high) => {
            assert_eq!((low, high), (2.5, 7.5));
        }
        _ => panic!("expected an interval property"),
    }
}

#[test]
fn modified_subject_tightens_an_existing_interval() {
    let ont = ontology_from(&[
        "cats can be big or small.",
        "cats have weight between 2 and 10.",
        "big cats have weight between 8 and 10.",
    ]);
    let cat = noun(&ont, "cat");
    let property = &ont.noun(cat).properties[0];
    assert_eq!(property.interval_rules.len(), 1);
    assert_eq!(property.interval_rules[0].conditions.len(), 1);
}

#[test]
fn verb_cardinality_statements_set_bounds() {
    let ont = ontology_from(&[
        "employee and employer are kinds of person.",
        "an employee must work for one employer.",
        "an employer must be worked for by at least two employees.",
    ]);
    let work = verb(&ont, "work for");
    let v = ont.verb(work);
    assert_eq!((v.object_lower, v.object_upper), (1, 1));
    assert_eq!(v.subject_lower, 2);
    assert_eq!(v.subject_upper, UNBOUNDED);
    assert_eq!(v.shapes.len(), 1);
}

#[test]
fn can_v_up_to_sets_only_the_upper_bound() {
    let ont = ontology_from(&["a cat can scratch up to 3 cats."]);
    let scratch = verb(&ont, "scratch");
    let v = ont.verb(scratch);
    assert_eq!(v.object_lower, 0);
    assert_eq!(v.object_upper, 3);
}

#[test]
fn other_quantifier_sets_anti_reflexive() {
    let ont = ontology_from(&["cats can love other cats.", "cats can admire many cats."]);
    assert!(ont.verb(verb(&ont, "love")).is_anti_reflexive);
    assert!(!ont.verb(verb(&ont, "admire")).is_anti_reflexive);
}

#[test]
fn reflexivity_and_symmetry_statements() {
    let ont = ontology_from(&[
        "people must love themselves.",
        "people cannot fight themselves.",
        "people can marry each other.",
        "people cannot outrank each other.",
    ]);
    assert!(ont.verb(verb(&ont, "love")).is_reflexive);
    assert!(ont.verb(verb(&ont, "fight")).is_anti_reflexive);
    assert!(ont.verb(verb(&ont, "marry")).is_symmetric);
    assert!(ont.verb(verb(&ont, "outrank")).is_anti_symmetric);
}

#[test]
fn verb_inflections_all_resolve() {
    let ont = ontology_from(&["cats can love other cats."]);
    let love = verb(&ont, "love");
    for form in ["love", "loves", "loving", "loved"] {
        assert_eq!(
            ont.concept(&tokenize(form)),
            Some(Referent::Verb(love)),
            "{form} should resolve to the verb"
        );
    }
}

#[test]
fn verb_algebra_statements() {
    let ont = ontology_from(&[
        "cats can love other cats.",
        "cats can hate other cats.",
        "love and hate are mutually exclusive.",
        "love implies tolerating.",
        "love is rare.",
    ]);
    let love = verb(&ont, "love");
    let hate = verb(&ont, "hate");
    assert!(ont.verb(love).mutual_exclusions.contains(&hate));
    let tolerate = verb(&ont, "tolerate");
    assert!(ont.verb(love).generalizations.contains(&tolerate));
    assert!(ont.verb(love).density < 0.1);
}

#[test]
fn way_of_links_species() {
    let ont = ontology_from(&[
        "people can like other people.",
        "people can adore other people.",
        "adoring is a way of liking.",
    ]);
    let like = verb(&ont, "like");
    let adore = verb(&ont, "adore");
    assert!(ont.verb(adore).superspecies.contains(&like));
    assert!(ont.verb(like).subspecies.contains(&adore));
}

#[test]
fn proper_nouns_bind_individuals() {
    let ont = ontology_from(&["a cat is a kind of animal.", "Garfield is a cat."]);
    match ont.concept(&tokenize("garfield")) {
        Some(Referent::Proper(id)) => {
            let cat = noun(&ont, "cat");
            assert_eq!(ont.proper(id).kinds, vec![cat]);
        }
        other => panic!("expected a proper noun, found {other:?}"),
    }
    assert_eq!(ont.permanent_individuals().len(), 1);
}

#[test]
fn templates_and_output_control() {
    let ont = ontology_from(&[
        "cats are identified as \"Whiskers the [Noun]\".",
        "cats are described as \"A [Modifiers] [Noun] of distinction\".",
        "things can be big or small.",
        "do not mention being big.",
        "do not print cats.",
    ]);
    let cat = noun(&ont, "cat");
    assert!(ont.noun(cat).name_template.is_some());
    assert!(ont.noun(cat).description_template.is_some());
    assert!(ont.noun(cat).suppress_description);
    assert!(ont.adjective(adjective(&ont, "big")).is_silent);
}

#[test]
fn existence_tests_are_registered() {
    let ont = ontology_from(&[
        "a persian is a kind of cat.",
        "a tabby is a kind of cat.",
        "a persian should exist.",
        "a tabby should not exist.",
        "every kind of cat should exist.",
    ]);
    assert_eq!(ont.tests().len(), 4);
    assert!(ont.tests()[0].should_exist);
    assert!(!ont.tests()[1].should_exist);
}

#[test]
fn metadata_and_buttons() {
    let ont = ontology_from(&[
        "author: a designer.",
        "description: a small test world.",
        "pressing \"More cats\" means \"generate 10 cats\".",
    ]);
    assert_eq!(ont.author.as_deref(), Some("a designer"));
    assert!(ont.description.is_some());
    assert_eq!(
        ont.buttons,
        vec![("More cats".to_string(), "generate 10 cats".to_string())]
    );
}

#[test]
fn parsing_is_deterministic() {
    let statements = [
        "a cat is a kind of animal.",
        "cats are big or small.",
        "cats can love other cats.",
    ];
    let a = ontology_from(&statements);
    let b = ontology_from(&statements);
    assert_eq!(a.noun_ids().count(), b.noun_ids().count());
    assert_eq!(a.adjective_ids().count(), b.adjective_ids().count());
    assert_eq!(a.verb_ids().count(), b.verb_ids().count());
}
