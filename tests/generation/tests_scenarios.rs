//! End-to-end generation scenarios: every invention must honor the
//! ontology's rules.

use imaginarium::ontology::MonadicId;
use imaginarium::{invent, tokenize};

use crate::helpers::{CAT_WORLD, adjective, generate, noun, ontology_from, options_with_seed, verb};

#[test]
fn one_cat_is_exactly_one_subkind() {
    let ont = &*CAT_WORLD;
    let invention = generate(ont, "cat", 1, 7);
    let id = invention.individual_ids().next().unwrap();
    assert!(invention.is_a(id, noun(ont, "cat")));
    assert!(invention.is_a(id, noun(ont, "person")));
    let subkinds = [
        noun(ont, "persian"),
        noun(ont, "tabby"),
        noun(ont, "siamese"),
    ];
    let chosen = subkinds.iter().filter(|&&k| invention.is_a(id, k)).count();
    assert_eq!(chosen, 1);
}

#[test]
fn relative_frequencies_bias_subkind_choice() {
    let ont = ontology_from(&["persian, tabby (10), and siamese are kinds of cat."]);
    let cat = noun(&ont, "cat");
    let tabby = noun(&ont, "tabby");
    let mut tabbies = 0;
    for seed in 0..1000 {
        let invention = invent(&ont, cat, &[], 1, &options_with_seed(seed))
            .unwrap()
            .unwrap();
        let id = invention.individual_ids().next().unwrap();
        if invention.is_a(id, tabby) {
            tabbies += 1;
        }
    }
    assert!(
        (700..1000).contains(&tabbies),
        "expected a strong majority of tabbies, got {tabbies}/1000"
    );
}

#[test]
fn reflexive_verbs_hold_of_every_individual() {
    let ont = ontology_from(&["people must love themselves."]);
    let invention = generate(&ont, "person", 10, 3);
    let love = verb(&ont, "love");
    for id in invention.individual_ids() {
        assert!(invention.holds(love, id, id));
    }
}

#[test]
fn employment_cardinality_is_respected() {
    let ont = ontology_from(&[
        "employee and employer are kinds of person.",
        "an employee must work for one employer.",
        "an employer must be worked for by at least two employees.",
    ]);
    let invention = generate(&ont, "person", 4, 11);
    let employee = noun(&ont, "employee");
    let employer = noun(&ont, "employer");
    let work = verb(&ont, "work for");

    for id in invention.individual_ids() {
        // Sub-kind exclusivity.
        assert!(invention.is_a(id, employee) != invention.is_a(id, employer));
        if invention.is_a(id, employee) {
            let employers: Vec<_> = invention
                .individual_ids()
                .filter(|&o| invention.holds(work, id, o))
                .collect();
            assert_eq!(employers.len(), 1);
            assert!(invention.is_a(employers[0], employer));
        }
        if invention.is_a(id, employer) {
            let staff = invention
                .individual_ids()
                .filter(|&s| invention.holds(work, s, id))
                .count();
            assert!(staff >= 2, "employer with only {staff} employees");
        }
    }
}

#[test]
fn parts_are_named_after_their_container() {
    let ont = ontology_from(&[
        "a face has eyes.",
        "a face has a mouth.",
        "a face has a nose.",
        "a face has hair.",
    ]);
    let invention = generate(&ont, "face", 1, 5);
    let names: Vec<String> = invention
        .individual_ids()
        .skip(1)
        .map(|id| invention.name_string(id))
        .collect();
    assert_eq!(
        names,
        [
            "the face's eye",
            "the face's mouth",
            "the face's nose",
            "the face's hair"
        ]
    );
}

#[test]
fn overlapping_alternative_sets_honor_each_subkinds_bounds() {
    let ont = ontology_from(&[
        "x, y, and z are kinds of thing.",
        "a x is between 4 and 5 of b, c, d, e, f, or g.",
        "a y is between 1 and 2 of b, c, d, e, f, or g.",
        "a z is any 3 of b, c, d, e, f, or g.",
    ]);
    let invention = generate(&ont, "thing", 100, 17);
    let letters: Vec<_> = ["b", "c", "d", "e", "f", "g"]
        .iter()
        .map(|n| adjective(&ont, n))
        .collect();
    let (x, y, z) = (noun(&ont, "x"), noun(&ont, "y"), noun(&ont, "z"));
    for id in invention.individual_ids() {
        let true_count = letters
            .iter()
            .filter(|&&a| invention.has_adjective(id, a))
            .count();
        let (low, high) = if invention.is_a(id, x) {
            (4, 5)
        } else if invention.is_a(id, y) {
            (1, 2)
        } else {
            assert!(invention.is_a(id, z));
            (3, 3)
        };
        assert!(
            (low..=high).contains(&true_count),
            "individual has {true_count} of b..g, expected {low}..={high}"
        );
    }
}

#[test]
fn kind_closure_holds_for_every_individual() {
    let ont = ontology_from(&[
        "a cat is a kind of mammal.",
        "a mammal is a kind of animal.",
        "a persian is a kind of cat.",
    ]);
    let invention = generate(&ont, "cat", 5, 23);
    let (cat, mammal, animal) = (
        noun(&ont, "cat"),
        noun(&ont, "mammal"),
        noun(&ont, "animal"),
    );
    for id in invention.individual_ids() {
        assert!(invention.is_a(id, cat));
        assert!(invention.is_a(id, mammal));
        assert!(invention.is_a(id, animal));
    }
}

#[test]
fn implied_adjectives_follow_their_conditions() {
    let ont = ontology_from(&[
        "things are big or small.",
        "big things are scary.",
    ]);
    let invention = generate(&ont, "thing", 20, 29);
    let big = adjective(&ont, "big");
    let scary = adjective(&ont, "scary");
    for id in invention.individual_ids() {
        if invention.has_adjective(id, big) {
            assert!(invention.has_adjective(id, scary));
        }
    }
}

#[test]
fn anti_reflexive_verbs_never_self_relate() {
    let ont = ontology_from(&["cats can love other cats."]);
    let invention = generate(&ont, "cat", 6, 31);
    let love = verb(&ont, "love");
    for id in invention.individual_ids() {
        assert!(!invention.holds(love, id, id));
    }
}

#[test]
fn symmetric_verbs_hold_both_ways() {
    let ont = ontology_from(&["cats can fight each other."]);
    let invention = generate(&ont, "cat", 4, 37);
    let fight = verb(&ont, "fight");
    for a in invention.individual_ids() {
        for b in invention.individual_ids() {
            assert_eq!(invention.holds(fight, a, b), invention.holds(fight, b, a));
        }
    }
    // Symmetric pairs appear once in the relationship listing.
    for (v, s, o) in invention.relationships() {
        if v == fight && s != o {
            assert!(s < o);
        }
    }
}

#[test]
fn anti_symmetric_verbs_hold_at_most_one_way() {
    let ont = ontology_from(&["people cannot outrank each other."]);
    let invention = generate(&ont, "person", 5, 41);
    let outrank = verb(&ont, "outrank");
    for a in invention.individual_ids() {
        for b in invention.individual_ids() {
            if a != b {
                assert!(!(invention.holds(outrank, a, b) && invention.holds(outrank, b, a)));
            }
        }
    }
}

#[test]
fn generalizations_propagate() {
    let ont = ontology_from(&[
        "cats can love other cats.",
        "cats can tolerate other cats.",
        "love implies tolerating.",
    ]);
    let invention = generate(&ont, "cat", 5, 43);
    let love = verb(&ont, "love");
    let tolerate = verb(&ont, "tolerate");
    for a in invention.individual_ids() {
        for b in invention.individual_ids() {
            if invention.holds(love, a, b) {
                assert!(invention.holds(tolerate, a, b));
            }
        }
    }
}

#[test]
fn mutually_exclusive_verbs_never_coincide() {
    let ont = ontology_from(&[
        "cats can love other cats.",
        "cats can hate other cats.",
        "love and hate are mutually exclusive.",
    ]);
    let invention = generate(&ont, "cat", 5, 47);
    let love = verb(&ont, "love");
    let hate = verb(&ont, "hate");
    for a in invention.individual_ids() {
        for b in invention.individual_ids() {
            assert!(!(invention.holds(love, a, b) && invention.holds(hate, a, b)));
        }
    }
}

#[test]
fn verb_upper_bounds_cap_the_object_count() {
    let ont = ontology_from(&["a cat can scratch up to 2 cats."]);
    let invention = generate(&ont, "cat", 5, 53);
    let scratch = verb(&ont, "scratch");
    for a in invention.individual_ids() {
        let scratched = invention
            .individual_ids()
            .filter(|&b| invention.holds(scratch, a, b))
            .count();
        assert!(scratched <= 2);
    }
}

#[test]
fn impossible_lower_bounds_are_a_contradiction() {
    let ont = ontology_from(&[
        "a cat is a kind of animal.",
        "a cat must chase at least five cats.",
    ]);
    let cat = noun(&ont, "cat");
    let err = invent(&ont, cat, &[], 2, &options_with_seed(1)).unwrap_err();
    assert!(matches!(err, imaginarium::Error::Contradiction { .. }));
}

#[test]
fn permanent_individuals_join_every_generation() {
    let ont = ontology_from(&[
        "a cat is a kind of animal.",
        "Garfield is a cat.",
        "cats are lazy or energetic.",
    ]);
    let invention = generate(&ont, "cat", 2, 59);
    assert_eq!(invention.individuals().len(), 3);
    let garfield = invention.individual_named("garfield").unwrap();
    let cat = noun(&ont, "cat");
    assert!(invention.is_a(garfield, cat));
    let lazy = adjective(&ont, "lazy");
    let energetic = adjective(&ont, "energetic");
    assert!(
        invention.has_adjective(garfield, lazy) != invention.has_adjective(garfield, energetic)
    );
}

#[test]
fn existence_tests_report_against_the_model() {
    let ont = ontology_from(&[
        "a persian is a kind of cat.",
        "a tabby is a kind of cat.",
        "a cat should exist.",
    ]);
    let invention = generate(&ont, "cat", 1, 61);
    let results = invention.test_results();
    assert_eq!(results.len(), 1);
    assert!(results[0].0, "{}", results[0].1);
}

#[test]
fn interval_properties_sample_within_bounds() {
    let ont = ontology_from(&["cats have weight between 2.5 and 7.5."]);
    let invention = generate(&ont, "cat", 3, 67);
    for id in invention.individual_ids() {
        let value: f64 = invention
            .property_value(id, "weight")
            .expect("weight should be bound")
            .parse()
            .unwrap();
        assert!((2.5..=7.5).contains(&value), "weight {value} out of range");
    }
}

#[test]
fn conditioned_intervals_tighten_the_sample() {
    let ont = ontology_from(&[
        "cats are big or small.",
        "cats have weight between 1 and 10.",
        "big cats have weight between 9 and 10.",
    ]);
    let invention = generate(&ont, "cat", 10, 71);
    let big = adjective(&ont, "big");
    for id in invention.individual_ids() {
        let value: f64 = invention
            .property_value(id, "weight")
            .unwrap()
            .parse()
            .unwrap();
        if invention.has_adjective(id, big) {
            assert!(value >= 9.0, "big cat with weight {value}");
        }
    }
}

#[test]
fn requested_modifiers_apply_to_every_individual() {
    let ont = ontology_from(&["cats are big or small."]);
    let cat = noun(&ont, "cat");
    let big = adjective(&ont, "big");
    let modifiers = [imaginarium::ontology::Literal::positive(MonadicId::Adjective(big))];
    let invention = invent(&ont, cat, &modifiers, 3, &options_with_seed(73))
        .unwrap()
        .unwrap();
    for id in invention.individual_ids() {
        assert!(invention.has_adjective(id, big));
    }
}

#[test]
fn generation_is_reentrant_on_a_completed_ontology() {
    let ont = &*CAT_WORLD;
    let first = generate(ont, "cat", 1, 79);
    let second = generate(ont, "cat", 1, 83);
    assert_eq!(first.individuals().len(), second.individuals().len());
    // Both inventions answer queries independently.
    let persian = noun(ont, "persian");
    let id = first.individual_ids().next().unwrap();
    let _ = (first.is_a(id, persian), second.is_a(id, persian));
    assert!(ont.concept(&tokenize("cat")).is_some());
}
