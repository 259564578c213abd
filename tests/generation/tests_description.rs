//! Name precedence and description rendering.

use crate::helpers::{adjective, generate, noun, ontology_from};
use imaginarium::{Ontology, ParseDriver};

#[test]
fn default_names_use_the_raw_tokens() {
    let ont = ontology_from(&["a cat is a kind of animal."]);
    let invention = generate(&ont, "cat", 1, 1);
    let id = invention.individual_ids().next().unwrap();
    assert_eq!(invention.name_string(id), "the cat");

    let many = generate(&ont, "cat", 3, 1);
    let names: Vec<String> = many
        .individual_ids()
        .map(|i| many.name_string(i))
        .collect();
    assert_eq!(names, ["cat 0", "cat 1", "cat 2"]);
}

#[test]
fn name_templates_outrank_raw_tokens() {
    let ont = ontology_from(&[
        "a cat is a kind of animal.",
        "cats are identified as \"Whiskers the [Noun]\".",
    ]);
    let invention = generate(&ont, "cat", 1, 2);
    let id = invention.individual_ids().next().unwrap();
    assert_eq!(invention.name_string(id), "Whiskers the cat");
}

#[test]
fn name_templates_are_found_up_the_lattice() {
    let ont = ontology_from(&[
        "a cat is a kind of animal.",
        "animals are identified as \"some [Noun]\".",
    ]);
    let invention = generate(&ont, "cat", 1, 3);
    let id = invention.individual_ids().next().unwrap();
    assert_eq!(invention.name_string(id), "some cat");
}

#[test]
fn name_properties_outrank_templates() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("names.txt"), "Alice\nBob\n\nCarol\n").unwrap();
    let mut ont = Ontology::with_definitions(dir.path());
    let mut driver = ParseDriver::new();
    for statement in [
        "a cat is a kind of animal.",
        "cats are identified as \"Whiskers the [Noun]\".",
        "cats have name from names.",
    ] {
        driver.parse_and_execute(&mut ont, statement).unwrap();
    }
    let invention = generate(&ont, "cat", 1, 4);
    let id = invention.individual_ids().next().unwrap();
    let name = invention.name_string(id);
    assert!(
        ["Alice", "Bob", "Carol"].contains(&name.as_str()),
        "unexpected name {name}"
    );
}

#[test]
fn part_individuals_use_the_container_possessive() {
    let ont = ontology_from(&["a face has a nose."]);
    let invention = generate(&ont, "face", 1, 5);
    let nose = invention.individual_ids().nth(1).unwrap();
    assert_eq!(invention.name_string(nose), "the face's nose");
}

#[test]
fn default_descriptions_mention_kind_and_modifiers() {
    let ont = ontology_from(&["cats are big or small."]);
    let invention = generate(&ont, "cat", 1, 6);
    let id = invention.individual_ids().next().unwrap();
    let text = invention.description(id);
    assert!(text.starts_with("the cat is a "), "got {text:?}");
    assert!(text.contains("big") || text.contains("small"), "got {text:?}");
    assert!(text.ends_with("cat"), "got {text:?}");
}

#[test]
fn description_templates_drive_the_output() {
    let ont = ontology_from(&[
        "cats are big or small.",
        "cats are described as \"A [Modifiers] [Noun] of distinction\".",
    ]);
    let invention = generate(&ont, "cat", 1, 7);
    let id = invention.individual_ids().next().unwrap();
    let text = invention.description(id);
    assert!(
        text == "A big cat of distinction" || text == "A small cat of distinction",
        "got {text:?}"
    );
}

#[test]
fn silent_adjectives_are_not_mentioned() {
    let ont = ontology_from(&[
        "cats are big or small.",
        "do not mention being big.",
        "do not mention being small.",
    ]);
    let invention = generate(&ont, "cat", 1, 8);
    let id = invention.individual_ids().next().unwrap();
    assert!(invention.adjectives_describing(id).is_empty());
    assert_eq!(invention.description(id), "the cat is a cat");
}

#[test]
fn subkind_templates_outrank_superkind_templates() {
    let ont = ontology_from(&[
        "a tabby is a kind of cat.",
        "cats are described as \"a generic cat\".",
        "tabbies are described as \"a striped delight\".",
    ]);
    let invention = generate(&ont, "tabby", 1, 9);
    let id = invention.individual_ids().next().unwrap();
    assert_eq!(invention.description(id), "a striped delight");
}

#[test]
fn properties_appear_in_default_descriptions() {
    let ont = ontology_from(&["cats have weight between 3 and 4."]);
    let invention = generate(&ont, "cat", 1, 10);
    let id = invention.individual_ids().next().unwrap();
    let text = invention.description(id);
    assert!(text.contains("with weight"), "got {text:?}");
}

#[test]
fn suppressed_kinds_are_flagged() {
    let ont = ontology_from(&["do not print scenery."]);
    let invention = generate(&ont, "scenery", 1, 11);
    let id = invention.individual_ids().next().unwrap();
    assert!(invention.suppressed(id));
}

#[test]
fn adjectives_describing_lists_only_true_relevant_ones() {
    let ont = ontology_from(&["cats are big or small."]);
    let invention = generate(&ont, "cat", 1, 12);
    let id = invention.individual_ids().next().unwrap();
    let big = adjective(&ont, "big");
    let small = adjective(&ont, "small");
    let described = invention.adjectives_describing(id);
    assert_eq!(described.len(), 1);
    assert!(described[0] == big || described[0] == small);
    let _ = noun(&ont, "cat");
}
