//! Error reporting: unknown sentences, committed-pattern diagnostics,
//! collisions, lock mode, and definition-file loading.

use imaginarium::{Error, Ontology, ParseDriver};

use crate::helpers::ontology_from;

fn run(ontology: &mut Ontology, statement: &str) -> Result<(), Error> {
    ParseDriver::new().parse_and_execute(ontology, statement)
}

#[test]
fn unknown_sentences_report_grammatical_errors() {
    let mut ont = Ontology::new();
    let err = run(&mut ont, "colorless green ideas sleep furiously, often").unwrap_err();
    assert!(matches!(err, Error::Grammatical { pattern: None, .. }));
}

#[test]
fn crossing_the_cut_names_the_pattern() {
    let mut ont = Ontology::new();
    let err = run(&mut ont, "a cat is a kind of").unwrap_err();
    match err {
        Error::Grammatical {
            pattern, sentence, ..
        } => {
            assert_eq!(pattern, Some("kind-of"));
            assert!(sentence.contains("a cat is a kind of"));
        }
        other => panic!("expected a grammatical error, got {other}"),
    }
}

#[test]
fn adjectives_cannot_head_kind_statements() {
    let mut ont = ontology_from(&["things can be big or small."]);
    let err = run(&mut ont, "a big is a kind of thing").unwrap_err();
    assert!(matches!(err, Error::Grammatical { .. }));
}

#[test]
fn name_collisions_surface_from_statements() {
    let mut ont = ontology_from(&["a cat is a kind of animal."]);
    // "cat" is a noun; reusing it as an adjective in an alternative set
    // collides.
    let err = run(&mut ont, "dogs are cat or friendly").unwrap_err();
    assert!(matches!(err, Error::Grammatical { .. } | Error::NameCollision { .. }));
}

#[test]
fn locked_ontologies_reject_new_referents_only() {
    let mut ont = ontology_from(&[
        "a cat is a kind of animal.",
        "cats can be big or small.",
    ]);
    ont.lock();
    let err = run(&mut ont, "a dog is a kind of animal").unwrap_err();
    assert!(matches!(err, Error::UnknownReferent { .. }));
    // Attaching a fact to existing referents still works.
    run(&mut ont, "cats are big").unwrap();
    // And the error text mentions the offending name.
    let err = run(&mut ont, "a dog is a kind of animal").unwrap_err();
    assert!(err.to_string().contains("dog"));
}

#[test]
fn definition_files_load_in_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("01 animals.gen"),
        "a cat is a kind of animal.\n# a comment line\ncats can be big or small.\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("02 people.gen"), "a person is a kind of animal.\n").unwrap();

    let mut driver = ParseDriver::new();
    let ont = driver.load_ontology(dir.path()).unwrap();
    assert!(ont.concept(&imaginarium::tokenize("cat")).is_some());
    assert!(ont.concept(&imaginarium::tokenize("person")).is_some());

    // The walker sees exactly the definition files the loader was given.
    let gen_files = walkdir::WalkDir::new(dir.path())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "gen"))
        .count();
    assert_eq!(gen_files, 2);
}

#[test]
fn per_referent_definition_files_load_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("00 world.gen"),
        "a unicorn is a kind of animal.\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("unicorn.gen"), "unicorns can be sparkly.\n").unwrap();

    let mut driver = ParseDriver::new();
    let ont = driver.load_ontology(dir.path()).unwrap();
    assert!(ont.concept(&imaginarium::tokenize("sparkly")).is_some());
}

#[test]
fn load_errors_carry_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bad.gen"),
        "a cat is a kind of animal.\nof and of and of.\n",
    )
    .unwrap();

    let mut driver = ParseDriver::new();
    let err = driver.load_ontology(dir.path()).unwrap_err();
    match err {
        Error::DefinitionLoad { file, line, .. } => {
            assert!(file.contains("bad.gen"));
            assert_eq!(line, 2);
        }
        other => panic!("expected a definition-load error, got {other}"),
    }
}

#[test]
fn collected_errors_do_not_stop_loading() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bad.gen"),
        "utter gibberish here beyond reckoning.\na cat is a kind of animal.\n",
    )
    .unwrap();

    let mut driver = ParseDriver::new();
    driver.collect_errors = true;
    let ont = driver.load_ontology(dir.path()).unwrap();
    assert_eq!(driver.errors.len(), 1);
    assert!(ont.concept(&imaginarium::tokenize("cat")).is_some());
}
