//! End-to-end tests: dictionary files on disk, option handling and translation

use dict_translate::dictionary::loader::INITIAL_CAPACITY;
use dict_translate::prelude::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn write_dict(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(format!("{name}.trn")), contents).unwrap();
}

fn build(dir: &TempDir, name: &str) -> TranslateDictionary {
    TranslateDictionary::init(
        [("DictFile", name), ("InputDict", "simple")],
        Arc::new(NormalizerRegistry::with_builtins()),
        &FileResolver::new(dir.path()),
    )
    .unwrap()
}

#[test]
fn test_case_insensitive_key() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "pets", "Dog fido\n");
    let dict = build(&dir, "pets");

    let result = dict.translate("DOG").unwrap().expect("DOG should match");
    assert_eq!(result.words(), vec!["fido"]);
    assert_eq!(result.lexemes()[0].nvariant, 1);
    assert_eq!(result.lexemes()[0].flags, 0);
}

#[test]
fn test_multi_word_value_variants() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "pets", "cat feline kitty\n");
    let dict = build(&dir, "pets");

    let result = dict.translate("cat").unwrap().unwrap();
    let got: Vec<_> = result.iter().map(|l| (l.lexeme.clone(), l.nvariant)).collect();
    assert_eq!(got, vec![("feline".to_string(), 1), ("kitty".to_string(), 2)]);
}

#[test]
fn test_output_words_are_folded() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "brands", "phone iPhone Pixel\n");
    let dict = build(&dir, "brands");

    assert_eq!(
        dict.translate("Phone").unwrap().unwrap().words(),
        vec!["iphone", "pixel"]
    );
}

#[test]
fn test_absent_token_is_no_match() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "pets", "cat feline\n");
    let dict = build(&dir, "pets");

    assert!(dict.translate("horse").unwrap().is_none());
    assert!(dict.translate("").unwrap().is_none());
}

#[test]
fn test_comments_and_blanks_only() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "empty", "# nothing here\n\n   \n  # cat feline\n");
    let dict = build(&dir, "empty");

    assert!(dict.table().is_empty());
    assert!(dict.translate("cat").unwrap().is_none());
}

#[test]
fn test_single_field_lines_ignored() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "mixed", "foo\ncat feline\nbar   \n");
    let dict = build(&dir, "mixed");

    assert_eq!(dict.table().len(), 1);
    assert!(dict.translate("foo").unwrap().is_none());
    assert!(dict.translate("bar").unwrap().is_none());
}

#[test]
fn test_duplicate_key_first_occurrence_wins() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "dups", "car automobile\nbike bicycle\nCAR vehicle\n");
    let dict = build(&dir, "dups");

    assert_eq!(dict.table().len(), 2);
    assert_eq!(dict.translate("car").unwrap().unwrap().words(), vec!["automobile"]);
}

#[test]
fn test_growth_past_initial_capacity() {
    let dir = TempDir::new().unwrap();
    let n = 100 + INITIAL_CAPACITY;
    let contents: String = (0..n).rev().map(|i| format!("word{i:03} out{i}\n")).collect();
    write_dict(&dir, "big", &contents);
    let dict = build(&dir, "big");

    assert_eq!(dict.table().len(), n);
    let keys: Vec<_> = dict.table().keys().collect();
    assert!(keys.windows(2).all(|w| w[0].as_bytes() < w[1].as_bytes()));
    for i in 0..n {
        let token = format!("word{i:03}");
        let expected = format!("out{i}");
        assert_eq!(dict.translate(&token).unwrap().unwrap().words(), vec![expected.as_str()]);
    }
}

#[test]
fn test_missing_file_is_file_error() {
    let dir = TempDir::new().unwrap();
    let err = TranslateDictionary::init(
        [("DictFile", "nothere"), ("InputDict", "simple")],
        Arc::new(NormalizerRegistry::with_builtins()),
        &FileResolver::new(dir.path()),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::File);
    assert!(err.to_string().contains("nothere.trn"));
}

#[test]
fn test_option_errors_precede_file_io() {
    // The file does not exist; the option error must still win.
    let dir = TempDir::new().unwrap();
    let registry = Arc::new(NormalizerRegistry::with_builtins());
    let resolver = FileResolver::new(dir.path());

    let err = TranslateDictionary::init([("DictFile", "nothere")], registry.clone(), &resolver)
        .unwrap_err();
    assert_eq!(err.to_string(), "missing InputDict parameter");

    let err = TranslateDictionary::init(
        [("DictFile", "nothere"), ("InputDict", "no_such_dict")],
        registry.clone(),
        &resolver,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(matches!(err, TranslateError::NormalizerNotFound(_)));

    let err = TranslateDictionary::init(
        [("DictFile", "nothere"), ("InputDict", "simple"), ("Extra", "1")],
        registry,
        &resolver,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "unrecognized translate parameter: \"Extra\"");
}

#[test]
fn test_option_list_syntax() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "pets", "cat feline\n");
    let options = TranslateOptions::parse_list("DictFile = pets, InputDict = 'pg_catalog.simple'").unwrap();
    let (dict, stats) = TranslateDictionary::from_options(
        &options,
        Arc::new(NormalizerRegistry::with_builtins()),
        &FileResolver::new(dir.path()),
    )
    .unwrap();

    assert_eq!(stats.entries, 1);
    assert_eq!(dict.input_dict(), &QualifiedName::qualified("pg_catalog", "simple"));
    assert!(dict.translate("Cat").unwrap().is_some());
}

#[test]
fn test_loading_twice_is_identical() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "pets", "dog hound\ncat feline\nbird avian\n");
    let path = dir.path().join("pets.trn");

    let (first, _) = TranslationFileLoader::load(&path).unwrap();
    let (second, _) = TranslationFileLoader::load(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.keys().collect::<Vec<_>>(), vec!["bird", "cat", "dog"]);
}

#[test]
fn test_stale_normalizer_recovered() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "pets", "dog fido\n");
    let registry = Arc::new(NormalizerRegistry::with_builtins());
    let dict = TranslateDictionary::init(
        [("DictFile", "pets"), ("InputDict", "simple")],
        registry.clone(),
        &FileResolver::new(dir.path()),
    )
    .unwrap();

    assert!(dict.translate("dog").unwrap().is_some());

    // Redefine the normalizer: the old entry becomes stale.
    registry.register(
        QualifiedName::qualified("pg_catalog", "simple"),
        Arc::new(SimpleNormalizer::new(["dog"], true)),
    );
    // The redefinition made "dog" a stopword, which proves the new one is used.
    assert!(dict.translate("dog").unwrap().is_none());

    registry.invalidate(dict.input_id());
    assert!(dict.translate("dog").unwrap().is_none());
}

#[test]
fn test_removed_normalizer_is_error() {
    let dir = TempDir::new().unwrap();
    write_dict(&dir, "pets", "dog fido\n");
    let registry = Arc::new(NormalizerRegistry::with_builtins());
    let dict = TranslateDictionary::init(
        [("DictFile", "pets"), ("InputDict", "simple")],
        registry.clone(),
        &FileResolver::new(dir.path()),
    )
    .unwrap();

    registry.unregister(&QualifiedName::qualified("pg_catalog", "simple"));
    assert!(matches!(
        dict.translate("dog"),
        Err(TranslateError::NormalizerNotFound(_))
    ));
}
