//! Phrase expansion tests
//!
//! Pin the singular/original/plural expansion contract consumers match
//! against: lower-cased forms, empties dropped, first-seen dedup.

use epiphany_core::{EntityType, VALIDATION_TEXT_MATCH};
use proptest::prelude::*;

fn entity_with_phrases(phrases: &[&str]) -> EntityType {
    EntityType::new("exercise", VALIDATION_TEXT_MATCH)
        .with_known_phrases(phrases.iter().map(|p| p.to_string()).collect())
}

// ===== EXPANSION TESTS =====

#[test]
fn test_run_expands_to_singular_and_plural() {
    // Singular form collides with the lower-cased original
    let entity = entity_with_phrases(&["Run"]);
    assert_eq!(entity.phrases_for_validation(), ["run", "runs"]);
}

#[test]
fn test_dog_cats_expand_to_deduplicated_union() {
    let entity = entity_with_phrases(&["Dog", "Cats"]);
    assert_eq!(
        entity.phrases_for_validation(),
        ["dog", "dogs", "cat", "cats"]
    );
}

#[test]
fn test_duplicate_phrases_collapse() {
    let entity = entity_with_phrases(&["Run", "run", "RUN"]);
    assert_eq!(entity.phrases_for_validation(), ["run", "runs"]);
}

#[test]
fn test_empty_phrase_list_expands_to_nothing() {
    let entity = entity_with_phrases(&[]);
    assert!(entity.phrases_for_validation().is_empty());
}

#[test]
fn test_empty_phrase_entries_are_dropped() {
    let entity = entity_with_phrases(&["", "Squat"]);
    assert_eq!(entity.phrases_for_validation(), ["squat", "squats"]);
}

#[test]
fn test_multi_word_phrases_are_lowercased() {
    let entity = entity_with_phrases(&["Bench Press"]);
    let expanded = entity.phrases_for_validation();
    assert!(expanded.contains(&"bench press".to_string()));
    assert!(expanded.iter().all(|p| p == &p.to_lowercase()));
}

// ===== EXPANSION INVARIANTS =====

proptest! {
    #[test]
    fn prop_expansion_contains_lowercased_original(phrase in "[A-Za-z]{1,16}") {
        let entity = entity_with_phrases(&[phrase.as_str()]);
        let expanded = entity.phrases_for_validation();
        prop_assert!(expanded.contains(&phrase.to_lowercase()));
    }

    #[test]
    fn prop_expansion_has_no_duplicates_or_empties(phrase in "[A-Za-z]{1,16}") {
        let entity = entity_with_phrases(&[phrase.as_str()]);
        let expanded = entity.phrases_for_validation();

        prop_assert!(expanded.iter().all(|p| !p.is_empty()));
        for (idx, form) in expanded.iter().enumerate() {
            prop_assert!(!expanded[..idx].contains(form));
        }
    }
}
