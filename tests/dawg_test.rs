// Copyright (C) 2025 Andy Kurnia.

// Word graph invariants, driven through the public Dawg interface
// against an encoded test lexicon.

mod common;

use common::{small_lexicon, TEST_ALPHABET, WORDS};
use skrafl::alphabet::BLANK;

#[test]
fn finds_exactly_the_word_list() {
    let dawg = small_lexicon();
    for word in WORDS {
        assert!(dawg.find(word), "did not find '{word}'");
    }
    for word in ["", "q", "blex", "dogg", "zips", "lettersz", "og", "gd"] {
        assert!(!dawg.find(word), "found '{word}' which is not a word");
    }
    // Prefixes of words are not words unless listed
    assert!(dawg.find("do"));
    assert!(!dawg.find("d"));
    assert!(dawg.find("play"));
    assert!(!dawg.find("pla"));
}

#[test]
fn match_closure() {
    // Every match result is a word and fits the pattern
    let dawg = small_lexicon();
    for pattern in ["d?g", "?o", "pl??", "c??", "???", "letter?", "??x", "?ig"] {
        let results = dawg.match_pattern(pattern);
        let pattern_runes: Vec<char> = pattern.chars().collect();
        for word in &results {
            assert!(dawg.find(word), "match returned non-word '{word}'");
            let word_runes: Vec<char> = word.chars().collect();
            assert_eq!(word_runes.len(), pattern_runes.len());
            for (w, p) in word_runes.iter().zip(&pattern_runes) {
                assert!(*p == BLANK || w == p, "'{word}' does not match '{pattern}'");
            }
        }
        // Results arrive in alphabetical order
        let mut sorted = results.clone();
        sorted.sort();
        assert_eq!(results, sorted);
    }
    assert_eq!(dawg.match_pattern("d?g"), ["dig", "dog"]);
    assert_eq!(dawg.match_pattern("zz?"), Vec::<String>::new());
}

#[test]
fn permute_correctness() {
    let dawg = small_lexicon();
    for rack in ["dogcats", "letters", "pl?y", "aeioubc", "??"] {
        for min_len in [2, 3, 7] {
            let rack_runes: Vec<char> = rack.chars().collect();
            for word in dawg.permute(rack, min_len) {
                assert!(dawg.find(&word));
                assert!(word.chars().count() >= min_len);
                // The word's letters form a sub-multiset of the rack,
                // counting each '?' as one wildcard slot
                let mut pool = rack_runes.clone();
                for chr in word.chars() {
                    if let Some(pos) = pool.iter().position(|&r| r == chr) {
                        pool.remove(pos);
                    } else if let Some(pos) = pool.iter().position(|&r| r == BLANK) {
                        pool.remove(pos);
                    } else {
                        panic!("'{word}' is not drawable from rack '{rack}'");
                    }
                }
            }
        }
    }
    // A full-rack word shows up when the length gate allows it
    assert!(dawg
        .permute("letters", 7)
        .contains(&"letters".to_string()));
    assert!(dawg.permute("letters", 8).is_empty());
    // Blanks stand in for missing letters
    assert!(dawg.permute("d?g", 3).contains(&"dog".to_string()));
}

#[test]
fn cross_set_exactness() {
    // Bit b(x) is set exactly when left·x·right is a word
    let dawg = small_lexicon();
    let alphabet = dawg.alphabet();
    let cases: &[(&str, &str)] = &[
        ("d", "g"),
        ("", "o"),
        ("d", ""),
        ("pl", "y"),
        ("letter", ""),
        ("", "at"),
        ("zz", "zz"),
        ("c", "t"),
    ];
    for (left, right) in cases {
        let left_runes: Vec<char> = left.chars().collect();
        let right_runes: Vec<char> = right.chars().collect();
        let set = dawg.cross_set(&left_runes, &right_runes);
        for &x in alphabet.runes() {
            let word = format!("{left}{x}{right}");
            assert_eq!(
                alphabet.member(x, set),
                dawg.find(&word),
                "cross set of ({left}, {right}) disagrees with find at '{x}'"
            );
        }
        // Second lookup hits the cache and must agree
        assert_eq!(dawg.cross_set(&left_runes, &right_runes), set);
    }
}

#[test]
fn cross_set_without_constraint() {
    let dawg = small_lexicon();
    // Both fragments empty never happens via the axis path, but the
    // pattern "?" alone yields single-letter words, of which the list
    // has none
    assert_eq!(dawg.cross_set(&[], &[]), 0);
}

#[test]
fn permute_ordering_is_alphabetical() {
    let dawg = small_lexicon();
    let results = dawg.permute("dogcats", 2);
    let mut sorted = results.clone();
    sorted.sort();
    assert_eq!(results, sorted);
    assert!(results.contains(&"cats".to_string()));
    assert!(results.contains(&"dog".to_string()));
}

#[test]
fn encoded_alphabet_mismatch_is_rejected() {
    // The encoder addresses runes by index; a graph that references
    // indices outside the alphabet fails to load
    let bytes = common::encode_word_graph(&["dog"], TEST_ALPHABET);
    let tiny = skrafl::alphabet::Alphabet::new("ab").unwrap();
    assert!(skrafl::dawg::Dawg::from_bytes(bytes, tiny).is_err());
}
