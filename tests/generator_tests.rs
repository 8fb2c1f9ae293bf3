// tests/generator_tests.rs
use std::collections::HashSet;

use credential_vault::generator::SIMILAR;
use credential_vault::strength::score;
use credential_vault::{check_strength, generate_password, CoreError, GeneratorOptions, Strength};

#[test]
fn default_options_give_sixteen_characters_of_every_class() {
    for _ in 0..50 {
        let password = generate_password(&GeneratorOptions::default()).unwrap();

        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| !c.is_ascii_alphanumeric()));
        assert_eq!(check_strength(&password), Strength::Strong);
    }
}

#[test]
fn only_selected_classes_are_used() {
    let options = GeneratorOptions {
        length: 40,
        uppercase: false,
        symbols: false,
        ..GeneratorOptions::default()
    };

    for _ in 0..20 {
        let password = generate_password(&options).unwrap();
        assert!(password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
    }
}

#[test]
fn similar_characters_can_be_excluded() {
    let options = GeneratorOptions {
        length: 256,
        exclude_similar: true,
        ..GeneratorOptions::default()
    };

    let password = generate_password(&options).unwrap();
    assert!(password.chars().all(|c| !SIMILAR.contains(c)));
}

#[test]
fn length_equal_to_class_count_is_allowed() {
    let options = GeneratorOptions {
        length: 4,
        ..GeneratorOptions::default()
    };
    let password = generate_password(&options).unwrap();
    assert_eq!(password.len(), 4);
}

#[test]
fn passwords_do_not_repeat() {
    let seen: HashSet<String> = (0..100)
        .map(|_| generate_password(&GeneratorOptions::default()).unwrap())
        .collect();
    assert_eq!(seen.len(), 100);
}

#[test]
fn invalid_options_are_rejected() {
    let none = GeneratorOptions {
        uppercase: false,
        lowercase: false,
        numbers: false,
        symbols: false,
        ..GeneratorOptions::default()
    };
    let too_short = GeneratorOptions {
        length: 3,
        ..GeneratorOptions::default()
    };
    let too_long = GeneratorOptions {
        length: 257,
        ..GeneratorOptions::default()
    };

    for options in [none, too_short, too_long] {
        assert!(matches!(
            generate_password(&options),
            Err(CoreError::InvalidOptions(_))
        ));
    }
}

#[test]
fn strength_scores_match_the_rating_table() {
    assert_eq!(score("password"), 2);
    assert_eq!(check_strength("password"), Strength::Weak);
    assert_eq!(score("Password1"), 4);
    assert_eq!(check_strength("Password1"), Strength::Medium);
    assert_eq!(score("Password1!"), 5);
    assert_eq!(check_strength("Password1!"), Strength::Strong);
    assert_eq!(score("Password1!xyz"), 6);
    // Length is measured the way the browser meter measures it
    assert_eq!(score("🔐🔐🔐🔐"), 2);
    assert!(Strength::Weak < Strength::Strong);
    assert_eq!(Strength::Medium.to_string(), "medium");
}
