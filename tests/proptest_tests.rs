//! Property-based tests for Filterkit using proptest.
//!
//! Random addresses, keys and labels are pushed through the cipher and the
//! renderer to check that decoding always recovers the input and that the
//! output never leaks it.

use filterkit::obfuscate::{Alphabet, EmailObfuscator, Key, ObfuscationRequest, ALPHABET};
use filterkit::plugins::filter::strings::{truncate, wordwrap};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

// ============================================================================
// Strategies for generating test data
// ============================================================================

/// Strings made only of symbols the cipher supports.
fn alphabet_string() -> impl Strategy<Value = String> {
    prop::string::string_regex("[+\\-.0-9@A-Z_a-z]{0,80}").unwrap()
}

/// Address-shaped strings.
fn email() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9._+-]{1,20}@[a-z0-9-]{1,15}\\.[a-z]{2,6}").unwrap()
}

fn script_literal(html: &str, var: &str) -> String {
    let re = Regex::new(&format!(r#"[,\s;(]{var}=("(?:[^"\\]|\\.)*")"#)).unwrap();
    let raw = re.captures(html).unwrap().get(1).unwrap().as_str().to_string();
    serde_json::from_str(&raw).unwrap()
}

// ============================================================================
// Cipher properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_decode_inverts_encode(seed in any::<u64>(), plaintext in alphabet_string()) {
        let key = Key::generate(&mut StdRng::seed_from_u64(seed));
        let cipher = key.encode(&plaintext).unwrap();
        prop_assert_eq!(cipher.chars().count(), plaintext.chars().count());
        prop_assert_eq!(key.decode(&cipher).unwrap(), plaintext);
    }

    #[test]
    fn prop_generated_key_is_permutation(seed in any::<u64>()) {
        let key = Key::generate(&mut StdRng::seed_from_u64(seed));
        let mut symbols: Vec<u8> = key.as_str().bytes().collect();
        symbols.sort_unstable();
        prop_assert_eq!(symbols, ALPHABET.as_bytes().to_vec());
    }

    #[test]
    fn prop_foreign_characters_reported(prefix in alphabet_string(), c in "[^+\\-.0-9@A-Z_a-z]") {
        let input = format!("{prefix}{c}");
        let unsupported = Alphabet::unsupported(&input);
        prop_assert!(!unsupported.is_empty());
        prop_assert!(Alphabet::validate(&input).is_err());
    }
}

// ============================================================================
// Rendering properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_rendered_address_round_trips(seed in any::<u64>(), address in email(), link in any::<bool>()) {
        let mut obfuscator = EmailObfuscator::new(StdRng::seed_from_u64(seed));
        let html = obfuscator
            .render(&ObfuscationRequest::new(address.as_str()).link(link))
            .unwrap();

        let key = Key::from_symbols(&script_literal(&html, "a")).unwrap();
        let cipher = script_literal(&html, "c");
        prop_assert_eq!(key.decode(&cipher).unwrap(), address);
    }

    #[test]
    fn prop_labels_round_trip_through_script(seed in any::<u64>(), label in "\\PC{0,40}") {
        let mut obfuscator = EmailObfuscator::new(StdRng::seed_from_u64(seed));
        let html = obfuscator
            .render(&ObfuscationRequest::new("a@b.com").text(label.as_str()))
            .unwrap();

        prop_assert_eq!(html.matches("</script>").count(), 1);
        prop_assert_eq!(script_literal(&html, "y"), label);
    }
}

// ============================================================================
// String filter properties
// ============================================================================

proptest! {
    #[test]
    fn prop_truncate_never_longer_than_limit(value in "[a-z ]{0,60}", length in 1usize..40) {
        let out = truncate(&value, length, false, "...");
        prop_assert!(out.chars().count() <= length + 3);
    }

    #[test]
    fn prop_wordwrap_chunks_rejoin(value in "[a-zA-Z ]{0,100}", width in 1usize..20) {
        let out = wordwrap(&value, width, "\n", false).unwrap();
        prop_assert_eq!(out.replace('\n', ""), value.clone());
        prop_assert!(out.split('\n').all(|line| line.chars().count() <= width));
    }
}
