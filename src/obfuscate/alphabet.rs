//! The fixed substitution alphabet and randomly permuted cipher keys.

use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Symbols an obfuscated email may contain, in ASCII order.
///
/// Because the symbols are sorted, sorting any permutation of them (which is
/// what the browser-side decoder does with the key) yields this string back.
pub const ALPHABET: &str = "+-.0123456789@ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Number of symbols in [`ALPHABET`].
pub const ALPHABET_LEN: usize = ALPHABET.len();

/// Namespace for alphabet lookups.
pub struct Alphabet;

impl Alphabet {
    /// Position of `c` in the alphabet.
    pub fn index_of(c: char) -> Option<usize> {
        if c.is_ascii() {
            ALPHABET.as_bytes().iter().position(|&b| b == c as u8)
        } else {
            None
        }
    }

    /// Whether `c` can be encoded.
    pub fn contains(c: char) -> bool {
        Self::index_of(c).is_some()
    }

    /// Distinct characters of `input` outside the alphabet, in the order they
    /// first occur.
    pub fn unsupported(input: &str) -> Vec<char> {
        let mut found = Vec::new();
        for c in input.chars() {
            if !Self::contains(c) && !found.contains(&c) {
                found.push(c);
            }
        }
        found
    }

    /// Fails with [`Error::UnsupportedEmailCharacters`] unless every
    /// character of `input` is in the alphabet.
    pub fn validate(input: &str) -> Result<()> {
        let characters = Self::unsupported(input);
        if characters.is_empty() {
            Ok(())
        } else {
            Err(Error::UnsupportedEmailCharacters { characters })
        }
    }
}

/// A permutation of [`ALPHABET`] used as ciphertext order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    symbols: [u8; ALPHABET_LEN],
}

impl Key {
    /// Draws a fresh uniformly random permutation.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut symbols = [0u8; ALPHABET_LEN];
        symbols.copy_from_slice(ALPHABET.as_bytes());
        symbols.shuffle(rng);
        Self { symbols }
    }

    /// Rebuilds a key from its textual form.
    pub fn from_symbols(symbols: &str) -> Result<Self> {
        if symbols.len() != ALPHABET_LEN {
            return Err(Error::InvalidKey(format!(
                "expected {ALPHABET_LEN} symbols, got {}",
                symbols.chars().count()
            )));
        }
        let mut sorted: Vec<u8> = symbols.bytes().collect();
        sorted.sort_unstable();
        if sorted != ALPHABET.as_bytes() {
            return Err(Error::InvalidKey(
                "not a permutation of the alphabet".to_string(),
            ));
        }
        let mut out = [0u8; ALPHABET_LEN];
        out.copy_from_slice(symbols.as_bytes());
        Ok(Self { symbols: out })
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        // Only ever built from ALPHABET bytes, which are ASCII.
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }

    /// Substitutes each character of `plaintext` with the key symbol at its
    /// alphabet position.
    pub fn encode(&self, plaintext: &str) -> Result<String> {
        Alphabet::validate(plaintext)?;
        Ok(plaintext
            .chars()
            .filter_map(Alphabet::index_of)
            .map(|i| self.symbols[i] as char)
            .collect())
    }

    /// Reverses [`Key::encode`], mirroring the browser-side decoder.
    pub fn decode(&self, ciphertext: &str) -> Result<String> {
        let alphabet = ALPHABET.as_bytes();
        ciphertext
            .chars()
            .map(|c| {
                self.symbols
                    .iter()
                    .position(|&s| c.is_ascii() && s == c as u8)
                    .map(|i| alphabet[i] as char)
                    .ok_or_else(|| Error::InvalidKey(format!("symbol {c:?} is not in the key")))
            })
            .collect()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_alphabet_is_sorted_and_complete() {
        assert_eq!(ALPHABET_LEN, 67);
        let mut sorted: Vec<u8> = ALPHABET.bytes().collect();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, ALPHABET.as_bytes());
    }

    #[test]
    fn test_unsupported_lists_each_char_once() {
        assert_eq!(Alphabet::unsupported("a!b#c!"), vec!['!', '#']);
        assert!(Alphabet::unsupported("john.doe+tag@example.com").is_empty());
    }

    #[test]
    fn test_generated_key_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let key = Key::generate(&mut rng);
        assert!(Key::from_symbols(key.as_str()).is_ok());
    }

    #[test]
    fn test_generated_key_round_trips_through_text() {
        let key = Key::generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(key.as_str().len(), ALPHABET_LEN);
        assert_eq!(Key::from_symbols(&key.to_string()).unwrap(), key);
    }

    #[test]
    fn test_encode_decode() {
        let mut rng = StdRng::seed_from_u64(42);
        let key = Key::generate(&mut rng);
        let cipher = key.encode("a@b.com").unwrap();
        assert_eq!(cipher.len(), 7);
        assert_eq!(key.decode(&cipher).unwrap(), "a@b.com");
    }

    #[test]
    fn test_identity_key() {
        let key = Key::from_symbols(ALPHABET).unwrap();
        assert_eq!(key.encode("Hello@x.y").unwrap(), "Hello@x.y");
    }

    #[test]
    fn test_encode_rejects_unsupported() {
        let key = Key::from_symbols(ALPHABET).unwrap();
        let err = key.encode("josé@example.com").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedEmailCharacters { ref characters } if characters == &['é']
        ));
    }

    #[test]
    fn test_encode_empty() {
        let key = Key::from_symbols(ALPHABET).unwrap();
        assert_eq!(key.encode("").unwrap(), "");
    }

    #[test]
    fn test_from_symbols_rejects_bad_keys() {
        assert!(Key::from_symbols("abc").is_err());
        let duplicated = ALPHABET.replacen('+', "-", 1);
        assert!(Key::from_symbols(&duplicated).is_err());
    }
}
