//! Word lists for the game
//!
//! Provides embedded word lists compiled into the binary, the guess validator
//! and the secret word source built from them.

mod embedded;
pub mod loader;
mod secrets;
mod validator;

pub use embedded::{ALLOWED, ALLOWED_COUNT, SECRETS, SECRETS_COUNT};
pub use secrets::SecretWordSource;
pub use validator::WordValidator;

use crate::core::Word;
use loader::words_from_slice;

/// The accepted-guess validator and secret source for one word length
#[derive(Debug, Clone)]
pub struct Dictionary {
    word_length: usize,
    validator: WordValidator,
    secrets: SecretWordSource,
}

impl Dictionary {
    /// Build a dictionary from the two word lists
    ///
    /// Secrets that are not accepted guesses are dropped.
    #[must_use]
    pub fn new(allowed: &[Word], secrets: Vec<Word>, word_length: usize) -> Self {
        let validator = WordValidator::new(allowed.iter().filter(|w| w.len() == word_length));
        let secrets = SecretWordSource::new(
            secrets.into_iter().filter(|w| w.len() == word_length),
            &validator,
        );

        Self {
            word_length,
            validator,
            secrets,
        }
    }

    /// The five-letter lists compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(
            &words_from_slice(ALLOWED, 5),
            words_from_slice(SECRETS, 5),
            5,
        )
    }

    /// Build from string lists; entries of the wrong shape are skipped
    #[must_use]
    pub fn from_lists(allowed: &[&str], secrets: &[&str], word_length: usize) -> Self {
        Self::new(
            &words_from_slice(allowed, word_length),
            words_from_slice(secrets, word_length),
            word_length,
        )
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    #[must_use]
    pub const fn validator(&self) -> &WordValidator {
        &self.validator
    }

    #[must_use]
    pub const fn secrets(&self) -> &SecretWordSource {
        &self.secrets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_count_matches_const() {
        assert_eq!(SECRETS.len(), SECRETS_COUNT);
    }

    #[test]
    fn allowed_count_matches_const() {
        assert_eq!(ALLOWED.len(), ALLOWED_COUNT);
    }

    #[test]
    fn embedded_words_are_five_lowercase_letters() {
        for &word in SECRETS.iter().chain(ALLOWED) {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "Word '{word}' contains non-lowercase chars"
            );
        }
    }

    #[test]
    fn secrets_subset_of_allowed() {
        let dictionary = Dictionary::embedded();

        for &secret in SECRETS {
            assert!(
                dictionary.validator().is_valid(secret),
                "Secret '{secret}' not in allowed list"
            );
        }
        assert_eq!(dictionary.secrets().len(), SECRETS_COUNT);
    }

    #[test]
    fn allowed_list_is_a_full_guess_dictionary() {
        let dictionary = Dictionary::embedded();
        let accepted = dictionary.validator().len();
        assert!(accepted >= 10_000, "only {accepted} accepted guesses");
        assert!(dictionary.secrets().len() < accepted);
    }

    #[test]
    fn embedded_lists_cover_common_words() {
        let dictionary = Dictionary::embedded();
        for word in [
            "crane", "slate", "mango", "allow", "lolly", "adieu", "roate", "tares", "soare",
        ] {
            assert!(dictionary.validator().is_valid(word), "{word}");
        }
    }

    #[test]
    fn from_lists_uses_the_given_length() {
        let dictionary = Dictionary::from_lists(&["cat", "dog", "crane"], &["cat", "emu"], 3);
        assert_eq!(dictionary.word_length(), 3);
        assert_eq!(dictionary.validator().len(), 2);
        assert_eq!(dictionary.secrets().len(), 1);
    }
}
