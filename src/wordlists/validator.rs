//! Guess validation against the accepted-word dictionary

use crate::core::Word;
use rustc_hash::FxHashSet;

/// Constant-time membership check against the accepted guess list
#[derive(Debug, Clone, Default)]
pub struct WordValidator {
    words: FxHashSet<String>,
}

impl WordValidator {
    /// Build a validator from already-validated words
    pub fn new<'a>(words: impl IntoIterator<Item = &'a Word>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.text().to_owned()).collect(),
        }
    }

    /// Check whether `word` is an accepted guess
    ///
    /// Input is trimmed and lowercased first. Pure; "not found" is the only
    /// failure mode.
    ///
    /// # Examples
    /// ```
    /// use wordle_battle::core::Word;
    /// use wordle_battle::wordlists::WordValidator;
    ///
    /// let words = [Word::new("crane", 5).unwrap()];
    /// let validator = WordValidator::new(&words);
    /// assert!(validator.is_valid("CRANE"));
    /// assert!(!validator.is_valid("xyzzy"));
    /// ```
    #[must_use]
    pub fn is_valid(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_lowercase())
    }

    /// Number of accepted words
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
