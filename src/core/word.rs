//! Wordle word representation
//!
//! A Word stores a fixed-length lowercase word along with its letter counts
//! for duplicate-aware evaluation. The length is a parameter, not a constant.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// A lowercase ASCII word of a known length
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must be exactly {expected} letters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Word must contain only ASCII letters")]
    NonAscii,
    #[error("Word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word of exactly `length` letters
    ///
    /// Input is trimmed and lowercased before validation.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly `length`
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_battle::core::Word;
    ///
    /// let word = Word::new("CRANE", 5).unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("crane", 6).is_err());
    /// assert!(Word::new("cr4ne", 5).is_err());
    /// ```
    pub fn new(text: impl AsRef<str>, length: usize) -> Result<Self, WordError> {
        let text = text.as_ref().trim().to_lowercase();

        let actual = text.chars().count();
        if actual != length {
            return Err(WordError::InvalidLength {
                expected: length,
                actual,
            });
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !text.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes (one per letter)
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a validated word; present for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the letter at a specific position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn letter_at(&self, position: usize) -> u8 {
        self.letters()[position]
    }

    /// Get the count of each letter in the word
    ///
    /// Used for evaluation with duplicate letters.
    #[inline]
    pub(crate) fn letter_counts(&self) -> FxHashMap<u8, u8> {
        let mut counts = FxHashMap::default();
        for &ch in self.letters() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("crane", 5).unwrap();
        assert_eq!(word.text(), "crane");
        assert_eq!(word.letters(), b"crane");
        assert_eq!(word.len(), 5);
    }

    #[test]
    fn word_creation_uppercase_normalized() {
        let word = Word::new("CRANE", 5).unwrap();
        assert_eq!(word.text(), "crane");

        let word2 = Word::new("  CrAnE ", 5).unwrap();
        assert_eq!(word2.text(), "crane");
    }

    #[test]
    fn word_creation_other_lengths() {
        assert_eq!(Word::new("cat", 3).unwrap().len(), 3);
        assert_eq!(Word::new("planets", 7).unwrap().text(), "planets");
    }

    #[test]
    fn word_creation_invalid_length() {
        assert_eq!(
            Word::new("too long", 5),
            Err(WordError::InvalidLength {
                expected: 5,
                actual: 8
            })
        );
        assert_eq!(
            Word::new("shrt", 5),
            Err(WordError::InvalidLength {
                expected: 5,
                actual: 4
            })
        );
        assert!(matches!(
            Word::new("", 5),
            Err(WordError::InvalidLength { actual: 0, .. })
        ));
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert_eq!(Word::new("cran3", 5), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cr ne", 5), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cran!", 5), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("crané", 5), Err(WordError::NonAscii));
    }

    #[test]
    fn word_letter_at() {
        let word = Word::new("crane", 5).unwrap();
        assert_eq!(word.letter_at(0), b'c');
        assert_eq!(word.letter_at(4), b'e');
    }

    #[test]
    fn word_letter_counts() {
        let word = Word::new("speed", 5).unwrap();
        let counts = word.letter_counts();
        assert_eq!(counts.get(&b's'), Some(&1));
        assert_eq!(counts.get(&b'e'), Some(&2));
        assert_eq!(counts.get(&b'z'), None);
    }

    #[test]
    fn word_letter_counts_all_same() {
        let word = Word::new("aaaaa", 5).unwrap();
        let counts = word.letter_counts();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&b'a'), Some(&5));
    }

    #[test]
    fn word_display_and_equality() {
        let word1 = Word::new("crane", 5).unwrap();
        let word2 = Word::new("CRANE", 5).unwrap();
        let word3 = Word::new("slate", 5).unwrap();

        assert_eq!(format!("{word1}"), "crane");
        assert_eq!(word1, word2);
        assert_ne!(word1, word3);
    }
}
