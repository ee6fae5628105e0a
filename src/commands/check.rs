//! Word list lookup command

use crate::wordlists::Dictionary;

/// Where a word stands in the loaded lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub word: String,
    /// Accepted as a guess
    pub allowed: bool,
    /// Eligible to be drawn as a secret
    pub secret: bool,
}

#[must_use]
pub fn check_word(word: &str, dictionary: &Dictionary) -> CheckResult {
    let word = word.trim().to_lowercase();

    CheckResult {
        allowed: dictionary.validator().is_valid(&word),
        secret: dictionary.secrets().contains(&word),
        word,
    }
}
