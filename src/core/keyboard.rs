//! Aggregated keyboard status
//!
//! A pure fold over a player's ordered guesses. Each letter keeps the best
//! verdict it has received so far, so a letter marked Correct by any guess is
//! never downgraded by a later Present or Absent result.

use super::{Evaluation, Verdict, Word};
use std::collections::BTreeMap;

/// Best verdict seen per letter; letters never guessed are absent from the map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardStatus {
    keys: BTreeMap<char, Verdict>,
}

impl KeyboardStatus {
    /// Fold a guess history into a keyboard status
    ///
    /// # Panics
    /// Panics if any guess differs in length from `secret`, as
    /// [`Evaluation::evaluate`] does.
    ///
    /// # Examples
    /// ```
    /// use wordle_battle::core::{KeyboardStatus, Verdict, Word};
    ///
    /// let secret = Word::new("crane", 5).unwrap();
    /// let guesses = [Word::new("slate", 5).unwrap()];
    /// let keyboard = KeyboardStatus::from_guesses(&secret, &guesses);
    ///
    /// assert_eq!(keyboard.get('a'), Some(Verdict::Correct));
    /// assert_eq!(keyboard.get('s'), Some(Verdict::Absent));
    /// assert_eq!(keyboard.get('q'), None);
    /// ```
    #[must_use]
    pub fn from_guesses<'a>(secret: &Word, guesses: impl IntoIterator<Item = &'a Word>) -> Self {
        guesses
            .into_iter()
            .fold(Self::default(), |mut status, guess| {
                status.record(guess, &Evaluation::evaluate(secret, guess));
                status
            })
    }

    /// Merge one evaluated guess into the status
    pub fn record(&mut self, guess: &Word, evaluation: &Evaluation) {
        for (&letter, &verdict) in guess.letters().iter().zip(evaluation.verdicts()) {
            let entry = self.keys.entry(char::from(letter)).or_insert(verdict);
            *entry = (*entry).max(verdict);
        }
    }

    /// Status of a single letter, `None` if it was never guessed
    #[must_use]
    pub fn get(&self, letter: char) -> Option<Verdict> {
        self.keys.get(&letter.to_ascii_lowercase()).copied()
    }

    /// Iterate letters in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        self.keys.iter().map(|(&letter, &verdict)| (letter, verdict))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
