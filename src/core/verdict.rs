//! Per-letter guess evaluation
//!
//! An evaluation holds one verdict per position of the guess:
//! - Absent (letter not available at that match step)
//! - Present (letter in word, wrong position)
//! - Correct (letter in correct position)
//!
//! Verdicts are ordered `Absent < Present < Correct`, which is the precedence
//! used when aggregating keyboard status.

use super::Word;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feedback for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Absent,
    Present,
    Correct,
}

impl Verdict {
    /// Emoji tile for this verdict
    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Verdicts for every position of a guess
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Evaluation(Vec<Verdict>);

impl Evaluation {
    /// Evaluate `guess` against `secret`
    ///
    /// This implements Wordle's exact feedback rules, including proper handling
    /// of duplicate letters.
    ///
    /// # Algorithm
    /// 1. First pass: Mark all exact matches and remove them from the available pool
    /// 2. Second pass: Mark present-but-wrong-position letters from the remaining pool
    ///
    /// # Panics
    /// Panics if the two words differ in length. Callers validate guesses
    /// against the configured word length before evaluating.
    ///
    /// # Examples
    /// ```
    /// use wordle_battle::core::{Evaluation, Verdict, Word};
    ///
    /// let secret = Word::new("slate", 5).unwrap();
    /// let guess = Word::new("crane", 5).unwrap();
    /// let evaluation = Evaluation::evaluate(&secret, &guess);
    ///
    /// assert_eq!(evaluation.verdicts()[2], Verdict::Correct);
    /// assert_eq!(evaluation.count_correct(), 2);
    /// ```
    #[must_use]
    pub fn evaluate(secret: &Word, guess: &Word) -> Self {
        assert_eq!(
            secret.len(),
            guess.len(),
            "secret and guess must have the same length"
        );

        let mut result = vec![Verdict::Absent; guess.len()];
        let mut available = secret.letter_counts();

        // First pass: exact position matches
        for (i, (&g, &s)) in guess.letters().iter().zip(secret.letters()).enumerate() {
            if g == s {
                result[i] = Verdict::Correct;

                if let Some(count) = available.get_mut(&g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: wrong position, but letter still available
        for (i, &letter) in guess.letters().iter().enumerate() {
            if result[i] == Verdict::Correct {
                continue;
            }

            if let Some(count) = available.get_mut(&letter)
                && *count > 0
            {
                result[i] = Verdict::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// The verdicts in guess order
    #[inline]
    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.0
    }

    /// Check if every letter is correct
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&v| v == Verdict::Correct)
    }

    /// Count the number of correct letters
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&v| v == Verdict::Correct).count()
    }

    /// Count the number of present letters
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&v| v == Verdict::Present).count()
    }

    /// Convert to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|v| v.to_emoji()).collect()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_emoji())
    }
}

/// Parse an evaluation from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
///
/// Accepts:
/// - 'G'/'g'/🟩 for correct
/// - 'Y'/'y'/🟨 for present
/// - '-'/'_'/⬜/⬛ for absent
impl FromStr for Evaluation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|ch| match ch {
                'G' | 'g' | '🟩' => Ok(Verdict::Correct),
                'Y' | 'y' | '🟨' => Ok(Verdict::Present),
                '-' | '_' | '⬜' | '⬛' => Ok(Verdict::Absent),
                _ => Err(format!("Invalid evaluation string: {s}")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
