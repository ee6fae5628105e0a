//! Round scoring
//!
//! Scores come from a fixed descending table indexed by the number of guesses
//! it took to win. The table is data, not a formula, so it can be tuned from
//! configuration without touching the engine.

use crate::game::GameMode;
use serde::{Deserialize, Serialize};

/// Default table: win on guess 1 → 100, ... guess 6 → 25
pub const DEFAULT_SCORE_TABLE: [u32; 6] = [100, 85, 70, 55, 40, 25];

/// Default bonus added to a solo win (the lone player always places first)
pub const DEFAULT_PLACEMENT_BONUS: u32 = 50;

/// Table-driven scoring policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoringPolicy {
    /// `table[n - 1]` is awarded for a win on guess `n`
    pub table: Vec<u32>,
    pub placement_bonus: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            table: DEFAULT_SCORE_TABLE.to_vec(),
            placement_bonus: DEFAULT_PLACEMENT_BONUS,
        }
    }
}

impl ScoringPolicy {
    /// Raw table value for a win on guess `guesses_used`
    ///
    /// Any count outside the table (including 0) scores 0.
    ///
    /// # Examples
    /// ```
    /// use wordle_battle::scoring::ScoringPolicy;
    ///
    /// let policy = ScoringPolicy::default();
    /// assert_eq!(policy.score(1), 100);
    /// assert_eq!(policy.score(6), 25);
    /// assert_eq!(policy.score(7), 0);
    /// ```
    #[must_use]
    pub fn score(&self, guesses_used: usize) -> u32 {
        guesses_used
            .checked_sub(1)
            .and_then(|index| self.table.get(index))
            .copied()
            .unwrap_or(0)
    }

    /// Score for a resolved round
    ///
    /// A loss (exhausted guesses or timeout) is always 0. A solo win adds the
    /// placement bonus; a multiplayer win is the raw table value.
    #[must_use]
    pub fn round_score(&self, won: bool, guesses_used: usize, mode: GameMode) -> u32 {
        if !won {
            return 0;
        }

        match mode {
            GameMode::Solo => self.score(guesses_used) + self.placement_bonus,
            GameMode::Multiplayer => self.score(guesses_used),
        }
    }

    /// Check the table is non-empty and never increases
    #[must_use]
    pub fn is_non_increasing(&self) -> bool {
        !self.table.is_empty() && self.table.windows(2).all(|pair| pair[0] >= pair[1])
    }
}
