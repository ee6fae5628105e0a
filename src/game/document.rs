//! The replicated game document
//!
//! This is the single value every participant observes. Its serialized shape
//! (camelCase) is the wire format a hosted store would persist:
//!
//! ```text
//! {id, hostId, settings: {rounds, timeLimit, mode},
//!  players: {[id]: {id, nickname, seat, score, guesses, roundScore,
//!                   roundFinished, results}},
//!  status, currentRound, secretWords, roundStartTime, schemaVersion, revision}
//! ```

use super::{GameCode, PlayerId};
use crate::error::SettingsError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bumped whenever the document shape changes incompatibly
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// One player; round transitions are automatic and wins earn a placement bonus
    Solo,
    #[default]
    Multiplayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub rounds: u32,
    /// Seconds per round
    pub time_limit: u32,
    pub mode: GameMode,
}

impl GameSettings {
    /// # Errors
    /// Returns `SettingsError` if rounds or time limit is zero.
    pub const fn validate(&self) -> Result<(), SettingsError> {
        if self.rounds == 0 {
            return Err(SettingsError::NoRounds);
        }
        if self.time_limit == 0 {
            return Err(SettingsError::NoTime);
        }
        Ok(())
    }

    #[must_use]
    pub fn time_limit_delta(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.time_limit))
    }
}

/// Overall game status
///
/// `Waiting → Playing → RoundOver → (Playing | GameOver)`, with
/// `Initializing` in place of `Waiting` for solo games. The only backward
/// edge is the round reset `RoundOver → Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    /// Multiplayer lobby, accepting joins
    Waiting,
    /// Secrets drawn, not yet guessable
    Initializing,
    Playing,
    RoundOver,
    GameOver,
}

impl GameStatus {
    /// Whether the state machine permits moving from `self` to `next`
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Waiting | Self::Initializing | Self::RoundOver, Self::Playing)
                | (Self::Playing, Self::RoundOver)
                | (Self::RoundOver, Self::GameOver)
        )
    }

    #[must_use]
    pub const fn is_lobby(self) -> bool {
        matches!(self, Self::Waiting | Self::Initializing)
    }
}

/// How one player's round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: u32,
    pub won: bool,
    pub guesses_used: usize,
    pub timed_out: bool,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDocument {
    pub id: PlayerId,
    pub nickname: String,
    /// Join order, used to break scoreboard ties
    pub seat: u32,
    pub score: u32,
    pub guesses: Vec<String>,
    pub round_score: u32,
    pub round_finished: bool,
    pub results: Vec<RoundResult>,
}

impl PlayerDocument {
    #[must_use]
    pub fn new(id: PlayerId, nickname: impl Into<String>, seat: u32) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            seat,
            score: 0,
            guesses: Vec::new(),
            round_score: 0,
            round_finished: false,
            results: Vec::new(),
        }
    }

    /// This player's result for `round`, once they have finished it
    #[must_use]
    pub fn result_for(&self, round: u32) -> Option<&RoundResult> {
        self.results.iter().find(|r| r.round == round)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub id: GameCode,
    pub host_id: PlayerId,
    pub settings: GameSettings,
    pub players: BTreeMap<PlayerId, PlayerDocument>,
    pub status: GameStatus,
    /// 1-based
    pub current_round: u32,
    pub secret_words: Vec<String>,
    pub round_start_time: Option<DateTime<Utc>>,
    pub schema_version: u32,
    /// Store-maintained; bumped on every committed write
    pub revision: u64,
}

impl GameDocument {
    /// A fresh game with the host seated first
    ///
    /// Multiplayer games open in `Waiting`; solo games in `Initializing`.
    #[must_use]
    pub fn new(
        id: GameCode,
        host: PlayerDocument,
        settings: GameSettings,
        secret_words: Vec<String>,
    ) -> Self {
        let status = match settings.mode {
            GameMode::Solo => GameStatus::Initializing,
            GameMode::Multiplayer => GameStatus::Waiting,
        };

        Self {
            id,
            host_id: host.id.clone(),
            settings,
            players: BTreeMap::from([(host.id.clone(), host)]),
            status,
            current_round: 1,
            secret_words,
            round_start_time: None,
            schema_version: SCHEMA_VERSION,
            revision: 0,
        }
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerDocument> {
        self.players.get(id)
    }

    #[must_use]
    pub fn is_host(&self, id: &PlayerId) -> bool {
        &self.host_id == id
    }

    /// Secret of the current round
    #[must_use]
    pub fn current_secret(&self) -> Option<&str> {
        self.secret_for_round(self.current_round)
    }

    /// Secret of a 1-based round
    #[must_use]
    pub fn secret_for_round(&self, round: u32) -> Option<&str> {
        let index = usize::try_from(round.checked_sub(1)?).ok()?;
        self.secret_words.get(index).map(String::as_str)
    }

    /// Rounds actually playable: the configured count, capped by the secrets drawn
    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        let drawn = u32::try_from(self.secret_words.len()).unwrap_or(u32::MAX);
        self.settings.rounds.min(drawn)
    }

    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.total_rounds()
    }

    /// True when every seated player has finished the current round
    #[must_use]
    pub fn all_finished(&self) -> bool {
        !self.players.is_empty() && self.players.values().all(|p| p.round_finished)
    }

    /// Seat number for the next player to join
    #[must_use]
    pub fn next_seat(&self) -> u32 {
        self.players.values().map(|p| p.seat + 1).max().unwrap_or(0)
    }
}
