//! Error types
//!
//! One enum per concern, aggregated into [`Error`] for the coordinator API.
//! Validation and admission errors carry user-facing messages.

use crate::game::{GameCode, Guard, PlayerId};
use std::io;
use thiserror::Error;

/// A rejected guess; the round state is unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Not enough letters")]
    TooShort { expected: usize, actual: usize },
    #[error("Too many letters")]
    TooLong { expected: usize, actual: usize },
    #[error("Not in word list")]
    NotInWordList(String),
    #[error("You have already finished this round")]
    AlreadyFinished,
    #[error("The round is not in progress")]
    RoundNotActive,
    #[error("Time's up")]
    TimeUp,
    #[error("A guess is already being submitted")]
    SubmissionPending,
    #[error("You are not part of this game")]
    NotInGame,
}

/// A rejected join; no document mutation happened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("Game {0} not found")]
    NotFound(GameCode),
    #[error("Game {0} has already started")]
    AlreadyStarted(GameCode),
    #[error("Game is full ({max} players)")]
    GameFull { max: usize },
    #[error("Nickname must be 1 to {max} characters")]
    InvalidNickname { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("A game needs at least one round")]
    NoRounds,
    #[error("Time limit must be at least one second")]
    NoTime,
    #[error("No secret words available")]
    NoSecrets,
}

/// Failure reported by a document store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document {0} does not exist")]
    NotFound(GameCode),
    #[error("document {0} already exists")]
    AlreadyExists(GameCode),
    #[error("player {0} does not exist in the document")]
    UnknownPlayer(PlayerId),
    /// The batch was planned against a state the document has since left
    #[error("precondition failed: {0}")]
    GuardFailed(Guard),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("not in a game")]
    NoActiveGame,

    /// The subscribed document disappeared; the session was dropped
    #[error("game {0} is no longer available")]
    GameVanished(GameCode),

    #[error("could not allocate a unique game code")]
    CodeExhausted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
