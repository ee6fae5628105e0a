//! Engine configuration
//!
//! Every tunable constant of the game lives here. Defaults reproduce the
//! standard rules; a TOML file can override any subset of fields.
//!
//! ```toml
//! word_length = 5
//! max_guesses = 6
//! max_players = 8
//!
//! [scoring]
//! table = [100, 85, 70, 55, 40, 25]
//! placement_bonus = 50
//! ```

use crate::error::ConfigError;
use crate::game::{GameMode, GameSettings};
use crate::scoring::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub word_length: usize,
    pub max_guesses: usize,
    pub max_players: usize,
    pub code_length: usize,
    pub nickname_max_len: usize,
    /// Round counts offered in the lobby; the middle entry is the default
    pub round_options: Vec<u32>,
    /// Per-round time limits in seconds; the middle entry is the default
    pub time_options: Vec<u32>,
    pub scoring: ScoringPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            word_length: 5,
            max_guesses: 6,
            max_players: 8,
            code_length: 6,
            nickname_max_len: 15,
            round_options: vec![3, 5, 7],
            time_options: vec![60, 90, 120],
            scoring: ScoringPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a TOML config file
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, does not parse, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading engine config");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns `ConfigError` on parse or validation failure.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Invalid(reason.to_owned()));

        if self.word_length == 0 {
            return invalid("word_length must be at least 1");
        }
        if self.max_guesses == 0 {
            return invalid("max_guesses must be at least 1");
        }
        if self.max_players == 0 {
            return invalid("max_players must be at least 1");
        }
        if self.code_length < 4 {
            return invalid("code_length must be at least 4");
        }
        if self.nickname_max_len == 0 {
            return invalid("nickname_max_len must be at least 1");
        }
        if self.round_options.is_empty() || self.round_options.contains(&0) {
            return invalid("round_options must be non-empty and positive");
        }
        if self.time_options.is_empty() || self.time_options.contains(&0) {
            return invalid("time_options must be non-empty and positive");
        }
        if !self.scoring.is_non_increasing() {
            return invalid("scoring.table must be non-empty and non-increasing");
        }

        Ok(())
    }

    /// Lobby defaults: the middle round and time options
    #[must_use]
    pub fn default_settings(&self, mode: GameMode) -> GameSettings {
        GameSettings {
            rounds: middle(&self.round_options).unwrap_or(1),
            time_limit: middle(&self.time_options).unwrap_or(60),
            mode,
        }
    }
}

fn middle(options: &[u32]) -> Option<u32> {
    options.get(options.len() / 2).copied()
}
