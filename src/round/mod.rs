//! Round state machine
//!
//! [`RoundEngine`] never mutates a document. Each transition inspects the
//! latest observed [`GameDocument`] and returns the batch of field-scoped
//! [`Update`]s that performs it, or `None` when the transition does not apply.
//! Every planned batch opens with a [`Guard::Phase`] on the status and round it
//! was planned from, so a duplicate or delayed trigger is rejected by the store
//! instead of acting on a later round.
//!
//! ```text
//! Waiting/Initializing ──start──▶ Playing ──all finished──▶ RoundOver
//!                                    ▲                        │
//!                                    └──────advance───────────┤
//!                                                             ▼
//!                                                          GameOver
//! ```

mod clock;

pub use clock::RoundClock;

use crate::config::EngineConfig;
use crate::core::{Evaluation, KeyboardStatus, Word, WordError};
use crate::error::GuessError;
use crate::game::{
    GameDocument, GameStatus, Guard, PlayerDocument, PlayerField, PlayerId, RoundResult, Update,
};
use crate::wordlists::Dictionary;

/// Where a player stands after a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerProgress {
    /// Unfinished; `remaining` guesses left
    Guessing { remaining: usize },
    Finished(RoundResult),
}

/// An accepted guess, its evaluation and the writes that record it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedGuess {
    pub guess: Word,
    pub evaluation: Evaluation,
    pub progress: PlayerProgress,
    pub updates: Vec<Update>,
}

#[derive(Debug, Clone, Copy)]
pub struct RoundEngine<'a> {
    config: &'a EngineConfig,
    dictionary: &'a Dictionary,
}

impl<'a> RoundEngine<'a> {
    #[must_use]
    pub const fn new(config: &'a EngineConfig, dictionary: &'a Dictionary) -> Self {
        Self { config, dictionary }
    }

    /// Gate a raw guess: length first, then dictionary membership
    ///
    /// # Errors
    /// `TooShort`/`TooLong` on a length mismatch, `NotInWordList` for
    /// anything the validator rejects.
    pub fn validate_guess(&self, input: &str) -> Result<Word, GuessError> {
        let expected = self.config.word_length;
        let word = Word::new(input, expected).map_err(|err| match err {
            WordError::InvalidLength { expected, actual } if actual < expected => {
                GuessError::TooShort { expected, actual }
            }
            WordError::InvalidLength { expected, actual } => {
                GuessError::TooLong { expected, actual }
            }
            WordError::NonAscii | WordError::InvalidCharacters => {
                GuessError::NotInWordList(input.trim().to_lowercase())
            }
        })?;

        if !self.dictionary.validator().is_valid(word.text()) {
            return Err(GuessError::NotInWordList(word.text().to_owned()));
        }

        Ok(word)
    }

    /// Secret of the round in progress
    #[must_use]
    pub fn secret(&self, document: &GameDocument) -> Option<Word> {
        document
            .current_secret()
            .and_then(|secret| Word::new(secret, self.config.word_length).ok())
    }

    /// Plan the writes for `player` submitting `input`
    ///
    /// A correct guess finishes the player with the round score; reaching the
    /// guess limit finishes them with 0; otherwise only the guess list grows.
    ///
    /// # Errors
    /// Returns `GuessError` without planning any write if the round is not
    /// being played, the player is unknown or finished, or the guess fails
    /// validation.
    pub fn submit(
        &self,
        document: &GameDocument,
        player: &PlayerId,
        input: &str,
    ) -> Result<SubmittedGuess, GuessError> {
        if document.status != GameStatus::Playing {
            return Err(GuessError::RoundNotActive);
        }
        let me = document.player(player).ok_or(GuessError::NotInGame)?;
        if me.round_finished || me.guesses.len() >= self.config.max_guesses {
            return Err(GuessError::AlreadyFinished);
        }
        let secret = self.secret(document).ok_or(GuessError::RoundNotActive)?;

        let guess = self.validate_guess(input)?;
        let evaluation = Evaluation::evaluate(&secret, &guess);

        let mut guesses = me.guesses.clone();
        guesses.push(guess.text().to_owned());
        let guesses_used = guesses.len();

        let mut updates = vec![
            phase(document),
            Update::Player(player.clone(), PlayerField::Guesses(guesses)),
        ];

        let won = evaluation.is_solved();
        let progress = if won || guesses_used >= self.config.max_guesses {
            let score = self
                .config
                .scoring
                .round_score(won, guesses_used, document.settings.mode);
            let result = RoundResult {
                round: document.current_round,
                won,
                guesses_used,
                timed_out: false,
                score,
            };

            updates.extend(finish_updates(me, result));
            PlayerProgress::Finished(result)
        } else {
            PlayerProgress::Guessing {
                remaining: self.config.max_guesses - guesses_used,
            }
        };

        Ok(SubmittedGuess {
            guess,
            evaluation,
            progress,
            updates,
        })
    }

    /// Writes for `player` running out of time: score 0, finished, guesses kept
    ///
    /// `None` if the round is not being played or the player already finished.
    #[must_use]
    pub fn expire(
        &self,
        document: &GameDocument,
        player: &PlayerId,
    ) -> Option<(RoundResult, Vec<Update>)> {
        if document.status != GameStatus::Playing {
            return None;
        }
        let me = document.player(player)?;
        if me.round_finished {
            return None;
        }

        let result = RoundResult {
            round: document.current_round,
            won: false,
            guesses_used: me.guesses.len(),
            timed_out: true,
            score: 0,
        };
        let mut updates = vec![phase(document)];
        updates.extend(finish_updates(me, result));
        Some((result, updates))
    }

    /// `Playing → RoundOver` once every participant has finished
    #[must_use]
    pub fn conclude(&self, document: &GameDocument) -> Option<Vec<Update>> {
        (document.status.can_transition_to(GameStatus::RoundOver) && document.all_finished())
            .then(|| {
                vec![
                    phase(document),
                    Update::Require(Guard::AllFinished),
                    Update::Status(GameStatus::RoundOver),
                ]
            })
    }

    /// Lobby → round 1
    ///
    /// `None` once the game has left the lobby, so a re-issued start is a no-op.
    #[must_use]
    pub fn start(&self, document: &GameDocument) -> Option<Vec<Update>> {
        if !document.status.is_lobby() || document.current_secret().is_none() {
            return None;
        }
        let mut updates = vec![phase(document)];
        updates.extend(self.begin_round(document, 1));
        Some(updates)
    }

    /// `RoundOver →` next round (full reset) or `GameOver` after the last round
    ///
    /// `None` unless the document is in `RoundOver`, so applying an advance
    /// twice has the same effect as applying it once.
    #[must_use]
    pub fn advance(&self, document: &GameDocument) -> Option<Vec<Update>> {
        if !document.status.can_transition_to(GameStatus::GameOver) {
            return None;
        }

        let mut updates = vec![phase(document)];
        if document.is_final_round() {
            updates.push(Update::Status(GameStatus::GameOver));
        } else {
            updates.extend(self.begin_round(document, document.current_round + 1));
        }
        Some(updates)
    }

    /// Evaluations of a player's guesses this round, oldest first
    #[must_use]
    pub fn evaluations(
        &self,
        document: &GameDocument,
        player: &PlayerId,
    ) -> Vec<(Word, Evaluation)> {
        let (Some(secret), Some(me)) = (self.secret(document), document.player(player)) else {
            return Vec::new();
        };

        me.guesses
            .iter()
            .filter_map(|text| Word::new(text, secret.len()).ok())
            .map(|guess| {
                let evaluation = Evaluation::evaluate(&secret, &guess);
                (guess, evaluation)
            })
            .collect()
    }

    /// Keyboard status for a player's guesses this round
    #[must_use]
    pub fn keyboard(&self, document: &GameDocument, player: &PlayerId) -> KeyboardStatus {
        let mut status = KeyboardStatus::default();
        for (guess, evaluation) in self.evaluations(document, player) {
            status.record(&guess, &evaluation);
        }
        status
    }

    fn begin_round(&self, document: &GameDocument, round: u32) -> Vec<Update> {
        let mut updates = Vec::with_capacity(document.players.len() * 3 + 3);

        for id in document.players.keys() {
            updates.push(Update::Player(id.clone(), PlayerField::Guesses(Vec::new())));
            updates.push(Update::Player(id.clone(), PlayerField::RoundScore(0)));
            updates.push(Update::Player(id.clone(), PlayerField::RoundFinished(false)));
        }

        updates.push(Update::Status(GameStatus::Playing));
        updates.push(Update::CurrentRound(round));
        updates.push(Update::StartRoundClock);
        updates
    }
}

/// Guard pinning a batch to the status and round it was planned from
fn phase(document: &GameDocument) -> Update {
    Update::Require(Guard::Phase {
        status: document.status,
        round: document.current_round,
    })
}

fn finish_updates(player: &PlayerDocument, result: RoundResult) -> Vec<Update> {
    let id = &player.id;
    let mut results = player.results.clone();
    results.retain(|r| r.round != result.round);
    results.push(result);

    let mut updates = vec![
        Update::Player(id.clone(), PlayerField::RoundScore(result.score)),
        Update::Player(id.clone(), PlayerField::RoundFinished(true)),
        Update::Player(id.clone(), PlayerField::Results(results)),
    ];
    if result.score > 0 {
        updates.push(Update::Player(
            id.clone(),
            PlayerField::Score(player.score + result.score),
        ));
    }
    updates
}
