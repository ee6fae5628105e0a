//! Field-scoped document writes
//!
//! Every mutation of a game document is a batch of [`Update`]s, each touching
//! one narrow field path. Writes carry absolute values, never increments, so
//! re-applying the same batch leaves the document unchanged. Concurrent
//! batches from different players touch disjoint paths and do not conflict.
//!
//! Shared transitions (round over, advance, join) open with one or more
//! [`Update::Require`] guards. The store checks them against the document it
//! holds, so a batch planned from a stale view is rejected whole.

use super::document::{GameDocument, GameSettings, GameStatus, PlayerDocument, RoundResult};
use super::PlayerId;
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use std::fmt;

/// Precondition a batch is committed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// `status` and `currentRound` are exactly these
    Phase { status: GameStatus, round: u32 },
    /// Every seated player has finished the current round
    AllFinished,
    /// Fewer than `max` players are seated
    OpenSeat { max: usize },
}

impl Guard {
    #[must_use]
    pub fn holds(self, document: &GameDocument) -> bool {
        match self {
            Self::Phase { status, round } => {
                document.status == status && document.current_round == round
            }
            Self::AllFinished => document.all_finished(),
            Self::OpenSeat { max } => document.players.len() < max,
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phase { status, round } => write!(f, "status {status:?} in round {round}"),
            Self::AllFinished => write!(f, "every player finished"),
            Self::OpenSeat { max } => write!(f, "fewer than {max} players"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Reject the whole batch unless the guard holds
    Require(Guard),
    Status(GameStatus),
    CurrentRound(u32),
    Settings(GameSettings),
    SecretWords(Vec<String>),
    /// Set `roundStartTime` to the store's own write time
    StartRoundClock,
    /// Seat a new player (`players.<id>`) at the next free seat
    ///
    /// The seat is assigned when the store applies the write. A player already
    /// in the document is left as it is.
    AddPlayer(PlayerDocument),
    /// Write one field of an existing player (`players.<id>.<field>`)
    Player(PlayerId, PlayerField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerField {
    Guesses(Vec<String>),
    Score(u32),
    RoundScore(u32),
    RoundFinished(bool),
    Results(Vec<RoundResult>),
}

impl PlayerField {
    const fn name(&self) -> &'static str {
        match self {
            Self::Guesses(_) => "guesses",
            Self::Score(_) => "score",
            Self::RoundScore(_) => "roundScore",
            Self::RoundFinished(_) => "roundFinished",
            Self::Results(_) => "results",
        }
    }
}

impl Update {
    /// Dotted field path this update writes (or a guard reads), e.g.
    /// `players.abc.guesses`
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Require(Guard::Phase { .. }) => "status".to_owned(),
            Self::Require(Guard::AllFinished) => "players.*.roundFinished".to_owned(),
            Self::Require(Guard::OpenSeat { .. }) => "players".to_owned(),
            Self::Status(_) => "status".to_owned(),
            Self::CurrentRound(_) => "currentRound".to_owned(),
            Self::Settings(_) => "settings".to_owned(),
            Self::SecretWords(_) => "secretWords".to_owned(),
            Self::StartRoundClock => "roundStartTime".to_owned(),
            Self::AddPlayer(player) => format!("players.{}", player.id),
            Self::Player(id, field) => format!("players.{id}.{}", field.name()),
        }
    }

    /// Apply this write to `document`; `now` resolves store-assigned timestamps
    ///
    /// # Errors
    /// Returns `StoreError::UnknownPlayer` when writing a field of a player
    /// that is not in the document, `StoreError::GuardFailed` when a guard
    /// does not hold.
    pub fn apply(&self, document: &mut GameDocument, now: DateTime<Utc>) -> Result<(), StoreError> {
        match self {
            Self::Require(guard) => {
                if !guard.holds(document) {
                    return Err(StoreError::GuardFailed(*guard));
                }
            }
            Self::Status(status) => document.status = *status,
            Self::CurrentRound(round) => document.current_round = *round,
            Self::Settings(settings) => document.settings = *settings,
            Self::SecretWords(words) => document.secret_words.clone_from(words),
            Self::StartRoundClock => document.round_start_time = Some(now),
            Self::AddPlayer(player) => {
                if !document.players.contains_key(&player.id) {
                    let seat = document.next_seat();
                    document.players.insert(
                        player.id.clone(),
                        PlayerDocument {
                            seat,
                            ..player.clone()
                        },
                    );
                }
            }
            Self::Player(id, field) => {
                let player = document
                    .players
                    .get_mut(id)
                    .ok_or_else(|| StoreError::UnknownPlayer(id.clone()))?;

                match field {
                    PlayerField::Guesses(guesses) => player.guesses.clone_from(guesses),
                    PlayerField::Score(score) => player.score = *score,
                    PlayerField::RoundScore(score) => player.round_score = *score,
                    PlayerField::RoundFinished(finished) => player.round_finished = *finished,
                    PlayerField::Results(results) => player.results.clone_from(results),
                }
            }
        }

        Ok(())
    }
}

/// Apply a batch atomically: either every update lands or none do
///
/// # Errors
/// Returns the first `StoreError` hit; `document` is left untouched.
pub fn apply_all(
    document: &mut GameDocument,
    updates: &[Update],
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    let mut staged = document.clone();
    for update in updates {
        update.apply(&mut staged, now)?;
    }
    *document = staged;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameCode, GameMode};
    use pretty_assertions::assert_eq;

    fn document() -> GameDocument {
        let host = PlayerDocument::new(PlayerId::new("host"), "Ada", 0);
        GameDocument::new(
            GameCode::parse("ROOM01"),
            host,
            GameSettings {
                rounds: 3,
                time_limit: 60,
                mode: GameMode::Multiplayer,
            },
            vec!["crane".into(), "mango".into(), "allow".into()],
        )
    }

    #[test]
    fn paths_are_field_scoped() {
        let id = PlayerId::new("p1");
        assert_eq!(
            Update::Player(id.clone(), PlayerField::Guesses(vec![])).path(),
            "players.p1.guesses"
        );
        assert_eq!(
            Update::Player(id, PlayerField::RoundFinished(true)).path(),
            "players.p1.roundFinished"
        );
        assert_eq!(Update::StartRoundClock.path(), "roundStartTime");
    }

    #[test]
    fn player_writes_touch_only_their_field() {
        let mut doc = document();
        let host = PlayerId::new("host");
        let before = doc.player(&host).unwrap().clone();

        apply_all(
            &mut doc,
            &[Update::Player(
                host.clone(),
                PlayerField::Guesses(vec!["slate".into()]),
            )],
            Utc::now(),
        )
        .unwrap();

        let after = doc.player(&host).unwrap();
        assert_eq!(after.guesses, vec!["slate".to_owned()]);
        assert_eq!(after.score, before.score);
        assert_eq!(after.round_finished, before.round_finished);
    }

    #[test]
    fn batches_are_atomic() {
        let mut doc = document();
        let original = doc.clone();

        let err = apply_all(
            &mut doc,
            &[
                Update::Status(GameStatus::Playing),
                Update::Player(PlayerId::new("ghost"), PlayerField::Score(10)),
            ],
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(err, StoreError::UnknownPlayer(PlayerId::new("ghost")));
        assert_eq!(doc, original);
    }

    #[test]
    fn reapplying_a_batch_is_a_no_op() {
        let mut doc = document();
        let now = Utc::now();
        let batch = [
            Update::Status(GameStatus::RoundOver),
            Update::CurrentRound(2),
            Update::Player(PlayerId::new("host"), PlayerField::RoundFinished(false)),
        ];

        apply_all(&mut doc, &batch, now).unwrap();
        let once = doc.clone();
        apply_all(&mut doc, &batch, now).unwrap();
        assert_eq!(doc, once);
    }

    #[test]
    fn failed_guard_rejects_the_whole_batch() {
        let mut doc = document();
        let original = doc.clone();
        let guard = Guard::Phase {
            status: GameStatus::Playing,
            round: 1,
        };

        let err = apply_all(
            &mut doc,
            &[Update::Require(guard), Update::Status(GameStatus::RoundOver)],
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(err, StoreError::GuardFailed(guard));
        assert_eq!(doc, original);
    }

    #[test]
    fn guards_read_the_document() {
        let mut doc = document();
        assert!(Guard::OpenSeat { max: 2 }.holds(&doc));
        assert!(!Guard::OpenSeat { max: 1 }.holds(&doc));
        assert!(!Guard::AllFinished.holds(&doc));

        doc.players.get_mut(&PlayerId::new("host")).unwrap().round_finished = true;
        assert!(Guard::AllFinished.holds(&doc));
        assert!(
            Guard::Phase {
                status: doc.status,
                round: doc.current_round
            }
            .holds(&doc)
        );
    }

    #[test]
    fn seats_are_assigned_on_apply() {
        let mut doc = document();
        let now = Utc::now();
        // both joiners planned seat 1 from the same view
        let bo = PlayerDocument::new(PlayerId::new("bo"), "Bo", 1);
        let cy = PlayerDocument::new(PlayerId::new("cy"), "Cy", 1);

        apply_all(&mut doc, &[Update::AddPlayer(bo.clone())], now).unwrap();
        apply_all(&mut doc, &[Update::AddPlayer(cy)], now).unwrap();
        assert_eq!(doc.player(&PlayerId::new("bo")).unwrap().seat, 1);
        assert_eq!(doc.player(&PlayerId::new("cy")).unwrap().seat, 2);

        // re-seating an existing player changes nothing
        let before = doc.clone();
        apply_all(&mut doc, &[Update::AddPlayer(bo)], now).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn round_clock_uses_store_time() {
        let mut doc = document();
        let now = Utc::now();
        apply_all(&mut doc, &[Update::StartRoundClock], now).unwrap();
        assert_eq!(doc.round_start_time, Some(now));
    }
}
