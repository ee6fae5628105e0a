//! Multi-round, multi-player game state and its coordinator
//!
//! The game lives in one replicated [`GameDocument`]. Clients never mutate it
//! directly: every change is a batch of field-scoped [`Update`]s written
//! through a [`DocumentStore`](crate::store::DocumentStore), and every client
//! learns the merged result from its subscription.

mod code;
mod coordinator;
mod document;
mod scoreboard;
mod update;

pub use code::{GameCode, PlayerId};
pub use coordinator::{EngineContext, GameCoordinator, GuessReceipt};
pub use document::{
    GameDocument, GameMode, GameSettings, GameStatus, PlayerDocument, RoundResult, SCHEMA_VERSION,
};
pub use scoreboard::{ScoreboardEntry, scoreboard};
pub use update::{Guard, PlayerField, Update, apply_all};
