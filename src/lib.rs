//! Wordle Battle
//!
//! A timed, multi-round Wordle engine for one or many players sharing a
//! replicated game document.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_battle::core::{Evaluation, Word};
//!
//! let secret = Word::new("allow", 5).unwrap();
//! let guess = Word::new("lolly", 5).unwrap();
//!
//! let evaluation = Evaluation::evaluate(&secret, &guess);
//! assert_eq!(evaluation, "YYG--".parse::<Evaluation>().unwrap());
//! ```
//!
//! A full game runs through a [`GameCoordinator`](game::GameCoordinator) per
//! client over a shared [`DocumentStore`](store::DocumentStore):
//!
//! ```rust
//! use std::sync::Arc;
//! use wordle_battle::clock::SystemClock;
//! use wordle_battle::config::EngineConfig;
//! use wordle_battle::game::{EngineContext, GameCoordinator, GameMode};
//! use wordle_battle::store::MemoryStore;
//! use wordle_battle::wordlists::Dictionary;
//!
//! let config = EngineConfig::default();
//! let settings = config.default_settings(GameMode::Multiplayer);
//! let context = EngineContext::new(config, Dictionary::embedded(), Arc::new(SystemClock));
//! let store = MemoryStore::default();
//!
//! let mut host = GameCoordinator::new(store.clone(), context.clone(), "Ada");
//! let code = host.create_game(settings).unwrap();
//!
//! let mut guest = GameCoordinator::new(store, context, "Grace");
//! guest.join_game(code.as_str()).unwrap();
//! host.start_game().unwrap();
//! ```

// Core domain types
pub mod core;

// Word lists, validation and secret selection
pub mod wordlists;

pub mod scoring;

// Round state machine and timer
pub mod round;

// Replicated game document and coordinator
pub mod game;

// Shared document store
pub mod store;

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub use error::{Error, Result};
