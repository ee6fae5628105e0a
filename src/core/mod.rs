//! Core domain types for Wordle
//!
//! This module contains the fundamental domain types: words, per-letter
//! evaluation and the aggregated keyboard status. Everything here is pure.

mod keyboard;
mod verdict;
mod word;

pub use keyboard::KeyboardStatus;
pub use verdict::{Evaluation, Verdict};
pub use word::{Word, WordError};
