//! Command implementations

pub mod check;
pub mod evaluate;
pub mod play;

pub use check::{CheckResult, check_word};
pub use evaluate::{EvaluationReport, evaluate_guess};
pub use play::run_play;
