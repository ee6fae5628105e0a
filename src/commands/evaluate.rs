//! Guess evaluation command
//!
//! Scores a single guess against a chosen secret without running a game.

use crate::core::{Evaluation, Word};
use crate::wordlists::Dictionary;

/// Result of evaluating one guess
#[derive(Debug)]
pub struct EvaluationReport {
    pub secret: Word,
    pub guess: Word,
    pub evaluation: Evaluation,
    /// Whether a game would have accepted the guess
    pub guess_allowed: bool,
}

/// Evaluate `guess` against `secret`
///
/// # Errors
///
/// Returns an error if either word has the wrong length or contains anything
/// other than ASCII letters.
pub fn evaluate_guess(
    secret: &str,
    guess: &str,
    dictionary: &Dictionary,
) -> Result<EvaluationReport, String> {
    let length = dictionary.word_length();
    let secret = Word::new(secret, length).map_err(|e| format!("Invalid secret: {e}"))?;
    let guess = Word::new(guess, length).map_err(|e| format!("Invalid guess: {e}"))?;

    let evaluation = Evaluation::evaluate(&secret, &guess);
    let guess_allowed = dictionary.validator().is_valid(guess.text());

    Ok(EvaluationReport {
        secret,
        guess,
        evaluation,
        guess_allowed,
    })
}
