//! Display functions for command results

use super::formatters::{format_remaining, guess_row, keyboard_rows};
use crate::commands::{CheckResult, EvaluationReport};
use crate::core::{Evaluation, KeyboardStatus, Word};
use crate::error::GuessError;
use crate::game::{GameDocument, GameSettings, PlayerId, RoundResult};
use colored::Colorize;

/// Print the result of evaluating a guess
pub fn print_evaluation_report(report: &EvaluationReport) {
    println!(
        "\nSecret: {}   Guess: {}",
        report.secret.text().to_uppercase().bright_yellow().bold(),
        report.guess.text().to_uppercase().bold()
    );
    println!("\n  {}", guess_row(&report.guess, &report.evaluation));
    println!("  {}\n", report.evaluation.to_emoji());

    if !report.guess_allowed {
        println!("{}", "Note: this guess is not in the word list".yellow());
    }
}

/// Print where a word stands in the loaded lists
pub fn print_check_result(result: &CheckResult) {
    let mark = |yes: bool| if yes { "yes".green() } else { "no".red() };

    println!("\n{}", result.word.to_uppercase().bright_yellow().bold());
    println!("  Accepted guess: {}", mark(result.allowed));
    println!("  Possible secret: {}\n", mark(result.secret));
}

pub fn print_play_banner(settings: &GameSettings, max_guesses: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "WORDLE BATTLE · SOLO".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!(
        "\n{} rounds, {} per round, {max_guesses} guesses each.",
        settings.rounds,
        format_remaining(i64::from(settings.time_limit))
    );
    println!("Commands: 'keys' shows the keyboard, 'quit' ends the game.");
}

pub fn print_round_header(round: u32, total: u32, remaining: Option<i64>) {
    println!("\n{}", "─".repeat(60).cyan());
    match remaining {
        Some(secs) => println!("Round {round}/{total}   ⏱ {}", format_remaining(secs)),
        None => println!("Round {round}/{total}"),
    }
    println!("{}", "─".repeat(60).cyan());
}

pub fn print_guess_row(guess: &Word, evaluation: &Evaluation) {
    println!("  {}", guess_row(guess, evaluation));
}

pub fn print_keyboard(keyboard: &KeyboardStatus) {
    println!();
    for row in keyboard_rows(keyboard) {
        println!("  {row}");
    }
}

pub fn print_rejection(error: &GuessError) {
    println!("{}", format!("  {error}").yellow());
}

pub fn print_round_result(result: &RoundResult, secret: &str) {
    println!();
    if result.won {
        let noun = if result.guesses_used == 1 { "guess" } else { "guesses" };
        println!(
            "{}",
            format!("✅ Solved in {} {noun}! +{} points", result.guesses_used, result.score)
                .green()
                .bold()
        );
    } else if result.timed_out {
        println!(
            "{} The word was {}",
            "⏰ Time's up!".red().bold(),
            secret.to_uppercase().bright_yellow().bold()
        );
    } else {
        println!(
            "{} The word was {}",
            "❌ Out of guesses.".red().bold(),
            secret.to_uppercase().bright_yellow().bold()
        );
    }
}

/// Per-round outcomes and the final score for one player
pub fn print_final_summary(document: &GameDocument, player: &PlayerId) {
    let Some(me) = document.player(player) else {
        return;
    };

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "GAME SUMMARY".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    for result in &me.results {
        let word = document
            .secret_for_round(result.round)
            .unwrap_or_default()
            .to_uppercase();
        let outcome = if result.won {
            format!("solved in {}", result.guesses_used).green()
        } else if result.timed_out {
            "timed out".red()
        } else {
            "missed".red()
        };
        println!(
            "  Round {:>2}  {word}  {outcome:<16}  {:>4} pts",
            result.round, result.score
        );
    }

    println!("{}", "─".repeat(60).cyan());
    println!(
        "  Total score: {}",
        me.score.to_string().bright_yellow().bold()
    );
    println!();
}
