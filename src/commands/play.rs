//! Solo game in the terminal
//!
//! Runs a full timed game against the engine with an in-process store. The
//! timer is checked whenever a line of input arrives; a guess entered after
//! the round's time ran out is rejected and the round counts as timed out.

use crate::error::{Error, GuessError};
use crate::game::{EngineContext, GameCoordinator, GameSettings, GameStatus};
use crate::output::{
    format_remaining, print_final_summary, print_guess_row, print_keyboard, print_play_banner,
    print_rejection, print_round_header, print_round_result,
};
use crate::round::PlayerProgress;
use crate::store::{DocumentStore, MemoryStore};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::sync::Arc;

/// Play a solo game reading guesses from stdin
///
/// Typing `quit` (or closing stdin) ends the game early; `keys` shows the
/// keyboard summary for the current round.
///
/// # Errors
///
/// Returns an error if the game cannot be created or stdin/stdout fail.
pub fn run_play(context: EngineContext, settings: GameSettings) -> Result<()> {
    let store = MemoryStore::new(Arc::clone(&context.clock));
    let max_guesses = context.config.max_guesses;
    let mut game = GameCoordinator::new(store, context, "player");

    game.start_solo(settings).context("failed to start a solo game")?;
    print_play_banner(&settings, max_guesses);

    let mut shown_round = 0;
    loop {
        let remaining = game.tick()?;
        let Some(document) = game.document() else {
            break;
        };
        if document.status == GameStatus::GameOver {
            break;
        }
        if document.current_round != shown_round {
            shown_round = document.current_round;
            print_round_header(shown_round, document.total_rounds(), remaining);
        }

        let prompt = remaining.map_or_else(
            || "Guess".to_owned(),
            |secs| format!("Guess [{}]", format_remaining(secs)),
        );
        let Some(input) = read_input(&prompt)? else {
            break;
        };

        match input.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "keys" => {
                print_keyboard(&game.keyboard());
                continue;
            }
            _ => {}
        }

        match game.submit_guess(&input) {
            Ok(receipt) => {
                print_guess_row(&receipt.guess, &receipt.evaluation);
                match receipt.progress {
                    PlayerProgress::Guessing { remaining } => {
                        print_keyboard(&game.keyboard());
                        println!("{remaining} guesses left\n");
                    }
                    PlayerProgress::Finished(result) => {
                        let secret = game
                            .document()
                            .and_then(|d| d.secret_for_round(result.round))
                            .unwrap_or_default();
                        print_round_result(&result, secret);
                    }
                }
            }
            Err(Error::Guess(GuessError::TimeUp)) => {
                show_timeout(&game, shown_round);
            }
            Err(Error::Guess(err)) => print_rejection(&err),
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(document) = game.document() {
        print_final_summary(document, game.player_id());
    }
    game.leave();
    Ok(())
}

fn show_timeout<S: DocumentStore>(game: &GameCoordinator<S>, round: u32) {
    let Some(document) = game.document() else {
        return;
    };
    let result = document
        .player(game.player_id())
        .and_then(|p| p.result_for(round));

    if let Some(result) = result {
        print_round_result(result, document.secret_for_round(round).unwrap_or_default());
    }
}

/// Read one trimmed line; `None` at end of input
fn read_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_lowercase()))
}
