//! Wordle Battle - CLI
//!
//! Play a timed solo game against the engine, or poke at its pieces:
//! evaluate a guess against a secret, or look a word up in the lists.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use wordle_battle::{
    clock::SystemClock,
    commands::{check_word, evaluate_guess, run_play},
    config::EngineConfig,
    game::{EngineContext, GameMode},
    logging::init_tracing,
    output::{print_check_result, print_evaluation_report},
    wordlists::{
        ALLOWED, Dictionary, SECRETS,
        loader::{load_from_file, words_from_slice},
    },
};

#[derive(Parser)]
#[command(
    name = "wordle_battle",
    about = "Timed multi-round Wordle with a shared game engine",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Engine configuration file (TOML); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Accepted-guess list file; the embedded list when omitted
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a timed solo game (default)
    Play {
        /// Number of rounds
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Seconds per round
        #[arg(short, long)]
        time: Option<u32>,
    },

    /// Evaluate a guess against a secret
    Evaluate {
        /// The secret word
        secret: String,

        /// The guess to evaluate
        guess: String,
    },

    /// Check whether a word is an accepted guess or a possible secret
    Check {
        /// Word to look up
        word: String,
    },
}

/// Load the engine config from `path`, or the defaults
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Build the dictionary for the configured word length
///
/// A custom accepted list replaces the embedded one; secrets always come from
/// the embedded list, filtered to words the accepted list contains.
fn load_dictionary(path: Option<&Path>, word_length: usize) -> Result<Dictionary> {
    let allowed = match path {
        Some(path) => load_from_file(path, word_length)
            .with_context(|| format!("failed to load word list from {}", path.display()))?,
        None => words_from_slice(ALLOWED, word_length),
    };

    let dictionary = Dictionary::new(&allowed, words_from_slice(SECRETS, word_length), word_length);
    debug!(
        allowed = dictionary.validator().len(),
        secrets = dictionary.secrets().len(),
        "dictionary loaded"
    );
    Ok(dictionary)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let dictionary = load_dictionary(cli.wordlist.as_deref(), config.word_length)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        rounds: None,
        time: None,
    });

    match command {
        Commands::Play { rounds, time } => run_play_command(config, dictionary, rounds, time),
        Commands::Evaluate { secret, guess } => {
            let report =
                evaluate_guess(&secret, &guess, &dictionary).map_err(|e| anyhow::anyhow!(e))?;
            print_evaluation_report(&report);
            Ok(())
        }
        Commands::Check { word } => {
            print_check_result(&check_word(&word, &dictionary));
            Ok(())
        }
    }
}

fn run_play_command(
    config: EngineConfig,
    dictionary: Dictionary,
    rounds: Option<u32>,
    time: Option<u32>,
) -> Result<()> {
    let mut settings = config.default_settings(GameMode::Solo);
    if let Some(rounds) = rounds {
        settings.rounds = rounds;
    }
    if let Some(time) = time {
        settings.time_limit = time;
    }

    info!(rounds = settings.rounds, time_limit = settings.time_limit, "starting solo game");
    let context = EngineContext::new(config, dictionary, Arc::new(SystemClock));
    run_play(context, settings)
}
