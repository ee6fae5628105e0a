//! Formatting utilities for terminal output

use crate::core::{Evaluation, KeyboardStatus, Verdict, Word};
use colored::{ColoredString, Colorize};

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// One letter as a colored tile
#[must_use]
pub fn tile(letter: char, verdict: Option<Verdict>) -> ColoredString {
    let text = format!(" {} ", letter.to_ascii_uppercase());
    match verdict {
        Some(Verdict::Correct) => text.black().on_green().bold(),
        Some(Verdict::Present) => text.black().on_yellow().bold(),
        Some(Verdict::Absent) => text.white().on_bright_black(),
        None => text.normal(),
    }
}

/// A guess rendered as a row of tiles
#[must_use]
pub fn guess_row(guess: &Word, evaluation: &Evaluation) -> String {
    guess
        .text()
        .chars()
        .zip(evaluation.verdicts())
        .map(|(letter, &verdict)| tile(letter, Some(verdict)).to_string())
        .collect()
}

/// QWERTY rows with each key colored by its best verdict so far
#[must_use]
pub fn keyboard_rows(keyboard: &KeyboardStatus) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let keys: String = row
                .chars()
                .map(|key| tile(key, keyboard.get(key)).to_string())
                .collect();
            format!("{}{keys}", " ".repeat(indent * 2))
        })
        .collect()
}

/// Seconds as `m:ss`
#[must_use]
pub fn format_remaining(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_time_is_minutes_and_seconds() {
        assert_eq!(format_remaining(90), "1:30");
        assert_eq!(format_remaining(65), "1:05");
        assert_eq!(format_remaining(7), "0:07");
        assert_eq!(format_remaining(-3), "0:00");
    }

    #[test]
    fn tiles_show_uppercase_letters() {
        let plain = tile('q', None);
        assert_eq!(&*plain, " Q ");
    }

    #[test]
    fn keyboard_has_three_indented_rows() {
        colored::control::set_override(false);
        let rows = keyboard_rows(&KeyboardStatus::default());
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with(" Q "));
        assert!(rows[1].starts_with("   A "));
        assert!(rows[2].starts_with("     Z "));
    }
}
