//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_check_result, print_evaluation_report, print_final_summary, print_guess_row,
    print_keyboard, print_play_banner, print_rejection, print_round_header, print_round_result,
};
pub use formatters::format_remaining;
