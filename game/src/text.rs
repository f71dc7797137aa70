//! User-facing strings.

use std::time::Duration;

pub const APP_NAME: &str = "Tapper";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

/// Whole seconds, rounded down.
pub fn time_left_label(time_remaining: Duration) -> String {
    format!("Time Left: {} seconds", time_remaining.as_secs())
}

pub fn game_over_message(score: u32) -> String {
    format!("Time's up! Your score was: {score}")
}

pub fn about_title() -> String {
    format!("{APP_NAME} {APP_VERSION}")
}

pub fn about_message() -> &'static str {
    "Tap the button as many times as you can before the clock runs out. \
     The timer starts on your first tap."
}
