//! Six-letter Wordle: feedback engine, candidate filter and game front ends.

pub mod assist;
pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod history;
pub mod keyboard;
pub mod logging;
pub mod solver;
pub mod stats;
pub mod tui;
pub mod wordbank;

use std::path::PathBuf;

/// Letters per word.
pub const WORD_LENGTH: usize = 6;
/// Guesses allowed per game.
pub const MAX_GUESSES: usize = 6;
pub const ALPHABET_SIZE: usize = 26;

const APP_DIR_NAME: &str = "wordle-six";

/// Per-user directory for statistics and logs.
#[must_use]
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use feedback::{FeedbackString, Mark, compute_feedback, validate_word};
pub use game_state::{Game, GameInterface, GameStatus, UserAction, run_session, validate_guess};
pub use history::{History, HistoryEntry};
pub use keyboard::{KeyboardState, derive_keyboard_state};
pub use solver::{filter_candidates, suggest_guess};
pub use stats::Stats;
pub use wordbank::{WordLists, load_words_from_file, load_words_from_str};
