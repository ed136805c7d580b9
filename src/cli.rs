use crate::error::GameError;
use crate::feedback::FeedbackString;
use crate::game_state::{GameInterface, UserAction};
use crate::history::History;
use crate::keyboard::KeyboardState;
use crate::stats::Stats;
use crate::{MAX_GUESSES, WORD_LENGTH, debug_log};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Six-letter Wordle with a candidate-narrowing solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a newline-delimited list of accepted guesses
    #[arg(long = "vocab", global = true)]
    pub vocab_path: Option<PathBuf>,

    /// Path to a newline-delimited list of possible answers
    #[arg(long = "answers", global = true)]
    pub answers_path: Option<PathBuf>,

    /// Where to keep win/loss statistics (defaults to the user data directory)
    #[arg(long = "stats", global = true)]
    pub stats_path: Option<PathBuf>,

    /// Do not load or save statistics
    #[arg(long, global = true)]
    pub no_stats: bool,

    /// Seed for answer selection, for reproducible games
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Append log records to this file instead of stderr
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play against a random secret word (default)
    Play {
        /// Use the full-screen terminal interface
        #[arg(long)]
        tui: bool,
    },
    /// Narrow down the answer of a game played elsewhere
    Assist,
    /// Print the feedback for one guess against one answer
    Feedback { guess: String, answer: String },
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Read one trimmed line; `None` at end of input or on a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::error!("Failed to read input: {e}");
            None
        }
    }
}

fn prompt(text: &str) {
    print!("{text}");
    if let Err(e) = io::stdout().flush() {
        debug_log!("Failed to flush stdout: {}", e);
    }
}

pub enum GuessInput {
    Valid(String),
    Invalid,
    Exit,
    NewGame,
}

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_lowercase())
}

/// Read a guess in assist mode.
pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!(
        "\nEnter your guess ({WORD_LENGTH} letters, or 'exit' to quit, or 'next' to start a new game):"
    );
    let Some(input) = read_trimmed_line(reader) else {
        return GuessInput::Exit;
    };
    let input = input.to_lowercase();

    match input.as_str() {
        "exit" => GuessInput::Exit,
        "next" => GuessInput::NewGame,
        _ if is_valid_word(&input) => GuessInput::Valid(input),
        _ => {
            println!("Invalid guess. Please enter {WORD_LENGTH} letters.");
            GuessInput::Invalid
        }
    }
}

/// Read the feedback for a guess in assist mode.
pub fn read_feedback<R: BufRead>(reader: &mut R) -> Option<FeedbackString> {
    println!("Enter feedback (G=green, Y=yellow, X=gray, e.g. GYXXGX):");
    let input = read_trimmed_line(reader)?;
    match input.parse() {
        Ok(feedback) => Some(feedback),
        Err(e) => {
            debug_log!("read_feedback() - {}", e);
            println!("Invalid feedback. Please enter {WORD_LENGTH} characters using G, Y, or X.");
            None
        }
    }
}

pub fn display_candidates(candidates: &[String]) {
    println!("Possible candidates ({})", candidates.len());
    for word in candidates.iter().take(5) {
        println!("{word}");
    }
    if candidates.len() > 5 {
        println!("...and {} more", candidates.len() - 5);
    }
}

pub fn display_suggestion(guess: &str) {
    println!("Suggested guess: {guess}");
}

pub fn display_no_candidates_message() {
    println!("No candidates remain. Check your inputs.");
}

pub fn display_solution_found(solution: &str) {
    println!("Solution found: {solution}");
}

pub fn display_new_round_message(word_count: usize) {
    println!("New game started. Loaded {word_count} words.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_history(history: &History) {
    for (i, entry) in history.iter().enumerate() {
        let spaced: Vec<String> = entry.guess().chars().map(String::from).collect();
        println!("---------------\nGuess {}:  {}", i + 1, spaced.join(" "));
        println!("          {}", entry.feedback());
    }
    println!("---------------\n");
}

pub fn display_keyboard(keyboard: &KeyboardState) {
    println!("\nKeyboard information\n------------");
    print!("{keyboard}");
    println!();
}

pub fn display_help() {
    println!("Enter a {WORD_LENGTH}-letter word to guess, or one of:");
    println!("  k  show what is known about each letter");
    println!("  a  let the solver make the next guess");
    println!("  h  show this help");
    println!("  q  quit");
    println!("You have {MAX_GUESSES} guesses.");
}

pub fn display_error(error: &GameError) {
    match error {
        GameError::InvalidInput { .. } => {
            println!("Invalid! Guess must be {WORD_LENGTH} letters a-z");
        }
        GameError::UnknownWord(_) => println!("Invalid! Unknown word"),
        GameError::NoCandidates => {
            println!("The solver could not find a word consistent with your guesses.");
        }
        GameError::GameOver => println!("This game is already over."),
    }
}

/// Line-oriented implementation of [`GameInterface`] over any reader.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_new_game(&mut self, answers_left: usize) {
        println!("\nNew game! {answers_left} more words left to play after this one.");
    }

    fn read_action(&mut self, guess_number: usize) -> Option<UserAction> {
        prompt(&format!("Enter guess {guess_number}: "));
        let Some(input) = read_trimmed_line(&mut self.reader) else {
            return Some(UserAction::Quit);
        };
        let input = input.to_lowercase();
        match input.as_str() {
            "" => None,
            "k" => Some(UserAction::Keyboard),
            "a" => Some(UserAction::AutoGuess),
            "h" => Some(UserAction::Help),
            "q" => Some(UserAction::Quit),
            _ => Some(UserAction::Guess(input)),
        }
    }

    fn display_error(&mut self, error: &GameError) {
        display_error(error);
    }

    fn display_history(&mut self, history: &History) {
        display_history(history);
    }

    fn display_keyboard(&mut self, keyboard: &KeyboardState) {
        display_keyboard(keyboard);
    }

    fn display_help(&mut self) {
        display_help();
    }

    fn display_auto_guess(&mut self, guess: &str) {
        println!("Solver guesses: {guess}");
    }

    fn display_win(&mut self, guesses: usize, stats: &Stats) {
        let plural = if guesses == 1 { "guess" } else { "guesses" };
        println!("Correct! You won in {guesses} {plural}!");
        println!("\n{stats}");
    }

    fn display_loss(&mut self, answer: &str, stats: &Stats) {
        println!("You lose! The answer was: {answer}");
        println!("\n{stats}");
    }

    fn read_play_again(&mut self) -> bool {
        prompt("Would you like to play again (y/n)? ");
        read_trimmed_line(&mut self.reader)
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
