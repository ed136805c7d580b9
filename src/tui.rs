//! TUI (Terminal User Interface) module for the six-letter game
//!
//! This module provides a full-screen terminal front end using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, renders the board and keyboard, and
//!   implements `GameInterface` so `run_session` can drive it.
//!
//! # State Machine
//! - `EnteringGuess` → (guess submitted) → `EnteringGuess` ...
//! - `EnteringGuess` → (round decided) → `GameOver` → `EnteringGuess` on a new game

use crate::error::GameError;
use crate::feedback::Mark;
use crate::game_state::{GameInterface, UserAction};
use crate::history::History;
use crate::keyboard::{KeyboardState, derive_keyboard_state};
use crate::stats::Stats;
use crate::{MAX_GUESSES, WORD_LENGTH, debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn mark_colors(mark: Mark) -> (Color, Color) {
    match mark {
        Mark::Unseen => (Color::DarkGray, Color::White),
        Mark::Correct => (Color::Green, Color::Black),
        Mark::Misplaced => (Color::Yellow, Color::Black),
        Mark::Incorrect => (Color::Gray, Color::White),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Round decided; waiting for y/n
    GameOver,
}

/// The word being typed and the complaint about the last key, if any.
#[derive(Debug, Default)]
struct GuessEditor {
    input: String,
    error: String,
}

impl GuessEditor {
    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    /// Apply one key press. A complete word is submitted on Enter but stays
    /// in the editor until the game accepts it.
    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error.clear();
        debug_log!(
            "handle_key() - Processing key: {:?}, input: '{}'",
            key.code,
            self.input
        );

        match key.code {
            KeyCode::Char(_) if Self::has_modifier_keys(&key) => {
                debug_log!("handle_key() - Ignoring character with modifier");
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.input.len() < WORD_LENGTH {
                    self.input.push(c.to_ascii_lowercase());
                }
            }
            KeyCode::Char(c) => {
                self.error = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter if self.input.len() == WORD_LENGTH => {
                info_log!("handle_key() - Submitting guess '{}'", self.input);
                return Some(UserAction::Guess(self.input.clone()));
            }
            KeyCode::Enter => {
                self.error = format!("Guess must be exactly {WORD_LENGTH} letters!");
            }
            KeyCode::Tab => return Some(UserAction::AutoGuess),
            KeyCode::F(1) => return Some(UserAction::Help),
            KeyCode::F(2) => return Some(UserAction::Keyboard),
            KeyCode::Esc => return Some(UserAction::Quit),
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn reset(&mut self) {
        self.input.clear();
        self.error.clear();
    }
}

/// Runs the terminal restore at most once.
#[derive(Debug, Default)]
struct RestoreGuard {
    restored: bool,
}

impl RestoreGuard {
    fn restore_with(&mut self, restore: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        restore()?;
        self.restored = true;
        Ok(())
    }
}

fn win_message(guesses: usize, stats: &Stats) -> String {
    let plural = if guesses == 1 { "guess" } else { "guesses" };
    format!("Correct! You won in {guesses} {plural}!\n{stats}")
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    history: &'a History,
    keyboard: &'a KeyboardState,
    current_input: &'a str,
    state: TuiState,
    show_help: bool,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    history: History,
    editor: GuessEditor,
    state: TuiState,
    show_help: bool,
    message: String,
    status: String,
    guard: RestoreGuard,
}

impl TuiInterface {
    /// Switch the terminal to raw mode and the alternate screen.
    ///
    /// # Errors
    /// Fails if the terminal cannot be configured.
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            history: History::new(),
            editor: GuessEditor::default(),
            state: TuiState::EnteringGuess,
            show_help: false,
            message: String::new(),
            status: "Ready to start".to_string(),
            guard: RestoreGuard::default(),
        })
    }

    /// Leave raw mode and the alternate screen. Later calls do nothing.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        let backend = self.terminal.backend_mut();
        self.guard.restore_with(|| {
            disable_raw_mode()?;
            execute!(backend, LeaveAlternateScreen, cursor::Show)?;
            Ok(())
        })
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let keyboard = derive_keyboard_state(&self.history);
        let ctx = RenderContext {
            history: &self.history,
            keyboard: &keyboard,
            current_input: &self.editor.input,
            state: self.state,
            show_help: self.show_help,
            message: &self.message,
            error_message: &self.editor.error,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(14),   // Board and side panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_board(f, middle[0], ctx);
        Self::render_info(f, middle[1], ctx);
        Self::render_status(f, chunks[2], ctx.status);
        Self::render_instructions(f, chunks[3], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE SIX")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for row in 0..MAX_GUESSES {
            let y = inner.y + (row as u16 * ROW_SPACING);
            if y >= inner.y + inner.height {
                return;
            }
            let spans = if let Some(entry) = ctx.history.entries().get(row) {
                Self::letter_spans(entry.guess().chars().zip(entry.feedback().marks().iter().copied()))
            } else if row == ctx.history.len() && ctx.state == TuiState::EnteringGuess {
                let letters = (0..WORD_LENGTH).map(|i| ctx.current_input.chars().nth(i).unwrap_or(' '));
                Self::letter_spans(letters.zip(std::iter::repeat(Mark::Unseen)))
            } else {
                Self::letter_spans(std::iter::repeat((' ', Mark::Unseen)).take(WORD_LENGTH))
            };
            Self::render_line(f, inner, y, spans);
        }
    }

    fn letter_spans(letters: impl Iterator<Item = (char, Mark)>) -> Vec<Span<'static>> {
        let mut spans = vec![Span::raw("  ")];
        for (letter, mark) in letters {
            let (bg_color, fg_color) = mark_colors(mark);
            spans.push(Span::styled(
                format!(" {} ", letter.to_ascii_uppercase()),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }
        spans
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![Line::from(Span::styled("Keyboard:", HEADER_STYLE))];
        for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
            let mut spans = vec![Span::raw(" ".repeat(indent + 1))];
            for letter in row.chars() {
                let mark = ctx.keyboard.get(letter).unwrap_or_default();
                let (bg_color, fg_color) = mark_colors(mark);
                spans.push(Span::styled(
                    format!("{}", letter.to_ascii_uppercase()),
                    Style::default().fg(fg_color).bg(bg_color),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));

        if ctx.show_help {
            lines.push(Line::from(Span::styled("Help:", HEADER_STYLE)));
            lines.push(Line::from(format!("  Type a {WORD_LENGTH}-letter word, ENTER to submit")));
            lines.push(Line::from("  TAB lets the solver guess"));
            lines.push(Line::from(format!("  You have {MAX_GUESSES} guesses")));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            for text in ctx.message.lines() {
                lines.push(Line::from(Span::styled(text.to_string(), MESSAGE_STYLE)));
            }
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "ENTER: Submit | TAB: Solver guess | F1: Help | ESC: Quit",
            TuiState::GameOver => "Y: Play again | N/ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(SUCCESS_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Next key press, or `None` if nothing usable arrived within the poll timeout.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            // Only process Press events, ignore Release and Repeat to avoid double input
            Event::Key(key) if key.kind == event::KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn transition_to_game_over(&mut self, status: String) {
        self.state = TuiState::GameOver;
        self.editor.reset();
        self.status = status;
    }
}

impl GameInterface for TuiInterface {
    fn display_new_game(&mut self, answers_left: usize) {
        self.history = History::new();
        self.editor.reset();
        self.state = TuiState::EnteringGuess;
        self.message = format!("New game started. {answers_left} words left after this one.");
        self.status = "Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self, guess_number: usize) -> Option<UserAction> {
        self.status = format!("Guess {guess_number} of {MAX_GUESSES}");
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Quit");
                return Some(UserAction::Quit);
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.editor.handle_key(key) {
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error: {}", e);
                    return Some(UserAction::Quit);
                }
            }
        }
    }

    fn display_error(&mut self, error: &GameError) {
        self.editor.error = match error {
            GameError::UnknownWord(word) => format!("'{word}' is not in the word list"),
            other => other.to_string(),
        };
        self.draw_or_log();
    }

    fn display_history(&mut self, history: &History) {
        self.history = history.clone();
        self.editor.input.clear();
        if let Some(entry) = history.last() {
            self.message = format!("{}  {}", entry.guess().to_uppercase(), entry.feedback().to_code());
        }
        self.draw_or_log();
    }

    fn display_keyboard(&mut self, _keyboard: &KeyboardState) {
        self.message = "The keyboard panel shows the best mark seen for each letter.".to_string();
        self.draw_or_log();
    }

    fn display_help(&mut self) {
        self.show_help = !self.show_help;
        self.draw_or_log();
    }

    fn display_auto_guess(&mut self, guess: &str) {
        self.message = format!("Solver guesses {}", guess.to_uppercase());
        self.draw_or_log();
    }

    fn display_win(&mut self, guesses: usize, stats: &Stats) {
        self.message = win_message(guesses, stats);
        self.transition_to_game_over("You won!".to_string());
        self.draw_or_log();
    }

    fn display_loss(&mut self, answer: &str, stats: &Stats) {
        self.message = format!("The answer was {}.\n{stats}", answer.to_uppercase());
        self.transition_to_game_over("You lose!".to_string());
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> bool {
        loop {
            if self.draw().is_err() {
                return false;
            }
            match Self::next_key() {
                Ok(Some(key)) => match key.code {
                    KeyCode::Char('y' | 'Y') => return true,
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_play_again() - Input error: {}", e);
                    return false;
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_colors_are_distinct() {
        let colors: Vec<(Color, Color)> = [Mark::Unseen, Mark::Incorrect, Mark::Misplaced, Mark::Correct]
            .into_iter()
            .map(mark_colors)
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a.0, b.0);
            }
        }
    }

    #[test]
    fn test_letter_spans_layout() {
        let spans = TuiInterface::letter_spans("castle".chars().zip(std::iter::repeat(Mark::Correct)));
        // leading pad, then a letter and a gap per position
        assert_eq!(spans.len(), 1 + 2 * WORD_LENGTH);
        assert_eq!(spans[1].content, " C ");
    }

    fn press(editor: &mut GuessEditor, code: KeyCode) -> Option<UserAction> {
        editor.handle_key(KeyEvent::from(code))
    }

    #[test]
    fn test_submitted_guess_stays_until_accepted() {
        let mut editor = GuessEditor::default();
        for c in "Zzzzzz".chars() {
            assert_eq!(press(&mut editor, KeyCode::Char(c)), None);
        }
        assert_eq!(
            press(&mut editor, KeyCode::Enter),
            Some(UserAction::Guess("zzzzzz".to_string()))
        );
        // still there for editing after an unknown-word rejection
        assert_eq!(editor.input, "zzzzzz");
        press(&mut editor, KeyCode::Backspace);
        assert_eq!(editor.input, "zzzzz");
    }

    #[test]
    fn test_short_guess_and_symbols_are_rejected() {
        let mut editor = GuessEditor::default();
        press(&mut editor, KeyCode::Char('a'));
        assert_eq!(press(&mut editor, KeyCode::Enter), None);
        assert!(editor.error.contains("exactly"));
        press(&mut editor, KeyCode::Char('1'));
        assert!(editor.error.contains("'1'"));
        assert_eq!(editor.input, "a");
        assert_eq!(press(&mut editor, KeyCode::Tab), Some(UserAction::AutoGuess));
        assert_eq!(press(&mut editor, KeyCode::Esc), Some(UserAction::Quit));
    }

    #[test]
    fn test_restore_runs_once() {
        let mut guard = RestoreGuard::default();
        let mut calls = 0;
        guard
            .restore_with(|| {
                calls += 1;
                Ok(())
            })
            .unwrap();
        guard
            .restore_with(|| {
                calls += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_failed_restore_is_retried() {
        let mut guard = RestoreGuard::default();
        assert!(guard.restore_with(|| Err(io::Error::other("no tty"))).is_err());
        let mut called = false;
        guard
            .restore_with(|| {
                called = true;
                Ok(())
            })
            .unwrap();
        assert!(called);
    }

    #[test]
    fn test_win_message_names_the_guesses() {
        let stats = Stats::new();
        assert!(win_message(1, &stats).starts_with("Correct! You won in 1 guess!"));
        assert!(win_message(4, &stats).starts_with("Correct! You won in 4 guesses!"));
    }

    #[test]
    fn test_keyboard_rows_cover_alphabet() {
        let mut letters: Vec<char> = KEYBOARD_ROWS.iter().flat_map(|row| row.chars()).collect();
        letters.sort_unstable();
        let alphabet: Vec<char> = ('a'..='z').collect();
        assert_eq!(letters, alphabet);
    }
}
