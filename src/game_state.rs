use crate::error::GameError;
use crate::feedback::validate_word;
use crate::history::{History, HistoryEntry};
use crate::keyboard::{KeyboardState, derive_keyboard_state};
use crate::solver::suggest_guess;
use crate::stats::Stats;
use crate::wordbank::WordLists;
use crate::{MAX_GUESSES, debug_log, info_log};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won { guesses: usize },
    Lost,
}

/// A single round against one secret answer.
#[derive(Debug, Clone)]
pub struct Game {
    answer: String,
    history: History,
}

impl Game {
    /// # Errors
    /// Returns `GameError::InvalidInput` if the answer is malformed.
    pub fn new(answer: &str) -> Result<Self, GameError> {
        validate_word(answer)?;
        Ok(Self {
            answer: answer.to_string(),
            history: History::new(),
        })
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// 1-based number of the next guess.
    #[must_use]
    pub fn guess_number(&self) -> usize {
        self.history.len() + 1
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.history.last() {
            Some(entry) if entry.feedback().is_win() => GameStatus::Won {
                guesses: self.history.len(),
            },
            _ if self.history.len() >= MAX_GUESSES => GameStatus::Lost,
            _ => GameStatus::InProgress,
        }
    }

    /// Score `guess` and append it to the history.
    ///
    /// # Errors
    /// `GameError::GameOver` once the round is decided, `GameError::InvalidInput`
    /// for a malformed guess.
    pub fn guess(&mut self, guess: &str) -> Result<&HistoryEntry, GameError> {
        if self.status() != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }
        let entry = HistoryEntry::scored(guess, &self.answer)?;
        debug_log!("Guess {}: {} -> {}", self.guess_number(), guess, entry.feedback().to_code());
        self.history.push(entry);
        self.history.last().ok_or(GameError::GameOver)
    }

    #[must_use]
    pub fn keyboard(&self) -> KeyboardState {
        derive_keyboard_state(&self.history)
    }
}

/// Check a typed guess before it reaches the feedback engine.
///
/// # Errors
/// `GameError::InvalidInput` for the wrong length or characters,
/// `GameError::UnknownWord` if it is not an accepted guess.
pub fn validate_guess(guess: &str, words: &WordLists) -> Result<(), GameError> {
    validate_word(guess)?;
    if !words.is_valid_guess(guess) {
        return Err(GameError::UnknownWord(guess.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Keyboard,
    AutoGuess,
    Help,
    Quit,
}

/// Front end driven by [`run_session`].
pub trait GameInterface {
    fn display_new_game(&mut self, answers_left: usize);
    /// `None` means the input was rejected and the user should be asked again.
    fn read_action(&mut self, guess_number: usize) -> Option<UserAction>;
    fn display_error(&mut self, error: &GameError);
    fn display_history(&mut self, history: &History);
    fn display_keyboard(&mut self, keyboard: &KeyboardState);
    fn display_help(&mut self);
    fn display_auto_guess(&mut self, guess: &str);
    fn display_win(&mut self, guesses: usize, stats: &Stats);
    fn display_loss(&mut self, answer: &str, stats: &Stats);
    fn read_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self);
}

/// Answers not yet used this session.
#[derive(Debug, Clone)]
pub struct AnswerPool {
    all: Vec<String>,
    remaining: Vec<String>,
}

impl AnswerPool {
    #[must_use]
    pub fn new(answers: &[String]) -> Self {
        Self {
            all: answers.to_vec(),
            remaining: answers.to_vec(),
        }
    }

    /// Draw a random unused answer, refilling the pool once it runs dry.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.remaining.is_empty() {
            info_log!("Every answer has been played, refilling the pool");
            self.remaining.clone_from(&self.all);
        }
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.remaining.len());
        Some(self.remaining.remove(index))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

enum RoundOutcome {
    Won(usize),
    Lost,
    Quit,
}

fn submit_guess<I: GameInterface + ?Sized>(game: &mut Game, guess: &str, interface: &mut I) {
    match game.guess(guess) {
        Ok(_) => interface.display_history(game.history()),
        Err(e) => interface.display_error(&e),
    }
}

fn play_round<I: GameInterface + ?Sized>(
    game: &mut Game,
    words: &WordLists,
    interface: &mut I,
) -> RoundOutcome {
    loop {
        match game.status() {
            GameStatus::Won { guesses } => return RoundOutcome::Won(guesses),
            GameStatus::Lost => return RoundOutcome::Lost,
            GameStatus::InProgress => {}
        }

        let Some(action) = interface.read_action(game.guess_number()) else {
            continue;
        };
        debug_log!("play_round() - action {:?}", action);

        match action {
            UserAction::Quit => return RoundOutcome::Quit,
            UserAction::Help => interface.display_help(),
            UserAction::Keyboard => interface.display_keyboard(&game.keyboard()),
            UserAction::AutoGuess => match suggest_guess(words.vocabulary(), game.history()) {
                Ok(guess) => {
                    interface.display_auto_guess(&guess);
                    submit_guess(game, &guess, interface);
                }
                Err(e) => interface.display_error(&e),
            },
            UserAction::Guess(guess) => match validate_guess(&guess, words) {
                Ok(()) => submit_guess(game, &guess, interface),
                Err(e) => interface.display_error(&e),
            },
        }
    }
}

/// Play rounds until the user quits or declines another game.
///
/// Answers are drawn from `rng` without repetition until every answer has
/// been used. Returns the updated statistics.
///
/// # Errors
/// Returns `GameError::InvalidInput` if the answer list is empty or holds a
/// malformed word.
pub fn run_session<I, R>(
    words: &WordLists,
    interface: &mut I,
    rng: &mut R,
    mut stats: Stats,
) -> Result<Stats, GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut pool = AnswerPool::new(words.answers());
    loop {
        let answer = pool
            .draw(rng)
            .ok_or_else(|| GameError::invalid("", "the answer list is empty"))?;
        let mut game = Game::new(&answer)?;
        info_log!("Starting a new game, {} answers left", pool.remaining());
        interface.display_new_game(pool.remaining());

        match play_round(&mut game, words, interface) {
            RoundOutcome::Won(guesses) => {
                stats.record_win(guesses);
                interface.display_win(guesses, &stats);
            }
            RoundOutcome::Lost => {
                stats.record_loss();
                interface.display_loss(game.answer(), &stats);
            }
            RoundOutcome::Quit => {
                interface.display_exit_message();
                return Ok(stats);
            }
        }

        if !interface.read_play_again() {
            interface.display_exit_message();
            return Ok(stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<UserAction>,
        play_again: VecDeque<bool>,
        errors: Vec<GameError>,
        auto_guesses: Vec<String>,
        keyboards: Vec<KeyboardState>,
        wins: Vec<usize>,
        losses: Vec<String>,
        games_started: usize,
        helped: bool,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<UserAction>, play_again: Vec<bool>) -> Self {
            Self {
                actions: actions.into(),
                play_again: play_again.into(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_new_game(&mut self, _answers_left: usize) {
            self.games_started += 1;
        }
        fn read_action(&mut self, _guess_number: usize) -> Option<UserAction> {
            Some(self.actions.pop_front().unwrap_or(UserAction::Quit))
        }
        fn display_error(&mut self, error: &GameError) {
            self.errors.push(error.clone());
        }
        fn display_history(&mut self, _history: &History) {}
        fn display_keyboard(&mut self, keyboard: &KeyboardState) {
            self.keyboards.push(*keyboard);
        }
        fn display_help(&mut self) {
            self.helped = true;
        }
        fn display_auto_guess(&mut self, guess: &str) {
            self.auto_guesses.push(guess.to_string());
        }
        fn display_win(&mut self, guesses: usize, _stats: &Stats) {
            self.wins.push(guesses);
        }
        fn display_loss(&mut self, answer: &str, _stats: &Stats) {
            self.losses.push(answer.to_string());
        }
        fn read_play_again(&mut self) -> bool {
            self.play_again.pop_front().unwrap_or(false)
        }
        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn single_answer_lists() -> WordLists {
        WordLists::new(
            vec![
                "castle".to_string(),
                "planet".to_string(),
                "silver".to_string(),
                "garden".to_string(),
                "harden".to_string(),
                "warden".to_string(),
                "market".to_string(),
            ],
            vec!["garden".to_string()],
        )
        .unwrap()
    }

    fn guess(word: &str) -> UserAction {
        UserAction::Guess(word.to_string())
    }

    #[test]
    fn test_game_win() {
        let mut game = Game::new("garden").unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        game.guess("planet").unwrap();
        assert_eq!(game.guess_number(), 2);
        assert!(game.guess("garden").unwrap().feedback().is_win());
        assert_eq!(game.status(), GameStatus::Won { guesses: 2 });
        assert_eq!(game.guess("garden"), Err(GameError::GameOver));
    }

    #[test]
    fn test_game_loss_after_max_guesses() {
        let mut game = Game::new("garden").unwrap();
        for _ in 0..MAX_GUESSES {
            game.guess("planet").unwrap();
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.guess("garden"), Err(GameError::GameOver));
        assert_eq!(game.history().len(), MAX_GUESSES);
    }

    #[test]
    fn test_win_on_last_guess() {
        let mut game = Game::new("garden").unwrap();
        for _ in 0..MAX_GUESSES - 1 {
            game.guess("planet").unwrap();
        }
        game.guess("garden").unwrap();
        assert_eq!(game.status(), GameStatus::Won { guesses: MAX_GUESSES });
    }

    #[test]
    fn test_bad_guess_does_not_count() {
        let mut game = Game::new("garden").unwrap();
        assert!(game.guess("gard").is_err());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_validate_guess() {
        let words = single_answer_lists();
        assert!(validate_guess("castle", &words).is_ok());
        assert!(matches!(
            validate_guess("cast", &words),
            Err(GameError::InvalidInput { .. })
        ));
        assert_eq!(
            validate_guess("bottle", &words),
            Err(GameError::UnknownWord("bottle".to_string()))
        );
    }

    #[test]
    fn test_answer_pool_does_not_repeat() {
        let answers: Vec<String> = ["castle", "planet", "silver"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let mut pool = AnswerPool::new(&answers);
        let mut rng = StdRng::seed_from_u64(7);
        let mut drawn: Vec<String> = (0..3).map(|_| pool.draw(&mut rng).unwrap()).collect();
        drawn.sort();
        assert_eq!(drawn, vec!["castle", "planet", "silver"]);
        assert_eq!(pool.remaining(), 0);
        assert!(pool.draw(&mut rng).is_some());
        assert_eq!(pool.remaining(), 2);
    }

    #[test]
    fn test_answer_pool_empty() {
        let mut pool = AnswerPool::new(&[]);
        assert!(pool.draw(&mut StdRng::seed_from_u64(1)).is_none());
    }

    #[test]
    fn test_session_win_records_stats() {
        let words = single_answer_lists();
        let mut interface = ScriptedInterface::new(
            vec![guess("planet"), UserAction::Help, guess("garden")],
            vec![false],
        );
        let mut rng = StdRng::seed_from_u64(1);
        let stats = run_session(&words, &mut interface, &mut rng, Stats::new()).unwrap();
        assert_eq!(interface.wins, vec![2]);
        assert!(interface.helped);
        assert!(interface.exited);
        assert_eq!(stats.won_in()[1], 1);
    }

    #[test]
    fn test_session_rejects_unknown_and_malformed_words() {
        let words = single_answer_lists();
        let mut interface = ScriptedInterface::new(
            vec![guess("bottle"), guess("gar"), guess("garden")],
            vec![],
        );
        let mut rng = StdRng::seed_from_u64(1);
        let stats = run_session(&words, &mut interface, &mut rng, Stats::new()).unwrap();
        assert_eq!(interface.errors.len(), 2);
        assert_eq!(interface.wins, vec![1]);
        assert_eq!(stats.games_played(), 1);
    }

    #[test]
    fn test_session_loss() {
        let words = single_answer_lists();
        let actions = vec![guess("planet"); MAX_GUESSES];
        let mut interface = ScriptedInterface::new(actions, vec![false]);
        let mut rng = StdRng::seed_from_u64(1);
        let stats = run_session(&words, &mut interface, &mut rng, Stats::new()).unwrap();
        assert_eq!(interface.losses, vec!["garden"]);
        assert_eq!(stats.lost(), 1);
    }

    #[test]
    fn test_session_auto_guess_reaches_answer() {
        let words = single_answer_lists();
        let actions = vec![UserAction::AutoGuess; MAX_GUESSES];
        let mut interface = ScriptedInterface::new(actions, vec![false]);
        let mut rng = StdRng::seed_from_u64(1);
        run_session(&words, &mut interface, &mut rng, Stats::new()).unwrap();
        // castle, planet, ... are ruled out one by one until garden is suggested
        assert_eq!(interface.auto_guesses.first().map(String::as_str), Some("castle"));
        assert_eq!(interface.auto_guesses.last().map(String::as_str), Some("garden"));
        assert_eq!(interface.wins.len(), 1);
    }

    #[test]
    fn test_session_keyboard_and_quit() {
        let words = single_answer_lists();
        let mut interface = ScriptedInterface::new(
            vec![guess("harden"), UserAction::Keyboard, UserAction::Quit],
            vec![],
        );
        let mut rng = StdRng::seed_from_u64(1);
        let stats = run_session(&words, &mut interface, &mut rng, Stats::new()).unwrap();
        assert_eq!(stats.games_played(), 0);
        assert!(interface.exited);
        let keyboard = interface.keyboards[0];
        assert_eq!(keyboard.get('h'), Some(crate::Mark::Incorrect));
        assert_eq!(keyboard.get('n'), Some(crate::Mark::Correct));
        assert_eq!(keyboard.get('z'), Some(crate::Mark::Unseen));
    }

    #[test]
    fn test_session_multiple_games() {
        let words = single_answer_lists();
        let mut interface = ScriptedInterface::new(
            vec![guess("garden"), guess("castle"), guess("garden")],
            vec![true, false],
        );
        let mut rng = StdRng::seed_from_u64(3);
        let stats = run_session(&words, &mut interface, &mut rng, Stats::new()).unwrap();
        assert_eq!(interface.games_started, 2);
        assert_eq!(interface.wins, vec![1, 2]);
        assert_eq!(stats.games_won(), 2);
    }
}
