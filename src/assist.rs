use crate::cli::{
    GuessInput, display_candidates, display_exit_message, display_new_round_message,
    display_no_candidates_message, display_solution_found, display_suggestion, read_feedback,
    read_guess,
};
use crate::error::GameError;
use crate::history::{History, HistoryEntry};
use crate::solver::filter_candidates;
use crate::{debug_log, info_log};
use std::io::BufRead;

enum AssistState {
    Continue,
    Solved,
    NoSolution,
}

fn check_state(candidates: &Result<Vec<String>, GameError>) -> AssistState {
    match candidates {
        Err(_) => {
            display_no_candidates_message();
            AssistState::NoSolution
        }
        Ok(words) if words.len() == 1 => {
            display_solution_found(&words[0]);
            AssistState::Solved
        }
        Ok(_) => AssistState::Continue,
    }
}

/// Moves a finished round into `rounds`, dropping rounds with no entries.
fn finish_round(rounds: &mut Vec<History>, history: &mut History, vocabulary: &[String]) {
    let finished = std::mem::take(history);
    if !finished.is_empty() {
        rounds.push(finished);
    }
    display_new_round_message(vocabulary.len());
}

/// Interactive helper for a game played elsewhere.
///
/// Each guess and its G/Y/X feedback extend the history; the vocabulary is
/// re-filtered against the whole history and the first remaining word is
/// suggested. A round ends on `next`, on a solution or when no word fits,
/// and the loop carries on with a fresh round. Only `exit` or end of input
/// stop it. Returns the history of every round that recorded a guess.
pub fn assist_loop<R: BufRead>(vocabulary: &[String], mut reader: R) -> Vec<History> {
    let mut rounds = Vec::new();
    let mut history = History::new();
    println!("Loaded {} words.", vocabulary.len());
    if let Some(first) = vocabulary.first() {
        display_suggestion(first);
    }

    loop {
        let guess = match read_guess(&mut reader) {
            GuessInput::Exit => {
                display_exit_message();
                break;
            }
            GuessInput::NewGame => {
                finish_round(&mut rounds, &mut history, vocabulary);
                continue;
            }
            GuessInput::Valid(g) => g,
            GuessInput::Invalid => continue,
        };

        let Some(feedback) = read_feedback(&mut reader) else {
            continue;
        };

        match HistoryEntry::new(&guess, feedback) {
            Ok(entry) => history.push(entry),
            Err(e) => {
                debug_log!("assist_loop() - rejected entry: {}", e);
                continue;
            }
        }

        let candidates = filter_candidates(vocabulary, &history);
        if let Ok(words) = &candidates {
            display_candidates(words);
        }
        info_log!(
            "assist_loop() - {} guesses, {:?} candidates",
            history.len(),
            candidates.as_ref().map(Vec::len)
        );

        match check_state(&candidates) {
            AssistState::Solved | AssistState::NoSolution => {
                finish_round(&mut rounds, &mut history, vocabulary);
            }
            AssistState::Continue => {
                if let Ok(words) = candidates {
                    display_suggestion(&words[0]);
                }
            }
        }
    }

    if !history.is_empty() {
        rounds.push(history);
    }
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn vocabulary() -> Vec<String> {
        ["castle", "planet", "silver", "garden", "harden", "warden", "market"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn test_assist_immediate_exit() {
        let rounds = assist_loop(&vocabulary(), Cursor::new("exit\n"));
        assert!(rounds.is_empty());
    }

    #[test]
    fn test_assist_end_of_input_exits() {
        let rounds = assist_loop(&vocabulary(), Cursor::new(""));
        assert!(rounds.is_empty());
    }

    #[test]
    fn test_assist_solves() {
        // harden and warden both fit the first feedback
        let input = "garden\nXGGGGG\nharden\nGGGGGG\n";
        let rounds = assist_loop(&vocabulary(), Cursor::new(input));
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].len(), 2);
        assert!(rounds[0].last().unwrap().feedback().is_win());
    }

    #[test]
    fn test_assist_solved_round_is_followed_by_another() {
        let input = "garden\nXGGGGG\nharden\nGGGGGG\ncastle\nGGGGGG\nexit\n";
        let rounds = assist_loop(&vocabulary(), Cursor::new(input));
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].len(), 1);
        assert_eq!(rounds[1].entries()[0].guess(), "castle");
    }

    #[test]
    fn test_assist_invalid_input_is_skipped() {
        let input = "gard\ngarden\nGGG\nexit\n";
        let rounds = assist_loop(&vocabulary(), Cursor::new(input));
        assert!(rounds.is_empty());
    }

    #[test]
    fn test_assist_contradiction_ends_round() {
        // garden, harden and warden fit the first entry; none fits both
        let input = "market\nXGGXGX\ncastle\nGGGGGG\nexit\n";
        let rounds = assist_loop(&vocabulary(), Cursor::new(input));
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].len(), 2);
    }

    #[test]
    fn test_assist_continues_after_no_candidates() {
        // nothing fits castle/YYYYYY; the planet entry opens a new round
        let input = "castle\nYYYYYY\nnext\nplanet\nXXYYGX\nexit\n";
        let rounds = assist_loop(&vocabulary(), Cursor::new(input));
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].entries()[0].guess(), "castle");
        assert_eq!(rounds[1].len(), 1);
        assert_eq!(rounds[1].entries()[0].guess(), "planet");
        let candidates = filter_candidates(&vocabulary(), &rounds[1]).unwrap();
        assert_eq!(candidates, vec!["garden", "harden", "warden"]);
    }

    #[test]
    fn test_assist_next_resets_history() {
        let input = "market\nXGGXGX\nnext\nexit\n";
        let rounds = assist_loop(&vocabulary(), Cursor::new(input));
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].len(), 1);
    }
}
