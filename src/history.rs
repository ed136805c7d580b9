use crate::error::GameError;
use crate::feedback::{FeedbackString, compute_feedback, validate_word};
use std::fmt;

/// One guess together with the feedback it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    guess: String,
    feedback: FeedbackString,
}

impl HistoryEntry {
    /// Pair a guess with feedback obtained elsewhere, e.g. typed in by the user.
    ///
    /// # Errors
    /// Returns `GameError::InvalidInput` if the guess is malformed.
    pub fn new(guess: &str, feedback: FeedbackString) -> Result<Self, GameError> {
        validate_word(guess)?;
        Ok(Self {
            guess: guess.to_string(),
            feedback,
        })
    }

    /// Score `guess` against `answer` and record the result.
    ///
    /// # Errors
    /// Returns `GameError::InvalidInput` if either word is malformed.
    pub fn scored(guess: &str, answer: &str) -> Result<Self, GameError> {
        let feedback = compute_feedback(guess, answer)?;
        Ok(Self {
            guess: guess.to_string(),
            feedback,
        })
    }

    #[must_use]
    pub fn guess(&self) -> &str {
        &self.guess
    }

    #[must_use]
    pub const fn feedback(&self) -> &FeedbackString {
        &self.feedback
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spaced: Vec<String> = self.guess.chars().map(String::from).collect();
        write!(f, "{}\n{}", spaced.join(" "), self.feedback)
    }
}

/// Guesses of one game in the order they were made. Entries are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_keeps_guess_order() {
        let mut history = History::new();
        assert!(history.is_empty());
        history.push(HistoryEntry::scored("planet", "castle").unwrap());
        history.push(HistoryEntry::scored("castle", "castle").unwrap());

        let guesses: Vec<&str> = history.iter().map(HistoryEntry::guess).collect();
        assert_eq!(guesses, vec!["planet", "castle"]);
        assert_eq!(history.len(), 2);
        assert!(history.last().unwrap().feedback().is_win());
    }

    #[test]
    fn test_entry_from_user_feedback() {
        let feedback = "GYXXXX".parse().unwrap();
        let entry = HistoryEntry::new("planet", feedback).unwrap();
        assert_eq!(entry.guess(), "planet");
        assert_eq!(entry.feedback().to_code(), "GYXXXX");
    }

    #[test]
    fn test_entry_rejects_bad_guess() {
        let feedback = "GYXXXX".parse().unwrap();
        assert!(HistoryEntry::new("plan", feedback).is_err());
        assert!(HistoryEntry::scored("planet", "cast").is_err());
    }

    #[test]
    fn test_entry_display() {
        let entry = HistoryEntry::scored("castle", "castle").unwrap();
        assert_eq!(entry.to_string(), "c a s t l e\n🟩🟩🟩🟩🟩🟩");
    }
}
