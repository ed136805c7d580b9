//! Per-letter feedback for a guess against a secret answer.
//!
//! Marks are computed in two passes so that repeated letters never receive
//! more Correct or Misplaced marks than the answer has copies of that letter.

use crate::error::GameError;
use crate::{ALPHABET_SIZE, WORD_LENGTH};
use std::fmt;
use std::str::FromStr;

/// Feedback for a single letter.
///
/// The derived ordering is the "best known state" order used when merging
/// marks into a keyboard: `Unseen < Incorrect < Misplaced < Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Mark {
    /// Letter never guessed. Only appears in keyboard state.
    #[default]
    Unseen,
    /// Letter not in the answer, or all of its copies are already accounted for.
    Incorrect,
    /// Letter in the answer at another position.
    Misplaced,
    /// Letter in the right position.
    Correct,
}

impl Mark {
    /// Symbol used when displaying feedback rows.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Correct => "🟩",
            Self::Misplaced => "🟨",
            Self::Incorrect => "⬛",
            Self::Unseen => "  ",
        }
    }

    /// Parse a feedback letter: G (green), Y (yellow) or X (gray).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Misplaced),
            'X' => Some(Self::Incorrect),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Misplaced => 'Y',
            Self::Incorrect => 'X',
            Self::Unseen => '.',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The marks for one guess, one per letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackString([Mark; WORD_LENGTH]);

impl FeedbackString {
    pub const ALL_CORRECT: Self = Self([Mark::Correct; WORD_LENGTH]);

    /// Build from explicit marks. `Unseen` is not a valid per-guess mark.
    ///
    /// # Errors
    /// Returns `GameError::InvalidInput` if any mark is `Unseen`.
    pub fn new(marks: [Mark; WORD_LENGTH]) -> Result<Self, GameError> {
        if marks.contains(&Mark::Unseen) {
            let text: String = marks.iter().map(|m| m.to_char()).collect();
            return Err(GameError::invalid(&text, "feedback cannot contain unseen marks"));
        }
        Ok(Self(marks))
    }

    #[must_use]
    pub const fn marks(&self) -> &[Mark; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        *self == Self::ALL_CORRECT
    }

    /// The feedback in G/Y/X form, e.g. `GYXXGX`.
    #[must_use]
    pub fn to_code(&self) -> String {
        self.0.iter().map(|m| m.to_char()).collect()
    }
}

impl fmt::Display for FeedbackString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.0 {
            f.write_str(mark.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for FeedbackString {
    type Err = GameError;

    /// Parse a string like `GYXXGX`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.chars().count() != WORD_LENGTH {
            return Err(GameError::invalid(
                trimmed,
                format!("feedback must be exactly {WORD_LENGTH} characters"),
            ));
        }
        let mut marks = [Mark::Incorrect; WORD_LENGTH];
        for (slot, c) in marks.iter_mut().zip(trimmed.chars()) {
            *slot = Mark::from_char(c)
                .ok_or_else(|| GameError::invalid(trimmed, format!("'{c}' is not one of G, Y or X")))?;
        }
        Ok(Self(marks))
    }
}

/// Check that `word` is exactly `WORD_LENGTH` lowercase ASCII letters.
///
/// # Errors
/// Returns `GameError::InvalidInput` describing the first problem found.
pub fn validate_word(word: &str) -> Result<(), GameError> {
    if word.len() != WORD_LENGTH {
        return Err(GameError::invalid(
            word,
            format!("word must be of length {WORD_LENGTH}"),
        ));
    }
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(GameError::invalid(word, "word must contain only letters a-z"));
    }
    Ok(())
}

pub(crate) const fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

/// Compute the marks for `guess` when `answer` is the secret word.
///
/// Exact matches are marked first and removed from the answer's letter pool.
/// The remaining positions are then scanned left to right: a letter still in
/// the pool is Misplaced and consumes one copy, anything else is Incorrect.
///
/// # Errors
/// Returns `GameError::InvalidInput` if either word is malformed.
///
/// # Examples
/// ```
/// use wordle_six::{compute_feedback, Mark};
///
/// // the answer has two p's, so only two of the four guessed p's are marked
/// let feedback = compute_feedback("ppppla", "apples").unwrap();
/// let marked_p = feedback.marks()[..4]
///     .iter()
///     .filter(|m| **m != Mark::Incorrect)
///     .count();
/// assert_eq!(marked_p, 2);
/// assert_eq!(feedback.to_code(), "XGGXYY");
/// ```
pub fn compute_feedback(guess: &str, answer: &str) -> Result<FeedbackString, GameError> {
    validate_word(guess)?;
    validate_word(answer)?;

    let guess = guess.as_bytes();
    let answer = answer.as_bytes();
    let mut marks = [Mark::Incorrect; WORD_LENGTH];
    let mut remaining = [0u8; ALPHABET_SIZE];

    for i in 0..WORD_LENGTH {
        if guess[i] == answer[i] {
            marks[i] = Mark::Correct;
        } else {
            remaining[letter_index(answer[i])] += 1;
        }
    }

    for i in 0..WORD_LENGTH {
        if marks[i] == Mark::Correct {
            continue;
        }
        let pool = &mut remaining[letter_index(guess[i])];
        if *pool > 0 {
            marks[i] = Mark::Misplaced;
            *pool -= 1;
        }
    }

    Ok(FeedbackString(marks))
}
