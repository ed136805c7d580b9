//! Best known mark for every letter of the alphabet.
//!
//! A `KeyboardState` is never updated incrementally; it is derived from a
//! `History` whenever it is needed so the two cannot drift apart.

use crate::ALPHABET_SIZE;
use crate::feedback::{Mark, letter_index};
use crate::history::History;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardState([Mark; ALPHABET_SIZE]);

impl KeyboardState {
    /// Mark for `letter`, or `None` if it is not in `a..=z`.
    #[must_use]
    pub fn get(&self, letter: char) -> Option<Mark> {
        let lower = letter.to_ascii_lowercase();
        lower
            .is_ascii_lowercase()
            .then(|| self.0[letter_index(lower as u8)])
    }

    /// Letters paired with their marks, in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Mark)> + '_ {
        (b'a'..=b'z').map(char::from).zip(self.0.iter().copied())
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self([Mark::Unseen; ALPHABET_SIZE])
    }
}

impl fmt::Display for KeyboardState {
    /// Two letters per line, matching the text interface's keyboard table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: Vec<(char, Mark)> = self.iter().collect();
        for pair in letters.chunks(2) {
            let line: Vec<String> = pair
                .iter()
                .map(|(letter, mark)| format!("{letter}: {mark}"))
                .collect();
            writeln!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}

/// Merge every guessed letter's mark, keeping the highest ranked one.
#[must_use]
pub fn derive_keyboard_state(history: &History) -> KeyboardState {
    let mut keys = [Mark::Unseen; ALPHABET_SIZE];
    for entry in history {
        for (letter, &mark) in entry.guess().bytes().zip(entry.feedback().marks()) {
            let slot = &mut keys[letter_index(letter)];
            *slot = (*slot).max(mark);
        }
    }
    KeyboardState(keys)
}
