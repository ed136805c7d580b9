use crate::error::GameError;
use crate::feedback::validate_word;
use crate::{debug_log, info_log};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_ANSWERS: &str = include_str!("resources/answers.txt");
pub const EMBEDDED_VOCABULARY: &str = include_str!("resources/vocab.txt");

fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    match validate_word(&word) {
        Ok(()) => Some(word),
        Err(e) => {
            if !word.is_empty() {
                debug_log!("Skipping word list entry: {}", e);
            }
            None
        }
    }
}

pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// The secret-word list and the larger list of accepted guesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLists {
    vocabulary: Vec<String>,
    answers: Vec<String>,
}

impl WordLists {
    /// Every answer is also a valid guess; answers missing from the
    /// vocabulary are appended to it.
    ///
    /// # Errors
    /// Returns `GameError::InvalidInput` if there are no answers.
    pub fn new(mut vocabulary: Vec<String>, answers: Vec<String>) -> Result<Self, GameError> {
        if answers.is_empty() {
            return Err(GameError::invalid("", "the answer list is empty"));
        }
        let missing: Vec<String> = answers
            .iter()
            .filter(|answer| !vocabulary.contains(answer))
            .cloned()
            .collect();
        if !missing.is_empty() {
            log::warn!(
                "{} answers were not in the vocabulary and have been added to it",
                missing.len()
            );
            vocabulary.extend(missing);
        }
        info_log!(
            "Word lists ready: {} answers, {} accepted guesses",
            answers.len(),
            vocabulary.len()
        );
        Ok(Self { vocabulary, answers })
    }

    /// The lists compiled into the binary.
    ///
    /// # Errors
    /// Only fails if the embedded answer list is empty.
    pub fn embedded() -> Result<Self, GameError> {
        Self::new(
            load_words_from_str(EMBEDDED_VOCABULARY),
            load_words_from_str(EMBEDDED_ANSWERS),
        )
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn is_valid_guess(&self, word: &str) -> bool {
        self.vocabulary.iter().any(|w| w == word)
    }
}
