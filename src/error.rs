use thiserror::Error;

/// Errors reported by the feedback engine, the candidate filter and the game rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A guess, answer or feedback string that is not well formed.
    #[error("invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// A well formed guess that is not in the vocabulary.
    #[error("unknown word '{0}'")]
    UnknownWord(String),

    /// No vocabulary word is consistent with every history entry.
    #[error("no candidates remain; the history is contradictory")]
    NoCandidates,

    /// The round is already won or lost.
    #[error("the game is already over")]
    GameOver,
}

impl GameError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
