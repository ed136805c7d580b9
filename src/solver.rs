use crate::error::GameError;
use crate::feedback::compute_feedback;
use crate::history::History;
use crate::debug_log;

/// Keep the vocabulary words that could still be the answer.
///
/// A word survives when scoring every past guess against it reproduces the
/// recorded feedback exactly. Vocabulary order is preserved.
///
/// # Errors
/// Returns `GameError::NoCandidates` if nothing survives and
/// `GameError::InvalidInput` if a vocabulary word is malformed.
pub fn filter_candidates(vocabulary: &[String], history: &History) -> Result<Vec<String>, GameError> {
    let mut filtered = Vec::new();
    'word: for word in vocabulary {
        for entry in history {
            if compute_feedback(entry.guess(), word)? != *entry.feedback() {
                continue 'word;
            }
        }
        filtered.push(word.clone());
    }
    debug_log!(
        "filter_candidates() - {} of {} words consistent with {} guesses",
        filtered.len(),
        vocabulary.len(),
        history.len()
    );
    if filtered.is_empty() {
        return Err(GameError::NoCandidates);
    }
    Ok(filtered)
}

/// The next guess to try: the first surviving candidate in vocabulary order.
///
/// # Errors
/// Same as [`filter_candidates`].
pub fn suggest_guess(vocabulary: &[String], history: &History) -> Result<String, GameError> {
    filter_candidates(vocabulary, history)?
        .into_iter()
        .next()
        .ok_or(GameError::NoCandidates)
}
