//! Session error types.
//!
//! Validation failures are recoverable by construction: every variant leaves
//! the session state untouched, so callers can surface the condition and let
//! the user continue.

use thiserror::Error;

/// Errors raised by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The current answer is below the minimum length required to advance.
    #[error("answer too short: {len} characters, minimum {min}")]
    AnswerTooShort { len: usize, min: usize },

    /// A saved draft does not line up with the role's question list.
    #[error("draft has {draft_answers} answers but role '{role}' has {bank_questions} questions")]
    DraftMismatch {
        role: String,
        draft_answers: usize,
        bank_questions: usize,
    },
}
