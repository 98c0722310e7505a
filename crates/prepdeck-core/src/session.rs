//! Interview session state machine.
//!
//! A [`Session`] drives a candidate through a fixed ordered question list,
//! collecting one answer per question while a background timer tracks
//! elapsed seconds. Terminal transitions are encoded in ownership:
//! [`Session::finish`] consumes the session into a frozen
//! [`CompletedSession`] for scoring, and dropping a session aborts it —
//! either way the timer task is cancelled deterministically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::bank::QuestionBank;
use crate::error::SessionError;
use crate::model::{normalize_role, Question};

/// Minimum trimmed answer length required by [`Session::next`].
pub const MIN_ANSWER_LEN: usize = 10;

/// One answer, explicitly paired with the question it belongs to.
///
/// `question_id` is the question's position in the session snapshot; pairing
/// it with the text keeps the correlation explicit even if answer lists are
/// ever filtered or reordered downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: usize,
    pub text: String,
}

/// Outcome of a successful [`Session::next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next question.
    Moved,
    /// Already at the last question; the caller should submit.
    ReadyToSubmit,
}

/// Background one-second counter driving a session's elapsed time.
///
/// The interval task is aborted on [`stop`](SessionTimer::stop) and on drop,
/// so no exit path from an active session leaks a timer.
#[derive(Debug)]
pub struct SessionTimer {
    elapsed: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl SessionTimer {
    /// Start counting from `initial` elapsed seconds.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(initial: u64) -> Self {
        let elapsed = Arc::new(AtomicU64::new(initial));
        let counter = Arc::clone(&elapsed);
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; consume it so
            // the counter starts moving one second from now.
            tick.tick().await;
            loop {
                tick.tick().await;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });
        Self { elapsed, handle }
    }

    /// Seconds counted so far.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One in-progress interview attempt.
#[derive(Debug)]
pub struct Session {
    job_role: String,
    difficulty: String,
    questions: Vec<Question>,
    answers: Vec<AnswerRecord>,
    current: usize,
    started_at: DateTime<Utc>,
    timer: SessionTimer,
}

impl Session {
    /// Start a session for `role`, snapshotting its question list from the
    /// bank (with the bank's fallback for unknown roles).
    pub fn new(bank: &QuestionBank, role: &str, difficulty: impl Into<String>) -> Session {
        let job_role = normalize_role(role);
        let questions = bank.questions_for(&job_role).to_vec();
        let answers = (0..questions.len())
            .map(|question_id| AnswerRecord {
                question_id,
                text: String::new(),
            })
            .collect();
        Session {
            job_role,
            difficulty: difficulty.into(),
            questions,
            answers,
            current: 0,
            started_at: Utc::now(),
            timer: SessionTimer::start(0),
        }
    }

    /// Rebuild a session from a saved draft, resuming index, answers and
    /// elapsed time. Fails when the bank's question list for the draft's
    /// role no longer matches the draft.
    pub fn resume(bank: &QuestionBank, draft: SessionDraft) -> Result<Session, SessionError> {
        let questions = bank.questions_for(&draft.job_role).to_vec();
        if questions.len() != draft.answers.len() {
            return Err(SessionError::DraftMismatch {
                role: draft.job_role,
                draft_answers: draft.answers.len(),
                bank_questions: questions.len(),
            });
        }
        let current = draft.current_index.min(questions.len().saturating_sub(1));
        Ok(Session {
            job_role: draft.job_role,
            difficulty: draft.difficulty,
            questions,
            answers: draft.answers,
            current,
            started_at: draft.started_at,
            timer: SessionTimer::start(draft.elapsed_secs),
        })
    }

    pub fn job_role(&self) -> &str {
        &self.job_role
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// The stored answer for the current question. Always read from the
    /// record, never from caller-side input state.
    pub fn current_answer(&self) -> &str {
        &self.answers[self.current].text
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    /// Overwrite the current question's answer. No length limit here;
    /// validation happens on [`next`](Session::next).
    pub fn set_answer(&mut self, text: impl Into<String>) {
        self.answers[self.current].text = text.into();
        debug_assert_eq!(self.answers.len(), self.questions.len());
    }

    /// Advance to the next question, or signal readiness to submit at the
    /// last one. Fails without any state change when the trimmed current
    /// answer is under [`MIN_ANSWER_LEN`] characters.
    pub fn next(&mut self) -> Result<Advance, SessionError> {
        let len = self.current_answer().trim().chars().count();
        if len < MIN_ANSWER_LEN {
            return Err(SessionError::AnswerTooShort {
                len,
                min: MIN_ANSWER_LEN,
            });
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            Ok(Advance::Moved)
        } else {
            Ok(Advance::ReadyToSubmit)
        }
    }

    /// Move back one question. No-op at index 0; returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Freeze the session for scoring, stopping the timer.
    ///
    /// The frozen value is plain data; a scoring failure leaves it intact
    /// for retry, and discarding it is the abort path from submission.
    pub fn finish(self) -> CompletedSession {
        self.timer.stop();
        let duration_secs = self.timer.elapsed_secs();
        let total_questions = self.questions.len();
        let answered_questions = self
            .answers
            .iter()
            .filter(|a| !a.text.trim().is_empty())
            .count();
        let completion_rate = if total_questions == 0 {
            0
        } else {
            ((answered_questions as f64 / total_questions as f64) * 100.0).round() as u8
        };
        CompletedSession {
            job_role: self.job_role,
            difficulty: self.difficulty,
            questions: self.questions,
            answers: self.answers,
            answered_questions,
            total_questions,
            completion_rate,
            duration_secs,
            started_at: self.started_at,
        }
    }

    /// Discard the session without producing anything. Dropping the session
    /// has the same effect; this spelling just makes the intent explicit.
    pub fn abort(self) {
        self.timer.stop();
    }

    /// Snapshot the session for save-draft-and-exit.
    pub fn to_draft(&self) -> SessionDraft {
        SessionDraft {
            job_role: self.job_role.clone(),
            difficulty: self.difficulty.clone(),
            current_index: self.current,
            answers: self.answers.clone(),
            elapsed_secs: self.elapsed_secs(),
            started_at: self.started_at,
            saved_at: Utc::now(),
        }
    }
}

/// A submitted session, frozen for scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedSession {
    pub job_role: String,
    pub difficulty: String,
    pub questions: Vec<Question>,
    pub answers: Vec<AnswerRecord>,
    /// Count of answers with non-empty trimmed text.
    pub answered_questions: usize,
    pub total_questions: usize,
    /// Percent of questions answered, 0..=100.
    pub completion_rate: u8,
    pub duration_secs: u64,
    pub started_at: DateTime<Utc>,
}

/// Persisted snapshot of an in-progress session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDraft {
    pub job_role: String,
    pub difficulty: String,
    pub current_index: usize,
    pub answers: Vec<AnswerRecord>,
    pub elapsed_secs: u64,
    pub started_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;

    fn session() -> Session {
        Session::new(QuestionBank::builtin(), "software-engineer", "Intermediate")
    }

    #[tokio::test]
    async fn answers_always_match_questions() {
        let mut s = session();
        assert_eq!(s.answers().len(), s.questions().len());
        s.set_answer("a perfectly fine answer");
        s.next().unwrap();
        assert_eq!(s.answers().len(), s.questions().len());
        s.previous();
        assert_eq!(s.answers().len(), s.questions().len());
    }

    #[tokio::test]
    async fn next_rejects_short_answer_without_moving() {
        let mut s = session();
        s.set_answer("too short");
        let err = s.next().unwrap_err();
        assert_eq!(err, SessionError::AnswerTooShort { len: 9, min: 10 });
        assert_eq!(s.current_index(), 0);
    }

    #[tokio::test]
    async fn short_answer_length_is_trimmed() {
        let mut s = session();
        s.set_answer("   padded   ");
        assert!(matches!(
            s.next(),
            Err(SessionError::AnswerTooShort { len: 6, .. })
        ));
    }

    #[tokio::test]
    async fn previous_at_zero_is_noop() {
        let mut s = session();
        assert!(!s.previous());
        assert_eq!(s.current_index(), 0);
    }

    #[tokio::test]
    async fn next_at_last_question_signals_submit() {
        let mut s = session();
        let n = s.questions().len();
        for i in 0..n {
            s.set_answer(format!("detailed answer number {i}"));
            let advance = s.next().unwrap();
            if i + 1 < n {
                assert_eq!(advance, Advance::Moved);
                assert_eq!(s.current_index(), i + 1);
            } else {
                assert_eq!(advance, Advance::ReadyToSubmit);
                assert_eq!(s.current_index(), n - 1);
            }
        }
    }

    #[tokio::test]
    async fn current_answer_reloads_from_records() {
        let mut s = session();
        s.set_answer("answer for question zero");
        s.next().unwrap();
        s.set_answer("answer for question one");
        s.previous();
        assert_eq!(s.current_answer(), "answer for question zero");
        s.next().unwrap();
        assert_eq!(s.current_answer(), "answer for question one");
    }

    #[tokio::test]
    async fn finish_counts_answered_and_completion() {
        let mut s = session();
        let total = s.questions().len();
        s.set_answer("first answer with detail");
        s.next().unwrap();
        s.set_answer("   ");
        let done = s.finish();
        assert_eq!(done.total_questions, total);
        assert_eq!(done.answered_questions, 1);
        assert_eq!(done.completion_rate, ((100.0 / total as f64).round()) as u8);
        assert_eq!(done.answers.len(), done.questions.len());
    }

    #[tokio::test]
    async fn unknown_role_in_custom_bank_still_yields_questions() {
        let bank = QuestionBank::parse_str(
            r#"
[[roles]]
id = "astronaut"
title = "Astronaut"

[[roles.questions]]
question = "Describe a time you worked under pressure."
type = "behavioral"
"#,
            std::path::Path::new("custom.toml"),
        )
        .unwrap();

        // No "software-engineer" in this bank; the session must still get a
        // non-empty question list so answering cannot index out of bounds.
        let mut s = Session::new(&bank, "unknown-role", "Intermediate");
        assert!(!s.questions().is_empty());
        s.set_answer("an answer long enough to pass the gate");
        assert_eq!(s.next().unwrap(), Advance::ReadyToSubmit);
    }

    #[tokio::test]
    async fn unknown_role_uses_fallback_questions() {
        let bank = QuestionBank::builtin();
        let s = Session::new(bank, "astronaut", "Intermediate");
        assert_eq!(s.questions(), bank.questions_for("software-engineer"));
        assert_eq!(s.job_role(), "astronaut");
    }

    #[tokio::test(start_paused = true)]
    async fn timer_counts_seconds_and_freezes_on_finish() {
        let s = session();
        // Let the timer task register its interval before moving the clock.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(s.elapsed_secs(), 3);

        let done = s.finish();
        assert_eq!(done.duration_secs, 3);
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(done.duration_secs, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn draft_roundtrip_preserves_progress() {
        let bank = QuestionBank::builtin();
        let mut s = Session::new(bank, "software-engineer", "Senior");
        tokio::task::yield_now().await;
        s.set_answer("an answer long enough to pass");
        s.next().unwrap();
        s.set_answer("partial thoughts");
        tokio::time::advance(Duration::from_secs(42)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let draft = s.to_draft();
        s.abort();

        let resumed = Session::resume(bank, draft).unwrap();
        assert_eq!(resumed.current_index(), 1);
        assert_eq!(resumed.current_answer(), "partial thoughts");
        assert_eq!(resumed.elapsed_secs(), 42);
        assert_eq!(resumed.difficulty(), "Senior");
    }

    #[tokio::test]
    async fn resume_rejects_mismatched_draft() {
        let bank = QuestionBank::builtin();
        let mut draft = Session::new(bank, "software-engineer", "Intermediate").to_draft();
        draft.answers.pop();
        assert!(matches!(
            Session::resume(bank, draft),
            Err(SessionError::DraftMismatch { .. })
        ));
    }
}
