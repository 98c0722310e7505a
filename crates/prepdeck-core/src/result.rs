//! Scored interview result types.
//!
//! An [`InterviewResult`] is created once, right after a session is
//! submitted and scored, and is immutable from then on. It is the unit the
//! history store persists and deletes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Score and feedback for a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    /// Position of the question in the session snapshot.
    pub question_id: usize,
    /// Score in [1.0, 10.0], one decimal.
    pub score: f64,
    /// Template feedback chosen for the score bucket.
    pub feedback: String,
}

/// The scored, persisted outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResult {
    /// Unique result identifier.
    pub id: Uuid,
    /// When the result was created.
    pub created_at: DateTime<Utc>,
    /// Role the session was taken for.
    pub job_role: String,
    /// Difficulty label carried from the session.
    pub difficulty: String,
    /// Mean of per-question scores, rounded to one decimal. 0 for an
    /// empty session.
    pub total_score: f64,
    /// Always 10.0.
    pub max_score: f64,
    /// One entry per session question, in question order.
    pub question_scores: Vec<QuestionScore>,
    /// Paragraph summary chosen by total-score thresholds.
    pub overall_feedback: String,
    /// Up to 3 entries.
    pub strengths: Vec<String>,
    /// Up to 3 entries.
    pub improvement_areas: Vec<String>,
    /// Synthetic percentile in [15, 95].
    pub percentile: u8,
    /// Percent of questions answered, 0..=100.
    pub completion_rate: u8,
    pub answered_questions: usize,
    pub total_questions: usize,
    /// Wall-clock session duration in seconds.
    pub duration_secs: u64,
}

impl InterviewResult {
    /// Performance label for display, by the same thresholds the overall
    /// feedback uses.
    pub fn performance_level(&self) -> &'static str {
        if self.total_score >= 8.5 {
            "Excellent"
        } else if self.total_score >= 7.0 {
            "Good"
        } else if self.total_score >= 5.0 {
            "Average"
        } else {
            "Needs Improvement"
        }
    }
}
