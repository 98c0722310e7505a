//! Core data model types for prepdeck.
//!
//! These are the fundamental types the entire prepdeck system uses to
//! represent interview questions and role identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single interview question presented to the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,
    /// A hint shown on request.
    #[serde(default)]
    pub hint: String,
    /// Whether this is a technical or behavioral question.
    #[serde(rename = "type")]
    pub kind: QuestionType,
}

/// The two question categories the scoring engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Technical,
    Behavioral,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Technical => write!(f, "technical"),
            QuestionType::Behavioral => write!(f, "behavioral"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technical" => Ok(QuestionType::Technical),
            "behavioral" | "behavioural" => Ok(QuestionType::Behavioral),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Normalize a role identifier for bank lookup.
///
/// Lower-cases the input and collapses runs of `-`, `_` and whitespace into
/// a single `-`, so "Software Engineer", "software_engineer" and
/// "software-engineer" all resolve to the same bank entry.
pub fn normalize_role(role: &str) -> String {
    let mut out = String::with_capacity(role.len());
    let mut pending_sep = false;
    for c in role.trim().chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            pending_sep = !out.is_empty();
        } else {
            if pending_sep {
                out.push('-');
                pending_sep = false;
            }
            out.extend(c.to_lowercase());
        }
    }
    out
}
