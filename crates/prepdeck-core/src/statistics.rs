//! Aggregate statistics over the interview history.
//!
//! Derived on demand from a newest-first result list; nothing here is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::result::InterviewResult;

/// Summary numbers for the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_interviews: usize,
    /// Mean of total scores; 0 when the history is empty.
    pub average_score: f64,
    pub best_score: f64,
    /// Percentage change between the recent and older score windows.
    pub improvement_rate: f64,
}

impl HistoryStats {
    pub fn empty() -> HistoryStats {
        HistoryStats {
            total_interviews: 0,
            average_score: 0.0,
            best_score: 0.0,
            improvement_rate: 0.0,
        }
    }
}

/// Compute summary statistics from a newest-first result list.
pub fn compute_history_stats(results: &[InterviewResult]) -> HistoryStats {
    if results.is_empty() {
        return HistoryStats::empty();
    }

    let n = results.len();
    let sum: f64 = results.iter().map(|r| r.total_score).sum();
    let average_score = sum / n as f64;
    let best_score = results
        .iter()
        .map(|r| r.total_score)
        .fold(f64::MIN, f64::max);

    HistoryStats {
        total_interviews: n,
        average_score,
        best_score,
        improvement_rate: improvement_rate(results),
    }
}

/// Percentage change between the mean of the most-recent `min(3, n/2)`
/// results and the mean of an equal-or-smaller immediately-older slice.
///
/// Returns 0 when either window is empty or the older mean is 0. The window
/// thresholds are applied literally, so n < 2 always yields 0.
fn improvement_rate(results: &[InterviewResult]) -> f64 {
    let window = (results.len() / 2).min(3);
    if window == 0 {
        return 0.0;
    }

    let recent: Vec<f64> = results[..window].iter().map(|r| r.total_score).collect();
    let older: Vec<f64> = results[window..]
        .iter()
        .take(window)
        .map(|r| r.total_score)
        .collect();
    if older.is_empty() {
        return 0.0;
    }

    let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let older_mean = older.iter().sum::<f64>() / older.len() as f64;
    if older_mean == 0.0 {
        return 0.0;
    }

    (recent_mean - older_mean) / older_mean * 100.0
}
