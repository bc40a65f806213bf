//! Dashboard statistics.
//!
//! Aggregate metrics shown on the dashboard header. Everything here is a
//! pure function of (habits, log, today); nothing is cached or persisted.

use crate::store::CompletionLog;
use crate::types::{Category, Habit};
use chrono::NaiveDate;

/// Length of the consistency window in days.
const CONSISTENCY_WINDOW_DAYS: u64 = 30;

/// Dashboard statistics for the stats view header.
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    /// Sum of every habit's current streak
    pub active_streak_total: u32,
    /// Percentage of possible habit-days completed in the trailing 30 days
    pub consistency_score: u8,
    /// Lifetime completion count
    pub total_completions: usize,
    /// Category of the first habit in the collection, if any.
    ///
    /// Deliberately *not* a frequency mode: the original metric is "first
    /// habit's category" and that behavior is preserved as-is.
    pub top_category: Option<Category>,
}

impl DashboardStats {
    /// Compute dashboard stats for the current state.
    pub fn compute(habits: &[Habit], log: &CompletionLog, today: NaiveDate) -> Self {
        Self {
            active_streak_total: habits.iter().map(|h| h.streak).sum(),
            consistency_score: consistency_score(habits, log, today),
            total_completions: log.len(),
            top_category: habits.first().map(|h| h.category),
        }
    }
}

/// `round(100 * completions_in_trailing_30_days / (habit_count * 30))`.
///
/// The window is the 30 days `[today - 29, today]` inclusive, so a single
/// habit completed every day scores exactly 100. The log's one-record-per-
/// (habit, day) invariant bounds the score to 100 by construction. Zero
/// habits score 0.
fn consistency_score(habits: &[Habit], log: &CompletionLog, today: NaiveDate) -> u8 {
    if habits.is_empty() {
        return 0;
    }

    let start = crate::dates::days_ago(today, CONSISTENCY_WINDOW_DAYS - 1);
    let completed = log.count_in_window(start, today);
    let possible = habits.len() * CONSISTENCY_WINDOW_DAYS as usize;

    ((completed as f64 / possible.max(1) as f64) * 100.0).round() as u8
}
