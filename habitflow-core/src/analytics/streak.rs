//! Streak engine
//!
//! Recomputes a habit's current and best streak after every toggle that
//! affects it. The current streak is always derived from the log by a
//! backward scan, never by incrementing a counter, so it cannot drift from
//! the records — including when a past day is backfilled or un-marked.

use crate::store::CompletionLog;
use crate::types::Habit;
use chrono::NaiveDate;
use std::collections::HashSet;

/// The consecutive-day run ending at or before `today`.
///
/// A run ending yesterday still counts: the streak is active but not yet
/// extended today. A gap at both today and yesterday means 0.
pub fn current_streak(completed: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if completed.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if completed.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 1;
    while let Some(prev) = cursor.pred_opt() {
        if !completed.contains(&prev) {
            break;
        }
        streak += 1;
        cursor = prev;
    }
    streak
}

/// Recompute `habit.streak` from the log and advance the best-streak
/// high-water mark. `best_streak` never decreases.
pub fn recompute(habit: &mut Habit, log: &CompletionLog, today: NaiveDate) {
    let completed = log.days_for_habit(&habit.id);
    habit.streak = current_streak(&completed, today);
    habit.best_streak = habit.best_streak.max(habit.streak);

    tracing::debug!(
        habit = %habit.name,
        streak = habit.streak,
        best = habit.best_streak,
        "Streak recomputed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CompletionLog;
    use crate::types::Category;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn days(ds: &[u32]) -> HashSet<NaiveDate> {
        ds.iter().map(|&d| day(d)).collect()
    }

    #[test]
    fn test_empty_log_means_zero_streak() {
        assert_eq!(current_streak(&HashSet::new(), day(15)), 0);
    }

    #[test]
    fn test_run_ending_today() {
        assert_eq!(current_streak(&days(&[13, 14, 15]), day(15)), 3);
    }

    #[test]
    fn test_run_ending_yesterday_is_still_active() {
        // Today not yet completed; the streak shown is the run ending
        // yesterday, not zero.
        assert_eq!(current_streak(&days(&[12, 13, 14]), day(15)), 3);
    }

    #[test]
    fn test_gap_before_yesterday_means_zero() {
        assert_eq!(current_streak(&days(&[10, 11, 12]), day(15)), 0);
    }

    #[test]
    fn test_scan_stops_at_first_gap() {
        // 10-11 completed, 12 missing, 13-15 completed
        assert_eq!(current_streak(&days(&[10, 11, 13, 14, 15]), day(15)), 3);
    }

    #[test]
    fn test_removing_a_middle_day_splits_the_run() {
        let mut habit = Habit::new("Run", Category::Health, Utc::now());
        let mut log = CompletionLog::new();
        let today = day(15);

        for d in [13, 14, 15] {
            log.toggle(&habit.id, day(d));
            recompute(&mut habit, &log, today);
        }
        assert_eq!(habit.streak, 3);

        // Un-mark the middle day: streak drops to today only
        log.toggle(&habit.id, day(14));
        recompute(&mut habit, &log, today);
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.best_streak, 3);
    }

    #[test]
    fn test_backfill_recomputes_by_scan() {
        let mut habit = Habit::new("Run", Category::Health, Utc::now());
        let mut log = CompletionLog::new();
        let today = day(15);

        // Today done, then backfill the two preceding days out of order
        log.toggle(&habit.id, day(15));
        recompute(&mut habit, &log, today);
        assert_eq!(habit.streak, 1);

        log.toggle(&habit.id, day(13));
        recompute(&mut habit, &log, today);
        assert_eq!(habit.streak, 1); // 14 still missing

        log.toggle(&habit.id, day(14));
        recompute(&mut habit, &log, today);
        assert_eq!(habit.streak, 3);
    }

    #[test]
    fn test_best_streak_is_monotonic_over_any_toggle_sequence() {
        let mut habit = Habit::new("Run", Category::Health, Utc::now());
        let mut log = CompletionLog::new();
        let today = day(20);

        // Build up, tear down, rebuild; the invariant must hold after
        // every single recompute.
        let sequence = [18, 19, 20, 19, 20, 16, 17, 18, 19, 20, 20];
        for d in sequence {
            log.toggle(&habit.id, day(d));
            recompute(&mut habit, &log, today);
            assert!(
                habit.best_streak >= habit.streak,
                "best {} < streak {} after toggling day {}",
                habit.best_streak,
                habit.streak,
                d
            );
        }
    }

    #[test]
    fn test_unmarking_with_zero_streak_stays_zero() {
        let mut habit = Habit::new("Run", Category::Health, Utc::now());
        let mut log = CompletionLog::new();
        let today = day(15);

        // A lone completion far in the past, then removed
        log.toggle(&habit.id, day(1));
        recompute(&mut habit, &log, today);
        assert_eq!(habit.streak, 0);

        log.toggle(&habit.id, day(1));
        recompute(&mut habit, &log, today);
        assert_eq!(habit.streak, 0);
    }
}
