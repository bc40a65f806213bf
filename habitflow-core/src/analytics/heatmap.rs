//! Heatmap bucketizer.
//!
//! Maps every day in a trailing 365-day window to the number of habits
//! completed that day, binned into five intensity buckets by fixed
//! thresholds. Buckets depend only on the log; locale switches re-label the
//! axes without recomputing anything.

use crate::store::CompletionLog;
use chrono::{Datelike, Days, NaiveDate};

/// Ascending count thresholds separating the buckets.
///
/// Counts below 1 land in bucket 0, then 1, 2–3, 4–5, 6+.
pub const BUCKET_THRESHOLDS: [usize; 4] = [1, 2, 4, 6];

/// Number of intensity buckets.
pub const BUCKET_COUNT: usize = BUCKET_THRESHOLDS.len() + 1;

/// Fixed display intensity per bucket, darkest to brightest.
pub const BUCKET_COLORS: [&str; BUCKET_COUNT] =
    ["#18181b", "#064e3b", "#065f46", "#047857", "#10b981"];

/// Days covered by the heatmap window.
pub const WINDOW_DAYS: u64 = 365;

/// One day cell in the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapCell {
    /// The calendar day
    pub day: NaiveDate,
    /// Number of distinct habits completed that day
    pub count: usize,
    /// Intensity bucket, `0..BUCKET_COUNT`
    pub bucket: u8,
}

/// The bucketized trailing window, oldest day first.
#[derive(Debug, Clone)]
pub struct Heatmap {
    cells: Vec<HeatmapCell>,
}

impl Heatmap {
    /// Bucketize the trailing 365-day window ending at `today`.
    pub fn build(log: &CompletionLog, today: NaiveDate) -> Self {
        let start = today - Days::new(WINDOW_DAYS - 1);
        let counts = log.counts_by_day();

        let cells = start
            .iter_days()
            .take(WINDOW_DAYS as usize)
            .map(|day| {
                let count = counts.get(&day).copied().unwrap_or(0);
                HeatmapCell {
                    day,
                    count,
                    bucket: bucket_for(count),
                }
            })
            .collect();

        Self { cells }
    }

    /// All cells, oldest first.
    pub fn cells(&self) -> &[HeatmapCell] {
        &self.cells
    }

    /// First day of the window.
    pub fn start(&self) -> NaiveDate {
        self.cells[0].day
    }

    /// Last day of the window (today).
    pub fn end(&self) -> NaiveDate {
        self.cells[self.cells.len() - 1].day
    }

    /// Cells grouped into week columns, Sunday-first, for grid rendering.
    ///
    /// The first column is padded at the front when the window does not
    /// start on a Sunday; padding slots are `None`.
    pub fn week_columns(&self) -> Vec<[Option<HeatmapCell>; 7]> {
        let mut columns = Vec::new();
        let mut column: [Option<HeatmapCell>; 7] = [None; 7];
        let mut seen_any = false;

        for cell in &self.cells {
            let slot = cell.day.weekday().num_days_from_sunday() as usize;
            if slot == 0 && seen_any {
                columns.push(column);
                column = [None; 7];
            }
            column[slot] = Some(*cell);
            seen_any = true;
        }
        columns.push(column);
        columns
    }
}

/// Map a completion count to its intensity bucket.
pub fn bucket_for(count: usize) -> u8 {
    BUCKET_THRESHOLDS.iter().filter(|&&t| count >= t).count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CompletionLog;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(bucket_for(0), 0);
        assert_eq!(bucket_for(1), 1);
        assert_eq!(bucket_for(2), 2);
        assert_eq!(bucket_for(3), 2);
        assert_eq!(bucket_for(4), 3);
        assert_eq!(bucket_for(5), 3);
        assert_eq!(bucket_for(6), 4);
        assert_eq!(bucket_for(40), 4);
    }

    #[test]
    fn test_every_bucket_has_an_intensity() {
        assert_eq!(BUCKET_COLORS.len(), BUCKET_COUNT);
        assert!(bucket_for(usize::MAX) < BUCKET_COUNT as u8);
    }

    #[test]
    fn test_window_covers_exactly_365_days_ending_today() {
        let map = Heatmap::build(&CompletionLog::new(), today());

        assert_eq!(map.cells().len(), 365);
        assert_eq!(map.end(), today());
        assert_eq!(map.start(), today() - Days::new(364));
    }

    #[test]
    fn test_counts_land_on_the_right_day() {
        let mut log = CompletionLog::new();
        for habit in ["a", "b", "c", "d"] {
            log.toggle(habit, today());
        }
        log.toggle("a", today() - Days::new(1));

        let map = Heatmap::build(&log, today());
        let cells = map.cells();

        let last = cells[cells.len() - 1];
        assert_eq!(last.count, 4);
        assert_eq!(last.bucket, 3); // 4 completions → the 4-5 bucket

        let yesterday = cells[cells.len() - 2];
        assert_eq!(yesterday.count, 1);
        assert_eq!(yesterday.bucket, 1);

        assert!(cells[..cells.len() - 2].iter().all(|c| c.bucket == 0));
    }

    #[test]
    fn test_completions_outside_window_are_invisible() {
        let mut log = CompletionLog::new();
        log.toggle("a", today() - Days::new(365));

        let map = Heatmap::build(&log, today());
        assert!(map.cells().iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_week_columns_cover_every_cell_once() {
        let map = Heatmap::build(&CompletionLog::new(), today());
        let columns = map.week_columns();

        let filled: usize = columns
            .iter()
            .map(|col| col.iter().flatten().count())
            .sum();
        assert_eq!(filled, 365);

        // Cells sit in the slot matching their weekday
        for column in &columns {
            for (slot, cell) in column.iter().enumerate() {
                if let Some(cell) = cell {
                    assert_eq!(cell.day.weekday().num_days_from_sunday() as usize, slot);
                }
            }
        }
    }
}
