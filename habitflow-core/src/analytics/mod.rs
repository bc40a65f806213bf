//! Analytics module for habitflow
//!
//! Derived views over the habit collection and completion log:
//! - Streak engine (current/best streak recompute on toggle)
//! - Dashboard statistics (streak total, consistency, top category)
//! - Heatmap bucketizer (trailing-year intensity grid)
//! - Milestone evaluator (fixed unlock predicates)
//!
//! Everything here is a pure function of `(habits, log, today)`. The
//! current day is always injected by the caller; these functions never
//! read the clock.

pub mod dashboard;
pub mod heatmap;
pub mod milestones;
pub mod streak;

pub use dashboard::DashboardStats;
pub use heatmap::{bucket_for, Heatmap, HeatmapCell, BUCKET_COLORS, BUCKET_THRESHOLDS};
pub use milestones::{evaluate as evaluate_milestones, Milestone};
pub use streak::current_streak;
