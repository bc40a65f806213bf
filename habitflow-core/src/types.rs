//! Core domain types for habitflow
//!
//! These types mirror the persisted JSON layout exactly (camelCase field
//! names), so a store written by any habitflow version round-trips through
//! export/import unchanged.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Habit** | A recurring practice the user wants to perform daily |
//! | **CompletionRecord** | Proof that a habit was done on one calendar day |
//! | **Day key** | A date normalized to the local time zone (`YYYY-MM-DD`) |
//! | **Streak** | Consecutive completed days ending at or before today |
//!
//! A habit's completion state for a day is the *presence* of a record, not a
//! flag on one: un-marking a day removes the record entirely.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Display color assigned to new habits.
pub const DEFAULT_HABIT_COLOR: &str = "#4f46e5";

// ============================================
// Category
// ============================================

/// Fixed set of habit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Health,
    Work,
    Mind,
    Finance,
    Social,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Work,
        Category::Mind,
        Category::Finance,
        Category::Social,
    ];

    /// Returns the identifier used in storage and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Work => "Work",
            Category::Mind => "Mind",
            Category::Finance => "Finance",
            Category::Social => "Social",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "health" => Ok(Category::Health),
            "work" => Ok(Category::Work),
            "mind" => Ok(Category::Mind),
            "finance" => Ok(Category::Finance),
            "social" => Ok(Category::Social),
            _ => Err(format!("unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Habit
// ============================================

/// A recurring practice tracked day by day.
///
/// `streak` and `best_streak` are derived values owned by the streak engine
/// (`analytics::streak`); nothing else mutates them. The invariant
/// `best_streak >= streak` holds after every recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier, stable for the habit's lifetime
    pub id: String,
    /// Display name (non-empty)
    pub name: String,
    /// Category from the fixed set
    pub category: Category,
    /// Display color (hex)
    pub color: String,
    /// When the habit was created
    pub start_date: DateTime<Utc>,
    /// Current consecutive-day streak ending at or before today
    pub streak: u32,
    /// Best streak ever observed (monotonic high-water mark)
    pub best_streak: u32,
}

impl Habit {
    /// Create a new habit with a generated id and zeroed streaks.
    pub fn new(name: impl Into<String>, category: Category, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            color: DEFAULT_HABIT_COLOR.to_string(),
            start_date: now,
            streak: 0,
            best_streak: 0,
        }
    }
}

// ============================================
// Completion records
// ============================================

/// One completed (habit, day) pair.
///
/// At most one record exists per pair; absence means "not completed". The
/// `completed` field is always `true` in practice and is kept only for
/// layout compatibility with exported data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Unique identifier
    pub id: String,
    /// Owning habit (foreign reference; records never outlive their habit)
    pub habit_id: String,
    /// Calendar day the completion applies to
    pub date: NaiveDate,
    /// Always true; presence of the record is the real signal
    pub completed: bool,
}

impl CompletionRecord {
    /// Create a record marking `habit_id` complete on `date`.
    pub fn new(habit_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            habit_id: habit_id.into(),
            date,
            completed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("gardening".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("health".parse::<Category>().unwrap(), Category::Health);
        assert_eq!("FINANCE".parse::<Category>().unwrap(), Category::Finance);
    }

    #[test]
    fn test_habit_serializes_with_camel_case_layout() {
        let habit = Habit::new("Read", Category::Mind, Utc::now());
        let json = serde_json::to_value(&habit).unwrap();

        assert!(json.get("startDate").is_some());
        assert!(json.get("bestStreak").is_some());
        assert_eq!(json["category"], "Mind");
        assert_eq!(json["color"], DEFAULT_HABIT_COLOR);
    }

    #[test]
    fn test_record_date_serializes_as_day_key() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let record = CompletionRecord::new("h1", date);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["date"], "2025-06-15");
        assert_eq!(json["habitId"], "h1");
        assert_eq!(json["completed"], true);
    }
}
