//! Application state and its persistence wiring.
//!
//! [`AppState`] is the single explicit owner of all mutable data: the habit
//! collection, the completion log, the display language, and the user's
//! name. The computation core only ever sees it by reference, with `today`
//! passed in, so every derived value is reproducible in tests.
//!
//! [`Store`] persists the state through the opaque key-value collaborator.
//! Saves are fire-and-forget: a failed write is logged and the session
//! continues on in-memory state, matching a best-effort local-storage
//! model. Loads tolerate missing entries (first run) by falling back to
//! defaults.

use crate::analytics::streak;
use crate::error::{Error, Result};
use crate::locale::Language;
use crate::store::backup::{self, ExportDocument};
use crate::store::kv::{KvStore, SqliteKv, KEY_HABITS, KEY_LANG, KEY_LOGS, KEY_USER_NAME};
use crate::store::log::{CompletionLog, Toggle};
use crate::types::{Category, Habit};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

/// The full application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub habits: Vec<Habit>,
    pub log: CompletionLog,
    pub language: Language,
    pub user_name: String,
}

impl AppState {
    /// Create a habit and append it to the collection.
    pub fn add_habit(
        &mut self,
        name: &str,
        category: Category,
        now: DateTime<Utc>,
    ) -> Result<&Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName("habit name must not be empty".to_string()));
        }

        self.habits.push(Habit::new(name, category, now));
        Ok(self.habits.last().expect("habit was just pushed"))
    }

    /// Delete a habit and cascade-remove its completion records.
    pub fn delete_habit(&mut self, habit_id: &str) -> Result<Habit> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == habit_id)
            .ok_or_else(|| Error::HabitNotFound(habit_id.to_string()))?;

        let habit = self.habits.remove(index);
        self.log.remove_all_for_habit(&habit.id);
        Ok(habit)
    }

    /// Look up a habit by exact id.
    pub fn habit(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    /// Flip the completion of `(habit_id, day)` and recompute the habit's
    /// streaks against `today`.
    pub fn toggle(&mut self, habit_id: &str, day: NaiveDate, today: NaiveDate) -> Result<Toggle> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| Error::HabitNotFound(habit_id.to_string()))?;

        let outcome = self.log.toggle(&habit.id, day);
        streak::recompute(habit, &self.log, today);
        Ok(outcome)
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Set the display name; must be non-empty after trimming.
    pub fn set_user_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName("display name must not be empty".to_string()));
        }
        self.user_name = name.to_string();
        Ok(())
    }

    /// Drop all habits and completion records in one swap. Language and
    /// user name survive a reset.
    pub fn reset(&mut self) {
        self.habits = Vec::new();
        self.log = CompletionLog::new();
    }

    /// Snapshot the data set into an export document.
    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument::new(
            self.habits.clone(),
            self.log.records().to_vec(),
            now,
        )
    }

    /// Replace habits and log from an import payload.
    ///
    /// The payload is fully decoded before anything is swapped; on any
    /// failure the state is left exactly as it was.
    pub fn import(&mut self, input: &str) -> Result<()> {
        let (habits, logs) = backup::parse_import(input)?;
        self.habits = habits;
        self.log = CompletionLog::from_records(logs);
        Ok(())
    }
}

/// Persistent store for [`AppState`].
pub struct Store {
    kv: Box<dyn KvStore>,
}

impl Store {
    /// Open the SQLite-backed store at the given path.
    pub fn open(path: &PathBuf) -> Result<Self> {
        Ok(Self {
            kv: Box::new(SqliteKv::open(path)?),
        })
    }

    /// Open an in-memory SQLite store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            kv: Box::new(SqliteKv::open_in_memory()?),
        })
    }

    /// Wrap an arbitrary key-value collaborator.
    pub fn with_kv(kv: Box<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Load the state, treating missing entries as first-run defaults.
    ///
    /// A corrupt entry is logged and replaced by its default rather than
    /// failing the whole load.
    pub fn load(&self) -> Result<AppState> {
        let mut state = AppState::default();

        if let Some(raw) = self.kv.get(KEY_HABITS)? {
            match serde_json::from_str(&raw) {
                Ok(habits) => state.habits = habits,
                Err(e) => tracing::warn!(error = %e, "Discarding unreadable habits entry"),
            }
        }

        if let Some(raw) = self.kv.get(KEY_LOGS)? {
            match serde_json::from_str(&raw) {
                Ok(records) => state.log = CompletionLog::from_records(records),
                Err(e) => tracing::warn!(error = %e, "Discarding unreadable logs entry"),
            }
        }

        if let Some(raw) = self.kv.get(KEY_LANG)? {
            match raw.parse() {
                Ok(language) => state.language = language,
                Err(e) => tracing::warn!(error = %e, "Discarding unreadable lang entry"),
            }
        }

        if let Some(name) = self.kv.get(KEY_USER_NAME)? {
            state.user_name = name;
        }

        Ok(state)
    }

    /// Write all four entries, best-effort.
    ///
    /// Failures are logged, never surfaced: the in-memory state stays the
    /// source of truth for the rest of the session.
    pub fn save(&self, state: &AppState) {
        self.save_entry(KEY_HABITS, serde_json::to_string(&state.habits));
        self.save_entry(KEY_LOGS, serde_json::to_string(state.log.records()));
        self.save_entry(KEY_LANG, Ok(state.language.as_str().to_string()));
        self.save_entry(KEY_USER_NAME, Ok(state.user_name.clone()));
    }

    fn save_entry(&self, key: &str, value: serde_json::Result<String>) {
        match value {
            Ok(value) => {
                if let Err(e) = self.kv.set(key, &value) {
                    tracing::warn!(key, error = %e, "Persistence write failed");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize entry"),
        }
    }

    /// Drop every persisted entry.
    pub fn clear(&self) -> Result<()> {
        self.kv.clear()
    }
}
