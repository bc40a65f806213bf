//! Export and import of the full data set.
//!
//! The export document carries the habit collection and completion log
//! verbatim plus a timestamp. Import is all-or-nothing: the payload is
//! validated and decoded completely before any state is replaced, so a bad
//! file can never leave the application half-imported.

use crate::error::{Error, Result};
use crate::types::{CompletionRecord, Habit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The export file format.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub habits: Vec<Habit>,
    pub logs: Vec<CompletionRecord>,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    pub fn new(habits: Vec<Habit>, logs: Vec<CompletionRecord>, now: DateTime<Utc>) -> Self {
        Self {
            habits,
            logs,
            export_date: now,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse and validate an import payload.
///
/// The document is valid only if `habits` and `logs` are both arrays whose
/// elements decode as habit/record objects. Any failure returns
/// [`Error::Import`] and nothing else happens — the caller's state is only
/// replaced from a fully decoded payload.
pub fn parse_import(input: &str) -> Result<(Vec<Habit>, Vec<CompletionRecord>)> {
    let document: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| Error::Import(format!("not valid JSON: {}", e)))?;

    let habits = document
        .get("habits")
        .filter(|v| v.is_array())
        .ok_or_else(|| Error::Import("`habits` must be an array".to_string()))?;
    let logs = document
        .get("logs")
        .filter(|v| v.is_array())
        .ok_or_else(|| Error::Import("`logs` must be an array".to_string()))?;

    let habits: Vec<Habit> = serde_json::from_value(habits.clone())
        .map_err(|e| Error::Import(format!("bad habit entry: {}", e)))?;
    let logs: Vec<CompletionRecord> = serde_json::from_value(logs.clone())
        .map_err(|e| Error::Import(format!("bad log entry: {}", e)))?;

    Ok((habits, logs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::NaiveDate;

    #[test]
    fn test_export_then_import_round_trips() {
        let habit = Habit::new("Read", Category::Mind, Utc::now());
        let record = CompletionRecord::new(&habit.id, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        let doc = ExportDocument::new(vec![habit.clone()], vec![record.clone()], Utc::now());

        let json = doc.to_json().unwrap();
        let (habits, logs) = parse_import(&json).unwrap();

        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].id, habit.id);
        assert_eq!(habits[0].name, "Read");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].habit_id, habit.id);
        assert_eq!(logs[0].date, record.date);
    }

    #[test]
    fn test_import_rejects_non_json() {
        let err = parse_import("definitely not json").unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn test_import_rejects_non_array_habits() {
        let err = parse_import(r#"{"habits": "not an array", "logs": []}"#).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn test_import_rejects_missing_logs() {
        let err = parse_import(r#"{"habits": []}"#).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn test_import_accepts_empty_arrays() {
        let (habits, logs) = parse_import(r#"{"habits": [], "logs": []}"#).unwrap();
        assert!(habits.is_empty());
        assert!(logs.is_empty());
    }

    #[test]
    fn test_export_date_in_document() {
        let doc = ExportDocument::new(vec![], vec![], Utc::now());
        let json = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("exportDate").is_some());
    }
}
