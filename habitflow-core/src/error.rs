//! Error types for habitflow-core

use thiserror::Error;

/// Main error type for the habitflow-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Key-value storage error
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed import payload; state is left untouched
    #[error("import error: {0}")]
    Import(String),

    /// Habit not found
    #[error("habit not found: {0}")]
    HabitNotFound(String),

    /// Empty or otherwise invalid display name
    #[error("invalid name: {0}")]
    InvalidName(String),
}

/// Result type alias for habitflow-core
pub type Result<T> = std::result::Result<T, Error>;
