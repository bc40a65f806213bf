//! State and persistence layer for habitflow
//!
//! This module provides:
//! - The completion log store (toggle semantics, windowed counts)
//! - The explicit application-state struct and its mutations
//! - Import/export of the full data set
//! - The opaque key-value collaborator backing persistence

pub mod backup;
pub mod kv;
pub mod log;
pub mod state;

pub use backup::ExportDocument;
pub use kv::{KvStore, MemoryKv, SqliteKv};
pub use log::{CompletionLog, Toggle};
pub use state::{AppState, Store};
