//! # habitflow-core
//!
//! Core library for habitflow - a local-first daily habit tracker.
//!
//! This library provides:
//! - Domain types for habits and completion records
//! - The completion log store with toggle semantics
//! - Streak, statistics, heatmap, and milestone analytics
//! - Key-value persistence backed by SQLite
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! State flows one way: a user action mutates [`AppState`] (habits +
//! completion log), the streak engine recomputes the affected habit, and
//! the dashboard/heatmap/milestone views are derived on demand as pure
//! functions of the current state and an injected `today`. Persistence is
//! a best-effort write of the whole state after each mutation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use habitflow_core::{Config, Store};
//!
//! let store = Store::open(&Config::database_path()).expect("failed to open store");
//! let state = store.load().expect("failed to load state");
//! println!("{} habits tracked", state.habits.len());
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use locale::Language;
pub use store::{AppState, CompletionLog, Store, Toggle};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod dates;
pub mod error;
pub mod locale;
pub mod logging;
pub mod store;
pub mod types;
