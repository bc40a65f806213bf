//! Key-value persistence layer
//!
//! The application persists its whole state as four string entries
//! (`habits`, `logs`, `lang`, `userName`). The collaborator behind those
//! entries is deliberately opaque: anything that can get, set, and clear
//! strings will do. The production implementation keeps them in a single
//! SQLite table; tests use an in-memory map.

use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage key for the habit collection.
pub const KEY_HABITS: &str = "habits";
/// Storage key for the completion log.
pub const KEY_LOGS: &str = "logs";
/// Storage key for the display language.
pub const KEY_LANG: &str = "lang";
/// Storage key for the user's display name.
pub const KEY_USER_NAME: &str = "userName";

/// Opaque key-value collaborator.
///
/// Reads never write; `clear` drops every entry.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// SQLite-backed key-value store (single connection behind a mutex)
pub struct SqliteKv {
    conn: Mutex<Connection>,
}

impl SqliteKv {
    /// Open or create a store at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_connection(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

/// In-memory key-value store for tests.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KvStore) {
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("lang", "en").unwrap();
        assert_eq!(store.get("lang").unwrap().as_deref(), Some("en"));

        // Overwrite, not append
        store.set("lang", "pt").unwrap();
        assert_eq!(store.get("lang").unwrap().as_deref(), Some("pt"));

        store.clear().unwrap();
        assert_eq!(store.get("lang").unwrap(), None);
    }

    #[test]
    fn test_sqlite_kv_get_set_clear() {
        let store = SqliteKv::open_in_memory().unwrap();
        exercise(&store);
    }

    #[test]
    fn test_memory_kv_get_set_clear() {
        let store = MemoryKv::new();
        exercise(&store);
    }
}
