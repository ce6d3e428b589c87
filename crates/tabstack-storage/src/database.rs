//! Database connection and key-value operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

/// Mapping of persisted keys to their JSON values
pub type StateMap = HashMap<String, serde_json::Value>;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Read the requested keys. Keys that were never written are absent from the result.
    pub fn get(&self, keys: &[&str]) -> Result<StateMap> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM kv_state WHERE key = ?1")?;
            let mut values = StateMap::with_capacity(keys.len());

            for key in keys {
                let raw: Option<String> = stmt.query_row([key], |row| row.get(0)).optional()?;
                if let Some(raw) = raw {
                    values.insert((*key).to_string(), serde_json::from_str(&raw)?);
                }
            }

            Ok(values)
        })
    }

    /// Write every entry of `values` in one transaction (last write wins per key).
    pub fn set(&self, values: &StateMap) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();

        self.transaction(|conn| {
            let mut stmt = conn.prepare(
                "INSERT OR REPLACE INTO kv_state (key, value, updated_at) VALUES (?1, ?2, ?3)",
            )?;
            for (key, value) in values {
                let raw = serde_json::to_string(value)?;
                stmt.execute(rusqlite::params![key, raw, updated_at])?;
            }
            Ok(())
        })?;

        tracing::debug!(keys = values.len(), "Persisted state");

        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
