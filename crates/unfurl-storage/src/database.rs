//! SQLite-backed session store

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::migrations::run_migrations;
use crate::store::SessionStore;
use crate::Result;

/// Entries survive process restarts and are partitioned by browsing-session id.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    session_id: String,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P, session_id: &str) -> Result<Self> {
        let conn = Connection::open(path)?;

        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            session_id: session_id.to_string(),
        })
    }

    pub fn open_in_memory(session_id: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            session_id: session_id.to_string(),
        })
    }

    /// Open `path` for a freshly generated browsing session.
    pub fn new_session<P: AsRef<Path>>(path: P) -> Result<Self> {
        let session_id = Uuid::new_v4().to_string();
        tracing::debug!(session_id = %session_id, "Starting storage session");
        Self::open(path, &session_id)
    }

    /// Another session on the same connection.
    pub fn session(&self, session_id: &str) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            session_id: session_id.to_string(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Drop every entry of this session.
    pub fn clear_session(&self) -> Result<usize> {
        self.with_connection(|conn| {
            let removed = conn.execute(
                "DELETE FROM session_storage WHERE session_id = ?1",
                [&self.session_id],
            )?;
            Ok(removed)
        })
    }

    /// Drop entries of any session not written since `cutoff`.
    pub fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let cutoff = timestamp(cutoff);
        let removed = self.with_connection(|conn| {
            let removed = conn.execute(
                "DELETE FROM session_storage WHERE updated_at < ?1",
                [&cutoff],
            )?;
            Ok(removed)
        })?;

        if removed > 0 {
            tracing::info!(removed, "Purged stale session storage");
        }
        Ok(removed)
    }
}

/// Fixed-width so that stored timestamps order lexically.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl Clone for SqliteStore {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            session_id: self.session_id.clone(),
        }
    }
}

impl SessionStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM session_storage WHERE session_id = ?1 AND key = ?2",
                    [self.session_id.as_str(), key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = timestamp(Utc::now());
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO session_storage (session_id, key, value, updated_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![self.session_id, key, value, updated_at],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "DELETE FROM session_storage WHERE session_id = ?1 AND key = ?2",
                [self.session_id.as_str(), key],
            )?;
            Ok(())
        })
    }
}
