//! SQLite-backed local storage.
//!
//! RULE: Only store.rs talks to the database.
//! Everything else goes through the `KeyValueStorage` trait.

use crate::{error::PanelResult, storage::KeyValueStorage};
use rusqlite::{params, Connection, OptionalExtension};

pub struct LocalStore {
    conn: Connection,
    path: Option<String>, // None for :memory:
}

impl LocalStore {
    /// Open (or create) the storage database at `path`.
    pub fn open(path: &str) -> PanelResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; SQLite keeps working without it.
        if let Err(e) = conn.execute_batch("PRAGMA journal_mode=WAL;") {
            log::warn!("store: WAL mode unavailable for {path}: {e}");
        }
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PanelResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PanelResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_local_storage.sql"))?;
        Ok(())
    }

    // ── Test / summary helpers ────────────────────────────────────────

    pub fn key_count(&self) -> PanelResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM local_storage",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl KeyValueStorage for LocalStore {
    fn get_item(&self, key: &str) -> PanelResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> PanelResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO local_storage (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> PanelResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn clear_all(&mut self) -> PanelResult<()> {
        self.conn.execute("DELETE FROM local_storage", [])?;
        Ok(())
    }
}
