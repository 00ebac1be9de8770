use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{schema, RecordStore, STORAGE_KEY};
use crate::models::Expense;
use crate::validate::{MAX_AMOUNT, MIN_AMOUNT};

/// SQLite-backed key-value store. The expense collection is kept as one JSON
/// array under [`STORAGE_KEY`].
pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Database migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))?)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw key-value access ──────────────────────────────────

    pub(crate) fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    pub(crate) fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub(crate) fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Records whose amount falls outside the accepted range are dropped so
    /// that later sums cannot overflow.
    fn try_load(&self) -> Result<Vec<Expense>> {
        let Some(json) = self.get_item(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        let mut expenses: Vec<Expense> =
            serde_json::from_str(&json).context("Stored expenses are not valid JSON")?;
        let before = expenses.len();
        expenses.retain(|e| (MIN_AMOUNT..=MAX_AMOUNT).contains(&e.amount));
        if expenses.len() < before {
            log::warn!(
                "Dropped {} stored expenses with out-of-range amounts",
                before - expenses.len()
            );
        }
        Ok(expenses)
    }

    fn try_save(&self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string(expenses).context("Failed to serialize expenses")?;
        self.set_item(STORAGE_KEY, &json)
    }
}

impl RecordStore for SqliteStore {
    fn load_all(&self) -> Vec<Expense> {
        self.try_load().unwrap_or_else(|e| {
            log::warn!("Error reading expenses from storage: {e:#}");
            Vec::new()
        })
    }

    fn save_all(&mut self, expenses: &[Expense]) {
        if let Err(e) = self.try_save(expenses) {
            log::error!("Error writing expenses to storage: {e:#}");
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.remove_item(STORAGE_KEY) {
            log::error!("Error clearing storage: {e:#}");
        }
    }
}
