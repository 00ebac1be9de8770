//! Whole-collection persistence for expense records.
//!
//! The tracker only ever asks for "everything" or hands over "everything".
//! Implementations swallow their own failures: a broken read looks like an
//! empty collection and a broken write is logged and forgotten.

mod schema;
mod sqlite;

pub(crate) use sqlite::SqliteStore;

use crate::models::Expense;

/// Namespaced key the serialized collection lives under.
pub(crate) const STORAGE_KEY: &str = "expense-tracker-data";

pub(crate) trait RecordStore {
    /// Every persisted record, or an empty list if nothing is stored or the
    /// stored value cannot be read.
    fn load_all(&self) -> Vec<Expense>;

    /// Replace the persisted collection. Best-effort.
    fn save_all(&mut self, expenses: &[Expense]);

    /// Forget the persisted collection entirely.
    fn clear(&mut self);
}

#[cfg(test)]
pub(crate) mod memory;

#[cfg(test)]
mod tests;
