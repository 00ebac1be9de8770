use std::cell::Cell;
use std::rc::Rc;

use super::RecordStore;
use crate::models::Expense;

/// Keeps the "persisted" collection in a Vec and counts writes.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) saved: Vec<Expense>,
    pub(crate) save_count: usize,
}

impl MemoryStore {
    pub(crate) fn with(expenses: Vec<Expense>) -> Self {
        Self {
            saved: expenses,
            save_count: 0,
        }
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> Vec<Expense> {
        self.saved.clone()
    }

    fn save_all(&mut self, expenses: &[Expense]) {
        self.saved = expenses.to_vec();
        self.save_count += 1;
    }

    fn clear(&mut self) {
        self.saved.clear();
    }
}

/// Every write is dropped on the floor. `attempts` is shared so a test can
/// keep watching it after handing the store to a tracker.
#[derive(Default)]
pub(crate) struct FailingStore {
    pub(crate) attempts: Rc<Cell<usize>>,
}

impl RecordStore for FailingStore {
    fn load_all(&self) -> Vec<Expense> {
        Vec::new()
    }

    fn save_all(&mut self, _expenses: &[Expense]) {
        self.attempts.set(self.attempts.get() + 1);
    }

    fn clear(&mut self) {}
}
