//! The authoritative in-memory expense collection and the only place that
//! mutates it. Every mutation rewrites the whole collection through the
//! [`RecordStore`]; a failed write does not roll back the in-memory change.

use crate::analytics;
use crate::clock::{Clock, SystemClock};
use crate::filter::FilterSpec;
use crate::models::*;
use crate::store::{RecordStore, SqliteStore};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UpdateOutcome {
    Updated(Expense),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DeleteOutcome {
    Deleted(Expense),
    NotFound,
}

/// The tracker the binary runs against.
pub(crate) type SqliteTracker = ExpenseTracker<SqliteStore>;

pub(crate) struct ExpenseTracker<S: RecordStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    expenses: Vec<Expense>,
}

impl<S: RecordStore> ExpenseTracker<S, SystemClock> {
    pub(crate) fn open(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: RecordStore, C: Clock> ExpenseTracker<S, C> {
    pub(crate) fn with_clock(store: S, clock: C) -> Self {
        let expenses = store.load_all();
        log::debug!("Loaded {} expenses", expenses.len());
        Self {
            store,
            clock,
            expenses,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn list_all(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn list_filtered(&self, spec: &FilterSpec) -> Vec<Expense> {
        spec.apply(&self.expenses)
    }

    pub(crate) fn find(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Summary of `filtered`, with "this month" taken from the full
    /// collection and the tracker's clock.
    pub(crate) fn summarize(&self, filtered: &[Expense]) -> ExpenseSummary {
        analytics::compute_summary(filtered, &self.expenses, self.clock.today())
    }

    pub(crate) fn category_totals(&self, filtered: &[Expense]) -> Vec<CategoryTotal> {
        analytics::compute_category_totals(filtered)
    }

    /// Always over the full collection, whatever filter is active.
    pub(crate) fn monthly_series(&self) -> Vec<MonthlyData> {
        analytics::compute_monthly_data(&self.expenses)
    }

    pub(crate) fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    // ── Mutations ─────────────────────────────────────────────

    pub(crate) fn create(&mut self, form: ExpenseFormData) -> Expense {
        let expense = Expense::new(form, self.clock.now());
        log::debug!("Creating expense {}", expense.id);
        self.expenses.push(expense.clone());
        self.persist();
        expense
    }

    /// Replace the editable fields of `id`. Unknown ids leave the collection
    /// and storage untouched.
    pub(crate) fn update(&mut self, id: &ExpenseId, form: ExpenseFormData) -> UpdateOutcome {
        let now = self.clock.now();
        let Some(expense) = self.expenses.iter_mut().find(|e| &e.id == id) else {
            log::debug!("Update skipped, no expense {id}");
            return UpdateOutcome::NotFound;
        };
        expense.apply(form, now);
        let updated = expense.clone();
        log::debug!("Updated expense {id}");
        self.persist();
        UpdateOutcome::Updated(updated)
    }

    /// Remove `id` if present. The collection is persisted either way.
    pub(crate) fn delete(&mut self, id: &ExpenseId) -> DeleteOutcome {
        let outcome = match self.expenses.iter().position(|e| &e.id == id) {
            Some(index) => {
                log::debug!("Deleting expense {id}");
                DeleteOutcome::Deleted(self.expenses.remove(index))
            }
            None => {
                log::debug!("Delete found no expense {id}");
                DeleteOutcome::NotFound
            }
        };
        self.persist();
        outcome
    }

    /// Drop every record, in memory and in storage.
    pub(crate) fn clear_all(&mut self) {
        log::debug!("Clearing {} expenses", self.expenses.len());
        self.expenses.clear();
        self.store.clear();
    }

    fn persist(&mut self) {
        self.store.save_all(&self.expenses);
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
