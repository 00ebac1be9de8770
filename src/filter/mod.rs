use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{Category, Expense};

/// Inclusive date window. Only takes effect when both ends are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
}

impl DateRange {
    pub(crate) fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Both bounds, or `None` when the range is partial or empty.
    pub(crate) fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// Combined predicate over date range, category set and description search.
/// Active dimensions are ANDed; inactive ones pass everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FilterSpec {
    pub(crate) date_range: DateRange,
    /// Empty means no category restriction.
    pub(crate) categories: BTreeSet<Category>,
    /// Empty means no search restriction. Not trimmed.
    pub(crate) search_query: String,
}

impl FilterSpec {
    pub(crate) fn has_active_filters(&self) -> bool {
        self.date_range.is_set() || !self.categories.is_empty() || !self.search_query.is_empty()
    }

    pub(crate) fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.date_range = DateRange::new(start, end);
    }

    pub(crate) fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Add the category if absent, remove it if present.
    pub(crate) fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn matches(&self, expense: &Expense) -> bool {
        if let Some((start, end)) = self.date_range.bounds() {
            if expense.date < start || expense.date > end {
                return false;
            }
        }

        if !self.categories.is_empty() && !self.categories.contains(&expense.category) {
            return false;
        }

        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            if !expense.description.to_lowercase().contains(&query) {
                return false;
            }
        }

        true
    }

    /// Records passing every active predicate, in input order.
    pub(crate) fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Presentation order: newest date first, newest creation first on ties.
pub(crate) fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
