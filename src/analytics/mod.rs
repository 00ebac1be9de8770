//! Derived views over an expense collection: headline summary, per-category
//! totals and the monthly trend. Everything here is a pure function of its
//! arguments; the caller supplies "today" instead of reading the clock.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Category, CategoryTotal, Expense, ExpenseSummary, MonthlyData};

/// Number of months (with data) kept in the monthly trend.
pub(crate) const MONTHLY_WINDOW: usize = 6;

/// Number of entries in the dashboard's recent list.
pub(crate) const RECENT_LIMIT: usize = 5;

/// First and last day of the month containing `today`.
pub(crate) fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_first.and_then(|d| d.pred_opt()).unwrap_or(today);
    (first, last)
}

fn sum(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Totals over `filtered`, plus "this month" spending over `all`.
///
/// The monthly figure ignores the active filter.
pub(crate) fn compute_summary(
    filtered: &[Expense],
    all: &[Expense],
    today: NaiveDate,
) -> ExpenseSummary {
    let (month_start, month_end) = month_bounds(today);
    let monthly_spending = all
        .iter()
        .filter(|e| e.date >= month_start && e.date <= month_end)
        .map(|e| e.amount)
        .sum();

    let total_spending = sum(filtered);
    let expense_count = filtered.len();
    let average_expense = if expense_count > 0 {
        total_spending / Decimal::from(expense_count as u64)
    } else {
        Decimal::ZERO
    };

    ExpenseSummary {
        total_spending,
        monthly_spending,
        expense_count,
        average_expense,
    }
}

/// One row per category present in `filtered`, biggest total first.
/// Equal totals keep category declaration order.
pub(crate) fn compute_category_totals(filtered: &[Expense]) -> Vec<CategoryTotal> {
    let mut buckets: BTreeMap<Category, (Decimal, usize)> = BTreeMap::new();
    for expense in filtered {
        let entry = buckets.entry(expense.category).or_insert((Decimal::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let total_amount: Decimal = buckets.values().map(|(total, _)| *total).sum();

    let mut totals: Vec<CategoryTotal> = buckets
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
            percentage: if total_amount > Decimal::ZERO {
                total / total_amount * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            },
        })
        .collect();

    // stable: ties stay in BTreeMap (declaration) order
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Per-month totals over the whole collection, oldest first, limited to the
/// last [`MONTHLY_WINDOW`] months that have at least one record.
pub(crate) fn compute_monthly_data(all: &[Expense]) -> Vec<MonthlyData> {
    let mut buckets: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    for expense in all {
        let entry = buckets.entry(expense.month_key()).or_insert((Decimal::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let skip = buckets.len().saturating_sub(MONTHLY_WINDOW);
    buckets
        .into_iter()
        .skip(skip)
        .map(|(month, (total, count))| MonthlyData {
            month,
            total,
            count,
        })
        .collect()
}

/// The `limit` most recent records by date.
pub(crate) fn recent_expenses(all: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted = all.to_vec();
    crate::filter::sort_newest_first(&mut sorted);
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests;
