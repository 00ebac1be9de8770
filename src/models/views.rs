use rust_decimal::Decimal;

use super::Category;

/// Headline numbers for the dashboard. Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ExpenseSummary {
    pub(crate) total_spending: Decimal,
    pub(crate) monthly_spending: Decimal,
    pub(crate) expense_count: usize,
    pub(crate) average_expense: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: Category,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
    /// Share of the grand total, 0-100.
    pub(crate) percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyData {
    /// Format: "YYYY-MM"
    pub(crate) month: String,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
}
