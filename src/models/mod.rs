mod category;
mod expense;
mod views;

pub(crate) use category::Category;
pub(crate) use expense::{round_cents, Expense, ExpenseFormData, ExpenseId};
pub(crate) use views::{CategoryTotal, ExpenseSummary, MonthlyData};
