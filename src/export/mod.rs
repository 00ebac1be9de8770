use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;

use crate::models::{round_cents, Expense};

/// Default export file name for a given day, e.g. `expenses-2024-01-15.csv`.
pub(crate) fn default_filename(today: NaiveDate) -> String {
    format!("expenses-{}.csv", today.format("%Y-%m-%d"))
}

/// Display form used in exports, e.g. `Jan 15, 2024`.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Write `Date,Amount,Category,Description` rows in the given order.
pub(crate) fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Date", "Amount", "Category", "Description"])?;
    for expense in expenses {
        wtr.write_record([
            format_date(expense.date),
            format!("{:.2}", round_cents(expense.amount)),
            expense.category.to_string(),
            expense.description.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export to a file, returning how many rows were written.
pub(crate) fn export_to_csv(path: &Path, expenses: &[Expense]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(file, expenses)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    Ok(expenses.len())
}
