use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::analytics;
use crate::export;
use crate::filter::{self, FilterSpec};
use crate::models::{Category, ExpenseId};
use crate::tracker::{DeleteOutcome, SqliteTracker, UpdateOutcome};
use crate::ui::util::{format_amount, format_month, format_percentage};
use crate::validate;

pub(crate) fn as_cli(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "add" | "a" => cli_add(rest, tracker),
        "edit" => cli_edit(rest, tracker),
        "delete" | "rm" => cli_delete(rest, tracker),
        "list" | "ls" => cli_list(rest, tracker),
        "summary" | "s" => cli_summary(rest, tracker),
        "categories" => cli_categories(rest, tracker),
        "monthly" => cli_monthly(tracker),
        "export" => cli_export(rest, tracker),
        "clear" => cli_clear(rest, tracker),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI - local-only personal expense tracker");
    println!();
    println!("Usage: expensetui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                   Launch interactive TUI");
    println!("  add <date> <amount> <category> <desc>    Record an expense");
    println!("  edit <id> <date> <amount> <category> <desc>");
    println!("                                           Replace an expense's fields");
    println!("  delete <id>                              Delete an expense");
    println!("  list [filters]                           List expenses, newest first");
    println!("  summary [filters]                        Print spending summary");
    println!("  categories [filters]                     Print spending by category");
    println!("  monthly                                  Print the last 6 months with data");
    println!("  export [path] [filters]                  Export expenses to CSV");
    println!("  clear --yes                              Delete every expense");
    println!("  --help, -h                               Show this help");
    println!("  --version, -V                            Show version");
    println!();
    println!("Filters:");
    println!("  --from <YYYY-MM-DD> --to <YYYY-MM-DD>    Inclusive date range (needs both)");
    println!("  --category <name>                        Repeatable; any listed category");
    println!("  --search <text>                          Case-insensitive description match");
    println!();
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    println!("Categories: {}", names.join(", "));
    println!();
    println!("Set RUST_LOG=debug for diagnostics, EXPENSETUI_DB to use another database.");
}

/// Split filter flags out of `args`, returning the filter and the remaining
/// positional arguments in order.
pub(crate) fn parse_filter_args(args: &[String]) -> Result<(FilterSpec, Vec<String>)> {
    let mut spec = FilterSpec::default();
    let mut positional = Vec::new();
    let mut from = None;
    let mut to = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            flag @ ("--from" | "--to" | "--category" | "-c" | "--search") => {
                let Some(value) = iter.next() else {
                    bail!("{flag} needs a value");
                };
                match flag {
                    "--from" => from = Some(validate::parse_date(value)?),
                    "--to" => to = Some(validate::parse_date(value)?),
                    "--search" => spec.set_search_query(value.as_str()),
                    _ => {
                        spec.categories.insert(validate::parse_category(value)?);
                    }
                }
            }
            other if other.starts_with("--") => bail!("Unknown option: {other}"),
            _ => positional.push(arg.clone()),
        }
    }

    spec.set_date_range(from, to);
    if spec.date_range.is_set() && spec.date_range.bounds().is_none() {
        log::warn!("Date range needs both --from and --to; ignoring it");
    }
    Ok((spec, positional))
}

/// Shortest id prefix accepted in place of a full id.
const MIN_ID_PREFIX: usize = 4;

/// Find an expense by full id or by a prefix of at least [`MIN_ID_PREFIX`]
/// characters that matches exactly one record.
pub(crate) fn resolve_id(tracker: &SqliteTracker, raw: &str) -> Result<ExpenseId> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("Expense id is required");
    }
    let id = ExpenseId::from(raw);
    if tracker.find(&id).is_some() {
        return Ok(id);
    }

    if raw.chars().count() < MIN_ID_PREFIX {
        bail!("No expense with id '{raw}' (prefixes need at least {MIN_ID_PREFIX} characters)");
    }

    let matches: Vec<&ExpenseId> = tracker
        .list_all()
        .iter()
        .map(|e| &e.id)
        .filter(|id| id.as_str().starts_with(raw))
        .collect();
    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        [] => bail!("No expense with id '{raw}'"),
        _ => bail!("Id prefix '{raw}' matches {} expenses", matches.len()),
    }
}

/// First 8 characters of an id, enough for `resolve_id` in practice.
fn short_id(id: &ExpenseId) -> String {
    id.as_str().chars().take(8).collect()
}

fn cli_add(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    if args.len() < 4 {
        bail!("Usage: expensetui add <YYYY-MM-DD> <amount> <category> <description>");
    }
    let form = validate::parse_form(&args[0], &args[1], &args[2], &args[3..].join(" "))?;
    let expense = tracker.create(form);
    println!(
        "Added {} {} {} ({})",
        expense.id,
        format_amount(expense.amount),
        expense.description,
        expense.category
    );
    Ok(())
}

fn cli_edit(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    if args.len() < 5 {
        bail!("Usage: expensetui edit <id> <YYYY-MM-DD> <amount> <category> <description>");
    }
    let id = resolve_id(tracker, &args[0])?;
    let form = validate::parse_form(&args[1], &args[2], &args[3], &args[4..].join(" "))?;
    match tracker.update(&id, form) {
        UpdateOutcome::Updated(expense) => {
            println!("Updated {} {}", expense.id, expense.description);
            Ok(())
        }
        UpdateOutcome::NotFound => bail!("No expense with id '{id}'"),
    }
}

fn cli_delete(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    let Some(raw) = args.first() else {
        bail!("Usage: expensetui delete <id>");
    };
    let id = resolve_id(tracker, raw)?;
    match tracker.delete(&id) {
        DeleteOutcome::Deleted(expense) => {
            println!("Deleted {} {}", expense.id, expense.description);
            Ok(())
        }
        DeleteOutcome::NotFound => bail!("No expense with id '{id}'"),
    }
}

fn cli_list(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    let (spec, _) = parse_filter_args(args)?;
    let mut expenses = tracker.list_filtered(&spec);
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }
    filter::sort_newest_first(&mut expenses);

    println!(
        "{:<8} {:<10} {:>12}  {:<15} Description",
        "ID", "Date", "Amount", "Category"
    );
    println!("{}", "─".repeat(72));
    for e in &expenses {
        println!(
            "{:<8} {:<10} {:>12}  {:<15} {}",
            short_id(&e.id),
            e.date.format("%Y-%m-%d").to_string(),
            format_amount(e.amount),
            e.category.as_str(),
            e.description,
        );
    }
    println!("{}", "─".repeat(72));
    println!("{} of {} expenses", expenses.len(), tracker.list_all().len());
    Ok(())
}

fn cli_summary(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    let (spec, _) = parse_filter_args(args)?;
    let filtered = tracker.list_filtered(&spec);
    let summary = tracker.summarize(&filtered);
    let (month_start, _) = analytics::month_bounds(tracker.today());

    println!("ExpenseTUI Summary");
    println!("{}", "─".repeat(40));
    println!("  Total Spending:  {}", format_amount(summary.total_spending));
    println!(
        "  {:<16} {}",
        format!("{}:", month_start.format("%b %Y")),
        format_amount(summary.monthly_spending)
    );
    println!("  Expenses:        {}", summary.expense_count);
    println!("  Average:         {}", format_amount(summary.average_expense));

    let totals = tracker.category_totals(&filtered);
    if !totals.is_empty() {
        println!();
        println!("Spending by Category:");
        for ct in &totals {
            println!(
                "  {:<16} {:>12}  {:>6}",
                ct.category.as_str(),
                format_amount(ct.total),
                format_percentage(ct.percentage)
            );
        }
    }
    Ok(())
}

fn cli_categories(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    let (spec, _) = parse_filter_args(args)?;
    let totals = tracker.category_totals(&tracker.list_filtered(&spec));
    if totals.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<16} {:>6} {:>12} {:>7}",
        "Category", "Count", "Total", "Share"
    );
    println!("{}", "─".repeat(44));
    for ct in &totals {
        println!(
            "{:<16} {:>6} {:>12} {:>7}",
            ct.category.as_str(),
            ct.count,
            format_amount(ct.total),
            format_percentage(ct.percentage)
        );
    }
    Ok(())
}

fn cli_monthly(tracker: &mut SqliteTracker) -> Result<()> {
    let series = tracker.monthly_series();
    if series.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!("{:<10} {:>6} {:>12}", "Month", "Count", "Total");
    println!("{}", "─".repeat(30));
    for m in &series {
        println!(
            "{:<10} {:>6} {:>12}",
            format_month(&m.month),
            m.count,
            format_amount(m.total)
        );
    }
    Ok(())
}

fn cli_export(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    let (spec, positional) = parse_filter_args(args)?;

    // Output path is the first positional argument
    let output_path = positional
        .first()
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| PathBuf::from(export::default_filename(tracker.today())));

    let expenses = tracker.list_filtered(&spec);
    let count = export::export_to_csv(&output_path, &expenses)
        .with_context(|| format!("Export to {} failed", output_path.display()))?;
    println!("Exported {count} expenses to {}", output_path.display());
    Ok(())
}

fn cli_clear(args: &[String], tracker: &mut SqliteTracker) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") {
        bail!(
            "Refusing to delete {} expenses without --yes",
            tracker.list_all().len()
        );
    }
    let count = tracker.list_all().len();
    tracker.clear_all();
    println!("Deleted {count} expenses");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
