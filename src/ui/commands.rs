use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::analytics;
use crate::export;
use crate::tracker::{SqliteTracker, UpdateOutcome};
use crate::validate;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut SqliteTracker) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2024-01-15 12.50 Food Lunch)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a 2024-01-15 12.50 Food Lunch)",
        cmd_add,
        r
    );
    register_command!(
        "edit",
        "Edit selected expense (e.g. :edit 2024-01-15 12.50 Food Lunch)",
        cmd_edit,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "cat",
        "Toggle category filter (e.g. :cat Food), no args clears",
        cmd_category,
        r
    );
    register_command!(
        "range",
        "Filter by dates (e.g. :range 2024-01-01 2024-01-31), no args clears",
        cmd_range,
        r
    );
    register_command!(
        "from",
        "Set range start (e.g. :from 2024-01-01)",
        cmd_from,
        r
    );
    register_command!("to", "Set range end (e.g. :to 2024-01-31)", cmd_to, r);
    register_command!("month", "Filter to the current month", cmd_month, r);
    register_command!(
        "search",
        "Search descriptions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search descriptions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "clear-filters",
        "Remove every active filter",
        cmd_clear_filters,
        r
    );
    register_command!("cf", "Remove every active filter", cmd_clear_filters, r);
    register_command!(
        "export",
        "Export filtered expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!("clear-all", "Delete every expense", cmd_clear_all, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    tracker: &mut SqliteTracker,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, tracker)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Rebuild derived views after the filter changed and jump back to the top.
fn refilter(app: &mut App, tracker: &SqliteTracker) {
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh(tracker);
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(tracker);
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(tracker);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

// ── Mutations ────────────────────────────────────────────────

fn cmd_add(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <YYYY-MM-DD> <amount> <category> <description>");
        return Ok(());
    }

    let form = match validate::parse_form_args(args) {
        Ok(form) => form,
        Err(e) => {
            app.set_status(format!("{e:#}"));
            return Ok(());
        }
    };

    let expense = tracker.create(form);
    app.refresh(tracker);
    app.set_status(format!(
        "Added: {} {} ({})",
        expense.description,
        format_amount(expense.amount),
        expense.category
    ));
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }
    let Some(selected) = app.selected_expense() else {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    };
    let id = selected.id.clone();

    if args.is_empty() {
        app.set_status("Usage: :edit <YYYY-MM-DD> <amount> <category> <description>");
        return Ok(());
    }

    let form = match validate::parse_form_args(args) {
        Ok(form) => form,
        Err(e) => {
            app.set_status(format!("{e:#}"));
            return Ok(());
        }
    };

    match tracker.update(&id, form) {
        UpdateOutcome::Updated(expense) => {
            app.refresh(tracker);
            app.set_status(format!("Updated: {}", expense.description));
        }
        UpdateOutcome::NotFound => {
            app.refresh(tracker);
            app.set_status("Expense no longer exists");
        }
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.selected_expense() {
        let id = expense.id.clone();
        let description = expense.description.clone();
        app.confirm_message = format!("Delete '{description}'?");
        app.pending_action = Some(PendingAction::DeleteExpense { id, description });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_clear_all(_args: &str, app: &mut App, _tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    if app.total_count == 0 {
        app.set_status("No expenses to delete");
        return Ok(());
    }
    app.confirm_message = format!("Delete all {} expenses?", app.total_count);
    app.pending_action = Some(PendingAction::ClearAll);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

// ── Filters ──────────────────────────────────────────────────

fn cmd_category(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    if args.is_empty() {
        app.filter.categories.clear();
        refilter(app, tracker);
        app.set_status("Category filter cleared");
        return Ok(());
    }

    match validate::parse_category(args) {
        Ok(category) => {
            app.filter.toggle_category(category);
            refilter(app, tracker);
            let state = if app.filter.categories.contains(&category) {
                "on"
            } else {
                "off"
            };
            app.set_status(format!("{} {category} filter {state}", category.icon()));
        }
        Err(e) => app.set_status(format!("{e:#}")),
    }
    Ok(())
}

fn cmd_range(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    if args.is_empty() {
        app.filter.set_date_range(None, None);
        refilter(app, tracker);
        app.set_status("Date range cleared");
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    let [start, end] = parts.as_slice() else {
        app.set_status("Usage: :range <YYYY-MM-DD> <YYYY-MM-DD>");
        return Ok(());
    };

    match (validate::parse_date(start), validate::parse_date(end)) {
        (Ok(start), Ok(end)) => {
            app.filter.set_date_range(Some(start), Some(end));
            refilter(app, tracker);
            if start > end {
                app.set_status(format!("Range {start}..{end} is inverted and matches nothing"));
            } else {
                app.set_status(format!("Showing {start}..{end}"));
            }
        }
        (Err(e), _) | (_, Err(e)) => app.set_status(format!("{e:#}")),
    }
    Ok(())
}

fn cmd_from(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    set_range_bound(args, app, tracker, true)
}

fn cmd_to(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    set_range_bound(args, app, tracker, false)
}

fn set_range_bound(
    args: &str,
    app: &mut App,
    tracker: &SqliteTracker,
    is_start: bool,
) -> anyhow::Result<()> {
    let date = if args.is_empty() {
        None
    } else {
        match validate::parse_date(args) {
            Ok(d) => Some(d),
            Err(e) => {
                app.set_status(format!("{e:#}"));
                return Ok(());
            }
        }
    };

    let range = &app.filter.date_range;
    let (start, end) = if is_start {
        (date, range.end)
    } else {
        (range.start, date)
    };
    app.filter.set_date_range(start, end);
    refilter(app, tracker);

    if app.filter.date_range.bounds().is_none() && app.filter.date_range.is_set() {
        app.set_status("Range needs both :from and :to before it applies");
    } else {
        app.set_status(format!("Filter: {}", app.filter_label()));
    }
    Ok(())
}

fn cmd_month(_args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    let (start, end) = analytics::month_bounds(tracker.today());
    app.filter.set_date_range(Some(start), Some(end));
    refilter(app, tracker);
    app.set_status(format!("Showing {}", start.format("%B %Y")));
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    app.filter.set_search_query(args);
    app.screen = Screen::Expenses;
    refilter(app, tracker);

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }

    Ok(())
}

fn cmd_clear_filters(
    _args: &str,
    app: &mut App,
    tracker: &mut SqliteTracker,
) -> anyhow::Result<()> {
    app.filter.clear();
    refilter(app, tracker);
    app.set_status("Filters cleared");
    Ok(())
}

// ── Export ───────────────────────────────────────────────────

fn cmd_export(args: &str, app: &mut App, tracker: &mut SqliteTracker) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(export::default_filename(tracker.today()))
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    let expenses = tracker.list_filtered(&app.filter);
    if expenses.is_empty() {
        app.set_status("No expenses to export");
        return Ok(());
    }

    match export::export_to_csv(&path, &expenses) {
        Ok(count) => {
            app.set_status(format!("Exported {count} expenses to {}", path.display()));
        }
        Err(e) => app.set_status(format!("{e:#}")),
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
