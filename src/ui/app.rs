use crate::analytics;
use crate::filter::{self, FilterSpec};
use crate::models::*;
use crate::tracker::SqliteTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: ExpenseId, description: String },
    ClearAll,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) filter: FilterSpec,

    // Derived views, rebuilt by `refresh` after every mutation or filter change
    pub(crate) total_count: usize,
    pub(crate) expenses: Vec<Expense>,
    pub(crate) summary: ExpenseSummary,
    pub(crate) category_totals: Vec<CategoryTotal>,
    pub(crate) monthly: Vec<MonthlyData>,
    pub(crate) recent: Vec<Expense>,

    // Expense list cursor
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            filter: FilterSpec::default(),

            total_count: 0,
            expenses: Vec::new(),
            summary: ExpenseSummary::default(),
            category_totals: Vec::new(),
            monthly: Vec::new(),
            recent: Vec::new(),

            expense_index: 0,
            expense_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Recompute every derived view from the tracker's current collection.
    /// Headline summary and category totals follow the filter; the monthly
    /// trend and recent list always use everything.
    pub(crate) fn refresh(&mut self, tracker: &SqliteTracker) {
        let all = tracker.list_all();
        let mut filtered = tracker.list_filtered(&self.filter);

        self.summary = tracker.summarize(&filtered);
        self.category_totals = tracker.category_totals(&filtered);
        self.monthly = tracker.monthly_series();
        self.recent = analytics::recent_expenses(all, analytics::RECENT_LIMIT);
        self.total_count = all.len();

        filter::sort_newest_first(&mut filtered);
        self.expenses = filtered;

        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    /// Short description of the active filter, empty when nothing is set.
    pub(crate) fn filter_label(&self) -> String {
        let mut parts = Vec::new();
        match self.filter.date_range.bounds() {
            Some((start, end)) => parts.push(format!("{start}..{end}")),
            None if self.filter.date_range.is_set() => parts.push("partial range".into()),
            None => {}
        }
        if !self.filter.categories.is_empty() {
            let names: Vec<&str> = self.filter.categories.iter().map(|c| c.as_str()).collect();
            parts.push(names.join("+"));
        }
        if !self.filter.search_query.is_empty() {
            parts.push(format!("'{}'", self.filter.search_query));
        }
        parts.join(" | ")
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
