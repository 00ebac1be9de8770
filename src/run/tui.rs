use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::tracker::{DeleteOutcome, SqliteTracker};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(tracker: &mut SqliteTracker) -> Result<()> {
    let mut app = App::new();
    app.refresh(tracker);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, tracker);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tracker: &mut SqliteTracker,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab bar, table header, borders, status and command bars
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            handle_key(key, app, tracker)?;
        }
    }
    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App, tracker: &mut SqliteTracker) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, tracker),
        InputMode::Command => handle_command_input(key, app, tracker),
        InputMode::Search => {
            handle_search_input(key, app, tracker);
            Ok(())
        }
        InputMode::Confirm => {
            handle_confirm_input(key, app, tracker);
            Ok(())
        }
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, tracker: &mut SqliteTracker) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.screen = Screen::Expenses;
            app.filter.set_search_query("");
            reset_cursor(app, tracker);
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            app.visible_rows,
        ),
        KeyCode::Char('1') => switch_screen(app, tracker, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, tracker, Screen::Expenses),
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else {
                (idx + screens.len() - 1) % screens.len()
            };
            switch_screen(app, tracker, screens[next]);
        }
        KeyCode::Char('a') => {
            // Prefill today's date; the rest is typed by the user
            app.input_mode = InputMode::Command;
            app.command_input = format!("add {} ", tracker.today().format("%Y-%m-%d"));
        }
        KeyCode::Char('e') if app.screen == Screen::Expenses => {
            if let Some(expense) = app.selected_expense() {
                let form = expense.form_data();
                app.command_input = format!(
                    "edit {} {} {} {}",
                    form.date.format("%Y-%m-%d"),
                    form.amount,
                    form.category,
                    form.description
                );
                app.input_mode = InputMode::Command;
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app, tracker)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => handle_escape(app, tracker),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, tracker: &mut SqliteTracker) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, tracker)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

/// Live search: every keystroke re-filters the list.
fn handle_search_input(key: KeyEvent, app: &mut App, tracker: &SqliteTracker) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            if !app.filter.search_query.is_empty() {
                app.set_status(format!(
                    "{} matches for '{}'",
                    app.expenses.len(),
                    app.filter.search_query
                ));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.filter.set_search_query("");
            reset_cursor(app, tracker);
        }
        KeyCode::Backspace => {
            let mut query = std::mem::take(&mut app.filter.search_query);
            query.pop();
            app.filter.set_search_query(query);
            reset_cursor(app, tracker);
        }
        KeyCode::Char(c) => {
            let mut query = std::mem::take(&mut app.filter.search_query);
            query.push(c);
            app.filter.set_search_query(query);
            reset_cursor(app, tracker);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, tracker: &mut SqliteTracker) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteExpense { id, description } => {
                        match tracker.delete(&id) {
                            DeleteOutcome::Deleted(_) => {
                                app.set_status(format!("Deleted: {description}"));
                            }
                            DeleteOutcome::NotFound => {
                                app.set_status(format!("'{description}' was already gone"));
                            }
                        }
                        app.refresh(tracker);
                    }
                    PendingAction::ClearAll => {
                        let count = app.total_count;
                        tracker.clear_all();
                        app.refresh(tracker);
                        app.set_status(format!("Deleted {count} expenses"));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, tracker: &SqliteTracker, screen: Screen) {
    app.screen = screen;
    app.refresh(tracker);
    app.set_status(format!("{screen}"));
}

fn reset_cursor(app: &mut App, tracker: &SqliteTracker) {
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh(tracker);
}

fn handle_move_down(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            app.visible_rows,
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_up(&mut app.expense_index, &mut app.expense_scroll);
    }
}

fn handle_escape(app: &mut App, tracker: &SqliteTracker) {
    if !app.filter.search_query.is_empty() {
        app.filter.set_search_query("");
        reset_cursor(app, tracker);
        app.set_status("Search cleared");
    } else {
        app.status_message.clear();
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
