use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let label = app.filter_label();
    let title = if label.is_empty() {
        format!(" Expenses ({}) ", app.expenses.len())
    } else {
        format!(
            " Expenses ({} of {}) {label} ",
            app.expenses.len(),
            app.total_count
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()));

    if app.expenses.is_empty() {
        let msg = if app.filter.has_active_filters() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No expenses match the current filters",
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Clear them with :clear-filters",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No expenses yet", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Press a or use :add <date> <amount> <category> <description>",
                    theme::dim_style(),
                )),
            ]
        };
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let is_cursor = i == app.expense_index;
            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // Cursor row keeps a single style so the highlight reads cleanly
            let category_cell = if is_cursor {
                Cell::from(format!("{} {}", expense.category.icon(), expense.category))
            } else {
                Cell::from(Span::styled(
                    format!("{} {}", expense.category.icon(), expense.category),
                    theme::category_style(expense.category),
                ))
            };
            let amount_cell = if is_cursor {
                Cell::from(format_amount(expense.amount))
            } else {
                Cell::from(Span::styled(
                    format_amount(expense.amount),
                    theme::amount_style(),
                ))
            };

            Row::new(vec![
                Cell::from(format!("  {}", expense.date.format("%Y-%m-%d"))),
                Cell::from(truncate(&expense.description, 60)),
                category_cell,
                amount_cell,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
