use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_month, format_percentage, percent_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(10),   // Charts
            Constraint::Length(8), // Recent expenses
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_category_breakdown(f, charts[0], app);
    render_monthly_chart(f, charts[1], app);

    render_recent(f, chunks[2], app);
}

fn panel(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let summary = &app.summary;
    let scope = if app.filter.has_active_filters() {
        "filtered"
    } else {
        "all time"
    };

    render_card(
        f,
        cards[0],
        "Total Spending",
        format_amount(summary.total_spending),
        theme::RED,
        scope,
    );
    render_card(
        f,
        cards[1],
        "This Month",
        format_amount(summary.monthly_spending),
        theme::YELLOW,
        "all expenses",
    );
    render_card(
        f,
        cards[2],
        "Expenses",
        summary.expense_count.to_string(),
        theme::ACCENT,
        scope,
    );
    render_card(
        f,
        cards[3],
        "Average",
        format_amount(summary.average_expense),
        theme::GREEN,
        "per expense",
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: &str,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(panel(format!(" {title} ")));

    f.render_widget(text, area);
}

fn render_category_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = panel(" Spending by Category ".into());

    if app.category_totals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses to show. Add one with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Space left for the bar after icon, name, amount and percentage columns
    let bar_width = (area.width as usize).saturating_sub(2 + 3 + 15 + 13 + 7 + 4).max(4);

    let rows: Vec<Row> = app
        .category_totals
        .iter()
        .map(|ct| {
            let style = theme::category_style(ct.category);
            Row::new(vec![
                Cell::from(ct.category.icon()),
                Cell::from(Span::styled(
                    format!("{} ({})", ct.category, ct.count),
                    style,
                )),
                Cell::from(Span::styled(percent_bar(ct.percentage, bar_width), style)),
                Cell::from(format_amount(ct.total)),
                Cell::from(Span::styled(
                    format_percentage(ct.percentage),
                    theme::dim_style(),
                )),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(15),
        Constraint::Min(4),
        Constraint::Length(13),
        Constraint::Length(7),
    ];

    f.render_widget(Table::new(rows, widths).block(block), area);
}

fn render_monthly_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = panel(" Monthly Spending ".into());

    if app.monthly.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No monthly data yet",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .monthly
        .iter()
        .map(|m| {
            let val = m.total.round().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .text_value(format!("${val}"))
                .label(Line::from(format_month(&m.month)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    let block = panel(" Recent Expenses ".into());

    if app.recent.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing recorded yet",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .recent
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(e.date.format("%Y-%m-%d").to_string()),
                Cell::from(format!("{} {}", e.category.icon(), truncate(&e.description, 40))),
                Cell::from(Span::styled(
                    e.category.to_string(),
                    theme::category_style(e.category),
                )),
                Cell::from(Span::styled(format_amount(e.amount), theme::amount_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(13),
    ];

    f.render_widget(Table::new(rows, widths).block(block), area);
}
