#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use super::*;
use crate::models::ExpenseFormData;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_expense(d: &str, amount: Decimal, category: Category) -> Expense {
    let form = ExpenseFormData {
        date: date(d),
        amount,
        category,
        description: format!("{category} on {d}"),
    };
    Expense::new(form, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

/// The three-record scenario used throughout the dashboard docs.
fn scenario() -> Vec<Expense> {
    vec![
        make_expense("2024-01-15", dec!(50), Category::Food),
        make_expense("2024-01-20", dec!(30), Category::Food),
        make_expense("2024-02-01", dec!(20), Category::Transportation),
    ]
}

// ── month_bounds ──────────────────────────────────────────────

#[test]
fn test_month_bounds_mid_month() {
    assert_eq!(
        month_bounds(date("2024-02-14")),
        (date("2024-02-01"), date("2024-02-29"))
    );
}

#[test]
fn test_month_bounds_december() {
    assert_eq!(
        month_bounds(date("2023-12-31")),
        (date("2023-12-01"), date("2023-12-31"))
    );
}

#[test]
fn test_month_bounds_first_day() {
    assert_eq!(
        month_bounds(date("2024-04-01")),
        (date("2024-04-01"), date("2024-04-30"))
    );
}

// ── Summary ───────────────────────────────────────────────────

#[test]
fn test_summary_totals() {
    let all = scenario();
    let summary = compute_summary(&all, &all, date("2024-03-10"));
    assert_eq!(summary.total_spending, dec!(100));
    assert_eq!(summary.expense_count, 3);
    assert_eq!(summary.average_expense, dec!(100) / dec!(3));
    assert_eq!(summary.monthly_spending, dec!(0));
}

#[test]
fn test_summary_empty_average_is_zero() {
    let summary = compute_summary(&[], &[], date("2024-01-15"));
    assert_eq!(summary.total_spending, dec!(0));
    assert_eq!(summary.expense_count, 0);
    assert_eq!(summary.average_expense, dec!(0));
    assert_eq!(summary.monthly_spending, dec!(0));
}

#[test]
fn test_summary_monthly_uses_current_month() {
    let all = scenario();
    let summary = compute_summary(&all, &all, date("2024-01-31"));
    assert_eq!(summary.monthly_spending, dec!(80));

    let summary = compute_summary(&all, &all, date("2024-02-29"));
    assert_eq!(summary.monthly_spending, dec!(20));
}

#[test]
fn test_summary_monthly_ignores_filter() {
    let all = scenario();
    let filtered: Vec<Expense> = all
        .iter()
        .filter(|e| e.category == Category::Transportation)
        .cloned()
        .collect();

    let summary = compute_summary(&filtered, &all, date("2024-01-10"));
    assert_eq!(summary.total_spending, dec!(20));
    assert_eq!(summary.expense_count, 1);
    assert_eq!(summary.average_expense, dec!(20));
    // January spending comes from the unfiltered collection
    assert_eq!(summary.monthly_spending, dec!(80));
}

#[test]
fn test_summary_month_edges_inclusive() {
    let all = vec![
        make_expense("2024-03-01", dec!(1), Category::Other),
        make_expense("2024-03-31", dec!(2), Category::Other),
        make_expense("2024-02-29", dec!(4), Category::Other),
        make_expense("2024-04-01", dec!(8), Category::Other),
    ];
    let summary = compute_summary(&all, &all, date("2024-03-15"));
    assert_eq!(summary.monthly_spending, dec!(3));
}

#[test]
fn test_summary_same_month_other_year_excluded() {
    let all = vec![
        make_expense("2023-01-10", dec!(5), Category::Other),
        make_expense("2024-01-10", dec!(7), Category::Other),
    ];
    let summary = compute_summary(&all, &all, date("2024-01-20"));
    assert_eq!(summary.monthly_spending, dec!(7));
}

// ── Category totals ───────────────────────────────────────────

#[test]
fn test_category_totals_scenario() {
    let totals = compute_category_totals(&scenario());
    assert_eq!(totals.len(), 2);

    assert_eq!(totals[0].category, Category::Food);
    assert_eq!(totals[0].total, dec!(80));
    assert_eq!(totals[0].count, 2);
    assert_eq!(totals[0].percentage, dec!(80));

    assert_eq!(totals[1].category, Category::Transportation);
    assert_eq!(totals[1].total, dec!(20));
    assert_eq!(totals[1].count, 1);
    assert_eq!(totals[1].percentage, dec!(20));
}

#[test]
fn test_category_totals_empty() {
    assert!(compute_category_totals(&[]).is_empty());
}

#[test]
fn test_category_totals_omits_absent_categories() {
    let totals = compute_category_totals(&scenario());
    assert!(totals.iter().all(|t| t.count > 0));
    assert!(!totals.iter().any(|t| t.category == Category::Bills));
}

#[test]
fn test_category_totals_sorted_descending() {
    let all = vec![
        make_expense("2024-01-01", dec!(5), Category::Food),
        make_expense("2024-01-02", dec!(40), Category::Bills),
        make_expense("2024-01-03", dec!(15), Category::Shopping),
        make_expense("2024-01-04", dec!(15), Category::Shopping),
    ];
    let totals = compute_category_totals(&all);
    let order: Vec<Category> = totals.iter().map(|t| t.category).collect();
    assert_eq!(order, vec![Category::Bills, Category::Shopping, Category::Food]);
}

#[test]
fn test_category_totals_ties_follow_declaration_order() {
    let all = vec![
        make_expense("2024-01-01", dec!(10), Category::Other),
        make_expense("2024-01-02", dec!(10), Category::Entertainment),
        make_expense("2024-01-03", dec!(10), Category::Food),
    ];
    let order: Vec<Category> = compute_category_totals(&all)
        .iter()
        .map(|t| t.category)
        .collect();
    assert_eq!(
        order,
        vec![Category::Food, Category::Entertainment, Category::Other]
    );
}

#[test]
fn test_category_percentages_sum_to_hundred() {
    let all = vec![
        make_expense("2024-01-01", dec!(10), Category::Food),
        make_expense("2024-01-02", dec!(10), Category::Bills),
        make_expense("2024-01-03", dec!(10), Category::Other),
        make_expense("2024-01-04", dec!(3.33), Category::Shopping),
    ];
    let totals = compute_category_totals(&all);
    let sum: Decimal = totals.iter().map(|t| t.percentage).sum();
    assert!((sum - dec!(100)).abs() < dec!(0.000001), "sum was {sum}");
}

#[test]
fn test_category_totals_sum_to_collection_total() {
    let all = vec![
        make_expense("2024-01-01", dec!(10.10), Category::Food),
        make_expense("2024-02-02", dec!(0.99), Category::Food),
        make_expense("2024-03-03", dec!(1234.56), Category::Bills),
        make_expense("2024-04-04", dec!(7), Category::Transportation),
    ];
    let totals = compute_category_totals(&all);
    let by_category: Decimal = totals.iter().map(|t| t.total).sum();
    let direct: Decimal = all.iter().map(|e| e.amount).sum();
    assert_eq!(by_category, direct);
    assert_eq!(totals.iter().map(|t| t.count).sum::<usize>(), all.len());
}

// ── Monthly series ────────────────────────────────────────────

#[test]
fn test_monthly_scenario() {
    let monthly = compute_monthly_data(&scenario());
    assert_eq!(
        monthly,
        vec![
            MonthlyData {
                month: "2024-01".into(),
                total: dec!(80),
                count: 2,
            },
            MonthlyData {
                month: "2024-02".into(),
                total: dec!(20),
                count: 1,
            },
        ]
    );
}

#[test]
fn test_monthly_empty() {
    assert!(compute_monthly_data(&[]).is_empty());
}

#[test]
fn test_monthly_sorted_regardless_of_input_order() {
    let all = vec![
        make_expense("2024-03-01", dec!(1), Category::Food),
        make_expense("2023-11-01", dec!(1), Category::Food),
        make_expense("2024-01-01", dec!(1), Category::Food),
    ];
    let months: Vec<String> = compute_monthly_data(&all)
        .into_iter()
        .map(|m| m.month)
        .collect();
    assert_eq!(months, vec!["2023-11", "2024-01", "2024-03"]);
}

#[test]
fn test_monthly_keeps_last_six_months_with_data() {
    let all: Vec<Expense> = (1..=9)
        .map(|m| make_expense(&format!("2024-{m:02}-10"), dec!(10), Category::Food))
        .collect();
    let monthly = compute_monthly_data(&all);
    assert_eq!(monthly.len(), MONTHLY_WINDOW);
    assert_eq!(monthly[0].month, "2024-04");
    assert_eq!(monthly[5].month, "2024-09");
}

#[test]
fn test_monthly_gaps_do_not_consume_slots() {
    let all = vec![
        make_expense("2023-01-05", dec!(1), Category::Food),
        make_expense("2023-06-05", dec!(1), Category::Food),
        make_expense("2023-12-05", dec!(1), Category::Food),
        make_expense("2024-06-05", dec!(1), Category::Food),
        make_expense("2025-01-05", dec!(1), Category::Food),
    ];
    let monthly = compute_monthly_data(&all);
    assert_eq!(monthly.len(), 5);
    assert_eq!(monthly[0].month, "2023-01");
}

// ── Recent ────────────────────────────────────────────────────

#[test]
fn test_recent_expenses() {
    let all: Vec<Expense> = (1..=8)
        .map(|d| make_expense(&format!("2024-01-{d:02}"), dec!(1), Category::Other))
        .collect();
    let recent = recent_expenses(&all, RECENT_LIMIT);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].date, date("2024-01-08"));
    assert_eq!(recent[4].date, date("2024-01-04"));
}

#[test]
fn test_recent_expenses_short_list() {
    let recent = recent_expenses(&scenario(), RECENT_LIMIT);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].date, date("2024-02-01"));
}
