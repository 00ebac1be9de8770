#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Expense;
use crate::store::{RecordStore, SqliteStore};
use crate::tracker::ExpenseTracker;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn tracker() -> SqliteTracker {
    ExpenseTracker::open(SqliteStore::open_in_memory().unwrap())
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── Filter flags ──────────────────────────────────────────────

#[test]
fn test_parse_filter_args_empty() {
    let (spec, positional) = parse_filter_args(&[]).unwrap();
    assert!(!spec.has_active_filters());
    assert!(positional.is_empty());
}

#[test]
fn test_parse_filter_args_all_flags() {
    let (spec, positional) = parse_filter_args(&args(&[
        "out.csv",
        "--from",
        "2024-01-01",
        "--to",
        "2024-01-31",
        "--category",
        "food",
        "-c",
        "Bills",
        "--search",
        "Coffee Shop",
    ]))
    .unwrap();

    assert_eq!(positional, vec!["out.csv".to_string()]);
    assert_eq!(
        spec.date_range.bounds(),
        Some((date("2024-01-01"), date("2024-01-31")))
    );
    assert_eq!(spec.categories.len(), 2);
    assert!(spec.categories.contains(&Category::Food));
    assert!(spec.categories.contains(&Category::Bills));
    assert_eq!(spec.search_query, "Coffee Shop");
}

#[test]
fn test_parse_filter_args_repeated_category_is_a_set() {
    let (spec, _) =
        parse_filter_args(&args(&["--category", "Food", "--category", "food"])).unwrap();
    assert_eq!(spec.categories.len(), 1);
}

#[test]
fn test_parse_filter_args_half_range_kept_but_inactive() {
    let (spec, _) = parse_filter_args(&args(&["--from", "2024-01-01"])).unwrap();
    assert!(spec.date_range.is_set());
    assert!(spec.date_range.bounds().is_none());
}

#[test]
fn test_parse_filter_args_errors() {
    assert!(parse_filter_args(&args(&["--from"])).is_err());
    assert!(parse_filter_args(&args(&["--from", "January"])).is_err());
    assert!(parse_filter_args(&args(&["--category", "Groceries"])).is_err());
    let err = parse_filter_args(&args(&["--month", "2024-01"])).unwrap_err();
    assert!(err.to_string().contains("Unknown option: --month"));
}

// ── Ids ───────────────────────────────────────────────────────

#[test]
fn test_resolve_id_exact_and_prefix() {
    let mut t = tracker();
    as_cli(
        &args(&["expensetui", "add", "2024-01-15", "50", "Food", "Groceries"]),
        &mut t,
    )
    .unwrap();
    let id = t.list_all()[0].id.clone();

    assert_eq!(resolve_id(&t, id.as_str()).unwrap(), id);
    assert_eq!(resolve_id(&t, &id.as_str()[..8]).unwrap(), id);
    assert!(resolve_id(&t, "not-an-id").is_err());
}

#[test]
fn test_resolve_id_ambiguous_prefix() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let form = validate::parse_form("2024-01-15", "5", "Food", "Snack").unwrap();
    let records: Vec<Expense> = ["abcd1111", "abcd2222"]
        .into_iter()
        .map(|id| Expense {
            id: ExpenseId::from(id),
            ..Expense::new(form.clone(), chrono::Utc::now())
        })
        .collect();
    store.save_all(&records);
    let t = ExpenseTracker::open(store);

    let err = resolve_id(&t, "abcd").unwrap_err();
    assert!(err.to_string().contains("matches 2 expenses"));
    assert_eq!(resolve_id(&t, "abcd2").unwrap().as_str(), "abcd2222");
}

#[test]
fn test_resolve_id_rejects_empty_and_short() {
    let mut t = tracker();
    as_cli(
        &args(&["expensetui", "add", "2024-01-15", "50", "Food", "Groceries"]),
        &mut t,
    )
    .unwrap();
    let id = t.list_all()[0].id.clone();

    assert!(resolve_id(&t, "").is_err());
    assert!(resolve_id(&t, "   ").is_err());
    assert!(resolve_id(&t, &id.as_str()[..MIN_ID_PREFIX - 1]).is_err());
    assert_eq!(resolve_id(&t, &id.as_str()[..MIN_ID_PREFIX]).unwrap(), id);
}

#[test]
fn test_cli_empty_id_leaves_single_record() {
    let mut t = tracker();
    as_cli(
        &args(&["expensetui", "add", "2024-01-15", "50", "Food", "Groceries"]),
        &mut t,
    )
    .unwrap();

    assert!(as_cli(&args(&["expensetui", "delete", ""]), &mut t).is_err());
    assert!(as_cli(
        &args(&["expensetui", "edit", "", "2024-01-16", "1", "Food", "Other"]),
        &mut t
    )
    .is_err());
    assert_eq!(t.list_all().len(), 1);
    assert_eq!(t.list_all()[0].description, "Groceries");
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn test_cli_add_joins_description() {
    let mut t = tracker();
    as_cli(
        &args(&["expensetui", "add", "2024-01-15", "$1,250.00", "bills", "Rent", "for", "May"]),
        &mut t,
    )
    .unwrap();

    let e = &t.list_all()[0];
    assert_eq!(e.amount, dec!(1250));
    assert_eq!(e.category, Category::Bills);
    assert_eq!(e.description, "Rent for May");
}

#[test]
fn test_cli_add_validation_error() {
    let mut t = tracker();
    let result = as_cli(&args(&["expensetui", "add", "2024-01-15", "0", "Food", "Free"]), &mut t);
    assert!(result.is_err());
    assert!(t.list_all().is_empty());

    assert!(as_cli(&args(&["expensetui", "add", "2024-01-15"]), &mut t).is_err());
}

#[test]
fn test_cli_edit_and_delete() {
    let mut t = tracker();
    as_cli(
        &args(&["expensetui", "add", "2024-01-15", "50", "Food", "Groceries"]),
        &mut t,
    )
    .unwrap();
    let id = t.list_all()[0].id.clone();

    as_cli(
        &args(&["expensetui", "edit", id.as_str(), "2024-01-16", "55", "Food", "Market"]),
        &mut t,
    )
    .unwrap();
    let e = t.find(&id).unwrap();
    assert_eq!(e.amount, dec!(55));
    assert_eq!(e.description, "Market");
    assert_eq!(e.created_at, t.list_all()[0].created_at);

    as_cli(&args(&["expensetui", "delete", id.as_str()]), &mut t).unwrap();
    assert!(t.list_all().is_empty());
}

#[test]
fn test_cli_delete_unknown_id() {
    let mut t = tracker();
    assert!(as_cli(&args(&["expensetui", "delete", "missing-id"]), &mut t).is_err());
    assert!(as_cli(&args(&["expensetui", "delete"]), &mut t).is_err());
}

#[test]
fn test_cli_clear_requires_yes() {
    let mut t = tracker();
    as_cli(
        &args(&["expensetui", "add", "2024-01-15", "50", "Food", "Groceries"]),
        &mut t,
    )
    .unwrap();

    assert!(as_cli(&args(&["expensetui", "clear"]), &mut t).is_err());
    assert_eq!(t.list_all().len(), 1);

    as_cli(&args(&["expensetui", "clear", "--yes"]), &mut t).unwrap();
    assert!(t.list_all().is_empty());
}

#[test]
fn test_cli_export_with_filters() {
    let mut t = tracker();
    for row in [
        ["2024-01-15", "50", "Food", "Groceries"],
        ["2024-02-01", "20", "Transportation", "Bus"],
    ] {
        let mut a = args(&["expensetui", "add"]);
        a.extend(row.iter().map(|s| s.to_string()));
        as_cli(&a, &mut t).unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("food.csv");
    as_cli(
        &args(&[
            "expensetui",
            "export",
            path.to_str().unwrap(),
            "--category",
            "Food",
        ]),
        &mut t,
    )
    .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "\"Jan 15, 2024\",50.00,Food,Groceries");
}

#[test]
fn test_cli_read_only_commands() {
    let mut t = tracker();
    for cmd in ["list", "summary", "categories", "monthly", "help", "version"] {
        as_cli(&args(&["expensetui", cmd]), &mut t).unwrap();
    }
    assert!(as_cli(&args(&["expensetui", "bogus"]), &mut t).is_err());
}

// ── shellexpand ──────────────────────────────────────────────

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
    assert_eq!(shellexpand("out.csv"), "out.csv");
}

#[test]
fn test_shellexpand_home() {
    let expanded = shellexpand("~/out.csv");
    assert!(!expanded.starts_with('~'));
    assert!(expanded.ends_with("/out.csv"));
}
