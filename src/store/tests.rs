#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Expense, ExpenseFormData};

fn make_expense(date: &str, amount: Decimal, category: Category, desc: &str) -> Expense {
    let form = ExpenseFormData {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        amount,
        category,
        description: desc.into(),
    };
    Expense::new(form, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
}

fn sample() -> Vec<Expense> {
    vec![
        make_expense("2024-01-15", dec!(50.00), Category::Food, "Groceries"),
        make_expense("2024-01-20", dec!(30.25), Category::Food, "Takeout"),
        make_expense("2024-02-01", dec!(20.00), Category::Transportation, "Bus pass"),
    ]
}

// ── Empty / missing data ──────────────────────────────────────

#[test]
fn test_load_empty_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.load_all().is_empty());
}

#[test]
fn test_load_corrupt_value_returns_empty() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_item(STORAGE_KEY, "{not json").unwrap();
    assert!(store.load_all().is_empty());
}

#[test]
fn test_load_wrong_shape_returns_empty() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_item(STORAGE_KEY, r#"{"id":"x"}"#).unwrap();
    assert!(store.load_all().is_empty());
}

#[test]
fn test_load_drops_out_of_range_amounts() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut expenses = sample();
    expenses.push(make_expense(
        "2024-01-21",
        dec!(1000000000000),
        Category::Other,
        "Huge",
    ));
    expenses.push(make_expense("2024-01-22", dec!(-5), Category::Other, "Negative"));
    store.save_all(&expenses);

    let loaded = store.load_all();
    assert_eq!(loaded, expenses[..3].to_vec());
    let total: Decimal = loaded.iter().map(|e| e.amount).sum();
    assert_eq!(total, dec!(100.25));
}

// ── Save / load ───────────────────────────────────────────────

#[test]
fn test_save_then_load() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let expenses = sample();
    store.save_all(&expenses);

    let loaded = store.load_all();
    assert_eq!(loaded, expenses);
}

#[test]
fn test_save_replaces_whole_collection() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.save_all(&sample());
    let single = vec![make_expense("2024-03-01", dec!(9.99), Category::Other, "Misc")];
    store.save_all(&single);

    let loaded = store.load_all();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].description, "Misc");
}

#[test]
fn test_saved_value_is_json_array() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.save_all(&sample());
    let raw = store.get_item(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
}

#[test]
fn test_other_keys_untouched() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set_item("unrelated", "keep me").unwrap();
    store.save_all(&sample());
    store.clear();
    assert_eq!(store.get_item("unrelated").unwrap().as_deref(), Some("keep me"));
}

#[test]
fn test_clear() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.save_all(&sample());
    store.clear();
    assert!(store.load_all().is_empty());
    assert!(store.get_item(STORAGE_KEY).unwrap().is_none());
}

// ── On disk ───────────────────────────────────────────────────

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.db");
    let expenses = sample();

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.save_all(&expenses);
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.load_all(), expenses);
}

#[test]
fn test_reopen_keeps_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.db");
    drop(SqliteStore::open(&path).unwrap());
    let store = SqliteStore::open(&path).unwrap();

    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
}

// ── Test doubles ──────────────────────────────────────────────

#[test]
fn test_memory_store_counts_writes() {
    let mut store = memory::MemoryStore::default();
    store.save_all(&sample());
    store.save_all(&[]);
    assert_eq!(store.save_count, 2);
    assert!(store.load_all().is_empty());
}
