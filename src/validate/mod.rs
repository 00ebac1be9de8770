use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Category, ExpenseFormData};

pub(crate) const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);
pub(crate) const MAX_DESCRIPTION_LEN: usize = 200;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        bail!("Date is required");
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{trimmed}', expected YYYY-MM-DD"))
}

pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.trim().replace(['$', ','], "");
    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| anyhow::anyhow!("Amount must be a number: '{}'", s.trim()))?;
    if amount < MIN_AMOUNT {
        bail!("Amount must be at least $0.01");
    }
    if amount > MAX_AMOUNT {
        bail!("Amount is too large");
    }
    Ok(amount)
}

pub(crate) fn parse_category(s: &str) -> Result<Category> {
    Category::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!("Unknown category '{}'. Use one of: {}", s.trim(), names.join(", "))
    })
}

pub(crate) fn parse_description(s: &str) -> Result<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        bail!("Description is required");
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        bail!("Description must be less than {MAX_DESCRIPTION_LEN} characters");
    }
    Ok(trimmed.to_string())
}

/// Validate raw user input into form data the tracker can accept.
pub(crate) fn parse_form(
    date: &str,
    amount: &str,
    category: &str,
    description: &str,
) -> Result<ExpenseFormData> {
    Ok(ExpenseFormData {
        date: parse_date(date)?,
        amount: parse_amount(amount)?,
        category: parse_category(category)?,
        description: parse_description(description)?,
    })
}

/// Split `<date> <amount> <category> <description...>` and validate it.
/// Runs of whitespace between fields count as one separator; the
/// description keeps its inner spacing.
pub(crate) fn parse_form_args(args: &str) -> Result<ExpenseFormData> {
    let Some((date, rest)) = next_field(args) else {
        bail!("Expected: <date> <amount> <category> <description>");
    };
    let Some((amount, rest)) = next_field(rest) else {
        bail!("Expected: <date> <amount> <category> <description>");
    };
    let Some((category, description)) = next_field(rest) else {
        bail!("Expected: <date> <amount> <category> <description>");
    };
    parse_form(date, amount, category, description)
}

fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(s.split_once(char::is_whitespace).unwrap_or((s, "")))
}
