use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Category;

/// Opaque record identifier. Freshly created records get a UUID v4, but any
/// string loaded from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct ExpenseId(String);

impl ExpenseId {
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Expense {
    pub(crate) id: ExpenseId,
    pub(crate) date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    pub(crate) category: Category,
    pub(crate) description: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Expense {
    /// Build a new record from validated form data. Both timestamps are set
    /// to `now`.
    pub(crate) fn new(form: ExpenseFormData, now: DateTime<Utc>) -> Self {
        Self {
            id: ExpenseId::generate(),
            date: form.date,
            amount: form.amount,
            category: form.category,
            description: form.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every user-editable field, keeping `id` and `created_at`.
    pub(crate) fn apply(&mut self, form: ExpenseFormData, now: DateTime<Utc>) {
        self.date = form.date;
        self.amount = form.amount;
        self.category = form.category;
        self.description = form.description;
        self.updated_at = now;
    }

    /// "YYYY-MM" bucket key.
    pub(crate) fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    pub(crate) fn form_data(&self) -> ExpenseFormData {
        ExpenseFormData {
            date: self.date,
            amount: self.amount,
            category: self.category,
            description: self.description.clone(),
        }
    }
}

/// Round to whole cents, halves away from zero (`2.999` → `3.00`,
/// `0.125` → `0.13`).
pub(crate) fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The user-editable part of an expense, already validated.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseFormData {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) category: Category,
    pub(crate) description: String,
}
