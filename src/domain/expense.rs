use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, short_id};

pub type ExpenseId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Travel,
    Supplies,
    Software,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Travel,
        ExpenseCategory::Supplies,
        ExpenseCategory::Software,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Travel => "travel",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Software => "software",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "travel" => Some(ExpenseCategory::Travel),
            "supplies" => Some(ExpenseCategory::Supplies),
            "software" => Some(ExpenseCategory::Software),
            "other" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A business expense. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    /// Amount in cents (never negative)
    pub amount_cents: Cents,
    /// Day the money was spent; the expense is booked on this date
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    /// Opaque reference to an uploaded receipt. Never opened or checked.
    pub receipt: Option<String>,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount_cents,
            date,
            category,
            receipt: None,
        }
    }

    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }
}
