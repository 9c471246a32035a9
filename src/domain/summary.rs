use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Cents, Expense, Invoice};

/// A calendar month bucket, shown as "YYYY-MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a "YYYY-MM" key.
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        if month.len() != 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MonthKey::parse(&value).ok_or_else(|| format!("invalid month key '{}'", value))
    }
}

/// Direction of a monthly bucket. Income sorts before Expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Income,
    Expense,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Income => "income",
            FlowKind::Expense => "expense",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_income: Cents,
    pub total_expenses: Cents,
    pub net_balance: Cents,
}

/// One (month, kind) cell of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    pub month: MonthKey,
    pub kind: FlowKind,
    pub amount_cents: Cents,
}

/// One month with both directions side by side; missing cells are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: MonthKey,
    pub income: Cents,
    pub expense: Cents,
}

impl MonthRow {
    pub fn net(&self) -> Cents {
        self.income - self.expense
    }
}

/// Amounts summed per (month, kind). Only buckets that received at least
/// one record are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlySummary {
    buckets: BTreeMap<(MonthKey, FlowKind), Cents>,
}

impl MonthlySummary {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn get(&self, month: MonthKey, kind: FlowKind) -> Option<Cents> {
        self.buckets.get(&(month, kind)).copied()
    }

    /// Buckets ordered by month, then kind.
    pub fn entries(&self) -> Vec<MonthlyEntry> {
        self.buckets
            .iter()
            .map(|(&(month, kind), &amount_cents)| MonthlyEntry {
                month,
                kind,
                amount_cents,
            })
            .collect()
    }

    /// Pivot into one row per month.
    pub fn rows(&self) -> Vec<MonthRow> {
        let mut rows: Vec<MonthRow> = Vec::new();
        for (&(month, kind), &amount) in &self.buckets {
            if rows.last().map(|row| row.month) != Some(month) {
                rows.push(MonthRow {
                    month,
                    income: 0,
                    expense: 0,
                });
            }
            if let Some(row) = rows.last_mut() {
                match kind {
                    FlowKind::Income => row.income += amount,
                    FlowKind::Expense => row.expense += amount,
                }
            }
        }
        rows
    }

    fn add(&mut self, month: MonthKey, kind: FlowKind, amount: Cents) {
        *self.buckets.entry((month, kind)).or_insert(0) += amount;
    }
}

/// Income is every invoice regardless of status; expenses are every expense.
pub fn compute_totals(invoices: &[Invoice], expenses: &[Expense]) -> Totals {
    let total_income: Cents = invoices.iter().map(|i| i.amount_cents).sum();
    let total_expenses: Cents = expenses.iter().map(|e| e.amount_cents).sum();
    Totals {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
    }
}

/// Bucket invoices by the month they were issued (not due) and expenses by
/// the month they were spent.
pub fn compute_monthly_summary(invoices: &[Invoice], expenses: &[Expense]) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for invoice in invoices {
        summary.add(
            MonthKey::from_date(invoice.created_on),
            FlowKind::Income,
            invoice.amount_cents,
        );
    }
    for expense in expenses {
        summary.add(
            MonthKey::from_date(expense.date),
            FlowKind::Expense,
            expense.amount_cents,
        );
    }
    summary
}

/// Pending invoices due strictly before `as_of`, in creation order.
pub fn overdue_invoices(invoices: &[Invoice], as_of: NaiveDate) -> Vec<Invoice> {
    invoices
        .iter()
        .filter(|invoice| invoice.is_overdue(as_of))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, InvoiceStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn invoice(amount: Cents, created_on: NaiveDate) -> Invoice {
        Invoice::new("Acme", "", amount, date(2030, 1, 1), created_on)
    }

    fn expense(amount: Cents, on: NaiveDate) -> Expense {
        Expense::new("Item", amount, on, ExpenseCategory::Other)
    }

    #[test]
    fn test_month_key_format_and_parse() {
        let key = MonthKey::from_date(date(2024, 3, 31));
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(MonthKey::parse("2024-03"), Some(key));
        assert_eq!(MonthKey::parse("2024-13"), None);
        assert_eq!(MonthKey::parse("2024-3"), None);
        assert_eq!(MonthKey::parse("march"), None);
    }

    #[test]
    fn test_month_key_serializes_as_string() {
        let json = serde_json::to_string(&month(2024, 1)).unwrap();
        assert_eq!(json, "\"2024-01\"");
        let parsed: MonthKey = serde_json::from_str("\"2023-12\"").unwrap();
        assert_eq!(parsed, month(2023, 12));
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(compute_totals(&[], &[]), Totals::default());
    }

    #[test]
    fn test_totals_include_paid_invoices() {
        let mut paid = invoice(30000, date(2024, 1, 1));
        paid.status = InvoiceStatus::Paid;
        let invoices = vec![invoice(50000, date(2024, 1, 1)), paid];
        let expenses = vec![expense(100000, date(2024, 1, 2))];

        let totals = compute_totals(&invoices, &expenses);
        assert_eq!(totals.total_income, 80000);
        assert_eq!(totals.total_expenses, 100000);
        assert_eq!(totals.net_balance, -20000);
    }

    #[test]
    fn test_monthly_summary_groups_by_month_and_kind() {
        let invoices = vec![
            invoice(50000, date(2024, 1, 3)),
            invoice(30000, date(2024, 1, 28)),
            invoice(10000, date(2024, 2, 1)),
        ];
        let expenses = vec![expense(20000, date(2024, 1, 15))];

        let summary = compute_monthly_summary(&invoices, &expenses);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.get(month(2024, 1), FlowKind::Income), Some(80000));
        assert_eq!(summary.get(month(2024, 1), FlowKind::Expense), Some(20000));
        assert_eq!(summary.get(month(2024, 2), FlowKind::Income), Some(10000));
        assert_eq!(summary.get(month(2024, 2), FlowKind::Expense), None);
    }

    #[test]
    fn test_income_is_booked_on_creation_not_due_date() {
        let invoices = vec![Invoice::new("Acme", "", 1000, date(2024, 5, 1), date(2024, 2, 10))];
        let summary = compute_monthly_summary(&invoices, &[]);
        assert_eq!(summary.get(month(2024, 2), FlowKind::Income), Some(1000));
        assert_eq!(summary.get(month(2024, 5), FlowKind::Income), None);
    }

    #[test]
    fn test_monthly_summary_empty() {
        assert!(compute_monthly_summary(&[], &[]).is_empty());
    }

    #[test]
    fn test_entries_are_ordered_by_month_then_kind() {
        let invoices = vec![invoice(100, date(2024, 2, 1)), invoice(200, date(2023, 12, 1))];
        let expenses = vec![expense(300, date(2024, 2, 5))];

        let entries = compute_monthly_summary(&invoices, &expenses).entries();
        let keys: Vec<(String, FlowKind)> = entries
            .iter()
            .map(|e| (e.month.to_string(), e.kind))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2023-12".to_string(), FlowKind::Income),
                ("2024-02".to_string(), FlowKind::Income),
                ("2024-02".to_string(), FlowKind::Expense),
            ]
        );
    }

    #[test]
    fn test_rows_fill_missing_cells_with_zero() {
        let invoices = vec![invoice(100, date(2024, 1, 1))];
        let expenses = vec![expense(40, date(2024, 1, 9)), expense(70, date(2024, 3, 9))];

        let rows = compute_monthly_summary(&invoices, &expenses).rows();
        assert_eq!(
            rows,
            vec![
                MonthRow {
                    month: month(2024, 1),
                    income: 100,
                    expense: 40
                },
                MonthRow {
                    month: month(2024, 3),
                    income: 0,
                    expense: 70
                },
            ]
        );
        assert_eq!(rows[0].net(), 60);
    }

    #[test]
    fn test_overdue_preserves_creation_order() {
        let first = Invoice::new("A", "", 1, date(2024, 1, 1), date(2023, 12, 1));
        let not_due = Invoice::new("B", "", 1, date(2024, 6, 1), date(2023, 12, 1));
        let second = Invoice::new("C", "", 1, date(2024, 1, 5), date(2023, 12, 2));
        let invoices = vec![first.clone(), not_due, second.clone()];

        let overdue = overdue_invoices(&invoices, date(2024, 2, 1));
        assert_eq!(overdue, vec![first, second]);
    }
}
