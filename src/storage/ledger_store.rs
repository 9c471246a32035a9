use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Expense, ExpenseId, Invoice, InvoiceId, InvoiceStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: Uuid },

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),
}

/// Append-only, session-scoped storage for invoices and expenses.
/// Records keep their insertion order; nothing is ever removed.
#[derive(Debug, Default)]
pub struct LedgerStore {
    invoices: Vec<Invoice>,
    expenses: Vec<Expense>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Invoice operations
    // ========================

    pub fn append_invoice(&mut self, invoice: Invoice) -> Result<(), StoreError> {
        if self.get_invoice(invoice.id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: "invoice",
                id: invoice.id,
            });
        }
        self.invoices.push(invoice);
        Ok(())
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn get_invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    /// Invoices whose hex id starts with `prefix` (dashes ignored).
    pub fn invoices_by_prefix(&self, prefix: &str) -> Vec<&Invoice> {
        let prefix = normalize_prefix(prefix);
        self.invoices
            .iter()
            .filter(|invoice| invoice.id.simple().to_string().starts_with(&prefix))
            .collect()
    }

    /// The only in-place change the store allows.
    pub fn set_invoice_status(
        &mut self,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> Result<&Invoice, StoreError> {
        let invoice = self
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or(StoreError::InvoiceNotFound(id))?;
        invoice.status = status;
        Ok(invoice)
    }

    // ========================
    // Expense operations
    // ========================

    pub fn append_expense(&mut self, expense: Expense) -> Result<(), StoreError> {
        if self.get_expense(expense.id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: "expense",
                id: expense.id,
            });
        }
        self.expenses.push(expense);
        Ok(())
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get_expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expenses_by_prefix(&self, prefix: &str) -> Vec<&Expense> {
        let prefix = normalize_prefix(prefix);
        self.expenses
            .iter()
            .filter(|expense| expense.id.simple().to_string().starts_with(&prefix))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty() && self.expenses.is_empty()
    }
}

fn normalize_prefix(prefix: &str) -> String {
    prefix
        .trim()
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::ExpenseCategory;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_append_keeps_order() {
        let mut store = LedgerStore::new();
        let first = Invoice::new("A", "", 100, date(), date());
        let second = Invoice::new("B", "", 200, date(), date());
        store.append_invoice(first.clone()).unwrap();
        store.append_invoice(second.clone()).unwrap();

        assert_eq!(store.invoices(), &[first, second]);
        assert!(store.expenses().is_empty());
        assert!(!store.is_empty());
    }

    #[test]
    fn test_duplicate_invoice_id_is_rejected() {
        let mut store = LedgerStore::new();
        let invoice = Invoice::new("A", "", 100, date(), date());
        store.append_invoice(invoice.clone()).unwrap();

        let err = store.append_invoice(invoice.clone()).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateId {
                kind: "invoice",
                id: invoice.id
            }
        );
        assert_eq!(store.invoices().len(), 1);
    }

    #[test]
    fn test_duplicate_expense_id_is_rejected() {
        let mut store = LedgerStore::new();
        let expense = Expense::new("Train", 100, date(), ExpenseCategory::Travel);
        store.append_expense(expense.clone()).unwrap();

        assert!(store.append_expense(expense).is_err());
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn test_prefix_lookup() {
        let mut store = LedgerStore::new();
        let invoice = Invoice::new("A", "", 100, date(), date());
        store.append_invoice(invoice.clone()).unwrap();

        let short = invoice.short_id().to_uppercase();
        let found = store.invoices_by_prefix(&short);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, invoice.id);

        let hyphenated = invoice.id.hyphenated().to_string();
        assert_eq!(store.invoices_by_prefix(&hyphenated).len(), 1);
    }

    #[test]
    fn test_set_status() {
        let mut store = LedgerStore::new();
        let invoice = Invoice::new("A", "", 100, date(), date());
        store.append_invoice(invoice.clone()).unwrap();

        let updated = store
            .set_invoice_status(invoice.id, InvoiceStatus::Paid)
            .unwrap();
        assert_eq!(updated.status, InvoiceStatus::Paid);

        let missing = Uuid::new_v4();
        assert_eq!(
            store.set_invoice_status(missing, InvoiceStatus::Paid).unwrap_err(),
            StoreError::InvoiceNotFound(missing)
        );
    }
}
