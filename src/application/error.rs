use thiserror::Error;

use crate::domain::Cents;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    /// A submitted form value was rejected. The ledger is left untouched.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    #[error("Invoice id '{prefix}' is ambiguous ({matches} invoices match)")]
    AmbiguousInvoiceId { prefix: String, matches: usize },

    #[error("Invoice {0} is already paid")]
    InvoiceAlreadyPaid(String),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Expense id '{prefix}' is ambiguous ({matches} expenses match)")]
    AmbiguousExpenseId { prefix: String, matches: usize },

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    pub(crate) fn negative_amount(field: &str, amount_cents: Cents) -> Self {
        AppError::Validation(format!(
            "{} must not be negative (got {})",
            field,
            crate::domain::format_cents(amount_cents)
        ))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
