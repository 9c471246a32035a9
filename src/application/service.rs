use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{
    Cents, Expense, ExpenseCategory, Invoice, InvoiceStatus, MonthlySummary, Totals,
    compute_monthly_summary, compute_totals, format_cents, overdue_invoices,
};
use crate::storage::LedgerStore;

use super::{AppError, Clock, Dashboard, ReminderReport, SystemClock};

/// Application service providing the ledger operations of one session.
/// This is the primary interface for any front end (session shell, tests, ...).
pub struct LedgerService {
    store: LedgerStore,
    clock: Box<dyn Clock>,
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerService {
    /// Start an empty session that dates invoices with the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Start an empty session with a custom source of "today".
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            store: LedgerStore::new(),
            clock: Box::new(clock),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    // ========================
    // Invoice operations
    // ========================

    /// Issue a new pending invoice dated today.
    pub fn add_invoice(
        &mut self,
        client: impl Into<String>,
        description: impl Into<String>,
        amount_cents: Cents,
        due_date: NaiveDate,
    ) -> Result<Invoice, AppError> {
        if amount_cents < 0 {
            warn!(amount_cents, "rejected invoice with negative amount");
            return Err(AppError::negative_amount("Invoice amount", amount_cents));
        }

        let invoices = self.store.invoices().iter().map(|invoice| invoice.amount_cents);
        ensure_total_fits("Invoice amount", invoices, amount_cents)?;

        let invoice = Invoice::new(client, description, amount_cents, due_date, self.today());
        self.store.append_invoice(invoice.clone())?;

        info!(
            invoice_id = %invoice.id,
            client = %invoice.client,
            amount_cents,
            due_date = %invoice.due_date,
            "invoice created"
        );
        Ok(invoice)
    }

    pub fn list_invoices(&self) -> &[Invoice] {
        self.store.invoices()
    }

    /// Pending invoices whose due date is before `as_of`, in creation order.
    pub fn overdue_invoices(&self, as_of: NaiveDate) -> Vec<Invoice> {
        overdue_invoices(self.store.invoices(), as_of)
    }

    /// Simulate payment reminders for every overdue invoice.
    /// No message leaves the process; the report says how many would have.
    pub fn send_payment_reminders(&self, as_of: NaiveDate) -> ReminderReport {
        let overdue = self.overdue_invoices(as_of);
        let outstanding: Cents = overdue.iter().map(|invoice| invoice.amount_cents).sum();

        info!(
            as_of = %as_of,
            reminders = overdue.len(),
            outstanding_cents = outstanding,
            "payment reminders run"
        );
        ReminderReport {
            as_of,
            overdue,
            outstanding,
        }
    }

    /// Find an invoice by full id or unique id prefix.
    pub fn find_invoice(&self, id: &str) -> Result<&Invoice, AppError> {
        if id.trim().is_empty() {
            return Err(AppError::InvoiceNotFound(id.to_string()));
        }
        let matches = self.store.invoices_by_prefix(id);
        match matches.as_slice() {
            [invoice] => Ok(*invoice),
            [] => Err(AppError::InvoiceNotFound(id.to_string())),
            many => Err(AppError::AmbiguousInvoiceId {
                prefix: id.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// Record that the client settled an invoice.
    pub fn mark_invoice_paid(&mut self, id: &str) -> Result<Invoice, AppError> {
        let invoice = self.find_invoice(id)?;
        if invoice.status == InvoiceStatus::Paid {
            return Err(AppError::InvoiceAlreadyPaid(invoice.short_id()));
        }

        let invoice_id = invoice.id;
        let updated = self
            .store
            .set_invoice_status(invoice_id, InvoiceStatus::Paid)?
            .clone();

        info!(invoice_id = %invoice_id, "invoice marked as paid");
        Ok(updated)
    }

    // ========================
    // Expense operations
    // ========================

    /// Record an expense.
    pub fn add_expense(
        &mut self,
        title: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Result<Expense, AppError> {
        self.record_expense(Expense::new(title, amount_cents, date, category))
    }

    /// Record an expense together with an opaque receipt reference.
    pub fn add_expense_with_receipt(
        &mut self,
        title: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        category: ExpenseCategory,
        receipt: Option<String>,
    ) -> Result<Expense, AppError> {
        let expense = Expense::new(title, amount_cents, date, category);
        let expense = match receipt {
            Some(receipt) => expense.with_receipt(receipt),
            None => expense,
        };
        self.record_expense(expense)
    }

    fn record_expense(&mut self, expense: Expense) -> Result<Expense, AppError> {
        if expense.amount_cents < 0 {
            warn!(
                amount_cents = expense.amount_cents,
                "rejected expense with negative amount"
            );
            return Err(AppError::negative_amount(
                "Expense amount",
                expense.amount_cents,
            ));
        }

        let expenses = self.store.expenses().iter().map(|expense| expense.amount_cents);
        ensure_total_fits("Expense amount", expenses, expense.amount_cents)?;

        self.store.append_expense(expense.clone())?;

        info!(
            expense_id = %expense.id,
            title = %expense.title,
            category = %expense.category,
            amount_cents = expense.amount_cents,
            "expense added"
        );
        Ok(expense)
    }

    pub fn list_expenses(&self) -> &[Expense] {
        self.store.expenses()
    }

    /// Find an expense by full id or unique id prefix.
    pub fn find_expense(&self, id: &str) -> Result<&Expense, AppError> {
        if id.trim().is_empty() {
            return Err(AppError::ExpenseNotFound(id.to_string()));
        }
        let matches = self.store.expenses_by_prefix(id);
        match matches.as_slice() {
            [expense] => Ok(*expense),
            [] => Err(AppError::ExpenseNotFound(id.to_string())),
            many => Err(AppError::AmbiguousExpenseId {
                prefix: id.to_string(),
                matches: many.len(),
            }),
        }
    }

    // ========================
    // Aggregation
    // ========================

    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(&self.store)
    }

    pub fn totals(&self) -> Totals {
        self.aggregator().totals()
    }

    pub fn monthly_summary(&self) -> MonthlySummary {
        self.aggregator().monthly_summary()
    }

    pub fn dashboard(&self) -> Dashboard {
        self.aggregator().dashboard()
    }
}

/// Every total the aggregator computes is bounded by a collection sum, so
/// keeping each collection's sum within `Cents` keeps all of them in range.
fn ensure_total_fits(
    field: &str,
    mut existing: impl Iterator<Item = Cents>,
    amount_cents: Cents,
) -> Result<(), AppError> {
    let total = existing.try_fold(amount_cents, |total, amount| total.checked_add(amount));
    if total.is_none() {
        warn!(amount_cents, "rejected amount that overflows the ledger total");
        return Err(AppError::Validation(format!(
            "{} {} would push the ledger total past the largest supported amount",
            field,
            format_cents(amount_cents)
        )));
    }
    Ok(())
}

/// Read-only summaries over a ledger store. Holds no state of its own;
/// every call recomputes from the full collections.
pub struct Aggregator<'a> {
    store: &'a LedgerStore,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    pub fn totals(&self) -> Totals {
        let totals = compute_totals(self.store.invoices(), self.store.expenses());
        debug!(
            total_income = totals.total_income,
            total_expenses = totals.total_expenses,
            net_balance = totals.net_balance,
            "computed totals"
        );
        totals
    }

    pub fn monthly_summary(&self) -> MonthlySummary {
        let summary = compute_monthly_summary(self.store.invoices(), self.store.expenses());
        debug!(buckets = summary.len(), "computed monthly summary");
        summary
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            totals: self.totals(),
            monthly: self.monthly_summary().rows(),
        }
    }
}
