use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type InvoiceId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Issued and waiting for the client to pay
    Pending,
    /// Settled by the client
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An invoice issued to a client.
/// Everything except `status` is fixed once the invoice is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub client: String,
    pub description: String,
    /// Amount in cents (never negative)
    pub amount_cents: Cents,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    /// Day the invoice was issued; income is booked on this date
    pub created_on: NaiveDate,
}

impl Invoice {
    /// Create a pending invoice. Amount validation is done by the ledger service.
    pub fn new(
        client: impl Into<String>,
        description: impl Into<String>,
        amount_cents: Cents,
        due_date: NaiveDate,
        created_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client: client.into(),
            description: description.into(),
            amount_cents,
            due_date,
            status: InvoiceStatus::Pending,
            created_on,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvoiceStatus::Pending
    }

    /// A pending invoice whose due date is strictly before `as_of`.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.is_pending() && self.due_date < as_of
    }

    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }
}

/// First 8 hex characters of a record id, used for display.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_invoice_is_pending() {
        let invoice = Invoice::new("Acme", "Website", 100000, date(2024, 1, 10), date(2024, 1, 2));
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.client, "Acme");
        assert_eq!(invoice.created_on, date(2024, 1, 2));
    }

    #[test]
    fn test_overdue_is_strictly_after_due_date() {
        let invoice = Invoice::new("Acme", "", 5000, date(2024, 1, 10), date(2024, 1, 1));
        assert!(!invoice.is_overdue(date(2024, 1, 9)));
        assert!(!invoice.is_overdue(date(2024, 1, 10)));
        assert!(invoice.is_overdue(date(2024, 1, 11)));
    }

    #[test]
    fn test_paid_invoice_is_never_overdue() {
        let mut invoice = Invoice::new("Acme", "", 5000, date(2024, 1, 10), date(2024, 1, 1));
        invoice.status = InvoiceStatus::Paid;
        assert!(!invoice.is_overdue(date(2025, 1, 1)));
    }

    #[test]
    fn test_short_id() {
        let invoice = Invoice::new("Acme", "", 0, date(2024, 1, 1), date(2024, 1, 1));
        let short = invoice.short_id();
        assert_eq!(short.len(), 8);
        assert!(invoice.id.simple().to_string().starts_with(&short));
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [InvoiceStatus::Pending, InvoiceStatus::Paid] {
            assert_eq!(InvoiceStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(InvoiceStatus::from_str("PAID"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::from_str("void"), None);
    }
}
