use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Invoice, MonthRow, Totals};

/// Outcome of the payment reminder run. Reminders are counted, never sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderReport {
    pub as_of: NaiveDate,
    pub overdue: Vec<Invoice>,
    pub outstanding: Cents,
}

impl ReminderReport {
    pub fn reminders_sent(&self) -> usize {
        self.overdue.len()
    }
}

/// Everything the dashboard view shows: metrics plus the monthly chart data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub monthly: Vec<MonthRow>,
}

impl Dashboard {
    pub fn has_data(&self) -> bool {
        !self.monthly.is_empty()
    }
}
