use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{Expense, Invoice, MonthRow, Totals};

/// Everything in the current session, for a JSON dump of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub totals: Totals,
    pub monthly: Vec<MonthRow>,
    pub invoices: Vec<Invoice>,
    pub expenses: Vec<Expense>,
}

/// Exporter for turning session data into CSV or JSON
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export invoices to CSV, in creation order
    pub fn export_invoices_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "id",
            "client",
            "description",
            "amount_cents",
            "due_date",
            "status",
            "created_on",
        ])?;

        let invoices = self.service.list_invoices();
        for invoice in invoices {
            csv_writer.write_record([
                invoice.id.to_string(),
                invoice.client.clone(),
                invoice.description.clone(),
                invoice.amount_cents.to_string(),
                invoice.due_date.to_string(),
                invoice.status.as_str().to_string(),
                invoice.created_on.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(invoices.len())
    }

    /// Export expenses to CSV, in creation order
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["id", "title", "amount_cents", "date", "category", "receipt"])?;

        let expenses = self.service.list_expenses();
        for expense in expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.title.clone(),
                expense.amount_cents.to_string(),
                expense.date.to_string(),
                expense.category.as_str().to_string(),
                expense.receipt.clone().unwrap_or_default(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(expenses.len())
    }

    /// Export the (month, kind) buckets to CSV
    pub fn export_monthly_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["month", "kind", "amount_cents"])?;

        let entries = self.service.monthly_summary().entries();
        for entry in &entries {
            csv_writer.write_record([
                entry.month.to_string(),
                entry.kind.as_str().to_string(),
                entry.amount_cents.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(entries.len())
    }

    pub fn export_invoices_json<W: Write>(&self, writer: W) -> Result<usize> {
        let invoices = self.service.list_invoices();
        write_json(writer, &invoices)?;
        Ok(invoices.len())
    }

    pub fn export_expenses_json<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses();
        write_json(writer, &expenses)?;
        Ok(expenses.len())
    }

    pub fn export_monthly_json<W: Write>(&self, writer: W) -> Result<usize> {
        let entries = self.service.monthly_summary().entries();
        write_json(writer, &entries)?;
        Ok(entries.len())
    }

    /// Export the dashboard together with every record as one JSON document
    pub fn export_snapshot_json<W: Write>(&self, writer: W) -> Result<SessionSnapshot> {
        let dashboard = self.service.dashboard();
        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            totals: dashboard.totals,
            monthly: dashboard.monthly,
            invoices: self.service.list_invoices().to_vec(),
            expenses: self.service.list_expenses().to_vec(),
        };

        write_json(writer, &snapshot)?;
        Ok(snapshot)
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
