use std::fs::File;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::application::LedgerService;
use crate::config::Settings;
use crate::domain::{ExpenseCategory, Invoice, InvoiceStatus, parse_cents};
use crate::io::Exporter;

use super::render::{print_dashboard, print_expenses, print_invoices, print_reminders};
use super::tokenize::split_line;

/// One line typed into the session
#[derive(Parser)]
#[command(name = "freelance-ledger", no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Create a new invoice (status pending, dated today)
    Invoice {
        /// Client name
        #[arg(long)]
        client: String,

        /// Project or service description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Invoice amount (e.g., "1000" or "1000.00")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        due: Option<String>,
    },

    /// List invoices
    Invoices {
        /// Only show invoices with this status: pending, paid
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Send payment reminders for overdue invoices (simulated)
    Remind {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Mark an invoice as paid
    Pay {
        /// Invoice ID or unique prefix
        id: String,
    },

    /// Add an expense
    Expense {
        /// Expense title
        #[arg(long)]
        title: String,

        /// Expense amount (e.g., "200" or "199.99")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Category: travel, supplies, software, other
        #[arg(short, long, default_value = "other")]
        category: String,

        /// Reference to a receipt file (kept as-is, never opened)
        #[arg(long)]
        receipt: Option<String>,
    },

    /// List all expenses
    Expenses,

    /// Show totals and the monthly cash flow chart
    Dashboard,

    /// Export session data to CSV or JSON
    Export {
        /// What to export: invoices, expenses, monthly, dashboard
        export_type: String,

        /// Output file (session output if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json (default: csv, json for dashboard)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive bookkeeping session. Owns the ledger; everything recorded
/// is dropped together with the session.
pub struct Session {
    service: LedgerService,
    settings: Settings,
}

impl Session {
    pub fn new(service: LedgerService, settings: Settings) -> Self {
        Self { service, settings }
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    /// Read lines until end of input or `quit`. Errors in a line are printed
    /// and the session carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> Result<()> {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        for line in input.lines() {
            let line = line.context("Failed to read session input")?;
            match self.execute_line(&line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "Error: {:#}", e)?,
            }
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
        }
        Ok(())
    }

    /// Parse and run one session line.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = split_line(trimmed)?;
        let parsed = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Help output and usage errors are both shown, not raised.
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        debug!(line = trimmed, "executing session command");
        self.execute(parsed.command, out)
    }

    fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        match command {
            SessionCommand::Invoice {
                client,
                description,
                amount,
                due,
            } => {
                let amount_cents =
                    parse_cents(&amount).context("Invalid amount format. Use '1000.00' or '1000'")?;
                let due_date = self.date_or_today(due.as_deref())?;

                let invoice = self
                    .service
                    .add_invoice(client, description, amount_cents, due_date)?;
                writeln!(
                    out,
                    "Invoice {} created: {} for {}, due {}",
                    invoice.short_id(),
                    self.settings.format_amount(invoice.amount_cents),
                    invoice.client,
                    invoice.due_date
                )?;
            }

            SessionCommand::Invoices { status } => {
                let invoices = self.service.list_invoices();
                match status {
                    Some(status) => {
                        let status = InvoiceStatus::from_str(&status).ok_or_else(|| {
                            anyhow!("Invalid status '{}'. Valid statuses: pending, paid", status)
                        })?;
                        let matching: Vec<Invoice> = invoices
                            .iter()
                            .filter(|invoice| invoice.status == status)
                            .cloned()
                            .collect();
                        print_invoices(out, &matching, &self.settings)?;
                    }
                    None => print_invoices(out, invoices, &self.settings)?,
                }
            }

            SessionCommand::Remind { as_of } => {
                let as_of = self.date_or_today(as_of.as_deref())?;
                let report = self.service.send_payment_reminders(as_of);
                print_reminders(out, &report, &self.settings)?;
            }

            SessionCommand::Pay { id } => {
                let invoice = self.service.mark_invoice_paid(&id)?;
                writeln!(
                    out,
                    "Invoice {} marked as paid ({} from {})",
                    invoice.short_id(),
                    self.settings.format_amount(invoice.amount_cents),
                    invoice.client
                )?;
            }

            SessionCommand::Expense {
                title,
                amount,
                date,
                category,
                receipt,
            } => {
                let amount_cents =
                    parse_cents(&amount).context("Invalid amount format. Use '200.00' or '200'")?;
                let date = self.date_or_today(date.as_deref())?;
                let category = ExpenseCategory::from_str(&category).ok_or_else(|| {
                    anyhow!(
                        "Invalid category '{}'. Valid categories: travel, supplies, software, other",
                        category
                    )
                })?;

                let expense = self.service.add_expense_with_receipt(
                    title,
                    amount_cents,
                    date,
                    category,
                    receipt,
                )?;
                writeln!(
                    out,
                    "Expense {} added: {} for {} ({})",
                    expense.short_id(),
                    self.settings.format_amount(expense.amount_cents),
                    expense.title,
                    expense.category
                )?;
            }

            SessionCommand::Expenses => {
                print_expenses(out, self.service.list_expenses(), &self.settings)?;
            }

            SessionCommand::Dashboard => {
                print_dashboard(out, &self.service.dashboard(), &self.settings)?;
            }

            SessionCommand::Export {
                export_type,
                output,
                format,
            } => {
                self.export(&export_type, output.as_deref(), format.as_deref(), out)?;
            }

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn export<W: Write>(
        &self,
        export_type: &str,
        output: Option<&str>,
        format: Option<&str>,
        out: &mut W,
    ) -> Result<()> {
        let format = match (export_type, format) {
            (_, Some(f)) => f.to_lowercase(),
            ("dashboard", None) => "json".to_string(),
            (_, None) => "csv".to_string(),
        };

        match output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file '{}'", path))?;
                let count = self.write_export(export_type, &format, file)?;
                writeln!(out, "Exported {} {} record(s) to {}", count, export_type, path)?;
            }
            None => {
                self.write_export(export_type, &format, &mut *out)?;
            }
        }
        Ok(())
    }

    fn write_export<W: Write>(&self, export_type: &str, format: &str, writer: W) -> Result<usize> {
        let exporter = Exporter::new(&self.service);
        match (export_type, format) {
            ("invoices", "csv") => exporter.export_invoices_csv(writer),
            ("invoices", "json") => exporter.export_invoices_json(writer),
            ("expenses", "csv") => exporter.export_expenses_csv(writer),
            ("expenses", "json") => exporter.export_expenses_json(writer),
            ("monthly", "csv") => exporter.export_monthly_csv(writer),
            ("monthly", "json") => exporter.export_monthly_json(writer),
            ("dashboard", "json") => {
                let snapshot = exporter.export_snapshot_json(writer)?;
                Ok(snapshot.invoices.len() + snapshot.expenses.len())
            }
            ("dashboard", other) => Err(anyhow!(
                "Dashboard export only supports json (got '{}')",
                other
            )),
            ("invoices" | "expenses" | "monthly", other) => Err(anyhow!(
                "Unknown export format '{}'. Valid formats: csv, json",
                other
            )),
            (other, _) => Err(anyhow!(
                "Unknown export type '{}'. Valid types: invoices, expenses, monthly, dashboard",
                other
            )),
        }
    }

    fn date_or_today(&self, date: Option<&str>) -> Result<NaiveDate> {
        match date {
            Some(date_str) => parse_date(date_str),
            None => Ok(self.service.today()),
        }
    }
}

/// Parse a YYYY-MM-DD date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}
