use std::io::Write;

use anyhow::Result;

use crate::application::{Dashboard, ReminderReport};
use crate::config::Settings;
use crate::domain::{Expense, Invoice};

use super::chart::render_monthly_chart;

pub fn print_invoices<W: Write>(out: &mut W, invoices: &[Invoice], settings: &Settings) -> Result<()> {
    if invoices.is_empty() {
        writeln!(out, "No invoices yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10} {:<20} {:<24} {:>14} {:<10} {:<8} {:<10}",
        "ID", "CLIENT", "DESCRIPTION", "AMOUNT", "DUE", "STATUS", "CREATED"
    )?;
    writeln!(out, "{}", "-".repeat(102))?;
    for invoice in invoices {
        writeln!(
            out,
            "{:<10} {:<20} {:<24} {:>14} {:<10} {:<8} {:<10}",
            invoice.short_id(),
            truncate(&invoice.client, 20),
            truncate(&invoice.description, 24),
            settings.format_amount(invoice.amount_cents),
            invoice.due_date.to_string(),
            invoice.status.as_str(),
            invoice.created_on.to_string()
        )?;
    }
    Ok(())
}

pub fn print_expenses<W: Write>(out: &mut W, expenses: &[Expense], settings: &Settings) -> Result<()> {
    if expenses.is_empty() {
        writeln!(out, "No expenses yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10} {:<24} {:>14} {:<10} {:<10} {}",
        "ID", "TITLE", "AMOUNT", "DATE", "CATEGORY", "RECEIPT"
    )?;
    writeln!(out, "{}", "-".repeat(80))?;
    for expense in expenses {
        writeln!(
            out,
            "{:<10} {:<24} {:>14} {:<10} {:<10} {}",
            expense.short_id(),
            truncate(&expense.title, 24),
            settings.format_amount(expense.amount_cents),
            expense.date.to_string(),
            expense.category.as_str(),
            expense.receipt.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

pub fn print_reminders<W: Write>(out: &mut W, report: &ReminderReport, settings: &Settings) -> Result<()> {
    if report.overdue.is_empty() {
        writeln!(out, "No overdue invoices.")?;
        return Ok(());
    }

    writeln!(
        out,
        "Reminders sent for {} overdue invoice(s), {} outstanding:",
        report.reminders_sent(),
        settings.format_amount(report.outstanding)
    )?;
    for invoice in &report.overdue {
        writeln!(
            out,
            "  {} {} {} (due {})",
            invoice.short_id(),
            invoice.client,
            settings.format_amount(invoice.amount_cents),
            invoice.due_date
        )?;
    }
    Ok(())
}

pub fn print_dashboard<W: Write>(out: &mut W, dashboard: &Dashboard, settings: &Settings) -> Result<()> {
    let totals = &dashboard.totals;
    writeln!(out, "Cash Flow Dashboard")?;
    writeln!(out)?;
    writeln!(out, "Total Income:   {:>18}", settings.format_amount(totals.total_income))?;
    writeln!(out, "Total Expenses: {:>18}", settings.format_amount(totals.total_expenses))?;
    writeln!(out, "{}", "-".repeat(34))?;
    writeln!(out, "Net Balance:    {:>18}", settings.format_amount(totals.net_balance))?;
    writeln!(out)?;

    if !dashboard.has_data() {
        writeln!(out, "No data yet. Add invoices and expenses to view your dashboard.")?;
        return Ok(());
    }

    writeln!(out, "Monthly Cash Flow")?;
    writeln!(out, "{:<8} {:>16} {:>16} {:>16}", "MONTH", "INCOME", "EXPENSE", "NET")?;
    writeln!(out, "{}", "-".repeat(59))?;
    for row in &dashboard.monthly {
        writeln!(
            out,
            "{:<8} {:>16} {:>16} {:>16}",
            row.month.to_string(),
            settings.format_amount(row.income),
            settings.format_amount(row.expense),
            settings.format_amount(row.net())
        )?;
    }
    writeln!(out)?;

    for line in render_monthly_chart(&dashboard.monthly, settings) {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Acme", 10), "Acme");
        assert_eq!(truncate("Acme Corporation", 8), "Acme Co…");
    }
}
