// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use freelance_ledger::application::{FixedClock, LedgerService};
use freelance_ledger::cli::Session;
use freelance_ledger::config::Settings;
use freelance_ledger::domain::ExpenseCategory;

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to create a service whose "today" is fixed
pub fn test_service(today: &str) -> LedgerService {
    LedgerService::with_clock(FixedClock(parse_date(today)))
}

/// Helper to create a session with plain "$" amounts and a 20-cell chart
pub fn test_session(today: &str) -> Session {
    let settings = Settings {
        currency_symbol: "$".into(),
        chart_width: 20,
    };
    Session::new(test_service(today), settings)
}

/// Feed a script to a session and return everything it printed
pub fn run_script(session: &mut Session, script: &str) -> Result<String> {
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out, false)?;
    Ok(String::from_utf8(out)?)
}

/// Test fixture: the Acme invoice and Laptop expense scenario
pub struct AcmeScenario;

impl AcmeScenario {
    pub fn record(service: &mut LedgerService) -> Result<()> {
        service.add_invoice("Acme", "Website redesign", 100000, parse_date("2024-01-10"))?;
        service.add_expense(
            "Laptop",
            20000,
            parse_date("2024-01-15"),
            ExpenseCategory::Supplies,
        )?;
        Ok(())
    }
}
