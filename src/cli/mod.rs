mod chart;
mod render;
mod session;
mod tokenize;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::application::{FixedClock, LedgerService};
use crate::config::{DEFAULT_CHART_WIDTH, DEFAULT_CURRENCY_SYMBOL, Settings};

pub use chart::render_monthly_chart;
pub use session::{Flow, Session, parse_date};
pub use tokenize::{TokenizeError, split_line};

/// Freelance Ledger - invoices, expenses and cash flow for one session
#[derive(Parser)]
#[command(name = "freelance-ledger")]
#[command(about = "An in-memory invoicing and expense tracker for freelancers")]
#[command(version)]
pub struct Cli {
    /// Read session commands from a file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Currency symbol printed before amounts
    #[arg(long, env = "FREELANCE_LEDGER_CURRENCY", default_value = DEFAULT_CURRENCY_SYMBOL)]
    pub currency: String,

    /// Width of the longest bar in the monthly chart
    #[arg(long, env = "FREELANCE_LEDGER_CHART_WIDTH", default_value_t = DEFAULT_CHART_WIDTH)]
    pub chart_width: usize,

    /// Pin "today" to a date (YYYY-MM-DD), e.g. to replay a script
    #[arg(long)]
    pub today: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Build the session this invocation describes.
    pub fn session(&self) -> Result<Session> {
        let service = match &self.today {
            Some(date_str) => LedgerService::with_clock(FixedClock(parse_date(date_str)?)),
            None => LedgerService::new(),
        };
        Ok(Session::new(service, Settings::from_cli(self)))
    }

    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        self.run_with(&mut stdout.lock())
    }

    /// Run the session, reading the script file or stdin and printing to `out`.
    pub fn run_with<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut session = self.session()?;

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script '{}'", path.display()))?;
                info!(script = %path.display(), "session started");
                session.run(BufReader::new(file), out, false)?;
            }
            None => {
                let stdin = io::stdin();
                let interactive = stdin.is_terminal();
                info!(interactive, "session started");
                session.run(stdin.lock(), out, interactive)?;
            }
        }

        info!(
            invoices = session.service().list_invoices().len(),
            expenses = session.service().list_expenses().len(),
            "session ended, discarding ledger"
        );
        Ok(())
    }
}
