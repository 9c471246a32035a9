use anyhow::Result;
use clap::Parser;
use freelance_ledger::cli::Cli;
use freelance_ledger::logging::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    cli.run()
}
