use crate::cli::Cli;
use crate::domain::{Cents, format_cents_grouped};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
pub const DEFAULT_CHART_WIDTH: usize = 40;

/// Presentation settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prefix printed before every amount
    pub currency_symbol: String,
    /// Length of the longest bar in the monthly chart
    pub chart_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            currency_symbol: cli.currency.clone(),
            chart_width: cli.chart_width.max(1),
        }
    }

    /// "₹1,234.50"
    pub fn format_amount(&self, cents: Cents) -> String {
        format!("{}{}", self.currency_symbol, format_cents_grouped(cents))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_defaults_from_cli() {
        let cli = Cli::try_parse_from(["freelance-ledger"]).unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.chart_width, DEFAULT_CHART_WIDTH);
        assert!(!settings.currency_symbol.is_empty());
    }

    #[test]
    fn test_chart_width_is_clamped() {
        let cli = Cli::try_parse_from(["freelance-ledger", "--chart-width", "0", "--currency", "$"])
            .unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.chart_width, 1);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_format_amount() {
        let settings = Settings {
            currency_symbol: "$".into(),
            chart_width: 10,
        };
        assert_eq!(settings.format_amount(100000), "$1,000.00");
        assert_eq!(settings.format_amount(-80000), "$-800.00");
    }
}
