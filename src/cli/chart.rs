use crate::config::Settings;
use crate::domain::{Cents, MonthRow};

const INCOME_BAR: char = '█';
const EXPENSE_BAR: char = '░';

/// Grouped horizontal bar chart of income vs expenses, one group per month.
/// Bars are scaled so the largest amount spans `settings.chart_width` cells.
pub fn render_monthly_chart(rows: &[MonthRow], settings: &Settings) -> Vec<String> {
    let max = rows
        .iter()
        .flat_map(|row| [row.income, row.expense])
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Income vs Expenses Over Time".to_string()];
    for row in rows {
        let month = row.month.to_string();
        lines.push(format!(
            "{:<8} {:<8} {} {}",
            month,
            "income",
            bar(INCOME_BAR, row.income, max, settings.chart_width),
            settings.format_amount(row.income)
        ));
        lines.push(format!(
            "{:<8} {:<8} {} {}",
            "",
            "expense",
            bar(EXPENSE_BAR, row.expense, max, settings.chart_width),
            settings.format_amount(row.expense)
        ));
    }
    lines
}

/// Bar length for `amount` relative to `max`. Any non-zero amount gets at
/// least one cell so small months stay visible.
fn bar_len(amount: Cents, max: Cents, width: usize) -> usize {
    if amount <= 0 || max <= 0 || width == 0 {
        return 0;
    }
    let width = width as i128;
    let scaled = (i128::from(amount) * width + i128::from(max) / 2) / i128::from(max);
    scaled.clamp(1, width) as usize
}

fn bar(symbol: char, amount: Cents, max: Cents, width: usize) -> String {
    let len = bar_len(amount, max, width);
    let mut bar: String = std::iter::repeat_n(symbol, len).collect();
    bar.extend(std::iter::repeat_n(' ', width - len));
    bar
}
