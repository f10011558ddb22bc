//! CLI commands for reports
//!
//! Summary totals, budget insights and the monthly trend over a filtered
//! snapshot of the ledger.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::reports::insights::over_budget;
use crate::reports::{AggregationSummary, Insights, MonthlyTrendRow, TransactionFilter};
use crate::storage::{RecordStore, Storage};

use super::{evaluation_date, FilterArgs};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense, net and spending by category
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Savings rate, top expenses and over-budget categories
    Insights {
        #[command(flatten)]
        filter: FilterArgs,

        /// Evaluation date (YYYY-MM-DD); its whole month is checked against
        /// budgets, whatever the date filters
        #[arg(long)]
        today: Option<String>,

        /// Number of top expense categories
        #[arg(long)]
        top: Option<usize>,
    },

    /// Income and expense per month
    Trend {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { filter } => {
            let entries = storage.query_transactions(&filter.to_filter(storage)?)?;
            let summary = AggregationSummary::summarize(&entries);
            print!("{}", summary.format_terminal(symbol));
        }

        ReportCommands::Insights { filter, today, top } => {
            let today = evaluation_date(today.as_deref())?;
            let entries = storage.query_transactions(&filter.to_filter(storage)?)?;
            let budgets = storage.list_budgets()?;

            let mut insights = Insights::evaluate(
                &entries,
                &budgets,
                today,
                top.unwrap_or(settings.top_expenses),
            );

            // Budgets are judged on the full evaluation month, not the filtered window
            let month = insights.month;
            let month_entries = storage.query_transactions(
                &TransactionFilter::all().between(month.start_date(), month.end_date()),
            )?;
            insights.over_budget = over_budget(&month_entries, &budgets, month);
            print!("{}", insights.format_terminal(symbol));
        }

        ReportCommands::Trend { filter } => {
            let entries = storage.query_transactions(&filter.to_filter(storage)?)?;
            let trend = AggregationSummary::summarize(&entries).monthly_trend();
            print!("{}", format_trend(&trend, symbol));
        }
    }

    Ok(())
}

fn format_trend(rows: &[MonthlyTrendRow], symbol: &str) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:>14} {:>14} {:>14}\n",
        "Month", "Income", "Expense", "Net"
    ));
    output.push_str(&"-".repeat(53));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14}\n",
            row.month.to_string(),
            row.income.format_with_symbol(symbol),
            row.expense.format_with_symbol(symbol),
            row.net().format_with_symbol(symbol)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month};

    #[test]
    fn test_format_trend() {
        let rows = vec![MonthlyTrendRow {
            month: Month::new(2025, 2),
            income: Money::from_units(3000),
            expense: Money::from_units(1200),
        }];
        let output = format_trend(&rows, "$");
        assert!(output.contains("2025-02"));
        assert!(output.contains("$1800.00"));
        assert_eq!(format_trend(&[], "$"), "No transactions found.\n");
    }
}
