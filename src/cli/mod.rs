//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod advice;
pub mod budget;
pub mod category;
pub mod export;
pub mod report;
pub mod transaction;

pub use advice::{handle_advice_command, AdviceArgs};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::error::{Outcome, TrackerError, TrackerResult};
use crate::models::Money;
use crate::reports::TransactionFilter;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Filter flags shared by listing, report and export commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest date, inclusive (YYYY-MM-DD; invalid values are ignored)
    #[arg(long)]
    pub start: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD; invalid values are ignored)
    #[arg(long)]
    pub end: Option<String>,

    /// Only INCOME or EXPENSE
    #[arg(long)]
    pub kind: Option<String>,

    /// Only these categories (name or ID; repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,
}

impl FilterArgs {
    /// Build a filter, resolving category names against the store
    ///
    /// Dates and kind degrade silently; an unknown category is an error.
    pub fn to_filter(&self, storage: &Storage) -> TrackerResult<TransactionFilter> {
        let service = CategoryService::new(storage);
        let ids = self
            .categories
            .iter()
            .map(|c| service.resolve(c).map(|category| category.id))
            .collect::<TrackerResult<Vec<_>>>()?;

        Ok(TransactionFilter::from_raw(
            self.start.as_deref(),
            self.end.as_deref(),
            self.kind.as_deref(),
            ids,
        ))
    }
}

/// Parse an amount typed by the user
pub fn parse_amount(s: &str) -> TrackerResult<Money> {
    Money::parse(s).map_err(|e| TrackerError::Validation(format!("Invalid amount: {}", e)))
}

/// The evaluation date: `--today` if given, otherwise the local date
pub fn evaluation_date(today: Option<&str>) -> TrackerResult<NaiveDate> {
    match today {
        Some(s) => crate::services::transaction::parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

/// Print a successful outcome, or turn a failed one into an error
pub fn finish(outcome: Outcome) -> TrackerResult<()> {
    if outcome.success {
        println!("{}", outcome);
        Ok(())
    } else {
        Err(TrackerError::Validation(outcome.message))
    }
}
