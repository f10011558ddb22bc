//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_table;
use crate::error::{Outcome, TrackerResult};
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

use super::{finish, parse_amount};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly limit of an expense category
    Set {
        /// Category name or ID
        category: String,
        /// Monthly limit (e.g., "500")
        #[arg(allow_hyphen_values = true)]
        limit: String,
    },

    /// List budgets
    List,

    /// Remove a category's budget
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let service = BudgetService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        BudgetCommands::Set { category, limit } => {
            let category = categories.resolve(&category)?;
            let limit = parse_amount(&limit)?;
            finish(Outcome::from_result(service.set_limit(category.id, limit), |b| {
                format!(
                    "Budget saved. {}: {} / month",
                    category.name,
                    b.monthly_limit.format_with_symbol(&settings.currency_symbol)
                )
            }))?;
        }

        BudgetCommands::List => {
            println!(
                "{}",
                format_budget_table(&service.list()?, &settings.currency_symbol)
            );
        }

        BudgetCommands::Delete { category } => {
            let category = categories.resolve(&category)?;
            finish(Outcome::from_result(service.delete(category.id), |_| {
                format!("Budget deleted for {}", category.name)
            }))?;
        }
    }

    Ok(())
}
