//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::{Outcome, TrackerResult};
use crate::models::TransactionKind;
use crate::services::CategoryService;
use crate::storage::Storage;

use super::finish;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only INCOME or EXPENSE categories
        #[arg(long)]
        kind: Option<String>,
    },

    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// INCOME or EXPENSE
        #[arg(short, long)]
        kind: String,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        new_name: String,
    },

    /// Delete a category with its transactions and budget
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TrackerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let kind = kind.as_deref().and_then(TransactionKind::parse_lenient);
            println!("{}", format_category_list(&service.list(kind)?).trim_end());
        }

        CategoryCommands::Add { name, kind } => {
            finish(Outcome::from_result(service.create(&name, &kind), |c| {
                format!("Category added. {} ({}, ID {})", c.name, c.kind, c.id)
            }))?;
        }

        CategoryCommands::Rename { category, new_name } => {
            let existing = service.resolve(&category)?;
            finish(Outcome::from_result(service.rename(existing.id, &new_name), |c| {
                format!("Category renamed: {} -> {}", existing.name, c.name)
            }))?;
        }

        CategoryCommands::Delete { category } => {
            let existing = service.resolve(&category)?;
            finish(Outcome::from_result(service.delete(existing.id), |d| {
                let budget = if d.budget_removed { " and its budget" } else { "" };
                format!(
                    "Category deleted: {} ({} transactions{} removed)",
                    d.category.name, d.transactions_removed, budget
                )
            }))?;
        }
    }

    Ok(())
}
