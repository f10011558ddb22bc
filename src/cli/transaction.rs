//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_ledger_table, format_transaction_details};
use crate::error::{Outcome, TrackerError, TrackerResult};
use crate::models::TransactionId;
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionService, UpdateTransactionInput,
};
use crate::storage::Storage;

use super::{evaluation_date, finish, parse_amount, FilterArgs};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount, always positive (e.g., "42.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// INCOME or EXPENSE (defaults to the category's kind)
        #[arg(short, long)]
        kind: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New kind
        #[arg(short, long)]
        kind: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
    },

    /// List transactions, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let service = TransactionService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            kind,
            date,
            description,
        } => {
            let category = categories.resolve(&category)?;
            let date = match date {
                Some(date) => date,
                None => evaluation_date(None)?.format("%Y-%m-%d").to_string(),
            };
            let input = CreateTransactionInput {
                date,
                description,
                amount: parse_amount(&amount)?,
                category_id: category.id,
                kind: kind.unwrap_or_else(|| category.kind.label().to_string()),
            };

            finish(Outcome::from_result(service.create(input), |t| {
                format!(
                    "Transaction added. ID {}: {} {} {} in {}",
                    t.id,
                    t.date,
                    t.kind,
                    t.amount.format_with_symbol(&settings.currency_symbol),
                    category.name
                )
            }))?;
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            kind,
            date,
            description,
        } => {
            let input = UpdateTransactionInput {
                date,
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category_id: match category {
                    Some(c) => Some(categories.resolve(&c)?.id),
                    None => None,
                },
                kind,
            };
            if input.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            finish(Outcome::from_result(service.update(id, input), |t| {
                format!("Transaction updated. ID {}", t.id)
            }))?;
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .get(id)?
                .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;
            let category_name = categories
                .get(txn.category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| "(deleted)".to_string());
            print!(
                "{}",
                format_transaction_details(&txn, &category_name, &settings.currency_symbol)
            );
        }

        TransactionCommands::Delete { id } => {
            finish(Outcome::from_result(service.delete(id), |t| {
                format!("Transaction deleted. ID {}", t.id)
            }))?;
        }

        TransactionCommands::List { filter, limit } => {
            let mut entries = service.query(&filter.to_filter(storage)?)?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            println!("{}", format_ledger_table(&entries, &settings.currency_symbol));
        }
    }

    Ok(())
}
