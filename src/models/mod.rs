//! Core data models for finance-tracker
//!
//! This module contains the data structures of the ledger domain:
//! categories, transactions, budgets, amounts and calendar months.

pub mod budget;
pub mod category;
pub mod ids;
pub mod kind;
pub mod money;
pub mod period;
pub mod text;
pub mod transaction;

pub use budget::{Budget, BudgetLine};
pub use category::Category;
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use kind::TransactionKind;
pub use money::Money;
pub use period::Month;
pub use transaction::{LedgerEntry, Transaction};
