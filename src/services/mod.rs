//! Service layer for finance-tracker
//!
//! Validation and persistence for categories, transactions and budgets.
//! Services borrow the storage coordinator and save after every change.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::BudgetService;
pub use category::{CategoryDeletion, CategoryService};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
