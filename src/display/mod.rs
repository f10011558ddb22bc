//! Display formatting for terminal output
//!
//! Tables and aligned lists for categories, transactions and budgets.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::format_budget_table;
pub use category::format_category_list;
pub use transaction::{format_ledger_table, format_transaction_details};
