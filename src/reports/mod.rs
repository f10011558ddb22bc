//! Reports module for finance-tracker
//!
//! The query and aggregation engine: filtering a ledger snapshot, summarizing
//! it, and evaluating it against budgets.

pub mod filter;
pub mod insights;
pub mod summary;

pub use filter::{select, sort_newest_first, TransactionFilter};
pub use insights::{Insights, OverBudget, DEFAULT_TOP_EXPENSES};
pub use summary::{AggregationSummary, CategoryTotal, MonthlyTrendRow};
