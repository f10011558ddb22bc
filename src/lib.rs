//! finance-tracker - personal income and expense ledger
//!
//! This library provides the core of the `fintrack` command line tool: a
//! JSON-backed ledger of categorized transactions, monthly expense budgets,
//! and a read-only analytics engine that turns a filtered snapshot of the
//! ledger into summaries, insights and an advice prompt.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, transactions, budgets, money)
//! - `storage`: JSON file storage layer and the record store seam
//! - `services`: Validated writes
//! - `reports`: Filtering, aggregation and insights
//! - `advice`: Prompt building and the advice generator client
//! - `export`: CSV export
//! - `display`, `cli`: Terminal rendering and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{FinancePaths, Settings};
//! use finance_tracker::reports::{AggregationSummary, TransactionFilter};
//! use finance_tracker::storage::{RecordStore, Storage};
//!
//! let paths = FinancePaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let entries = storage.query_transactions(&TransactionFilter::all())?;
//! println!("{}", AggregationSummary::summarize(&entries).format_terminal("$"));
//! ```

pub mod advice;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
