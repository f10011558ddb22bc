//! Export module for finance-tracker
//!
//! CSV export of a filtered transaction set, and the matching reader.

pub mod csv;

pub use csv::{export_transactions_csv, read_transactions_csv, CSV_HEADER};
