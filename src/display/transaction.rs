//! Transaction display formatting
//!
//! Ledger listings are rendered as tables; a single transaction gets a
//! detail view.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{LedgerEntry, Transaction};

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format ledger entries as a table, in the order given
pub fn format_ledger_table(entries: &[LedgerEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = entries.iter().map(|entry| LedgerRow {
        id: entry.id().value(),
        date: entry.date().format("%Y-%m-%d").to_string(),
        kind: entry.kind().label(),
        category: entry.category_name.clone(),
        amount: entry.amount().format_with_symbol(symbol),
        description: truncate(&entry.transaction.description, 40),
    });

    Table::new(rows)
        .with(Style::sharp())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, category_name: &str, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", category_name));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, TransactionId, TransactionKind};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::new(
            TransactionId::new(7),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::from_cents(5_000),
            CategoryId::new(4),
            TransactionKind::Expense,
        )
        .with_description("Test Store")
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_ledger_table(&[], "$"), "No transactions found.");
    }

    #[test]
    fn test_table_contents() {
        let table = format_ledger_table(&[LedgerEntry::new(sample(), "Groceries")], "$");
        assert!(table.contains("Description"));
        assert!(table.contains("2025-01-15"));
        assert!(table.contains("EXPENSE"));
        assert!(table.contains("Groceries"));
        assert!(table.contains("$50.00"));
        assert!(table.contains("Test Store"));
    }

    #[test]
    fn test_details() {
        let details = format_transaction_details(&sample(), "Groceries", "€");
        assert!(details.contains("Transaction: 7"));
        assert!(details.contains("Amount:      €50.00"));
        assert!(details.contains("Description: Test Store"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer description", 10), "a much ...");
    }
}
