//! CSV export of ledger entries
//!
//! One row per transaction with the category name joined in. Amounts are
//! written with two decimals and kinds as INCOME/EXPENSE.

use std::io::{Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{CategoryId, LedgerEntry, Money, Transaction, TransactionId, TransactionKind};

/// Column order of the export
pub const CSV_HEADER: [&str; 7] = [
    "id",
    "date",
    "description",
    "amount",
    "category_id",
    "kind",
    "category",
];

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: i64,
    date: NaiveDate,
    description: String,
    amount: String,
    category_id: i64,
    kind: TransactionKind,
    category: String,
}

impl From<&LedgerEntry> for CsvRow {
    fn from(entry: &LedgerEntry) -> Self {
        let txn = &entry.transaction;
        Self {
            id: txn.id.value(),
            date: txn.date,
            description: txn.description.clone(),
            amount: txn.amount.to_decimal_string(),
            category_id: txn.category_id.value(),
            kind: txn.kind,
            category: entry.category_name.clone(),
        }
    }
}

impl TryFrom<CsvRow> for LedgerEntry {
    type Error = TrackerError;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let amount = Money::parse(&row.amount)
            .map_err(|e| TrackerError::Csv(format!("row {}: {}", row.id, e)))?;

        let mut txn = Transaction::new(
            TransactionId::new(row.id),
            row.date,
            amount,
            CategoryId::new(row.category_id),
            row.kind,
        );
        txn.description = row.description;

        Ok(LedgerEntry::new(txn, row.category))
    }
}

/// Write entries as CSV, returning how many rows were written
///
/// An empty slice writes nothing at all, not even the header.
pub fn export_transactions_csv<W: Write>(entries: &[LedgerEntry], writer: W) -> TrackerResult<usize> {
    if entries.is_empty() {
        return Ok(0);
    }

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(CsvRow::from(entry))?;
    }
    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(entries.len())
}

/// Read entries back from CSV in the export format
pub fn read_transactions_csv<R: Read>(reader: R) -> TrackerResult<Vec<LedgerEntry>> {
    let mut csv_reader = ::csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(TrackerError::Csv(format!(
            "unexpected header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    csv_reader
        .deserialize::<CsvRow>()
        .map(|row| LedgerEntry::try_from(row?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, description: &str, cents: i64, kind: TransactionKind, category: &str) -> LedgerEntry {
        let mut txn = Transaction::new(
            TransactionId::new(id),
            NaiveDate::from_ymd_opt(2025, 3, id as u32).unwrap(),
            Money::from_cents(cents),
            CategoryId::new(id * 10),
            kind,
        );
        txn.description = description.to_string();
        LedgerEntry::new(txn, category)
    }

    #[test]
    fn test_export_format() {
        let entries = vec![
            entry(2, "Lunch, with team", 1_250, TransactionKind::Expense, "Dining"),
            entry(1, "", 300_000, TransactionKind::Income, "Salary"),
        ];
        let mut buffer = Vec::new();

        let written = export_transactions_csv(&entries, &mut buffer).unwrap();
        assert_eq!(written, 2);

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "id,date,description,amount,category_id,kind,category");
        assert_eq!(lines[1], "2,2025-03-02,\"Lunch, with team\",12.50,20,EXPENSE,Dining");
        assert_eq!(lines[2], "1,2025-03-01,,3000.00,10,INCOME,Salary");
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let mut buffer = Vec::new();
        assert_eq!(export_transactions_csv(&[], &mut buffer).unwrap(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_read_back() {
        let entries = vec![
            entry(3, "Quote \"this\"", 999, TransactionKind::Expense, "Groceries"),
            entry(1, "Pay", 100, TransactionKind::Income, "Salary"),
        ];
        let mut buffer = Vec::new();
        export_transactions_csv(&entries, &mut buffer).unwrap();

        let read = read_transactions_csv(buffer.as_slice()).unwrap();
        assert_eq!(read, entries);
    }

    #[test]
    fn test_read_rejects_foreign_header() {
        let data = "Date,Amount\n2025-01-01,5.00\n";
        assert!(matches!(
            read_transactions_csv(data.as_bytes()),
            Err(TrackerError::Csv(_))
        ));
    }
}
