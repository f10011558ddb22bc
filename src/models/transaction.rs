//! Transaction model
//!
//! A dated, positive money movement tagged with a category and a kind.
//! `LedgerEntry` is the read model handed to the engine: the transaction
//! joined with its category's name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::kind::TransactionKind;
use super::money::Money;
use super::text::sanitize_text;

/// Maximum length of a transaction description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 120;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-text description (may be empty)
    #[serde(default)]
    pub description: String,

    /// Amount, always strictly positive
    pub amount: Money,

    /// Category this transaction belongs to
    pub category_id: CategoryId,

    /// Income or expense
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        amount: Money,
        category_id: CategoryId,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            date,
            description: String::new(),
            amount,
            category_id,
            kind,
        }
    }

    /// Set the description, normalizing whitespace and length
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = sanitize_text(description, MAX_DESCRIPTION_LEN);
        self
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }

        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(TransactionValidationError::DescriptionTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.description
        )
    }
}

/// A transaction joined with the name of its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub transaction: Transaction,
    pub category_name: String,
}

impl LedgerEntry {
    pub fn new(transaction: Transaction, category_name: impl Into<String>) -> Self {
        Self {
            transaction,
            category_name: category_name.into(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.transaction.id
    }

    pub fn date(&self) -> NaiveDate {
        self.transaction.date
    }

    pub fn amount(&self) -> Money {
        self.transaction.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.transaction.kind
    }

    pub fn category_id(&self) -> CategoryId {
        self.transaction.category_id
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0."),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            TransactionId::new(1),
            date(2025, 1, 15),
            Money::from_cents(5000),
            CategoryId::new(2),
            TransactionKind::Expense,
        )
        .with_description("  weekly   shop ");

        assert_eq!(txn.description, "weekly shop");
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let txn = Transaction::new(
            TransactionId::new(1),
            date(2025, 1, 15),
            Money::zero(),
            CategoryId::new(2),
            TransactionKind::Expense,
        );
        assert_eq!(txn.validate(), Err(TransactionValidationError::NonPositiveAmount));
        assert_eq!(
            TransactionValidationError::NonPositiveAmount.to_string(),
            "Amount must be greater than 0."
        );
    }

    #[test]
    fn test_description_is_truncated() {
        let txn = Transaction::new(
            TransactionId::new(1),
            date(2025, 1, 15),
            Money::from_cents(100),
            CategoryId::new(2),
            TransactionKind::Income,
        )
        .with_description(&"d".repeat(200));
        assert_eq!(txn.description.chars().count(), MAX_DESCRIPTION_LEN);
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(
            TransactionId::new(1),
            date(2025, 1, 15),
            Money::from_cents(5000),
            CategoryId::new(2),
            TransactionKind::Expense,
        )
        .with_description("Test Store");

        assert_eq!(format!("{}", txn), "2025-01-15 EXPENSE 50.00 Test Store");
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::new(
            TransactionId::new(4),
            date(2025, 3, 1),
            Money::from_cents(250000),
            CategoryId::new(1),
            TransactionKind::Income,
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"2025-03-01\""));
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, deserialized);
    }
}
