//! Transaction service
//!
//! Validates and persists transactions. Dates and kinds arrive as raw text
//! and are checked here so every caller gets the same messages.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::transaction::MAX_DESCRIPTION_LEN;
use crate::models::text::sanitize_text;
use crate::models::{Category, CategoryId, LedgerEntry, Money, Transaction, TransactionId, TransactionKind};
use crate::reports::TransactionFilter;
use crate::storage::{RecordStore, Storage};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    pub amount: Money,
    pub category_id: CategoryId,
    /// INCOME or EXPENSE, any case
    pub kind: String,
}

/// Changes to an existing transaction; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub category_id: Option<CategoryId>,
    pub kind: Option<String>,
}

impl UpdateTransactionInput {
    /// Check whether any field would change
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.category_id.is_none()
            && self.kind.is_none()
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> TrackerResult<Transaction> {
        let date = parse_date(&input.date)?;
        let amount = check_amount(input.amount)?;
        let kind = parse_kind(&input.kind)?;
        let category = self.category(input.category_id)?;
        warn_on_kind_mismatch(&category, kind);

        let txn = Transaction::new(
            self.storage.transactions.allocate_id()?,
            date,
            amount,
            category.id,
            kind,
        )
        .with_description(&input.description);

        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(id = %txn.id, date = %txn.date, amount = %txn.amount, kind = %txn.kind, "transaction added");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Query transactions joined with category names, newest first
    pub fn query(&self, filter: &TransactionFilter) -> TrackerResult<Vec<LedgerEntry>> {
        self.storage.query_transactions(filter)
    }

    /// Update a transaction
    pub fn update(&self, id: TransactionId, input: UpdateTransactionInput) -> TrackerResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        if let Some(date) = &input.date {
            txn.date = parse_date(date)?;
        }
        if let Some(description) = &input.description {
            txn.description = sanitize_text(description, MAX_DESCRIPTION_LEN);
        }
        if let Some(amount) = input.amount {
            txn.amount = check_amount(amount)?;
        }
        if let Some(kind) = &input.kind {
            txn.kind = parse_kind(kind)?;
        }
        let category = self.category(input.category_id.unwrap_or(txn.category_id))?;
        txn.category_id = category.id;
        warn_on_kind_mismatch(&category, txn.kind);

        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(id = %txn.id, "transaction updated");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> TrackerResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        info!(id = %id, "transaction deleted");
        Ok(txn)
    }

    fn category(&self, id: CategoryId) -> TrackerResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::Validation("Invalid date. Use YYYY-MM-DD.".into()))
}

fn parse_kind(s: &str) -> TrackerResult<TransactionKind> {
    TransactionKind::parse_lenient(s)
        .ok_or_else(|| TrackerError::Validation("Invalid transaction type.".into()))
}

fn check_amount(amount: Money) -> TrackerResult<Money> {
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(TrackerError::Validation("Amount must be greater than 0.".into()))
    }
}

fn warn_on_kind_mismatch(category: &Category, kind: TransactionKind) {
    if category.kind != kind {
        warn!(
            category = %category.name,
            category_kind = %category.kind,
            transaction_kind = %kind,
            "transaction kind does not match its category"
        );
    }
}
