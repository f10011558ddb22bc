//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, with a
//! category index used by cascade deletes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{CategoryId, Transaction, TransactionId};

use super::file_io::{lock_error, read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionData {
    #[serde(default)]
    next_id: i64,
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
    next_id: RwLock<TransactionId>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
            next_id: RwLock::new(TransactionId::new(1)),
        }
    }

    /// Load transactions from disk and build the category index
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        data.clear();
        by_category.clear();

        let mut floor = file_data.next_id.max(1);
        for txn in file_data.transactions {
            floor = floor.max(txn.id.value() + 1);
            by_category.entry(txn.category_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }
        *next_id = TransactionId::new(floor);

        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let next_id = self.next_id.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        let file_data = TransactionData {
            next_id: next_id.value(),
            transactions,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Reserve the next transaction id
    pub fn allocate_id(&self) -> Result<TransactionId, TrackerError> {
        let mut next_id = self.next_id.write().map_err(lock_error)?;
        let id = *next_id;
        *next_id = id.next();
        Ok(id)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(transactions)
    }

    /// Get transactions for a category
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Transaction>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_category = self.by_category.read().map_err(lock_error)?;

        let ids = by_category.get(&category_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_category.entry(txn.category_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_category.get_mut(&txn.category_id) {
                ids.retain(|&other| other != id);
            }
        }
        Ok(removed)
    }

    /// Delete every transaction in a category, returning how many were removed
    pub fn delete_by_category(&self, category_id: CategoryId) -> Result<usize, TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        let ids = by_category.remove(&category_id).unwrap_or_default();
        Ok(ids.iter().filter(|id| data.remove(id).is_some()).count())
    }

    /// Number of transactions
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
