//! Budget repository for JSON storage
//!
//! Manages loading and saving monthly limits to budgets.json. There is at
//! most one budget per category.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{Budget, BudgetId, CategoryId, Money};

use super::file_io::{lock_error, read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default)]
    next_id: i64,
    budgets: Vec<Budget>,
}

/// Repository for budget persistence, keyed by category
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Budget>>,
    next_id: RwLock<BudgetId>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            next_id: RwLock::new(BudgetId::new(1)),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        data.clear();
        let mut floor = file_data.next_id.max(1);
        for budget in file_data.budgets {
            floor = floor.max(budget.id.value() + 1);
            data.insert(budget.category_id, budget);
        }
        *next_id = BudgetId::new(floor);

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let next_id = self.next_id.read().map_err(lock_error)?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by_key(|b| b.id);

        let file_data = BudgetData {
            next_id: next_id.value(),
            budgets,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the budget for a category
    pub fn get_for_category(&self, category_id: CategoryId) -> Result<Option<Budget>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&category_id).cloned())
    }

    /// Get all budgets in id order
    pub fn get_all(&self) -> Result<Vec<Budget>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by_key(|b| b.id);
        Ok(budgets)
    }

    /// Set the limit for a category, creating the budget if needed
    ///
    /// An existing budget keeps its id; only the limit changes.
    pub fn upsert(&self, category_id: CategoryId, monthly_limit: Money) -> Result<Budget, TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;

        if let Some(existing) = data.get_mut(&category_id) {
            existing.monthly_limit = monthly_limit;
            return Ok(existing.clone());
        }

        let mut next_id = self.next_id.write().map_err(lock_error)?;
        let budget = Budget::new(*next_id, category_id, monthly_limit);
        *next_id = next_id.next();
        data.insert(category_id, budget.clone());
        Ok(budget)
    }

    /// Delete the budget for a category
    pub fn delete_for_category(&self, category_id: CategoryId) -> Result<Option<Budget>, TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&category_id))
    }

    /// Number of budgets
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
