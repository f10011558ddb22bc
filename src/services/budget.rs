//! Budget service
//!
//! Monthly limits on expense categories. Setting a limit for a category that
//! already has one replaces it.

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, BudgetId, BudgetLine, CategoryId, Money};
use crate::storage::{RecordStore, Storage};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the monthly limit for an expense category
    pub fn set_limit(&self, category_id: CategoryId, monthly_limit: Money) -> TrackerResult<Budget> {
        Budget::new(BudgetId::new(0), category_id, monthly_limit)
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| TrackerError::category_not_found(category_id.to_string()))?;

        if !category.kind.is_expense() {
            return Err(TrackerError::Validation(format!(
                "Budgets can only be set on expense categories ('{}' is {}).",
                category.name, category.kind
            )));
        }

        let budget = self.storage.budgets.upsert(category_id, monthly_limit)?;
        self.storage.budgets.save()?;

        info!(category = %category.name, limit = %monthly_limit, "budget saved");
        Ok(budget)
    }

    /// Get the budget for a category
    pub fn get(&self, category_id: CategoryId) -> TrackerResult<Option<Budget>> {
        self.storage.budgets.get_for_category(category_id)
    }

    /// List budgets joined with their categories
    pub fn list(&self) -> TrackerResult<Vec<BudgetLine>> {
        self.storage.list_budgets()
    }

    /// Remove the budget for a category
    pub fn delete(&self, category_id: CategoryId) -> TrackerResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete_for_category(category_id)?
            .ok_or_else(|| TrackerError::budget_not_found(category_id.to_string()))?;
        self.storage.budgets.save()?;

        info!(category_id = %category_id, "budget deleted");
        Ok(budget)
    }
}
