//! Category service
//!
//! Business logic for categories: creation with validation, renaming, and
//! deletion that cascades to the category's transactions and budget.

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::category::MAX_CATEGORY_NAME_LEN;
use crate::models::text::sanitize_text;
use crate::models::{Category, CategoryId, TransactionKind};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// What a category deletion removed
#[derive(Debug, Clone)]
pub struct CategoryDeletion {
    pub category: Category,
    pub transactions_removed: usize,
    pub budget_removed: bool,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    ///
    /// `kind` is matched case-insensitively against INCOME/EXPENSE.
    pub fn create(&self, name: &str, kind: &str) -> TrackerResult<Category> {
        let name = sanitize_text(name, MAX_CATEGORY_NAME_LEN);
        let kind = match TransactionKind::parse_lenient(kind) {
            Some(kind) if !name.is_empty() => kind,
            _ => return Err(TrackerError::Validation("Invalid category name/type.".into())),
        };

        self.ensure_unique(&name, None)?;

        let category = Category::new(self.storage.categories.allocate_id()?, &name, kind);
        category
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(id = %category.id, name = %category.name, kind = %category.kind, "category added");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> TrackerResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// Find a category or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> TrackerResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| TrackerError::category_not_found(identifier.trim()))
    }

    /// List categories, optionally of one kind
    pub fn list(&self, kind: Option<TransactionKind>) -> TrackerResult<Vec<Category>> {
        self.storage.categories.get_all(kind)
    }

    /// Rename a category
    pub fn rename(&self, id: CategoryId, new_name: &str) -> TrackerResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;

        let new_name = sanitize_text(new_name, MAX_CATEGORY_NAME_LEN);
        if new_name.is_empty() {
            return Err(TrackerError::Validation("Invalid category name/type.".into()));
        }
        self.ensure_unique(&new_name, Some(id))?;

        let old_name = std::mem::replace(&mut category.name, new_name);
        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(id = %id, from = %old_name, to = %category.name, "category renamed");
        Ok(category)
    }

    /// Delete a category together with its transactions and budget
    pub fn delete(&self, id: CategoryId) -> TrackerResult<CategoryDeletion> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;

        let transactions_removed = self.storage.transactions.delete_by_category(id)?;
        let budget_removed = self.storage.budgets.delete_for_category(id)?.is_some();
        self.storage.categories.delete(id)?;
        self.storage.save_all()?;

        info!(
            id = %id,
            name = %category.name,
            transactions_removed,
            budget_removed,
            "category deleted"
        );

        Ok(CategoryDeletion {
            category,
            transactions_removed,
            budget_removed,
        })
    }

    fn ensure_unique(&self, name: &str, except: Option<CategoryId>) -> TrackerResult<()> {
        match self.storage.categories.get_by_name(name)? {
            Some(existing) if Some(existing.id) != except => Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
