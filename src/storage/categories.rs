//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{Category, CategoryId, TransactionKind};

use super::file_io::{lock_error, read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryData {
    /// Next id to hand out; ids are never reused
    #[serde(default)]
    pub next_id: i64,
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
    next_id: RwLock<CategoryId>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            next_id: RwLock::new(CategoryId::new(1)),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        data.clear();
        let mut floor = file_data.next_id.max(1);
        for category in file_data.categories {
            floor = floor.max(category.id.value() + 1);
            data.insert(category.id, category);
        }
        *next_id = CategoryId::new(floor);

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let next_id = self.next_id.read().map_err(lock_error)?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by_key(|c| c.id);

        let file_data = CategoryData {
            next_id: next_id.value(),
            categories,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Reserve the next category id
    pub fn allocate_id(&self) -> Result<CategoryId, TrackerError> {
        let mut next_id = self.next_id.write().map_err(lock_error)?;
        let id = *next_id;
        *next_id = id.next();
        Ok(id)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Get all categories in id order, optionally of one kind
    pub fn get_all(&self, kind: Option<TransactionKind>) -> Result<Vec<Category>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut list: Vec<_> = data
            .values()
            .filter(|c| kind.map_or(true, |k| c.kind == k))
            .cloned()
            .collect();
        list.sort_by_key(|c| c.id);
        Ok(list)
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(category.id, category);
        Ok(())
    }

    /// Delete a category
    pub fn delete(&self, id: CategoryId) -> Result<bool, TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id).is_some())
    }

    /// Number of categories
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
