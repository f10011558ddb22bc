//! Storage initialization
//!
//! Handles first-run setup and the default categories

use tracing::info;

use crate::config::paths::FinancePaths;
use crate::error::TrackerError;
use crate::models::{Category, CategoryId, TransactionKind};

use super::categories::CategoryData;
use super::file_io::{read_json, write_json_atomic};

/// Categories created on a fresh installation
pub const DEFAULT_CATEGORIES: &[(&str, TransactionKind)] = &[
    ("Salary", TransactionKind::Income),
    ("Freelance", TransactionKind::Income),
    ("Rent", TransactionKind::Expense),
    ("Groceries", TransactionKind::Expense),
    ("Dining", TransactionKind::Expense),
    ("Transport", TransactionKind::Expense),
];

/// Initialize storage, seeding default categories when there are none
///
/// Returns `true` if the defaults were written.
pub fn initialize_storage(paths: &FinancePaths) -> Result<bool, TrackerError> {
    paths.ensure_directories()?;

    let existing: CategoryData = read_json(paths.categories_file())?;
    if !existing.categories.is_empty() {
        return Ok(false);
    }

    let categories: Vec<_> = DEFAULT_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, (name, kind))| Category::new(CategoryId::new(i as i64 + 1), name, *kind))
        .collect();

    let data = CategoryData {
        next_id: (categories.len() as i64 + 1).max(existing.next_id),
        categories,
    };
    write_json_atomic(paths.categories_file(), &data)?;

    info!(count = data.categories.len(), "seeded default categories");
    Ok(true)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinancePaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_seeds_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(needs_initialization(&paths));

        assert!(initialize_storage(&paths).unwrap());
        assert!(!needs_initialization(&paths));

        let data: CategoryData = read_json(paths.categories_file()).unwrap();
        let names: Vec<_> = data.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Salary", "Freelance", "Rent", "Groceries", "Dining", "Transport"]
        );
        assert_eq!(data.next_id, 7);

        assert!(!initialize_storage(&paths).unwrap());
    }
}
