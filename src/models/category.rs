//! Category model
//!
//! Categories label transactions and carry the income/expense direction.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::kind::TransactionKind;
use super::text::sanitize_text;

/// Maximum length of a category name, in characters
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A transaction category (e.g., "Salary", "Groceries")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, unique across all categories
    pub name: String,

    /// Income or expense
    pub kind: TransactionKind,
}

impl Category {
    /// Create a new category, normalizing the name
    pub fn new(id: CategoryId, name: &str, kind: TransactionKind) -> Self {
        Self {
            id,
            name: sanitize_text(name, MAX_CATEGORY_NAME_LEN),
            kind,
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Invalid category name/type."),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
