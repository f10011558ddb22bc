//! Budget model
//!
//! A monthly spending limit attached to one expense category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::kind::TransactionKind;
use super::money::Money;

/// A monthly limit for a category (at most one per category)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget applies to
    pub category_id: CategoryId,

    /// Spending limit per calendar month
    pub monthly_limit: Money,
}

impl Budget {
    /// Create a new budget
    pub fn new(id: BudgetId, category_id: CategoryId, monthly_limit: Money) -> Self {
        Self {
            id,
            category_id,
            monthly_limit,
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.monthly_limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }

        Ok(())
    }
}

/// A budget joined with its category, as listed by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub category_name: String,
    pub kind: TransactionKind,
    pub monthly_limit: Money,
}

impl BudgetLine {
    /// Listing order: kind label, then category name
    pub fn sort_key(&self) -> (&'static str, &str) {
        (self.kind.label(), self.category_name.as_str())
    }
}

impl fmt::Display for BudgetLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} / month", self.category_name, self.monthly_limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit => write!(f, "Monthly limit must be ≥ 0."),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
