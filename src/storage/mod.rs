//! Storage layer for finance-tracker
//!
//! Three JSON collections (categories, transactions, budgets) with atomic
//! writes. `Storage` coordinates them and answers the read queries the
//! engine needs through [`RecordStore`].

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, DEFAULT_CATEGORIES};
pub use transactions::TransactionRepository;

use std::collections::HashMap;

use tracing::debug;

use crate::config::paths::FinancePaths;
use crate::error::TrackerError;
use crate::models::{BudgetLine, Category, CategoryId, LedgerEntry, TransactionKind};
use crate::reports::filter::{select, TransactionFilter};

/// Read access to the records, as consumed by reports and the CLI
///
/// Every call returns a fresh snapshot; nothing is cached between calls.
pub trait RecordStore {
    /// Transactions joined with their category names, newest first
    fn query_transactions(&self, filter: &TransactionFilter) -> Result<Vec<LedgerEntry>, TrackerError>;

    /// Categories in id order, optionally of one kind
    fn list_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<Category>, TrackerError>;

    /// Budgets joined with their categories, ordered by kind then name
    fn list_budgets(&self) -> Result<Vec<BudgetLine>, TrackerError>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinancePaths,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinancePaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TrackerError> {
        self.categories.load()?;
        self.transactions.load()?;
        self.budgets.load()?;
        debug!(
            categories = self.categories.count()?,
            transactions = self.transactions.count()?,
            budgets = self.budgets.count()?,
            "loaded records"
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TrackerError> {
        self.categories.save()?;
        self.transactions.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Every transaction joined with its category name
    ///
    /// Transactions whose category no longer exists are skipped.
    pub fn ledger(&self) -> Result<Vec<LedgerEntry>, TrackerError> {
        let names: HashMap<CategoryId, String> = self
            .categories
            .get_all(None)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(self
            .transactions
            .get_all()?
            .into_iter()
            .filter_map(|txn| {
                let name = names.get(&txn.category_id)?.clone();
                Some(LedgerEntry::new(txn, name))
            })
            .collect())
    }
}

impl RecordStore for Storage {
    fn query_transactions(&self, filter: &TransactionFilter) -> Result<Vec<LedgerEntry>, TrackerError> {
        Ok(select(&self.ledger()?, filter))
    }

    fn list_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<Category>, TrackerError> {
        self.categories.get_all(kind)
    }

    fn list_budgets(&self) -> Result<Vec<BudgetLine>, TrackerError> {
        let categories: HashMap<CategoryId, Category> = self
            .categories
            .get_all(None)?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut lines: Vec<BudgetLine> = self
            .budgets
            .get_all()?
            .into_iter()
            .filter_map(|budget| {
                let category = categories.get(&budget.category_id)?;
                Some(BudgetLine {
                    budget_id: budget.id,
                    category_id: budget.category_id,
                    category_name: category.name.clone(),
                    kind: category.kind,
                    monthly_limit: budget.monthly_limit,
                })
            })
            .collect();

        lines.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(lines)
    }
}
