//! Direction tag shared by categories and transactions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether money flows in (income) or out (expense)
///
/// Amounts are always positive; the direction lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Both kinds, income first
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    /// Stored/exported label ("INCOME" / "EXPENSE")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Lenient parse used by filters: anything unrecognised is `None`
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(KindParseError(s.to_string())),
        }
    }
}

/// Error returned when a string is neither INCOME nor EXPENSE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindParseError(pub String);

impl fmt::Display for KindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown kind '{}' (expected INCOME or EXPENSE)", self.0)
    }
}

impl std::error::Error for KindParseError {}
