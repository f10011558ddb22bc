//! Transaction filter
//!
//! Turns loosely-typed user input (date strings, a kind string, category ids)
//! into a filter, then selects matching ledger entries newest-first.
//! Invalid optional input never errors: it simply drops that constraint.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{CategoryId, LedgerEntry, TransactionKind};

/// Filter options for transaction queries; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Earliest date, inclusive
    pub start_date: Option<NaiveDate>,
    /// Latest date, inclusive
    pub end_date: Option<NaiveDate>,
    /// Only this kind
    pub kind: Option<TransactionKind>,
    /// Only these categories (empty means all)
    pub category_ids: BTreeSet<CategoryId>,
}

impl TransactionFilter {
    /// A filter matching everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from raw user input
    ///
    /// Dates must be `YYYY-MM-DD` and kinds INCOME/EXPENSE; anything else is
    /// treated as absent.
    pub fn from_raw(
        start: Option<&str>,
        end: Option<&str>,
        kind: Option<&str>,
        category_ids: impl IntoIterator<Item = CategoryId>,
    ) -> Self {
        Self {
            start_date: start.and_then(|s| parse_filter_date("start", s)),
            end_date: end.and_then(|s| parse_filter_date("end", s)),
            kind: kind.and_then(|k| {
                let parsed = TransactionKind::parse_lenient(k);
                if parsed.is_none() {
                    debug!(kind = k, "ignoring unrecognised kind filter");
                }
                parsed
            }),
            category_ids: category_ids.into_iter().collect(),
        }
    }

    /// Restrict to an inclusive date range
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Restrict to one kind
    pub fn of_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict to a set of categories
    pub fn in_categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    /// Check whether no constraint is set
    pub fn is_unconstrained(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.kind.is_none()
            && self.category_ids.is_empty()
    }

    /// Check if an entry matches this filter
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let date = entry.date();

        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if entry.kind() != kind {
                return false;
            }
        }

        if !self.category_ids.is_empty() && !self.category_ids.contains(&entry.category_id()) {
            return false;
        }

        true
    }
}

fn parse_filter_date(which: &str, s: &str) -> Option<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok();
    if parsed.is_none() {
        debug!(bound = which, value = s, "ignoring invalid filter date");
    }
    parsed
}

/// Sort entries newest-first, breaking date ties by descending id
pub fn sort_newest_first(entries: &mut [LedgerEntry]) {
    entries.sort_by(|a, b| b.date().cmp(&a.date()).then(b.id().cmp(&a.id())));
}

/// Select the entries matching `filter`, newest-first
pub fn select(entries: &[LedgerEntry], filter: &TransactionFilter) -> Vec<LedgerEntry> {
    let mut selected: Vec<_> = entries
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();
    sort_newest_first(&mut selected);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction, TransactionId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, on: NaiveDate, cat: i64, kind: TransactionKind) -> LedgerEntry {
        LedgerEntry::new(
            Transaction::new(
                TransactionId::new(id),
                on,
                Money::from_units(10),
                CategoryId::new(cat),
                kind,
            ),
            format!("cat{}", cat),
        )
    }

    fn sample() -> Vec<LedgerEntry> {
        vec![
            entry(1, date(2025, 1, 5), 1, TransactionKind::Income),
            entry(2, date(2025, 1, 10), 2, TransactionKind::Expense),
            entry(3, date(2025, 1, 10), 3, TransactionKind::Expense),
            entry(4, date(2025, 2, 1), 2, TransactionKind::Expense),
        ]
    }

    fn ids(entries: &[LedgerEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.id().value()).collect()
    }

    #[test]
    fn test_unconstrained_returns_everything_newest_first() {
        let result = select(&sample(), &TransactionFilter::all());
        assert_eq!(ids(&result), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = TransactionFilter::all().between(date(2025, 1, 5), date(2025, 1, 10));
        assert_eq!(ids(&select(&sample(), &filter)), vec![3, 2, 1]);
    }

    #[test]
    fn test_kind_and_category_filters() {
        let filter = TransactionFilter::all()
            .of_kind(TransactionKind::Expense)
            .in_categories([CategoryId::new(2)]);
        assert_eq!(ids(&select(&sample(), &filter)), vec![4, 2]);
    }

    #[test]
    fn test_invalid_raw_input_is_unconstrained() {
        let filter = TransactionFilter::from_raw(
            Some("2025-02-30"),
            Some("not a date"),
            Some("BOTH"),
            Vec::new(),
        );
        assert!(filter.is_unconstrained());
        assert_eq!(select(&sample(), &filter).len(), 4);

        let filter = TransactionFilter::from_raw(None, None, Some(""), Vec::new());
        assert!(filter.kind.is_none());
    }

    #[test]
    fn test_valid_raw_input_is_applied() {
        let filter = TransactionFilter::from_raw(
            Some("2025-01-06"),
            None,
            Some("expense"),
            [CategoryId::new(3)],
        );
        assert_eq!(filter.start_date, Some(date(2025, 1, 6)));
        assert_eq!(filter.kind, Some(TransactionKind::Expense));
        assert_eq!(ids(&select(&sample(), &filter)), vec![3]);
    }

    #[test]
    fn test_order_is_stable_under_input_permutation() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(
            ids(&select(&reversed, &TransactionFilter::all())),
            ids(&select(&sample(), &TransactionFilter::all()))
        );
    }
}
