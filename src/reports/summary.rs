//! Aggregation summary
//!
//! Headline totals, per-category breakdowns and monthly grouping for a
//! snapshot of ledger entries.

use std::collections::{BTreeMap, HashMap};

use crate::models::{LedgerEntry, Money, Month, TransactionKind};

/// Total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Sum of amounts
    pub total: Money,
    /// Number of transactions
    pub transaction_count: usize,
}

/// One row of the monthly trend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTrendRow {
    pub month: Month,
    pub income: Money,
    pub expense: Money,
}

impl MonthlyTrendRow {
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Aggregated view of a set of transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Sum of income amounts
    pub total_income: Money,
    /// Sum of expense amounts
    pub total_expense: Money,
    /// Income minus expense
    pub net: Money,
    /// Expense by category name, largest first (ties by name)
    pub by_category_expense: Vec<CategoryTotal>,
    /// Income by category name, largest first (ties by name)
    pub by_category_income: Vec<CategoryTotal>,
    /// Sums per (month, kind); months without transactions are absent
    pub by_month: BTreeMap<(Month, TransactionKind), Money>,
    /// Number of transactions summarized
    pub transaction_count: usize,
}

impl AggregationSummary {
    /// Summarize a set of entries. Empty input gives an all-zero summary.
    pub fn summarize(entries: &[LedgerEntry]) -> Self {
        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();
        let mut by_month: BTreeMap<(Month, TransactionKind), Money> = BTreeMap::new();

        for entry in entries {
            match entry.kind() {
                TransactionKind::Income => total_income += entry.amount(),
                TransactionKind::Expense => total_expense += entry.amount(),
            }

            *by_month
                .entry((Month::containing(entry.date()), entry.kind()))
                .or_default() += entry.amount();
        }

        Self {
            total_income,
            total_expense,
            net: total_income - total_expense,
            by_category_expense: group_by_category(entries, TransactionKind::Expense),
            by_category_income: group_by_category(entries, TransactionKind::Income),
            by_month,
            transaction_count: entries.len(),
        }
    }

    /// Merge two summaries of disjoint transaction sets
    pub fn combine(&self, other: &Self) -> Self {
        let mut by_month = self.by_month.clone();
        for (key, amount) in &other.by_month {
            *by_month.entry(*key).or_default() += *amount;
        }

        let total_income = self.total_income + other.total_income;
        let total_expense = self.total_expense + other.total_expense;

        Self {
            total_income,
            total_expense,
            net: total_income - total_expense,
            by_category_expense: merge_totals(&self.by_category_expense, &other.by_category_expense),
            by_category_income: merge_totals(&self.by_category_income, &other.by_category_income),
            by_month,
            transaction_count: self.transaction_count + other.transaction_count,
        }
    }

    /// The `n` largest expense categories; shorter if fewer exist
    pub fn top_expenses(&self, n: usize) -> &[CategoryTotal] {
        &self.by_category_expense[..n.min(self.by_category_expense.len())]
    }

    /// A category's share of total expense, in percent
    pub fn expense_share(&self, total: &CategoryTotal) -> f64 {
        if self.total_expense.is_zero() {
            0.0
        } else {
            total.total.cents() as f64 / self.total_expense.cents() as f64 * 100.0
        }
    }

    /// Income and expense per month, oldest first (sparse)
    pub fn monthly_trend(&self) -> Vec<MonthlyTrendRow> {
        let mut rows: BTreeMap<Month, MonthlyTrendRow> = BTreeMap::new();
        for ((month, kind), amount) in &self.by_month {
            let row = rows.entry(*month).or_insert_with(|| MonthlyTrendRow {
                month: *month,
                income: Money::zero(),
                expense: Money::zero(),
            });
            match kind {
                TransactionKind::Income => row.income += *amount,
                TransactionKind::Expense => row.expense += *amount,
            }
        }
        rows.into_values().collect()
    }

    /// Check whether anything was summarized
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Summary\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:  {:>14}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total Expense: {:>14}\n",
            self.total_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Net:           {:>14}\n",
            self.net.format_with_symbol(symbol)
        ));
        output.push_str(&format!("Transactions:  {:>14}\n", self.transaction_count));

        if !self.by_category_expense.is_empty() {
            output.push('\n');
            output.push_str(&format!(
                "{:<30} {:>14} {:>7} {:>7}\n",
                "Expense Category", "Amount", "Count", "%"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for total in &self.by_category_expense {
                output.push_str(&format!(
                    "{:<30} {:>14} {:>7} {:>6.1}%\n",
                    total.category,
                    total.total.format_with_symbol(symbol),
                    total.transaction_count,
                    self.expense_share(total)
                ));
            }
        }

        output
    }
}

/// Group entries of one kind by category name, largest total first
fn group_by_category(entries: &[LedgerEntry], kind: TransactionKind) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();

    for entry in entries.iter().filter(|e| e.kind() == kind) {
        let slot = totals
            .entry(entry.category_name.as_str())
            .or_insert((Money::zero(), 0));
        slot.0 += entry.amount();
        slot.1 += 1;
    }

    let mut grouped: Vec<_> = totals
        .into_iter()
        .map(|(category, (total, transaction_count))| CategoryTotal {
            category: category.to_string(),
            total,
            transaction_count,
        })
        .collect();
    sort_totals(&mut grouped);
    grouped
}

fn merge_totals(a: &[CategoryTotal], b: &[CategoryTotal]) -> Vec<CategoryTotal> {
    let mut merged: HashMap<String, CategoryTotal> = HashMap::new();
    for total in a.iter().chain(b) {
        merged
            .entry(total.category.clone())
            .and_modify(|t| {
                t.total += total.total;
                t.transaction_count += total.transaction_count;
            })
            .or_insert_with(|| total.clone());
    }

    let mut merged: Vec<_> = merged.into_values().collect();
    sort_totals(&mut merged);
    merged
}

fn sort_totals(totals: &mut [CategoryTotal]) {
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
}
