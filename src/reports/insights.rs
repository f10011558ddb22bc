//! Budget insights
//!
//! Savings rate, top expense categories and the over-budget report. The
//! over-budget check always looks at the calendar month containing the
//! evaluation date, whatever window produced the entries, so callers must
//! pass a snapshot that covers that month.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::models::{BudgetLine, CategoryId, LedgerEntry, Money, Month, TransactionKind};

use super::summary::{AggregationSummary, CategoryTotal};

/// Default number of top expense categories
pub const DEFAULT_TOP_EXPENSES: usize = 3;

/// A budgeted category whose spending this month exceeds its limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverBudget {
    pub category_id: CategoryId,
    pub category: String,
    pub monthly_limit: Money,
    pub actual: Money,
}

impl OverBudget {
    /// How far spending exceeds the limit (never negative)
    pub fn overage(&self) -> Money {
        (self.actual - self.monthly_limit).abs()
    }

    /// Human-readable message, overage rounded to whole units
    pub fn message(&self) -> String {
        format!(
            "Over budget in {} by {}",
            self.category,
            self.overage().format_rounded()
        )
    }
}

impl fmt::Display for OverBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Insights derived from a snapshot and the configured budgets
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    /// Month the over-budget check covered
    pub month: Month,
    /// net / income * 100; `None` when there is no income
    pub savings_rate: Option<f64>,
    /// Largest expense categories
    pub top_expenses: Vec<CategoryTotal>,
    /// Over-budget categories, in budget listing order
    pub over_budget: Vec<OverBudget>,
}

impl Insights {
    /// Evaluate a snapshot against budgets as of `evaluation_date`
    pub fn evaluate(
        entries: &[LedgerEntry],
        budgets: &[BudgetLine],
        evaluation_date: NaiveDate,
        top_n: usize,
    ) -> Self {
        let summary = AggregationSummary::summarize(entries);
        let month = Month::containing(evaluation_date);

        Self {
            month,
            savings_rate: savings_rate(&summary),
            top_expenses: summary.top_expenses(top_n).to_vec(),
            over_budget: over_budget(entries, budgets, month),
        }
    }

    /// Over-budget messages
    pub fn over_budget_messages(&self) -> Vec<String> {
        self.over_budget.iter().map(OverBudget::message).collect()
    }

    /// Format the insights for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Insights ({})\n", self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        match self.savings_rate {
            Some(rate) => output.push_str(&format!("Savings rate: {:.1}%\n", rate)),
            None => output.push_str("Savings rate: n/a (no income)\n"),
        }

        output.push_str("\nTop expenses:\n");
        if self.top_expenses.is_empty() {
            output.push_str("  (none)\n");
        }
        for (rank, total) in self.top_expenses.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {:<28} {:>14}\n",
                rank + 1,
                total.category,
                total.total.format_with_symbol(symbol)
            ));
        }

        output.push_str("\nBudgets:\n");
        if self.over_budget.is_empty() {
            output.push_str("  All budgets on track\n");
        }
        for item in &self.over_budget {
            output.push_str(&format!("  {}\n", item.message()));
        }

        output
    }
}

/// Savings rate in percent, unavailable without income
pub fn savings_rate(summary: &AggregationSummary) -> Option<f64> {
    if summary.total_income.is_positive() {
        Some(summary.net.cents() as f64 / summary.total_income.cents() as f64 * 100.0)
    } else {
        None
    }
}

/// Expense budgets whose spend within `month` strictly exceeds the limit
pub fn over_budget(entries: &[LedgerEntry], budgets: &[BudgetLine], month: Month) -> Vec<OverBudget> {
    let mut actual: HashMap<CategoryId, Money> = HashMap::new();
    for entry in entries
        .iter()
        .filter(|e| e.kind() == TransactionKind::Expense && month.contains(e.date()))
    {
        *actual.entry(entry.category_id()).or_default() += entry.amount();
    }

    budgets
        .iter()
        .filter(|b| b.kind == TransactionKind::Expense)
        .filter_map(|b| {
            let spent = actual.get(&b.category_id).copied().unwrap_or_default();
            (spent > b.monthly_limit).then(|| OverBudget {
                category_id: b.category_id,
                category: b.category_name.clone(),
                monthly_limit: b.monthly_limit,
                actual: spent,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, Transaction, TransactionId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, on: NaiveDate, cat: (i64, &str), units: i64, kind: TransactionKind) -> LedgerEntry {
        LedgerEntry::new(
            Transaction::new(
                TransactionId::new(id),
                on,
                Money::from_units(units),
                CategoryId::new(cat.0),
                kind,
            ),
            cat.1,
        )
    }

    fn budget(cat: (i64, &str), units: i64) -> BudgetLine {
        BudgetLine {
            budget_id: BudgetId::new(cat.0),
            category_id: CategoryId::new(cat.0),
            category_name: cat.1.to_string(),
            kind: TransactionKind::Expense,
            monthly_limit: Money::from_units(units),
        }
    }

    const RENT: (i64, &str) = (3, "Rent");
    const DINING: (i64, &str) = (5, "Dining");
    const SALARY: (i64, &str) = (1, "Salary");

    #[test]
    fn test_rent_over_budget_by_100() {
        let today = date(2025, 6, 18);
        let entries = vec![
            entry(1, date(2025, 6, 1), RENT, 450, TransactionKind::Expense),
            entry(2, date(2025, 6, 15), RENT, 150, TransactionKind::Expense),
        ];
        let insights = Insights::evaluate(&entries, &[budget(RENT, 500)], today, 3);

        assert_eq!(insights.over_budget.len(), 1);
        assert_eq!(insights.over_budget[0].overage(), Money::from_units(100));
        assert_eq!(insights.over_budget_messages(), vec!["Over budget in Rent by 100"]);
    }

    #[test]
    fn test_spend_at_limit_is_not_flagged() {
        let today = date(2025, 6, 18);
        let entries = vec![entry(1, date(2025, 6, 1), RENT, 500, TransactionKind::Expense)];
        let insights = Insights::evaluate(&entries, &[budget(RENT, 500)], today, 3);
        assert!(insights.over_budget.is_empty());
    }

    #[test]
    fn test_only_evaluation_month_counts() {
        let today = date(2025, 6, 18);
        let entries = vec![
            entry(1, date(2025, 5, 31), RENT, 900, TransactionKind::Expense),
            entry(2, date(2025, 7, 1), RENT, 900, TransactionKind::Expense),
            entry(3, date(2025, 6, 30), RENT, 100, TransactionKind::Expense),
        ];
        let insights = Insights::evaluate(&entries, &[budget(RENT, 500)], today, 3);
        assert!(insights.over_budget.is_empty());
        assert_eq!(insights.month, Month::new(2025, 6));
    }

    #[test]
    fn test_zero_spend_with_zero_limit_is_not_flagged() {
        let insights = Insights::evaluate(&[], &[budget(RENT, 0)], date(2025, 6, 1), 3);
        assert!(insights.over_budget.is_empty());
        assert_eq!(insights.savings_rate, None);
    }

    #[test]
    fn test_over_budget_follows_budget_order() {
        let today = date(2025, 6, 18);
        let entries = vec![
            entry(1, date(2025, 6, 2), RENT, 2000, TransactionKind::Expense),
            entry(2, date(2025, 6, 3), DINING, 101, TransactionKind::Expense),
        ];
        let budgets = vec![budget(DINING, 100), budget(RENT, 1000)];
        let insights = Insights::evaluate(&entries, &budgets, today, 3);

        let names: Vec<_> = insights.over_budget.iter().map(|o| o.category.as_str()).collect();
        assert_eq!(names, vec!["Dining", "Rent"]);
    }

    #[test]
    fn test_income_budgets_are_ignored() {
        let today = date(2025, 6, 18);
        let entries = vec![entry(1, date(2025, 6, 2), SALARY, 5000, TransactionKind::Income)];
        let mut income_budget = budget(SALARY, 10);
        income_budget.kind = TransactionKind::Income;
        let insights = Insights::evaluate(&entries, &[income_budget], today, 3);
        assert!(insights.over_budget.is_empty());
    }

    #[test]
    fn test_savings_rate() {
        let today = date(2025, 6, 18);
        let entries = vec![
            entry(1, date(2025, 6, 1), SALARY, 4000, TransactionKind::Income),
            entry(2, date(2025, 6, 2), RENT, 1000, TransactionKind::Expense),
        ];
        let insights = Insights::evaluate(&entries, &[], today, 3);
        let rate = insights.savings_rate.unwrap();
        assert!((rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_savings_rate_unavailable_without_income() {
        let entries = vec![entry(1, date(2025, 6, 2), RENT, 1000, TransactionKind::Expense)];
        let insights = Insights::evaluate(&entries, &[], date(2025, 6, 18), 3);
        assert_eq!(insights.savings_rate, None);
        assert!(insights.format_terminal("$").contains("n/a"));
    }

    #[test]
    fn test_top_expenses_limited() {
        let today = date(2025, 6, 18);
        let entries = vec![
            entry(1, today, (1, "Dining"), 120, TransactionKind::Expense),
            entry(2, today, (2, "Transport"), 80, TransactionKind::Expense),
            entry(3, today, (3, "Groceries"), 200, TransactionKind::Expense),
        ];
        let insights = Insights::evaluate(&entries, &[], today, 2);
        let top: Vec<_> = insights
            .top_expenses
            .iter()
            .map(|t| (t.category.as_str(), t.total.units()))
            .collect();
        assert_eq!(top, vec![("Groceries", 200), ("Dining", 120)]);
    }

    #[test]
    fn test_overage_message_rounds() {
        let item = OverBudget {
            category_id: CategoryId::new(1),
            category: "Travel".into(),
            monthly_limit: Money::from_units(1000),
            actual: Money::from_cents(223_460),
        };
        assert_eq!(item.message(), "Over budget in Travel by 1,235");
    }
}
