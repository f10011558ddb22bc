//! Advice prompt builder
//!
//! Renders recent income and spending as plain text for the advice
//! generator. Building a prompt never fails.

use chrono::NaiveDate;

use crate::models::{LedgerEntry, Month};
use crate::reports::{AggregationSummary, CategoryTotal};

/// Prompt used when there are no transactions at all
pub const NO_DATA_PROMPT: &str = "User has no data.";

/// First day of the window covering the last `months_window` months
///
/// The current month is always included on top of the window.
pub fn window_start(months_window: u32, evaluation_date: NaiveDate) -> NaiveDate {
    Month::containing(evaluation_date)
        .months_back(months_window)
        .start_date()
}

/// Entries on or after the window start, or all entries if none qualify
pub fn recent_entries(entries: &[LedgerEntry], months_window: u32, evaluation_date: NaiveDate) -> Vec<LedgerEntry> {
    let cutoff = window_start(months_window, evaluation_date);
    let recent: Vec<_> = entries.iter().filter(|e| e.date() >= cutoff).cloned().collect();
    if recent.is_empty() {
        entries.to_vec()
    } else {
        recent
    }
}

/// Build the coaching prompt
pub fn build_prompt(entries: &[LedgerEntry], months_window: u32, evaluation_date: NaiveDate) -> String {
    if entries.is_empty() {
        return NO_DATA_PROMPT.to_string();
    }

    let summary = AggregationSummary::summarize(&recent_entries(entries, months_window, evaluation_date));

    let mut prompt = String::new();
    prompt.push_str(
        "You are a budgeting coach. Based on the user's recent income and expenses, \
         give concise, practical budgeting recommendations.\n\n",
    );
    prompt.push_str(&format!(
        "Timeframe: last ~{} months (or available recent data)\n",
        months_window
    ));
    prompt.push_str("Currency: Treat amounts as generic units; do not assume a country\n");
    prompt.push_str(
        "Style: bullet points, specific, actionable, keep it short and helpful. \
         Avoid generic filler.\n\n",
    );

    prompt.push_str("Summary:\n");
    prompt.push_str(&format!("- Total income: {}\n", summary.total_income.to_decimal_string()));
    prompt.push_str(&format!("- Total expense: {}\n", summary.total_expense.to_decimal_string()));
    prompt.push_str(&format!("- Net: {}\n\n", summary.net.to_decimal_string()));

    prompt.push_str("Income by category:\n");
    push_breakdown(&mut prompt, &summary.by_category_income);
    prompt.push_str("\nExpenses by category:\n");
    push_breakdown(&mut prompt, &summary.by_category_expense);

    prompt.push_str("\nConstraints:\n");
    prompt.push_str("- Focus on category-level opportunities (e.g., \"trim dining by 15%\")\n");
    prompt.push_str("- Suggest 2-4 steps to improve savings next month\n");
    prompt.push_str("- If data is sparse, give starter advice (50/30/20 rule, emergency fund, etc.)");

    prompt
}

fn push_breakdown(prompt: &mut String, totals: &[CategoryTotal]) {
    if totals.is_empty() {
        prompt.push_str("- (none)\n");
        return;
    }
    for total in totals {
        prompt.push_str(&format!("- {}: {}\n", total.category, total.total.to_decimal_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, Transaction, TransactionId, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, on: NaiveDate, category: &str, cents: i64, kind: TransactionKind) -> LedgerEntry {
        LedgerEntry::new(
            Transaction::new(
                TransactionId::new(id),
                on,
                Money::from_cents(cents),
                CategoryId::new(id),
                kind,
            ),
            category,
        )
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build_prompt(&[], 3, date(2025, 6, 1)), "User has no data.");
    }

    #[test]
    fn test_window_start() {
        assert_eq!(window_start(3, date(2025, 6, 18)), date(2025, 3, 1));
        assert_eq!(window_start(2, date(2025, 1, 31)), date(2024, 11, 1));
        assert_eq!(window_start(0, date(2025, 6, 18)), date(2025, 6, 1));
    }

    #[test]
    fn test_prompt_contents() {
        let entries = vec![
            entry(1, date(2025, 6, 1), "Salary", 300_000, TransactionKind::Income),
            entry(2, date(2025, 6, 2), "Rent", 120_000, TransactionKind::Expense),
            entry(3, date(2025, 6, 3), "Dining", 15_050, TransactionKind::Expense),
        ];
        let prompt = build_prompt(&entries, 3, date(2025, 6, 18));

        assert!(prompt.starts_with("You are a budgeting coach."));
        assert!(prompt.contains("Timeframe: last ~3 months"));
        assert!(prompt.contains("- Total income: 3000.00"));
        assert!(prompt.contains("- Total expense: 1350.50"));
        assert!(prompt.contains("- Net: 1649.50"));
        assert!(prompt.contains("Income by category:\n- Salary: 3000.00\n"));
        assert!(prompt.contains("Expenses by category:\n- Rent: 1200.00\n- Dining: 150.50\n"));
    }

    #[test]
    fn test_missing_side_renders_none() {
        let entries = vec![entry(1, date(2025, 6, 2), "Rent", 100, TransactionKind::Expense)];
        let prompt = build_prompt(&entries, 3, date(2025, 6, 18));
        assert!(prompt.contains("Income by category:\n- (none)\n"));
    }

    #[test]
    fn test_old_entries_outside_window_are_dropped() {
        let entries = vec![
            entry(1, date(2024, 1, 2), "Rent", 99_900, TransactionKind::Expense),
            entry(2, date(2025, 5, 2), "Dining", 1_000, TransactionKind::Expense),
        ];
        let prompt = build_prompt(&entries, 3, date(2025, 6, 18));
        assert!(!prompt.contains("Rent"));
        assert!(prompt.contains("- Dining: 10.00"));
    }

    #[test]
    fn test_falls_back_to_full_set_when_window_is_empty() {
        let entries = vec![entry(1, date(2023, 1, 2), "Rent", 50_000, TransactionKind::Expense)];
        let prompt = build_prompt(&entries, 3, date(2025, 6, 18));
        assert!(prompt.contains("- Rent: 500.00"));
        assert!(prompt.contains("- Net: -500.00"));
    }
}
