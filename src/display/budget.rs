//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::BudgetLine;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Monthly limit")]
    limit: String,
}

/// Format budget lines as a table, in listing order
pub fn format_budget_table(lines: &[BudgetLine], symbol: &str) -> String {
    if lines.is_empty() {
        return "No budgets set.".to_string();
    }

    let rows = lines.iter().map(|line| BudgetRow {
        category: line.category_name.clone(),
        kind: line.kind.label(),
        limit: line.monthly_limit.format_with_symbol(symbol),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}
