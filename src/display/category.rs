//! Category display formatting

use crate::models::Category;

/// Format categories as an aligned list
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {}\n",
        "ID",
        "Name",
        "Kind",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<7}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for category in categories {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {}\n",
            category.id.value(),
            category.name,
            category.kind.label(),
            name_width = name_width,
        ));
    }

    output
}
