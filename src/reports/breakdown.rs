//! Spending grouped by category

use serde::Serialize;

use crate::models::{Category, Expense, Money};

/// One category's share of spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    pub count: usize,
    /// Share of the grand total of the input, 0-100
    pub percentage: f64,
}

/// Group by category, largest total first
///
/// Percentages are against the total of `records`, not the whole ledger.
/// Categories without expenses are omitted. Equal totals keep the order in
/// which the categories first appear in `records`.
pub fn category_breakdown(records: &[Expense]) -> Vec<CategoryTotal> {
    let mut groups: Vec<(Category, Money, usize)> = Vec::new();

    for expense in records {
        match groups.iter_mut().find(|(c, _, _)| *c == expense.category) {
            Some((_, total, count)) => {
                *total += expense.amount;
                *count += 1;
            }
            None => groups.push((expense.category, expense.amount, 1)),
        }
    }

    let grand_total: Money = groups.iter().map(|(_, total, _)| *total).sum();

    let mut rows: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, total, count)| CategoryTotal {
            category,
            total,
            count,
            percentage: total.percent_of(grand_total),
        })
        .collect();

    // Stable sort keeps first-appearance order among ties
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}
