//! Largest expenses

use crate::models::Expense;

/// The `n` largest expenses, largest first
///
/// Equal amounts keep insertion order. Asking for more than exist returns all.
pub fn top_n(records: &[Expense], n: usize) -> Vec<Expense> {
    let mut sorted: Vec<&Expense> = records.iter().collect();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.into_iter().take(n).cloned().collect()
}
