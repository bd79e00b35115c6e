//! Overall statistics across a set of expenses

use serde::Serialize;

use crate::models::{Expense, Money};

/// Total, average, largest amount and count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OverallStats {
    pub total: Money,
    /// Rounded half away from zero to the minor unit; zero for no expenses
    pub average: Money,
    pub max: Money,
    pub count: usize,
}

impl OverallStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Compute overall statistics; an empty slice yields all zeros
pub fn overall_stats(records: &[Expense]) -> OverallStats {
    let total: Money = records.iter().map(|e| e.amount).sum();
    let max = records
        .iter()
        .map(|e| e.amount)
        .max()
        .unwrap_or_default();

    OverallStats {
        total,
        average: total.div_round(records.len()),
        max,
        count: records.len(),
    }
}
