//! Budget versus actual for one month

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub month: YearMonth,
    pub budget: Money,
    pub spent: Money,
    /// Budget minus spent; negative once over budget
    pub remaining: Money,
    pub exceeded: bool,
}

impl BudgetStatus {
    /// How far over budget, if at all
    pub fn overspend(&self) -> Option<Money> {
        self.exceeded.then(|| -self.remaining)
    }

    /// Share of the budget used, 0-100 and beyond
    pub fn percent_used(&self) -> f64 {
        self.spent.percent_of(self.budget)
    }
}

/// Compare spending in `month` against `budget`
///
/// A budget of zero or less means tracking is off; asking for a status
/// anyway is a validation error.
pub fn budget_status(
    records: &[Expense],
    budget: Money,
    month: YearMonth,
) -> LedgerResult<BudgetStatus> {
    if !budget.is_positive() {
        return Err(LedgerError::Validation(format!(
            "Budget must be positive, got {}",
            budget
        )));
    }

    let spent: Money = records
        .iter()
        .filter(|e| month.contains(e.date))
        .map(|e| e.amount)
        .sum();

    Ok(BudgetStatus {
        month,
        budget,
        spent,
        remaining: budget - spent,
        exceeded: spent > budget,
    })
}
