//! Monthly spending trend windows

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, YearMonth};

/// Window used by the summary report and charts
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Longest window a trend may cover (100 years)
pub const MAX_TREND_MONTHS: usize = 1200;

/// Spending in one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Money,
    pub count: usize,
}

/// Totals for the last `window` months, ending at the month of the most
/// recent expense (or the current month when there are none)
pub fn monthly_trend(records: &[Expense], window: usize) -> LedgerResult<Vec<MonthlyTotal>> {
    let end = records
        .iter()
        .map(|e| e.date)
        .max()
        .map(YearMonth::of)
        .unwrap_or_else(YearMonth::current);

    monthly_trend_ending(records, window, end)
}

/// Totals for the `window` months ending at `end`, oldest first
///
/// Every month in the window appears, with a zero total if nothing was spent.
pub fn monthly_trend_ending(
    records: &[Expense],
    window: usize,
    end: YearMonth,
) -> LedgerResult<Vec<MonthlyTotal>> {
    if window == 0 {
        return Err(LedgerError::Validation(
            "Trend window must be at least one month".into(),
        ));
    }
    if window > MAX_TREND_MONTHS {
        return Err(LedgerError::Validation(format!(
            "Trend window is limited to {} months, got {}",
            MAX_TREND_MONTHS, window
        )));
    }

    let start = end.back(window - 1).ok_or_else(|| {
        LedgerError::Validation(format!(
            "A {}-month trend ending {} starts before the calendar does",
            window, end
        ))
    })?;
    let mut months: Vec<MonthlyTotal> = std::iter::successors(Some(start), |m| Some(m.next()))
        .take(window)
        .map(|month| MonthlyTotal {
            month,
            total: Money::zero(),
            count: 0,
        })
        .collect();

    for expense in records {
        let month = YearMonth::of(expense.date);
        if let Some(bucket) = months.iter_mut().find(|m| m.month == month) {
            bucket.total += expense.amount;
            bucket.count += 1;
        }
    }

    Ok(months)
}
