//! Reports for the expense ledger
//!
//! Pure aggregation over a slice of expenses: overall statistics, category
//! breakdowns, monthly trends, the largest expenses, budget status, the
//! combined summary report and chart series. Nothing here touches the store
//! except `SummaryReport::save_csv`.

pub mod breakdown;
pub mod budget;
pub mod chart;
pub mod stats;
pub mod summary;
pub mod top;
pub mod trend;

pub use breakdown::{category_breakdown, CategoryTotal};
pub use budget::{budget_status, BudgetStatus};
pub use chart::{dashboard_series, ChartKind, ChartPoint, ChartSeries};
pub use stats::{overall_stats, OverallStats};
pub use summary::{SummaryReport, SUMMARY_TOP_COUNT};
pub use top::top_n;
pub use trend::{
    monthly_trend, monthly_trend_ending, MonthlyTotal, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS,
};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::models::{Category, Expense, ExpenseId, Money};

    pub fn expense(seq: u32, date: &str, category: Category, cents: i64) -> Expense {
        Expense {
            id: ExpenseId::from_sequence(seq).unwrap(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: format!("Expense {}", seq),
            category,
            amount: Money::from_cents(cents),
        }
    }
}
