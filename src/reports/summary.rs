//! Summary report
//!
//! Overall statistics, the current month's budget, spending by category,
//! the last six months and the five largest expenses, in one place.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::Settings;
use crate::display::report::truncate;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, YearMonth};
use crate::storage::write_atomic;

use super::breakdown::{category_breakdown, CategoryTotal};
use super::budget::{budget_status, BudgetStatus};
use super::stats::{overall_stats, OverallStats};
use super::top::top_n;
use super::trend::{monthly_trend, MonthlyTotal, DEFAULT_TREND_MONTHS};

/// Number of largest expenses listed in the summary
pub const SUMMARY_TOP_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub stats: OverallStats,
    /// Present only when a budget is set
    pub budget: Option<BudgetStatus>,
    pub categories: Vec<CategoryTotal>,
    pub trend: Vec<MonthlyTotal>,
    pub top: Vec<Expense>,
}

impl SummaryReport {
    /// Build the summary; `budget` is checked against `budget_month`
    pub fn generate(
        records: &[Expense],
        budget: Option<Money>,
        budget_month: YearMonth,
    ) -> LedgerResult<Self> {
        let budget = match budget.filter(|b| b.is_positive()) {
            Some(amount) => Some(budget_status(records, amount, budget_month)?),
            None => None,
        };

        Ok(Self {
            stats: overall_stats(records),
            budget,
            categories: category_breakdown(records),
            trend: monthly_trend(records, DEFAULT_TREND_MONTHS)?,
            top: top_n(records, SUMMARY_TOP_COUNT),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |amount: Money| settings.format_money(amount);
        let mut output = String::new();

        output.push_str("EXPENSE SUMMARY\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');

        output.push_str("\nOverall Statistics:\n");
        output.push_str(&format!("  Total Spent:        {}\n", money(self.stats.total)));
        output.push_str(&format!("  Average Expense:    {}\n", money(self.stats.average)));
        output.push_str(&format!("  Largest Expense:    {}\n", money(self.stats.max)));
        output.push_str(&format!("  Number of Expenses: {}\n", self.stats.count));

        if let Some(status) = &self.budget {
            output.push_str(&format!("\nBudget for {}:\n", status.month));
            output.push_str(&format!("  Budget:    {}\n", money(status.budget)));
            output.push_str(&format!("  Spent:     {}\n", money(status.spent)));
            output.push_str(&format!("  Remaining: {}\n", money(status.remaining)));
            if let Some(over) = status.overspend() {
                output.push_str(&format!("  OVER BUDGET by {}\n", money(over)));
            }
        }

        if !self.categories.is_empty() {
            output.push_str("\nSpending by Category:\n");
            output.push_str(&"-".repeat(70));
            output.push('\n');
            for row in &self.categories {
                output.push_str(&format!(
                    "  {:<20} {:>14}  ({} items)  [{:>5.1}%]\n",
                    row.category.name(),
                    money(row.total),
                    row.count,
                    row.percentage
                ));
            }
        }

        output.push_str(&format!(
            "\nMonthly Spending (Last {} Months):\n",
            self.trend.len()
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');
        for month in &self.trend {
            output.push_str(&format!("  {:<15} {:>14}\n", month.month, money(month.total)));
        }

        if !self.top.is_empty() {
            output.push_str(&format!("\nTop {} Largest Expenses:\n", self.top.len()));
            output.push_str(&"-".repeat(70));
            output.push('\n');
            for expense in &self.top {
                output.push_str(&format!(
                    "  {}  {:<25} {:<20} {:>12}\n",
                    settings.format_date(expense.date),
                    truncate(&expense.description, 25),
                    expense.category.name(),
                    money(expense.amount)
                ));
            }
        }

        output
    }

    /// Export the category breakdown to CSV
    pub fn export_csv<W: Write + ?Sized>(&self, writer: &mut W) -> LedgerResult<()> {
        writeln!(writer, "Category,Total_Spent,Count,Percentage")
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        for row in &self.categories {
            writeln!(
                writer,
                "{},{},{},{:.2}",
                row.category.name(),
                row.total,
                row.count,
                row.percentage
            )
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        }

        Ok(())
    }

    /// Write the category breakdown CSV atomically to `path`
    pub fn save_csv(&self, path: &Path) -> LedgerResult<()> {
        write_atomic(path, |writer| self.export_csv(writer))
    }
}
