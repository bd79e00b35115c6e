//! Report formatting for terminal output
//!
//! Tables for the individual aggregates shown by `breakdown`, `trend`, `top`
//! and `budget show`, plus small layout helpers.

use crate::config::Settings;
use crate::models::Expense;
use crate::reports::{BudgetStatus, CategoryTotal, MonthlyTotal};

const BAR_WIDTH: usize = 20;

/// Spending by category with percentage bars
pub fn format_breakdown(rows: &[CategoryTotal], settings: &Settings) -> String {
    if rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>14} {:>6} {:>7}  {}\n",
        "Category", "Total", "Count", "%", ""
    ));
    output.push_str(&separator(72));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<20} {:>14} {:>6} {:>6.1}%  {}\n",
            row.category.name(),
            settings.format_money(row.total),
            row.count,
            row.percentage,
            format_bar(row.percentage, 100.0, BAR_WIDTH)
        ));
    }

    output
}

/// Monthly totals, oldest first, with bars scaled to the busiest month
pub fn format_trend(months: &[MonthlyTotal], settings: &Settings) -> String {
    let peak = months
        .iter()
        .map(|m| m.total.as_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    output.push_str(&format!("{:<10} {:>14} {:>6}  {}\n", "Month", "Total", "Count", ""));
    output.push_str(&separator(56));
    output.push('\n');

    for month in months {
        output.push_str(&format!(
            "{:<10} {:>14} {:>6}  {}\n",
            month.month.to_string(),
            settings.format_money(month.total),
            month.count,
            format_bar(month.total.as_f64(), peak, BAR_WIDTH)
        ));
    }

    output
}

/// Ranked list of the largest expenses
pub fn format_top(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    for (rank, expense) in expenses.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {}  {} {:<25} {:<18} {:>12}\n",
            rank + 1,
            expense.id,
            settings.format_date(expense.date),
            truncate(&expense.description, 25),
            expense.category.name(),
            settings.format_money(expense.amount)
        ));
    }
    output
}

pub fn format_budget_status(status: &BudgetStatus, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget for {}\n", status.month));
    output.push_str(&format!("  Budget:    {}\n", settings.format_money(status.budget)));
    output.push_str(&format!("  Spent:     {}\n", settings.format_money(status.spent)));
    output.push_str(&format!("  Remaining: {}\n", settings.format_money(status.remaining)));
    output.push_str(&format!(
        "  Used:      {} {}\n",
        format_percentage(status.percent_used()),
        format_bar(status.percent_used().min(100.0), 100.0, BAR_WIDTH)
    ));

    if let Some(over) = status.overspend() {
        output.push_str(&format!("  OVER BUDGET by {}\n", settings.format_money(over)));
    }

    output
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Shorten to `max_chars` characters, ending in "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
