//! Expense display formatting

use crate::config::Settings;
use crate::models::{Expense, Money};

use super::report::{separator, truncate};

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, settings: &Settings) -> String {
    format!(
        "{:<8} {:<10} {:<30} {:<18} {:>14}",
        expense.id.to_string(),
        settings.format_date(expense.date),
        truncate(&expense.description, 30),
        expense.category.name(),
        settings.format_money(expense.amount)
    )
}

/// Format a list of expenses as a register with a total line
pub fn format_expense_register(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<10} {:<30} {:<18} {:>14}\n",
        "ID", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&separator(84));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, settings));
        output.push('\n');
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&separator(84));
    output.push('\n');
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        expenses.len(),
        settings.format_money(total)
    ));

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", settings.format_date(expense.date)));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Amount:      {}\n", settings.format_money(expense.amount)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseId};
    use chrono::NaiveDate;

    fn sample() -> Expense {
        Expense {
            id: ExpenseId::from_sequence(12).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            description: "Pharmacy".into(),
            category: Category::Healthcare,
            amount: Money::from_cents(129950),
        }
    }

    #[test]
    fn test_format_row() {
        let row = format_expense_row(&sample(), &Settings::default());
        assert!(row.starts_with("EXP012   2025-03-09 Pharmacy"));
        assert!(row.ends_with("₹1,299.50"));
    }

    #[test]
    fn test_register_total() {
        let text = format_expense_register(&[sample(), sample()], &Settings::default());
        assert!(text.contains("2 expense(s), total ₹2,599.00"));
        assert_eq!(
            format_expense_register(&[], &Settings::default()),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_details_use_settings() {
        let settings = Settings {
            currency_symbol: "$".into(),
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        };
        let text = format_expense_details(&sample(), &settings);
        assert!(text.contains("Date:        09/03/2025"));
        assert!(text.contains("Category:    Healthcare"));
        assert!(text.contains("Amount:      $1,299.50"));
    }
}
