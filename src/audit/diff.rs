//! Field-level differences between two versions of a record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Expense, Money};

/// One field that changed, with its old and new value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldChange {
    Date { from: NaiveDate, to: NaiveDate },
    Description { from: String, to: String },
    Category { from: Category, to: Category },
    Amount { from: Money, to: Money },
    MonthlyBudget { from: Option<Money>, to: Option<Money> },
}

impl FieldChange {
    /// Name of the changed field as shown to the user
    pub fn field(&self) -> &'static str {
        match self {
            FieldChange::Date { .. } => "date",
            FieldChange::Description { .. } => "description",
            FieldChange::Category { .. } => "category",
            FieldChange::Amount { .. } => "amount",
            FieldChange::MonthlyBudget { .. } => "monthly budget",
        }
    }
}

/// Fields that differ between two versions of an expense, in column order
pub fn expense_changes(before: &Expense, after: &Expense) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if before.date != after.date {
        changes.push(FieldChange::Date {
            from: before.date,
            to: after.date,
        });
    }
    if before.description != after.description {
        changes.push(FieldChange::Description {
            from: before.description.clone(),
            to: after.description.clone(),
        });
    }
    if before.category != after.category {
        changes.push(FieldChange::Category {
            from: before.category,
            to: after.category,
        });
    }
    if before.amount != after.amount {
        changes.push(FieldChange::Amount {
            from: before.amount,
            to: after.amount,
        });
    }

    changes
}

pub fn budget_changes(before: Option<Money>, after: Option<Money>) -> Vec<FieldChange> {
    if before == after {
        Vec::new()
    } else {
        vec![FieldChange::MonthlyBudget {
            from: before,
            to: after,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;

    fn lunch() -> Expense {
        Expense {
            id: ExpenseId::from_sequence(1).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            description: "Lunch".to_string(),
            category: Category::FoodAndDining,
            amount: Money::from_cents(25000),
        }
    }

    #[test]
    fn test_no_changes() {
        assert!(expense_changes(&lunch(), &lunch()).is_empty());
        assert!(budget_changes(None, None).is_empty());
    }

    #[test]
    fn test_changes_follow_column_order() {
        let before = lunch();
        let mut after = lunch();
        after.amount = Money::from_cents(30000);
        after.category = Category::Groceries;
        after.date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();

        let fields: Vec<&str> = expense_changes(&before, &after)
            .iter()
            .map(FieldChange::field)
            .collect();
        assert_eq!(fields, vec!["date", "category", "amount"]);
    }

    #[test]
    fn test_tagged_json() {
        let change = FieldChange::Category {
            from: Category::FoodAndDining,
            to: Category::Groceries,
        };
        let json = serde_json::to_string(&change).unwrap();
        assert_eq!(
            json,
            r#"{"field":"category","from":"Food & Dining","to":"Groceries"}"#
        );
    }

    #[test]
    fn test_budget_cleared() {
        let changes = budget_changes(Some(Money::from_major_minor(20000, 0)), None);
        assert_eq!(
            changes,
            vec![FieldChange::MonthlyBudget {
                from: Some(Money::from_major_minor(20000, 0)),
                to: None,
            }]
        );
    }
}
