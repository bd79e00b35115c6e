//! History entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Expense, ExpenseId, ExpenseIdParseError, Money};

use super::diff::{budget_changes, expense_changes, FieldChange};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Added,
    Edited,
    Deleted,
    BudgetChanged,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Added => write!(f, "added"),
            Action::Edited => write!(f, "edited"),
            Action::Deleted => write!(f, "deleted"),
            Action::BudgetChanged => write!(f, "budget"),
        }
    }
}

/// What a history entry is about: one expense, or the monthly budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Expense(ExpenseId),
    Budget,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Expense(id) => write!(f, "{}", id),
            Subject::Budget => write!(f, "budget"),
        }
    }
}

impl FromStr for Subject {
    type Err = ExpenseIdParseError;

    /// "budget" (any case) or an expense ID such as "EXP003"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("budget") {
            Ok(Subject::Budget)
        } else {
            ExpenseId::parse(s).map(Subject::Expense)
        }
    }
}

impl Serialize for Subject {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One recorded change to the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was made (UTC)
    pub at: DateTime<Utc>,

    pub action: Action,

    pub subject: Subject,

    /// The expense as added, as it stood after an edit, or as deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<Expense>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
}

impl AuditEntry {
    pub fn added(expense: &Expense) -> Self {
        Self::for_expense(Action::Added, expense, Vec::new())
    }

    /// An edit; only the fields that actually changed are kept
    pub fn edited(before: &Expense, after: &Expense) -> Self {
        Self::for_expense(Action::Edited, after, expense_changes(before, after))
    }

    pub fn deleted(expense: &Expense) -> Self {
        Self::for_expense(Action::Deleted, expense, Vec::new())
    }

    /// The monthly budget moved from `before` to `after` (`None` = not set)
    pub fn budget_changed(before: Option<Money>, after: Option<Money>) -> Self {
        Self {
            at: Utc::now(),
            action: Action::BudgetChanged,
            subject: Subject::Budget,
            expense: None,
            changes: budget_changes(before, after),
        }
    }

    fn for_expense(action: Action, expense: &Expense, changes: Vec<FieldChange>) -> Self {
        Self {
            at: Utc::now(),
            action,
            subject: Subject::Expense(expense.id),
            expense: Some(expense.clone()),
            changes,
        }
    }
}
