//! Expense model
//!
//! An expense is one dated, categorized, positive amount. IDs are sequential
//! (`EXP001`, `EXP002`, ...) and assigned by the store, never by callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::money::Money;

const ID_PREFIX: &str = "EXP";

/// Sequential expense identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseId(u32);

impl ExpenseId {
    /// Create an ID from its numeric sequence (must be at least 1)
    pub fn from_sequence(seq: u32) -> Option<Self> {
        if seq == 0 {
            None
        } else {
            Some(Self(seq))
        }
    }

    /// The numeric suffix
    pub fn sequence(&self) -> u32 {
        self.0
    }

    /// Parse "EXP003" (prefix is case-insensitive)
    pub fn parse(s: &str) -> Result<Self, ExpenseIdParseError> {
        let s = s.trim();
        let invalid = || ExpenseIdParseError(s.to_string());

        if s.len() <= ID_PREFIX.len() || !s.is_char_boundary(ID_PREFIX.len()) {
            return Err(invalid());
        }
        let (prefix, digits) = s.split_at(ID_PREFIX.len());
        if !prefix.eq_ignore_ascii_case(ID_PREFIX) || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::from_sequence)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", ID_PREFIX, self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = ExpenseIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ExpenseId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExpenseId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error for a malformed expense ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseIdParseError(pub String);

impl fmt::Display for ExpenseIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid expense ID '{}'. Expected format EXP001", self.0)
    }
}

impl std::error::Error for ExpenseIdParseError {}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub amount: Money,
}

impl Expense {
    /// Build an expense from a validated draft
    pub fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            date: draft.date,
            description: draft.description.trim().to_string(),
            category: draft.category,
            amount: draft.amount,
        }
    }

    /// Check the field invariants (non-empty description, positive amount)
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_description(&self.description)?;
        validate_amount(self.amount)
    }

    /// Apply a set of changes in place; the ID never changes
    pub fn apply(&mut self, changes: &ExpenseChanges) {
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(description) = &changes.description {
            self.description = description.trim().to_string();
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}] {}",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// Input for a new expense, before an ID is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub amount: Money,
}

impl ExpenseDraft {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: Category,
        amount: Money,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category,
            amount,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_description(&self.description)?;
        validate_amount(self.amount)
    }
}

/// Field changes for an edit; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseChanges {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub amount: Option<Money>,
}

impl ExpenseChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
    }

    /// Validate only the fields being changed
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.is_empty() {
            return Err(ExpenseValidationError::NoChanges);
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

fn validate_description(description: &str) -> Result<(), ExpenseValidationError> {
    if description.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyDescription);
    }
    Ok(())
}

fn validate_amount(amount: Money) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    NoChanges,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
            Self::NoChanges => write!(f, "No fields to update"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
