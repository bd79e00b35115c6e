//! Core data models for the expense ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: expenses, their categories, money amounts and calendar months.

pub mod category;
pub mod expense;
pub mod money;
pub mod month;

pub use category::{Category, UnknownCategory};
pub use expense::{
    Expense, ExpenseChanges, ExpenseDraft, ExpenseId, ExpenseIdParseError,
    ExpenseValidationError,
};
pub use money::{Money, MoneyParseError};
pub use month::{MonthParseError, YearMonth};
