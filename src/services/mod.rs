//! Service layer for the expense ledger
//!
//! Business operations on top of the storage layer: validation, audit
//! logging and budget handling.

pub mod budget;
pub mod expense;
pub mod filter;

pub use budget::{budget_alert, current_status, BudgetService};
pub use expense::ExpenseService;
pub use filter::{by_category, by_date_range, by_description_keyword, ExpenseFilter};
