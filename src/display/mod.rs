//! Display formatting for terminal output

pub mod expense;
pub mod history;
pub mod report;

pub use expense::{format_expense_details, format_expense_register, format_expense_row};
pub use history::{format_change, format_history};
pub use report::{format_breakdown, format_budget_status, format_top, format_trend};
