//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod budget;
pub mod expense;
pub mod export;
pub mod history;
pub mod report;

pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::{handle_history_command, HistoryArgs};
pub use report::{handle_report_command, ReportCommands};
