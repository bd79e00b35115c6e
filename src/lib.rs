//! Expense Ledger - a local, single-user expense tracker
//!
//! Expenses are kept in a CSV table that is rewritten atomically after every
//! change, with a rolling set of backups and a JSON-lines audit trail. On top
//! of the store sit pure reports: overall statistics, category breakdowns,
//! monthly trends, the largest expenses and a monthly budget check.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money, months)
//! - `storage`: CSV table storage with ID sequence and rollback
//! - `backup`: Automatic backup management
//! - `audit`: Change history behind `ledger history`
//! - `services`: Business logic layer
//! - `reports`: Aggregates, the summary report and chart series
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::{LedgerPaths, Settings};
//! use expense_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, settings.backup_retention)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
