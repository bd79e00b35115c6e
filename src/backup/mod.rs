//! Backup system for the expense ledger
//!
//! Provides rolling backups of the expense table.
//!
//! # Backup Format
//!
//! A backup is a byte-for-byte copy of `expenses.csv` taken just before the
//! table is overwritten, named `expenses_backup_YYYYMMDD_HHMMSS_ffffff.csv`.
//!
//! # Retention Policy
//!
//! The newest 5 backups are kept by default (`backup_retention` in the
//! settings file); older ones are deleted after each new backup.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::backup::BackupManager;
//! use expense_ledger::config::LedgerPaths;
//!
//! let paths = LedgerPaths::new()?;
//! let manager = BackupManager::new(&paths, 5);
//! let (created, pruned) = manager.create_backup_with_retention()?;
//! ```

mod manager;

pub use manager::{BackupInfo, BackupManager};
