//! Storage layer for the expense ledger
//!
//! The expense table is a CSV file rewritten atomically on every mutation,
//! with a JSON sidecar holding the ID high-water mark. `Storage` ties the
//! table to the change history.

pub mod expenses;
pub mod file_io;

pub use expenses::{ExpenseStore, TABLE_DATE_FORMAT, TABLE_HEADER};
pub use file_io::{read_json, write_atomic, write_json_atomic};

use crate::audit::{AuditEntry, AuditLogger, Subject};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;

/// Main storage coordinator
pub struct Storage {
    paths: LedgerPaths,
    pub expenses: ExpenseStore,
    audit: AuditLogger,
}

impl Storage {
    /// Open storage under `paths`, creating directories and loading the table
    pub fn open(paths: LedgerPaths, backup_retention: usize) -> LedgerResult<Self> {
        let expenses = ExpenseStore::open(&paths, backup_retention)?;
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            expenses,
            audit,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Recorded changes, oldest first; see `AuditLogger::history`
    pub fn history(
        &self,
        subject: Option<Subject>,
        limit: Option<usize>,
    ) -> LedgerResult<Vec<AuditEntry>> {
        self.audit.history(subject, limit)
    }

    /// Append a history entry once a change is durable
    ///
    /// Failures are logged, not returned.
    pub fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.append(&entry) {
            log::warn!(
                "Could not record {} of {} in history: {}",
                entry.action,
                entry.subject,
                e
            );
        }
    }
}
