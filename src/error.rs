//! Custom error types for the expense ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every failure is scoped to the single
//! operation that produced it; none of these errors leaves the store unusable.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Malformed or out-of-range input (bad date, non-positive amount,
    /// unknown category, inverted range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Backup, sequence or table write failed; in-memory state was rolled back
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV encoding/decoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
